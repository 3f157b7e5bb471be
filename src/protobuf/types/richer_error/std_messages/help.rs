use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used at the `links` field of the [`Help`] struct. Describes a URL link.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct HelpLink {
    /// Description of what the link offers.
    pub description: String,

    /// URL of the link.
    pub url: String,
}

impl HelpLink {
    /// Creates a new [`HelpLink`] struct.
    pub fn new(description: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            description: description.into(),
            url: url.into(),
        }
    }
}

impl From<pb::help::Link> for HelpLink {
    fn from(link: pb::help::Link) -> Self {
        Self::new(link.description, link.url)
    }
}

impl From<HelpLink> for pb::help::Link {
    fn from(link: HelpLink) -> Self {
        Self {
            description: link.description,
            url: link.url,
        }
    }
}

/// Used to encode/decode the `Help` standard error message described in
/// [error_details.proto]. Provides links to documentation or for performing
/// an out-of-band action.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Help {
    /// Links pointing to additional information on how to handle the error.
    pub links: Vec<HelpLink>,
}

impl Help {
    /// Type URL of the `Help` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.Help";

    /// Creates a new [`Help`] struct.
    pub fn new(links: impl Into<Vec<HelpLink>>) -> Self {
        Self {
            links: links.into(),
        }
    }

    /// Creates a new [`Help`] struct with a single [`HelpLink`] in `links`.
    pub fn with_link(description: impl Into<String>, url: impl Into<String>) -> Self {
        Self::new(vec![HelpLink::new(description, url)])
    }

    /// Adds a [`HelpLink`] to [`Help`]'s `links` vector.
    pub fn add_link(
        &mut self,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> &mut Self {
        self.links.push(HelpLink::new(description, url));
        self
    }

    /// Returns `true` if [`Help`]'s `links` vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

impl From<pb::Help> for Help {
    fn from(help: pb::Help) -> Self {
        Self::new(help.links.into_iter().map(HelpLink::from).collect::<Vec<_>>())
    }
}

impl From<Help> for pb::Help {
    fn from(help: Help) -> Self {
        Self {
            links: help.links.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoAny for Help {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::Help::from(self))
    }
}

impl FromAnyRef for Help {
    const TYPE_URL: &'static str = Help::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::Help>(any).map(Into::into)
    }
}
