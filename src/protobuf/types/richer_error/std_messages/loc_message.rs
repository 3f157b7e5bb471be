use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used to encode/decode the `LocalizedMessage` standard error message
/// described in [error_details.proto]. Provides a localized error message
/// that is safe to return to the user.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LocalizedMessage {
    /// Locale used, following the specification defined in [BCP 47]. For
    /// example: "en-US", "fr-CH" or "es-MX".
    ///
    /// [BCP 47]: http://www.rfc-editor.org/rfc/bcp/bcp47.txt
    pub locale: String,

    /// Message corresponding to the locale.
    pub message: String,
}

impl LocalizedMessage {
    /// Type URL of the `LocalizedMessage` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.LocalizedMessage";

    /// Creates a new [`LocalizedMessage`] struct.
    pub fn new(locale: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            locale: locale.into(),
            message: message.into(),
        }
    }

    /// Returns `true` if both `locale` and `message` are empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.locale.is_empty() && self.message.is_empty()
    }
}

impl From<pb::LocalizedMessage> for LocalizedMessage {
    fn from(loc_message: pb::LocalizedMessage) -> Self {
        Self::new(loc_message.locale, loc_message.message)
    }
}

impl From<LocalizedMessage> for pb::LocalizedMessage {
    fn from(loc_message: LocalizedMessage) -> Self {
        Self {
            locale: loc_message.locale,
            message: loc_message.message,
        }
    }
}

impl IntoAny for LocalizedMessage {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::LocalizedMessage::from(self))
    }
}

impl FromAnyRef for LocalizedMessage {
    const TYPE_URL: &'static str = LocalizedMessage::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::LocalizedMessage>(any).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_localized_message() {
        let loc_message = LocalizedMessage::new("en-GB", "Example localised error message");
        let gen_any = loc_message.clone().into_any();

        assert_eq!(
            gen_any.type_url,
            "type.googleapis.com/google.rpc.LocalizedMessage"
        );
        assert_eq!(LocalizedMessage::from_any_ref(&gen_any).unwrap(), loc_message);
    }
}
