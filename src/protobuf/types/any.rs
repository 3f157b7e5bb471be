use crate::protobuf::{
    prost::{DecodeError, Message, Name, types::Any},
    types::sealed,
};

/// Pack and unpack typed messages into and out of the generic [`Any`]
/// container.
///
/// The type URL of a message is the one reported by its [`Name`]
/// implementation, e.g. `type.googleapis.com/google.rpc.ErrorInfo`.
///
/// This trait is sealed and not meant to be implemented outside of this
/// crate.
pub trait AnyExt: sealed::Sealed {
    /// Encode `message` into an [`Any`] tagged with its type URL.
    fn pack<M: Message + Name>(message: &M) -> Any;

    /// Decode the payload as `M`.
    ///
    /// Returns `None` when the type URL is not the one of `M`, or when the
    /// payload does not decode as `M`. Never panics, whatever the input.
    fn safe_unpack<M: Message + Name + Default>(&self) -> Option<M>;

    /// Strict counterpart of [`AnyExt::safe_unpack`], reporting why
    /// unpacking failed. A type URL mismatch is reported as a
    /// [`DecodeError`] as well.
    fn try_unpack<M: Message + Name + Default>(&self) -> Result<M, DecodeError>;

    /// Returns `true` if the type URL names `M`. The payload is not
    /// inspected.
    ///
    /// Only the full message name after the last `/` is compared, the same
    /// rule [`AnyExt::safe_unpack`] applies, so any host prefix is accepted.
    fn is<M: Name>(&self) -> bool;
}

impl sealed::Sealed for Any {}

impl AnyExt for Any {
    fn pack<M: Message + Name>(message: &M) -> Self {
        Self {
            type_url: M::type_url(),
            value: message.encode_to_vec(),
        }
    }

    fn safe_unpack<M: Message + Name + Default>(&self) -> Option<M> {
        match self.try_unpack() {
            Ok(message) => Some(message),
            Err(err) => {
                tracing::debug!(type_url = %self.type_url, "unpack any: {err}");
                None
            }
        }
    }

    fn try_unpack<M: Message + Name + Default>(&self) -> Result<M, DecodeError> {
        self.to_msg()
    }

    fn is<M: Name>(&self) -> bool {
        type_url_matches(&self.type_url, &M::type_url())
    }
}

/// The full message name of a type URL: whatever follows the last `/`.
///
/// `None` when there is no `/` or the name starts with a `.`.
fn full_name(type_url: &str) -> Option<&str> {
    let (_, name) = type_url.rsplit_once('/')?;
    (!name.starts_with('.')).then_some(name)
}

/// Returns `true` if both type URLs name the same message.
///
/// Mirrors the check `prost_types::Any::to_msg` does before decoding, so
/// every lookup in this crate agrees with [`AnyExt::safe_unpack`].
pub(crate) fn type_url_matches(actual: &str, expected: &str) -> bool {
    match (full_name(actual), full_name(expected)) {
        (Some(actual), Some(expected)) => actual == expected,
        _ => false,
    }
}

/// Append typed messages to a list of [`Any`] details, packing them on the
/// way in.
///
/// ```rust
/// use rama_grpc_rich_error::protobuf::{prost::types::Any, types::{DetailsExt, pb}};
///
/// let mut details: Vec<Any> = Vec::new();
/// details
///     .add(&pb::LocalizedMessage {
///         locale: "en-GB".to_owned(),
///         message: "Example localised error message".to_owned(),
///     })
///     .add(&pb::RequestInfo::default());
/// assert_eq!(details.len(), 2);
/// ```
pub trait DetailsExt: sealed::Sealed {
    /// Pack `message` and append it, returning `self` for chaining.
    fn add<M: Message + Name>(&mut self, message: &M) -> &mut Self;
}

impl sealed::Sealed for Vec<Any> {}

impl DetailsExt for Vec<Any> {
    fn add<M: Message + Name>(&mut self, message: &M) -> &mut Self {
        self.push(Any::pack(message));
        self
    }
}

#[cfg(test)]
mod tests {
    use crate::protobuf::types::pb;

    use super::*;

    fn error_info() -> pb::ErrorInfo {
        pb::ErrorInfo {
            reason: "Simple error requested in the demo".to_owned(),
            domain: "Rich Error Model Demo".to_owned(),
            metadata: Default::default(),
        }
    }

    #[test]
    fn pack_then_unpack() {
        let any = Any::pack(&error_info());
        assert_eq!(any.type_url, "type.googleapis.com/google.rpc.ErrorInfo");
        assert!(any.is::<pb::ErrorInfo>());
        assert_eq!(any.safe_unpack::<pb::ErrorInfo>(), Some(error_info()));
    }

    #[test]
    fn type_mismatch_is_absent() {
        let any = Any::pack(&error_info());
        assert_eq!(any.safe_unpack::<pb::RequestInfo>(), None);
        assert!(any.try_unpack::<pb::RequestInfo>().is_err());
    }

    #[test]
    fn malformed_payload_is_absent() {
        let any = Any {
            type_url: pb::ErrorInfo::type_url(),
            value: vec![0xff, 0xff, 0xff, 0xff],
        };
        assert_eq!(any.safe_unpack::<pb::ErrorInfo>(), None);
    }

    #[test]
    fn empty_payload_unpacks_to_default() {
        let any = Any {
            type_url: pb::Help::type_url(),
            value: Vec::new(),
        };
        assert_eq!(any.safe_unpack::<pb::Help>(), Some(pb::Help::default()));
    }

    #[test]
    fn foreign_host_prefix_still_matches() {
        let any = Any {
            type_url: "example.com/google.rpc.ErrorInfo".to_owned(),
            value: error_info().encode_to_vec(),
        };
        assert!(any.is::<pb::ErrorInfo>());
        assert!(!any.is::<pb::RequestInfo>());
        assert_eq!(any.safe_unpack::<pb::ErrorInfo>(), Some(error_info()));
    }

    #[test]
    fn type_url_matching_rules() {
        let expected = "type.googleapis.com/google.rpc.ErrorInfo";
        assert!(type_url_matches(expected, expected));
        assert!(type_url_matches("/google.rpc.ErrorInfo", expected));
        assert!(type_url_matches("a/b/google.rpc.ErrorInfo", expected));
        assert!(!type_url_matches("google.rpc.ErrorInfo", expected));
        assert!(!type_url_matches("example.com/.google.rpc.ErrorInfo", expected));
        assert!(!type_url_matches("example.com/google.rpc.ErrorInf", expected));
        assert!(!type_url_matches("", expected));
    }

    #[test]
    fn add_appends_in_order() {
        let mut details: Vec<Any> = Vec::new();
        details
            .add(&error_info())
            .add(&pb::RetryInfo::default())
            .add(&error_info());

        let urls: Vec<_> = details.iter().map(|d| d.type_url.as_str()).collect();
        assert_eq!(
            urls,
            [
                "type.googleapis.com/google.rpc.ErrorInfo",
                "type.googleapis.com/google.rpc.RetryInfo",
                "type.googleapis.com/google.rpc.ErrorInfo",
            ]
        );
    }
}
