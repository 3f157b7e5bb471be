use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used to encode/decode the `DebugInfo` standard error message described in
/// [error_details.proto]. Describes additional debugging info.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DebugInfo {
    /// Stack trace entries indicating where the error occurred.
    pub stack_entries: Vec<String>,

    /// Additional debugging information provided by the server.
    pub detail: String,
}

impl DebugInfo {
    /// Type URL of the `DebugInfo` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.DebugInfo";

    /// Creates a new [`DebugInfo`] struct.
    pub fn new(stack_entries: impl Into<Vec<String>>, detail: impl Into<String>) -> Self {
        Self {
            stack_entries: stack_entries.into(),
            detail: detail.into(),
        }
    }

    /// Returns `true` if [`DebugInfo`] fields are empty, and `false` if they
    /// are not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.stack_entries.is_empty() && self.detail.is_empty()
    }
}

impl From<pb::DebugInfo> for DebugInfo {
    fn from(debug_info: pb::DebugInfo) -> Self {
        Self {
            stack_entries: debug_info.stack_entries,
            detail: debug_info.detail,
        }
    }
}

impl From<DebugInfo> for pb::DebugInfo {
    fn from(debug_info: DebugInfo) -> Self {
        Self {
            stack_entries: debug_info.stack_entries,
            detail: debug_info.detail,
        }
    }
}

impl IntoAny for DebugInfo {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::DebugInfo::from(self))
    }
}

impl FromAnyRef for DebugInfo {
    const TYPE_URL: &'static str = DebugInfo::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::DebugInfo>(any).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_debug_info() {
        let debug_info = DebugInfo::new(
            vec!["trace 3".into(), "trace 2".into(), "trace 1".into()],
            "details about the error",
        );
        assert!(!debug_info.is_empty());

        let gen_any = debug_info.clone().into_any();
        assert_eq!(gen_any.type_url, "type.googleapis.com/google.rpc.DebugInfo");
        assert_eq!(DebugInfo::from_any_ref(&gen_any).unwrap(), debug_info);

        assert!(DebugInfo::new(Vec::new(), "").is_empty());
    }
}
