use std::collections::HashMap;

use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used to encode/decode the `ErrorInfo` standard error message described in
/// [error_details.proto]. Describes the cause of the error with structured
/// details.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ErrorInfo {
    /// Reason of the error. Should be a constant value that identifies the
    /// proximate cause of the error. Error reasons should be unique within a
    /// particular domain of errors.
    pub reason: String,

    /// Logical grouping to which the "reason" belongs. Normally is the
    /// registered name of the service that generates the error.
    pub domain: String,

    /// Additional structured details about this error. Keys should match
    /// `/[a-zA-Z0-9-_]/` and be limited to 64 characters in length.
    pub metadata: HashMap<String, String>,
}

impl ErrorInfo {
    /// Type URL of the `ErrorInfo` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.ErrorInfo";

    /// Creates a new [`ErrorInfo`] struct.
    pub fn new(
        reason: impl Into<String>,
        domain: impl Into<String>,
        metadata: impl Into<HashMap<String, String>>,
    ) -> Self {
        Self {
            reason: reason.into(),
            domain: domain.into(),
            metadata: metadata.into(),
        }
    }

    /// Returns `true` if [`ErrorInfo`] fields are empty, and `false` if they
    /// are not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.reason.is_empty() && self.domain.is_empty() && self.metadata.is_empty()
    }
}

impl From<pb::ErrorInfo> for ErrorInfo {
    fn from(error_info: pb::ErrorInfo) -> Self {
        Self {
            reason: error_info.reason,
            domain: error_info.domain,
            metadata: error_info.metadata,
        }
    }
}

impl From<ErrorInfo> for pb::ErrorInfo {
    fn from(error_info: ErrorInfo) -> Self {
        Self {
            reason: error_info.reason,
            domain: error_info.domain,
            metadata: error_info.metadata,
        }
    }
}

impl IntoAny for ErrorInfo {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::ErrorInfo::from(self))
    }
}

impl FromAnyRef for ErrorInfo {
    const TYPE_URL: &'static str = ErrorInfo::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::ErrorInfo>(any).map(Into::into)
    }
}
