use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used to encode/decode the `RequestInfo` standard error message described
/// in [error_details.proto]. Contains metadata about the request that
/// clients can attach when providing feedback.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RequestInfo {
    /// An opaque string that should only be interpreted by the service that
    /// generated it.
    pub request_id: String,

    /// Any data used to serve this request.
    pub serving_data: String,
}

impl RequestInfo {
    /// Type URL of the `RequestInfo` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.RequestInfo";

    /// Creates a new [`RequestInfo`] struct.
    pub fn new(request_id: impl Into<String>, serving_data: impl Into<String>) -> Self {
        Self {
            request_id: request_id.into(),
            serving_data: serving_data.into(),
        }
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.request_id.is_empty() && self.serving_data.is_empty()
    }
}

impl From<pb::RequestInfo> for RequestInfo {
    fn from(req_info: pb::RequestInfo) -> Self {
        Self::new(req_info.request_id, req_info.serving_data)
    }
}

impl From<RequestInfo> for pb::RequestInfo {
    fn from(req_info: RequestInfo) -> Self {
        Self {
            request_id: req_info.request_id,
            serving_data: req_info.serving_data,
        }
    }
}

impl IntoAny for RequestInfo {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::RequestInfo::from(self))
    }
}

impl FromAnyRef for RequestInfo {
    const TYPE_URL: &'static str = RequestInfo::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::RequestInfo>(any).map(Into::into)
    }
}
