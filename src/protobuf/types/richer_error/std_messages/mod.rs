use crate::protobuf::prost::{DecodeError, Message, types::Any};

mod bad_request;
mod debug_info;
mod error_info;
mod help;
mod loc_message;
mod prec_failure;
mod quota_failure;
mod request_info;
mod resource_info;
mod retry_info;

pub use bad_request::{BadRequest, FieldViolation};
pub use debug_info::DebugInfo;
pub use error_info::ErrorInfo;
pub use help::{Help, HelpLink};
pub use loc_message::LocalizedMessage;
pub use prec_failure::{PreconditionFailure, PreconditionViolation};
pub use quota_failure::{QuotaFailure, QuotaViolation};
pub use request_info::RequestInfo;
pub use resource_info::ResourceInfo;
pub use retry_info::RetryInfo;

/// Wraps the encoding of a wire message into an [`Any`] under `type_url`.
fn encode_any(type_url: &str, message: &impl Message) -> Any {
    Any {
        type_url: type_url.to_owned(),
        value: message.encode_to_vec(),
    }
}

/// Decodes the payload of an [`Any`], ignoring its type URL.
fn decode_any<M: Message + Default>(any: &Any) -> Result<M, DecodeError> {
    M::decode(any.value.as_slice())
}
