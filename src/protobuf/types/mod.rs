//! Rich error model types and helpers.
//!
//! - [`pb`] holds the `google.rpc` wire messages;
//! - [`AnyExt`] and [`DetailsExt`] pack typed messages into [`Any`] and
//!   safely unpack them again;
//! - [`StatusExt`] converts between a [`crate::Status`] and the
//!   `google.rpc.Status` carried in its `grpc-status-details-bin` trailer,
//!   [`RpcStatusExt`] reads typed details out of the latter.
//!
//! [`Any`]: crate::protobuf::prost::types::Any

pub mod pb;

mod any;
mod richer_error;

pub use any::{AnyExt, DetailsExt};
pub use richer_error::{
    BadRequest, DebugInfo, ErrorDetail, ErrorDetails, ErrorInfo, FieldViolation, Help, HelpLink,
    LocalizedMessage, PreconditionFailure, PreconditionViolation, QuotaFailure, QuotaViolation,
    RequestInfo, ResourceInfo, RetryInfo, RpcStatusExt, StatusExt,
};

mod sealed {
    pub trait Sealed {}
}
