//! # rama-grpc-rich-error
//!
//! Support for the gRPC [richer error model] on top of a plain gRPC
//! [`Status`].
//!
//! A failed call can carry more than a code and a message: a list of typed
//! error details (retry hints, quota violations, localized messages, ...)
//! packed as `google.protobuf.Any` into a `google.rpc.Status`, which travels
//! base64 encoded in the `grpc-status-details-bin` trailer.
//!
//! This crate provides:
//!
//! - [`Status`], [`Code`] and [`metadata::MetadataMap`], including the
//!   conversion from and to trailers ([`Status::from_header_map`],
//!   [`Status::to_header_map`]);
//! - the `google.rpc` messages in [`protobuf::types::pb`] and ergonomic
//!   counterparts such as [`protobuf::types::ErrorInfo`];
//! - [`protobuf::types::AnyExt`] to pack and safely unpack `Any` values, and
//!   the [`details!`] macro to build detail lists;
//! - [`protobuf::types::StatusExt`] to turn a `google.rpc.Status` into a
//!   [`Status`] and to read it back.
//!
//! ```rust
//! use rama_grpc_rich_error::{
//!     Code, Status, details,
//!     protobuf::types::{AnyExt, StatusExt, pb},
//! };
//!
//! let status = Status::from_rpc_status(pb::Status {
//!     code: Code::NotFound as i32,
//!     message: "Simple error message".to_owned(),
//!     details: details![pb::RequestInfo {
//!         request_id: "EchoRequest".to_owned(),
//!         serving_data: "Param: SimpleError".to_owned(),
//!     }],
//! });
//!
//! // what the receiving side sees
//! let trailers = status.to_header_map().unwrap();
//! let received = Status::from_header_map(&trailers).unwrap();
//!
//! let rpc_status = received.get_rpc_status().unwrap();
//! assert_eq!(rpc_status.message, "Simple error message");
//! let request_info = rpc_status.details[0].safe_unpack::<pb::RequestInfo>().unwrap();
//! assert_eq!(request_info.serving_data, "Param: SimpleError");
//! ```
//!
//! ## Rama
//!
//! Learn more about `rama`:
//!
//! - Github: <https://github.com/plabayo/rama>
//! - Book: <https://ramaproxy.org/book/>
//!
//! [richer error model]: https://grpc.io/docs/guides/error/#richer-error-model

#![doc(
    html_favicon_url = "https://raw.githubusercontent.com/plabayo/rama/main/docs/img/old_logo.png"
)]
#![doc(html_logo_url = "https://raw.githubusercontent.com/plabayo/rama/main/docs/img/old_logo.png")]
#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(
    not(test),
    warn(clippy::print_stdout, clippy::dbg_macro),
    deny(clippy::unwrap_used, clippy::expect_used)
)]
#![allow(clippy::disallowed_types)] // for interfacing with protobuf it is easier to allow things like std HashMap

pub mod metadata;
pub mod protobuf;

mod macros;
mod status;
mod util;

pub use status::{Code, Status};

/// `Result` is a type that represents either success ([`Ok`]) or failure ([`Err`]).
/// By default, the Err value is of type [`Status`] but this can be overridden if desired.
pub type Result<T, E = Status> = std::result::Result<T, E>;
