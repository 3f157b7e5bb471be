//! Shared by the richer error model demo client and server, and their tests.
//!
//! The demo is a plain gRPC service, `rem.example.RichErrorModelDemo`, served
//! and called through rama's generated gRPC code. A failed call carries its
//! rich error details in the `grpc-status-details-bin` trailer. The
//! [`status`] module moves a [`rama_grpc_rich_error::Status`] in and out of
//! the status type rama sends and receives.

#![allow(clippy::disallowed_types)] // for interfacing with protobuf it is easier to allow things like std HashMap

#[allow(clippy::all, clippy::use_self, clippy::return_self_not_must_use)]
pub mod proto {
    rama::http::grpc::include_proto!("rem.example");
}

pub mod client;
pub mod report;
pub mod server;
pub mod status;
pub mod trace;

/// Address both demo programs default to.
pub const DEFAULT_ADDRESS: &str = "127.0.0.1:30051";
