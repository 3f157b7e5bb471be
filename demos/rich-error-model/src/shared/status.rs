//! Bridge between [`Status`] and the status type of rama's gRPC stack.
//!
//! Both directions go through the trailer encoding, so the
//! `grpc-status-details-bin` bytes cross over untouched.

use rama::http::{HeaderMap, grpc};
use rama_grpc_rich_error::Status;

/// Convert a rich [`Status`] into the status a rama gRPC service returns.
#[must_use]
pub fn to_grpc_status(status: &Status) -> grpc::Status {
    let mut trailers = HeaderMap::new();
    if let Err(err) = status.add_header(&mut trailers) {
        tracing::warn!("failed to encode status trailers: {err}");
        return grpc::Status::internal(format!("encode status trailers: {err}"));
    }

    grpc::Status::from_header_map(&trailers)
        .unwrap_or_else(|| grpc::Status::internal("status trailers without grpc-status"))
}

/// Rebuild the rich [`Status`] out of a status received from a rama gRPC
/// client.
#[must_use]
pub fn from_grpc_status(status: &grpc::Status) -> Status {
    let mut trailers = HeaderMap::new();
    if let Err(err) = status.add_header(&mut trailers) {
        tracing::warn!("failed to encode received status: {err}");
        return Status::internal(format!("decode received status: {err}"));
    }

    Status::from_header_map(&trailers)
        .unwrap_or_else(|| Status::internal("status trailers without grpc-status"))
}

#[cfg(test)]
mod tests {
    use rama_grpc_rich_error::{
        Code,
        protobuf::types::{RpcStatusExt, StatusExt},
    };

    use super::*;
    use crate::server::{complex_error_status, simple_error_status};

    #[test]
    fn details_cross_both_ways() {
        let status = Status::from_rpc_status(complex_error_status());

        let grpc_status = to_grpc_status(&status);
        assert_eq!(grpc_status.code() as i32, Code::ResourceExhausted as i32);
        assert_eq!(grpc_status.message(), "Demo error - resource exhausted");
        assert_eq!(grpc_status.details(), status.details());

        let received = from_grpc_status(&grpc_status);
        assert_eq!(received.code(), Code::ResourceExhausted);
        assert_eq!(received.details(), status.details());
        assert_eq!(
            received.get_error_details_vec(),
            complex_error_status().get_error_details_vec()
        );
    }

    #[test]
    fn plain_status_stays_plain() {
        let grpc_status = to_grpc_status(&Status::not_found("gone"));
        assert!(grpc_status.details().is_empty());

        let received = from_grpc_status(&grpc_status);
        assert_eq!(received.code(), Code::NotFound);
        assert_eq!(received.message(), "gone");
        assert_eq!(received.get_rpc_status(), None);
    }

    #[test]
    fn received_status_keeps_the_message() {
        let grpc_status = to_grpc_status(&Status::from_rpc_status(simple_error_status()));
        let received = from_grpc_status(&grpc_status);
        assert_eq!(received.message(), "Simple error message");
        assert_eq!(
            received.get_details_request_info().map(|info| info.request_id),
            Some("EchoRequest".to_owned())
        );
    }
}
