//! Client side helpers around the generated gRPC client.

use rama::http::grpc;
use rama_grpc_rich_error::Status;

pub use crate::proto::rich_error_model_demo_client::RichErrorModelDemoClient;
use crate::{
    proto::{Action, DemoRequest, DemoResponse},
    status::from_grpc_status,
};

/// Build the request of an `EchoRequest` call.
#[must_use]
pub fn demo_request(message: impl Into<String>, action: Action) -> DemoRequest {
    DemoRequest {
        message: message.into(),
        action: action.into(),
    }
}

/// Unwrap the outcome of an `EchoRequest` call.
///
/// A failed call yields the [`Status`] rebuilt from its trailers, so any
/// rich error details it carries are available to the caller.
pub fn into_reply(
    result: Result<grpc::Response<DemoResponse>, grpc::Status>,
) -> Result<DemoResponse, Status> {
    match result {
        Ok(response) => Ok(response.into_inner()),
        Err(status) => {
            tracing::debug!(code = ?status.code(), "echo request failed");
            Err(from_grpc_status(&status))
        }
    }
}

#[cfg(test)]
mod tests {
    use rama_grpc_rich_error::{Code, protobuf::types::StatusExt};

    use super::*;
    use crate::{server::simple_error_status, status::to_grpc_status};

    #[test]
    fn request_carries_the_action() {
        let request = demo_request("second message", Action::SimpleError);
        assert_eq!(request.message, "second message");
        assert_eq!(request.action(), Action::SimpleError);
    }

    #[test]
    fn successful_reply_is_unwrapped() {
        let reply = into_reply(Ok(grpc::Response::new(DemoResponse {
            echoed_message: "ECHO hi".to_owned(),
        })))
        .unwrap();
        assert_eq!(reply.echoed_message, "ECHO hi");
    }

    #[test]
    fn failed_reply_keeps_rich_details() {
        let sent = Status::from_rpc_status(simple_error_status());
        let status = into_reply(Err(to_grpc_status(&sent))).unwrap_err();
        assert_eq!(status.code(), Code::NotFound);
        assert!(status.get_details_error_info().is_some());
        assert!(status.get_details_request_info().is_some());
    }
}
