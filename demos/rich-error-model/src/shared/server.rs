//! The demo service and the gRPC server hosting it.

use std::collections::HashMap;

use rama::{
    error::{BoxError, ErrorContext as _},
    http::{grpc, server::HttpServer},
    rt::Executor,
    tcp::server::TcpListener,
};
use rama_grpc_rich_error::{
    Code, Status, details,
    protobuf::{
        prost::types::Duration,
        types::{StatusExt, pb},
    },
};

use crate::{
    proto::{
        Action, DemoRequest, DemoResponse,
        rich_error_model_demo_server::{RichErrorModelDemo, RichErrorModelDemoServer},
    },
    status::to_grpc_status,
};

const DOMAIN: &str = "Rich Error Model Demo";

/// The rich error model demo service.
///
/// Echoes messages back, or fails on demand with a status carrying rich
/// error details.
#[derive(Debug, Clone, Default)]
#[non_exhaustive]
pub struct RichErrorModelDemoService;

impl RichErrorModelDemoService {
    /// Create a new demo service.
    #[must_use]
    pub fn new() -> Self {
        Self
    }

    /// Handle a single `EchoRequest` call.
    pub fn handle(&self, request: &DemoRequest) -> Result<DemoResponse, Status> {
        let action = request.action();
        tracing::info!(action = action.as_str_name(), "echo request: {}", request.message);

        match action {
            Action::Echo => Ok(DemoResponse {
                echoed_message: format!("ECHO {}", request.message),
            }),
            Action::SimpleError => Err(Status::from_rpc_status(simple_error_status())),
            Action::ComplexError => Err(Status::from_rpc_status(complex_error_status())),
        }
    }

    /// Serve the demo over HTTP/2 on every connection `listener` accepts.
    pub async fn serve(self, listener: TcpListener, exec: Executor) -> Result<(), BoxError> {
        tracing::info!(
            "rich error model demo listening on {}",
            listener.local_addr().context("listener local address")?
        );

        let http_service = HttpServer::auto(exec).service(RichErrorModelDemoServer::new(self));
        listener.serve(http_service).await;
        Ok(())
    }
}

impl RichErrorModelDemo for RichErrorModelDemoService {
    async fn echo_request(
        &self,
        request: grpc::Request<DemoRequest>,
    ) -> Result<grpc::Response<DemoResponse>, grpc::Status> {
        self.handle(request.get_ref())
            .map(grpc::Response::new)
            .map_err(|status| to_grpc_status(&status))
    }
}

/// The `google.rpc.Status` returned for [`Action::SimpleError`].
#[must_use]
pub fn simple_error_status() -> pb::Status {
    pb::Status {
        code: Code::NotFound as i32,
        message: "Simple error message".to_owned(),
        details: details![
            pb::ErrorInfo {
                domain: DOMAIN.to_owned(),
                reason: "Simple error requested in the demo".to_owned(),
                metadata: HashMap::new(),
            },
            pb::RequestInfo {
                request_id: "EchoRequest".to_owned(),
                serving_data: "Param: SimpleError".to_owned(),
            },
        ],
    }
}

/// The `google.rpc.Status` returned for [`Action::ComplexError`].
#[must_use]
pub fn complex_error_status() -> pb::Status {
    pb::Status {
        code: Code::ResourceExhausted as i32,
        message: "Demo error - resource exhausted".to_owned(),
        details: details![
            pb::ErrorInfo {
                domain: DOMAIN.to_owned(),
                reason: "Complex error requested in the demo".to_owned(),
                metadata: HashMap::from([
                    ("key1".to_owned(), "value1".to_owned()),
                    ("key2".to_owned(), "value2".to_owned()),
                ]),
            },
            pb::RetryInfo {
                retry_delay: Some(Duration {
                    seconds: 5,
                    nanos: 0,
                }),
            },
            pb::QuotaFailure {
                violations: vec![pb::quota_failure::Violation {
                    subject: "Disk23".to_owned(),
                    description: "Too much disk space used".to_owned(),
                }],
            },
            pb::LocalizedMessage {
                locale: "en-GB".to_owned(),
                message: "Example localised error message".to_owned(),
            },
        ],
    }
}
