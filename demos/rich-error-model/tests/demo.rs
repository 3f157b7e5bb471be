use std::net::SocketAddr;

use rama::{
    http::{Uri, client::EasyHttpWebClient},
    rt::Executor,
    tcp::server::TcpListener,
};
use rama_grpc_rich_error::{
    Code,
    protobuf::types::{ErrorDetail, RpcStatusExt, StatusExt},
};
use rama_grpc_rich_error_demos::{
    client::{RichErrorModelDemoClient, demo_request, into_reply},
    proto::Action,
    report::{describe_simple_error, describe_status_details},
    server::{RichErrorModelDemoService, complex_error_status, simple_error_status},
};

static_assertions::assert_impl_all!(RichErrorModelDemoService: Send, Sync, Clone);

async fn spawn_server() -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0", Executor::default())
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(RichErrorModelDemoService::new().serve(listener, Executor::default()));
    addr
}

fn origin(addr: SocketAddr) -> Uri {
    format!("http://{addr}").parse().unwrap()
}

#[tokio::test]
#[tracing_test::traced_test]
async fn echo_call_succeeds_without_trailer() {
    let addr = spawn_server().await;
    let client = RichErrorModelDemoClient::new(EasyHttpWebClient::default(), origin(addr));

    let response = into_reply(
        client
            .echo_request(demo_request("first message", Action::Echo))
            .await,
    )
    .unwrap();
    assert_eq!(response.echoed_message, "ECHO first message");
}

#[tokio::test]
#[tracing_test::traced_test]
async fn simple_error_carries_error_and_request_info() {
    let addr = spawn_server().await;
    let client = RichErrorModelDemoClient::new(EasyHttpWebClient::default(), origin(addr));

    let status = into_reply(
        client
            .echo_request(demo_request("second message", Action::SimpleError))
            .await,
    )
    .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);
    assert_eq!(status.message(), "Simple error message");

    let rpc_status = status.get_rpc_status().unwrap();
    assert_eq!(rpc_status.code, Code::NotFound as i32);
    assert_eq!(rpc_status.message, "Simple error message");
    assert_eq!(
        rpc_status.get_error_details_vec(),
        simple_error_status().get_error_details_vec()
    );

    let error_info = status.get_details_error_info().unwrap();
    assert_eq!(error_info.domain, "Rich Error Model Demo");
    assert_eq!(error_info.reason, "Simple error requested in the demo");

    let lines = describe_simple_error(&status);
    assert_eq!(lines[1], "Rich Error information found.");
}

#[tokio::test]
#[tracing_test::traced_test]
async fn complex_error_carries_four_details() {
    let addr = spawn_server().await;
    let client = RichErrorModelDemoClient::new(EasyHttpWebClient::default(), origin(addr));

    let status = into_reply(
        client
            .echo_request(demo_request("third message", Action::ComplexError))
            .await,
    )
    .unwrap_err();
    assert_eq!(status.code(), Code::ResourceExhausted);

    // the ErrorInfo metadata map has no fixed encoding order, so compare
    // decoded details rather than the encoded google.rpc.Status
    let rpc_status = status.get_rpc_status().unwrap();
    let expected = complex_error_status();
    assert_eq!(rpc_status.code, expected.code);
    assert_eq!(rpc_status.message, expected.message);
    assert_eq!(
        rpc_status.get_error_details_vec(),
        expected.get_error_details_vec()
    );

    let details = status.check_error_details_vec().unwrap();
    assert_eq!(details.len(), 4);
    assert!(matches!(details[0], ErrorDetail::ErrorInfo(_)));
    assert!(matches!(details[1], ErrorDetail::RetryInfo(_)));
    assert!(matches!(details[2], ErrorDetail::QuotaFailure(_)));
    assert!(matches!(details[3], ErrorDetail::LocalizedMessage(_)));

    let lines = describe_status_details(&status);
    assert_eq!(lines.len(), 5);
    assert!(lines.iter().all(|line| !line.starts_with("Unknown type URL")));
}

#[tokio::test]
#[tracing_test::traced_test]
async fn one_client_issues_every_call() {
    let addr = spawn_server().await;
    let client = RichErrorModelDemoClient::new(EasyHttpWebClient::default(), origin(addr));

    let response = into_reply(
        client
            .echo_request(demo_request("first message", Action::Echo))
            .await,
    )
    .unwrap();
    assert_eq!(response.echoed_message, "ECHO first message");

    let status = into_reply(
        client
            .echo_request(demo_request("second message", Action::SimpleError))
            .await,
    )
    .unwrap_err();
    assert_eq!(status.code(), Code::NotFound);

    let status = into_reply(
        client
            .echo_request(demo_request("third message", Action::ComplexError))
            .await,
    )
    .unwrap_err();
    assert_eq!(status.code(), Code::ResourceExhausted);
}

#[tokio::test]
#[tracing_test::traced_test]
async fn unreachable_server_has_no_rich_details() {
    let listener = TcpListener::bind("127.0.0.1:0", Executor::default())
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let client = RichErrorModelDemoClient::new(EasyHttpWebClient::default(), origin(addr));
    let status = into_reply(
        client
            .echo_request(demo_request("first message", Action::Echo))
            .await,
    )
    .unwrap_err();
    assert_ne!(status.code(), Code::Ok);
    assert_eq!(status.get_rpc_status(), None);
}
