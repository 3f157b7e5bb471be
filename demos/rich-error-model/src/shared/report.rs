//! Human readable reports of a failed call, as printed by the demo client.

use rama_grpc_rich_error::{
    Code, Status,
    protobuf::{
        prost::types::Any,
        types::{AnyExt, RpcStatusExt, StatusExt, pb},
    },
};

/// Describe a status expected to carry an `ErrorInfo` and a `RequestInfo`.
#[must_use]
pub fn describe_simple_error(status: &Status) -> Vec<String> {
    let mut lines = vec![format!("Status: {:?} : {}", status.code(), status.message())];

    let Some(rpc_status) = status.get_rpc_status() else {
        lines.push("No Rich Error information found.".to_owned());
        return lines;
    };

    lines.push("Rich Error information found.".to_owned());
    lines.push(format!(
        "Rpc status: {:?} : {}",
        Code::from(rpc_status.code),
        rpc_status.message
    ));

    if let Some(error_info) = rpc_status.get_details_error_info() {
        lines.push(format!(
            "  ErrorInfo reason: {}, domain: {}",
            error_info.reason, error_info.domain
        ));
        let mut keys: Vec<_> = error_info.metadata.keys().collect();
        keys.sort();
        for key in keys {
            lines.push(format!(
                "    metadata {key}: {}",
                error_info.metadata[key]
            ));
        }
    }
    if let Some(request_info) = rpc_status.get_details_request_info() {
        lines.push(format!(
            "  RequestInfo request id: {}, serving data: {}",
            request_info.request_id, request_info.serving_data
        ));
    }

    lines
}

/// Describe every detail of a status, dispatching on the type URL.
#[must_use]
pub fn describe_status_details(status: &Status) -> Vec<String> {
    let mut lines = vec![format!("Status: {:?} : {}", status.code(), status.message())];

    match status.get_rpc_status() {
        Some(rpc_status) => lines.extend(rpc_status.details.iter().map(describe_detail)),
        None => lines.push("No Rich Error information found.".to_owned()),
    }

    lines
}

fn describe_detail(any: &Any) -> String {
    let url = any.type_url.as_str();
    let described = if any.is::<pb::ErrorInfo>() {
        any.safe_unpack::<pb::ErrorInfo>().map(|info| {
            let mut metadata: Vec<_> = info
                .metadata
                .iter()
                .map(|(key, value)| format!("{key}={value}"))
                .collect();
            metadata.sort();
            format!(
                "ErrorInfo reason: {}, domain: {}, metadata: [{}]",
                info.reason,
                info.domain,
                metadata.join(", ")
            )
        })
    } else if any.is::<pb::RetryInfo>() {
        any.safe_unpack::<pb::RetryInfo>().map(|retry| match retry.retry_delay {
            Some(delay) => format!("RetryInfo retry delay: {delay}"),
            None => "RetryInfo without retry delay".to_owned(),
        })
    } else if any.is::<pb::DebugInfo>() {
        any.safe_unpack::<pb::DebugInfo>().map(|debug| {
            format!(
                "DebugInfo detail: {}, stack entries: {}",
                debug.detail,
                debug.stack_entries.len()
            )
        })
    } else if any.is::<pb::QuotaFailure>() {
        any.safe_unpack::<pb::QuotaFailure>().map(|quota| {
            let violations: Vec<_> = quota
                .violations
                .iter()
                .map(|v| format!("{}: {}", v.subject, v.description))
                .collect();
            format!("QuotaFailure violations: [{}]", violations.join(", "))
        })
    } else if any.is::<pb::PreconditionFailure>() {
        any.safe_unpack::<pb::PreconditionFailure>().map(|failure| {
            let violations: Vec<_> = failure
                .violations
                .iter()
                .map(|v| format!("{} {}: {}", v.r#type, v.subject, v.description))
                .collect();
            format!("PreconditionFailure violations: [{}]", violations.join(", "))
        })
    } else if any.is::<pb::BadRequest>() {
        any.safe_unpack::<pb::BadRequest>().map(|bad_request| {
            let violations: Vec<_> = bad_request
                .field_violations
                .iter()
                .map(|v| format!("{}: {}", v.field, v.description))
                .collect();
            format!("BadRequest field violations: [{}]", violations.join(", "))
        })
    } else if any.is::<pb::RequestInfo>() {
        any.safe_unpack::<pb::RequestInfo>().map(|info| {
            format!(
                "RequestInfo request id: {}, serving data: {}",
                info.request_id, info.serving_data
            )
        })
    } else if any.is::<pb::ResourceInfo>() {
        any.safe_unpack::<pb::ResourceInfo>().map(|info| {
            format!(
                "ResourceInfo {} {} owned by {}: {}",
                info.resource_type, info.resource_name, info.owner, info.description
            )
        })
    } else if any.is::<pb::Help>() {
        any.safe_unpack::<pb::Help>().map(|help| {
            let links: Vec<_> = help
                .links
                .iter()
                .map(|link| format!("{} <{}>", link.description, link.url))
                .collect();
            format!("Help links: [{}]", links.join(", "))
        })
    } else if any.is::<pb::LocalizedMessage>() {
        any.safe_unpack::<pb::LocalizedMessage>()
            .map(|message| format!("LocalizedMessage {}: {}", message.locale, message.message))
    } else {
        return format!("Unknown type URL: {url}");
    };

    described.unwrap_or_else(|| format!("Malformed detail for type URL: {url}"))
}

#[cfg(test)]
mod tests {
    use rama_grpc_rich_error::{details, protobuf::prost::types::Duration};

    use super::*;
    use crate::server::{complex_error_status, simple_error_status};

    #[test]
    fn simple_error_report() {
        let lines = describe_simple_error(&Status::from_rpc_status(simple_error_status()));
        assert_eq!(
            lines,
            [
                "Status: NotFound : Simple error message",
                "Rich Error information found.",
                "Rpc status: NotFound : Simple error message",
                "  ErrorInfo reason: Simple error requested in the demo, domain: Rich Error Model Demo",
                "  RequestInfo request id: EchoRequest, serving data: Param: SimpleError",
            ]
        );
    }

    #[test]
    fn plain_status_has_no_rich_information() {
        let lines = describe_simple_error(&Status::not_found("gone"));
        assert_eq!(lines[1], "No Rich Error information found.");

        let lines = describe_status_details(&Status::not_found("gone"));
        assert_eq!(lines[1], "No Rich Error information found.");
    }

    #[test]
    fn complex_error_report_lists_every_detail() {
        let lines = describe_status_details(&Status::from_rpc_status(complex_error_status()));
        assert_eq!(
            lines,
            [
                "Status: ResourceExhausted : Demo error - resource exhausted",
                "ErrorInfo reason: Complex error requested in the demo, domain: Rich Error Model Demo, metadata: [key1=value1, key2=value2]",
                "RetryInfo retry delay: 5s",
                "QuotaFailure violations: [Disk23: Too much disk space used]",
                "LocalizedMessage en-GB: Example localised error message",
            ]
        );
    }

    #[test]
    fn unknown_and_malformed_details_are_reported() {
        let mut details = details![pb::RetryInfo {
            retry_delay: Some(Duration {
                seconds: 1,
                nanos: 0,
            }),
        }];
        details.push(Any {
            type_url: "type.googleapis.com/demo.Unknown".to_owned(),
            value: vec![1, 2, 3],
        });
        details.push(Any {
            type_url: "type.googleapis.com/google.rpc.ErrorInfo".to_owned(),
            value: vec![0xff],
        });

        let status = Status::from_rpc_status(pb::Status {
            code: Code::Internal as i32,
            message: "mixed".to_owned(),
            details,
        });
        let lines = describe_status_details(&status);
        assert_eq!(lines[1], "RetryInfo retry delay: 1s");
        assert_eq!(lines[2], "Unknown type URL: type.googleapis.com/demo.Unknown");
        assert_eq!(
            lines[3],
            "Malformed detail for type URL: type.googleapis.com/google.rpc.ErrorInfo"
        );
    }

    #[test]
    fn foreign_type_url_host_is_dispatched_by_name() {
        let mut localized = details![pb::LocalizedMessage {
            locale: "en-GB".to_owned(),
            message: "hello".to_owned(),
        }];
        localized[0].type_url = "example.com/google.rpc.LocalizedMessage".to_owned();

        let status = Status::from_rpc_status(pb::Status {
            code: Code::Internal as i32,
            message: "foreign".to_owned(),
            details: localized,
        });
        assert_eq!(
            describe_status_details(&status)[1],
            "LocalizedMessage en-GB: hello"
        );
    }
}
