/// Build a `Vec<Any>` of error details from typed messages, list-literal
/// style.
///
/// Every expression must implement both [`prost::Message`] and
/// [`prost::Name`]; each one is packed under its own type URL, in order.
///
/// ```rust
/// use rama_grpc_rich_error::{details, protobuf::types::pb};
///
/// let details = details![
///     pb::ErrorInfo {
///         reason: "Simple error requested in the demo".to_owned(),
///         domain: "Rich Error Model Demo".to_owned(),
///         ..Default::default()
///     },
///     pb::RequestInfo {
///         request_id: "EchoRequest".to_owned(),
///         serving_data: "Param: SimpleError".to_owned(),
///     },
/// ];
///
/// assert_eq!(details.len(), 2);
/// assert_eq!(details[1].type_url, "type.googleapis.com/google.rpc.RequestInfo");
/// ```
///
/// [`prost::Message`]: crate::protobuf::prost::Message
/// [`prost::Name`]: crate::protobuf::prost::Name
#[macro_export]
macro_rules! details {
    () => {
        ::std::vec::Vec::<$crate::protobuf::prost::types::Any>::new()
    };
    ($($message:expr),+ $(,)?) => {{
        let mut details = ::std::vec::Vec::<$crate::protobuf::prost::types::Any>::new();
        $(
            $crate::protobuf::types::DetailsExt::add(&mut details, &$message);
        )+
        details
    }};
}

#[cfg(test)]
mod tests {
    use crate::protobuf::types::{AnyExt, pb};

    #[test]
    fn details_macro_packs_in_order() {
        let empty = details![];
        assert!(empty.is_empty());

        let details = details![
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
        ];

        assert_eq!(details.len(), 2);
        assert!(details[0].is::<pb::QuotaFailure>());
        assert_eq!(
            details[1].safe_unpack::<pb::LocalizedMessage>().unwrap().locale,
            "en-GB"
        );
    }
}
