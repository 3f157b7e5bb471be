use bytes::{Bytes, BytesMut};

use crate::{
    Code, Status,
    metadata::MetadataMap,
    protobuf::{
        prost::{DecodeError, EncodeError, Message, types::Any},
        types::{any::type_url_matches, pb, sealed},
    },
};

mod error_details;
mod std_messages;

pub use error_details::{ErrorDetails, vec::ErrorDetail};
pub use std_messages::{
    BadRequest, DebugInfo, ErrorInfo, FieldViolation, Help, HelpLink, LocalizedMessage,
    PreconditionFailure, PreconditionViolation, QuotaFailure, QuotaViolation, RequestInfo,
    ResourceInfo, RetryInfo,
};

trait IntoAny {
    fn into_any(self) -> Any;
}

trait FromAnyRef: Sized {
    const TYPE_URL: &'static str;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError>;
}

fn gen_details_bytes(code: Code, message: &str, details: Vec<Any>) -> Result<Bytes, EncodeError> {
    let status = pb::Status {
        code: code as i32,
        message: message.to_owned(),
        details,
    };

    let mut buf = BytesMut::with_capacity(status.encoded_len());
    status.encode(&mut buf)?;

    Ok(buf.freeze())
}

/// First entry of `details` carrying the type URL of `T` that also decodes.
fn first_detail<T: FromAnyRef>(details: &[Any]) -> Option<T> {
    details
        .iter()
        .filter(|any| type_url_matches(&any.type_url, T::TYPE_URL))
        .find_map(|any| match T::from_any_ref(any) {
            Ok(detail) => Some(detail),
            Err(err) => {
                tracing::debug!(type_url = T::TYPE_URL, "skip malformed error detail: {err}");
                None
            }
        })
}

/// Used to implement associated functions and methods on [`Status`], that
/// allow the addition and extraction of rich error details. This trait is
/// sealed and not meant to be implemented outside of this crate.
pub trait StatusExt: sealed::Sealed {
    /// Convert a `google.rpc.Status` into a [`Status`].
    ///
    /// Code and message are mirrored from `status`, which is itself encoded
    /// into the details, and thus into the `grpc-status-details-bin` trailer
    /// once the status is written out. Codes unknown to gRPC map to
    /// [`Code::Unknown`] at the top level, the encoded status keeps the
    /// original value.
    fn from_rpc_status(status: pb::Status) -> Status;

    /// Like [`StatusExt::from_rpc_status`] with custom metadata attached.
    fn from_rpc_status_and_metadata(status: pb::Status, metadata: MetadataMap) -> Status;

    /// Decode the `google.rpc.Status` carried in the details of this status.
    ///
    /// Returns `None` when there are no details or when they are malformed,
    /// never an error. Use [`StatusExt::check_rpc_status`] to learn why
    /// decoding failed.
    fn get_rpc_status(&self) -> Option<pb::Status>;

    /// Strict counterpart of [`StatusExt::get_rpc_status`].
    ///
    /// Empty details decode into a default `google.rpc.Status`.
    fn check_rpc_status(&self) -> Result<pb::Status, DecodeError>;

    /// Generates a [`Status`] with error details obtained from an
    /// [`ErrorDetails`] struct, and custom metadata.
    fn try_with_error_details_and_metadata(
        code: Code,
        message: impl Into<String>,
        details: ErrorDetails,
        metadata: MetadataMap,
    ) -> Result<Status, EncodeError>;

    /// Generates a [`Status`] with error details obtained from an
    /// [`ErrorDetails`] struct.
    fn try_with_error_details(
        code: Code,
        message: impl Into<String>,
        details: ErrorDetails,
    ) -> Result<Status, EncodeError>;

    /// Generates a [`Status`] with the given [`ErrorDetail`]s, in order, and
    /// custom metadata.
    fn try_with_error_details_vec_and_metadata(
        code: Code,
        message: impl Into<String>,
        details: impl IntoIterator<Item = ErrorDetail>,
        metadata: MetadataMap,
    ) -> Result<Status, EncodeError>;

    /// Generates a [`Status`] with the given [`ErrorDetail`]s, in order.
    fn try_with_error_details_vec(
        code: Code,
        message: impl Into<String>,
        details: impl IntoIterator<Item = ErrorDetail>,
    ) -> Result<Status, EncodeError>;

    /// Tries to get an [`ErrorDetails`] struct from the status, returning the
    /// first [`DecodeError`] encountered. Handy while debugging, otherwise
    /// prefer [`StatusExt::get_error_details`].
    fn check_error_details(&self) -> Result<ErrorDetails, DecodeError>;

    /// Get an [`ErrorDetails`] struct from the status. Any decode error
    /// results in an empty struct.
    fn get_error_details(&self) -> ErrorDetails;

    /// Tries to get every [`ErrorDetail`] of the status, in order, returning
    /// the first [`DecodeError`] encountered.
    fn check_error_details_vec(&self) -> Result<Vec<ErrorDetail>, DecodeError>;

    /// Get every decodable [`ErrorDetail`] of the status, in order.
    ///
    /// Malformed entries are skipped, entries with an unrecognised type URL
    /// are returned as [`ErrorDetail::Unknown`].
    fn get_error_details_vec(&self) -> Vec<ErrorDetail>;

    /// Get the first [`RetryInfo`] found on the status, if any.
    fn get_details_retry_info(&self) -> Option<RetryInfo>;

    /// Get the first [`DebugInfo`] found on the status, if any.
    fn get_details_debug_info(&self) -> Option<DebugInfo>;

    /// Get the first [`QuotaFailure`] found on the status, if any.
    fn get_details_quota_failure(&self) -> Option<QuotaFailure>;

    /// Get the first [`ErrorInfo`] found on the status, if any.
    fn get_details_error_info(&self) -> Option<ErrorInfo>;

    /// Get the first [`PreconditionFailure`] found on the status, if any.
    fn get_details_precondition_failure(&self) -> Option<PreconditionFailure>;

    /// Get the first [`BadRequest`] found on the status, if any.
    fn get_details_bad_request(&self) -> Option<BadRequest>;

    /// Get the first [`RequestInfo`] found on the status, if any.
    fn get_details_request_info(&self) -> Option<RequestInfo>;

    /// Get the first [`ResourceInfo`] found on the status, if any.
    fn get_details_resource_info(&self) -> Option<ResourceInfo>;

    /// Get the first [`Help`] found on the status, if any.
    fn get_details_help(&self) -> Option<Help>;

    /// Get the first [`LocalizedMessage`] found on the status, if any.
    fn get_details_localized_message(&self) -> Option<LocalizedMessage>;
}

impl sealed::Sealed for Status {}

impl StatusExt for Status {
    fn from_rpc_status(status: pb::Status) -> Self {
        Self::from_rpc_status_and_metadata(status, MetadataMap::new())
    }

    fn from_rpc_status_and_metadata(status: pb::Status, metadata: MetadataMap) -> Self {
        let code = Code::from_i32(status.code);
        let message = status.message.clone();
        let details = Bytes::from(status.encode_to_vec());

        Self::with_details_and_metadata(code, message, details, metadata)
    }

    fn get_rpc_status(&self) -> Option<pb::Status> {
        if self.details().is_empty() {
            return None;
        }

        match pb::Status::decode(self.details()) {
            Ok(status) => Some(status),
            Err(err) => {
                tracing::debug!("failed to decode grpc-status-details-bin: {err}");
                None
            }
        }
    }

    fn check_rpc_status(&self) -> Result<pb::Status, DecodeError> {
        pb::Status::decode(self.details())
    }

    fn try_with_error_details_and_metadata(
        code: Code,
        message: impl Into<String>,
        details: ErrorDetails,
        metadata: MetadataMap,
    ) -> Result<Self, EncodeError> {
        Self::try_with_error_details_vec_and_metadata(
            code,
            message,
            details.into_details_vec(),
            metadata,
        )
    }

    fn try_with_error_details(
        code: Code,
        message: impl Into<String>,
        details: ErrorDetails,
    ) -> Result<Self, EncodeError> {
        Self::try_with_error_details_and_metadata(code, message, details, MetadataMap::new())
    }

    fn try_with_error_details_vec_and_metadata(
        code: Code,
        message: impl Into<String>,
        details: impl IntoIterator<Item = ErrorDetail>,
        metadata: MetadataMap,
    ) -> Result<Self, EncodeError> {
        let message = message.into();
        let conv_details: Vec<Any> = details.into_iter().map(ErrorDetail::into_any).collect();

        let details = gen_details_bytes(code, &message, conv_details)?;

        Ok(Self::with_details_and_metadata(
            code, message, details, metadata,
        ))
    }

    fn try_with_error_details_vec(
        code: Code,
        message: impl Into<String>,
        details: impl IntoIterator<Item = ErrorDetail>,
    ) -> Result<Self, EncodeError> {
        Self::try_with_error_details_vec_and_metadata(code, message, details, MetadataMap::new())
    }

    fn check_error_details(&self) -> Result<ErrorDetails, DecodeError> {
        self.check_rpc_status()?.check_error_details()
    }

    fn get_error_details(&self) -> ErrorDetails {
        self.check_error_details().unwrap_or_default()
    }

    fn check_error_details_vec(&self) -> Result<Vec<ErrorDetail>, DecodeError> {
        self.check_rpc_status()?.check_error_details_vec()
    }

    fn get_error_details_vec(&self) -> Vec<ErrorDetail> {
        self.get_rpc_status()
            .map(|status| status.get_error_details_vec())
            .unwrap_or_default()
    }

    fn get_details_retry_info(&self) -> Option<RetryInfo> {
        self.get_rpc_status()?.get_details_retry_info()
    }

    fn get_details_debug_info(&self) -> Option<DebugInfo> {
        self.get_rpc_status()?.get_details_debug_info()
    }

    fn get_details_quota_failure(&self) -> Option<QuotaFailure> {
        self.get_rpc_status()?.get_details_quota_failure()
    }

    fn get_details_error_info(&self) -> Option<ErrorInfo> {
        self.get_rpc_status()?.get_details_error_info()
    }

    fn get_details_precondition_failure(&self) -> Option<PreconditionFailure> {
        self.get_rpc_status()?.get_details_precondition_failure()
    }

    fn get_details_bad_request(&self) -> Option<BadRequest> {
        self.get_rpc_status()?.get_details_bad_request()
    }

    fn get_details_request_info(&self) -> Option<RequestInfo> {
        self.get_rpc_status()?.get_details_request_info()
    }

    fn get_details_resource_info(&self) -> Option<ResourceInfo> {
        self.get_rpc_status()?.get_details_resource_info()
    }

    fn get_details_help(&self) -> Option<Help> {
        self.get_rpc_status()?.get_details_help()
    }

    fn get_details_localized_message(&self) -> Option<LocalizedMessage> {
        self.get_rpc_status()?.get_details_localized_message()
    }
}

impl From<pb::Status> for Status {
    fn from(status: pb::Status) -> Self {
        Self::from_rpc_status(status)
    }
}

impl sealed::Sealed for pb::Status {}

/// Used to implement methods on `pb::Status`, that allow the extraction of
/// standard error details. This trait is sealed and not meant to be
/// implemented outside of this crate.
pub trait RpcStatusExt: sealed::Sealed {
    /// Tries to get an [`ErrorDetails`] struct from the status, returning the
    /// first [`DecodeError`] encountered.
    fn check_error_details(&self) -> Result<ErrorDetails, DecodeError>;

    /// Get an [`ErrorDetails`] struct from the status. Any decode error
    /// results in an empty struct.
    fn get_error_details(&self) -> ErrorDetails;

    /// Tries to get every [`ErrorDetail`] of the status, in order, returning
    /// the first [`DecodeError`] encountered.
    fn check_error_details_vec(&self) -> Result<Vec<ErrorDetail>, DecodeError>;

    /// Get every decodable [`ErrorDetail`] of the status, in order.
    ///
    /// Malformed entries are skipped, entries with an unrecognised type URL
    /// are returned as [`ErrorDetail::Unknown`].
    fn get_error_details_vec(&self) -> Vec<ErrorDetail>;

    /// Get the first [`RetryInfo`] found on the status, if any.
    fn get_details_retry_info(&self) -> Option<RetryInfo>;

    /// Get the first [`DebugInfo`] found on the status, if any.
    fn get_details_debug_info(&self) -> Option<DebugInfo>;

    /// Get the first [`QuotaFailure`] found on the status, if any.
    fn get_details_quota_failure(&self) -> Option<QuotaFailure>;

    /// Get the first [`ErrorInfo`] found on the status, if any.
    fn get_details_error_info(&self) -> Option<ErrorInfo>;

    /// Get the first [`PreconditionFailure`] found on the status, if any.
    fn get_details_precondition_failure(&self) -> Option<PreconditionFailure>;

    /// Get the first [`BadRequest`] found on the status, if any.
    fn get_details_bad_request(&self) -> Option<BadRequest>;

    /// Get the first [`RequestInfo`] found on the status, if any.
    fn get_details_request_info(&self) -> Option<RequestInfo>;

    /// Get the first [`ResourceInfo`] found on the status, if any.
    fn get_details_resource_info(&self) -> Option<ResourceInfo>;

    /// Get the first [`Help`] found on the status, if any.
    fn get_details_help(&self) -> Option<Help>;

    /// Get the first [`LocalizedMessage`] found on the status, if any.
    fn get_details_localized_message(&self) -> Option<LocalizedMessage>;
}

impl RpcStatusExt for pb::Status {
    fn check_error_details(&self) -> Result<ErrorDetails, DecodeError> {
        let mut details = ErrorDetails::new();
        for any in &self.details {
            details.absorb(ErrorDetail::from_any_ref(any)?);
        }
        Ok(details)
    }

    fn get_error_details(&self) -> ErrorDetails {
        self.check_error_details().unwrap_or_default()
    }

    fn check_error_details_vec(&self) -> Result<Vec<ErrorDetail>, DecodeError> {
        self.details.iter().map(ErrorDetail::from_any_ref).collect()
    }

    fn get_error_details_vec(&self) -> Vec<ErrorDetail> {
        self.details
            .iter()
            .filter_map(|any| match ErrorDetail::from_any_ref(any) {
                Ok(detail) => Some(detail),
                Err(err) => {
                    tracing::debug!(type_url = %any.type_url, "skip malformed error detail: {err}");
                    None
                }
            })
            .collect()
    }

    fn get_details_retry_info(&self) -> Option<RetryInfo> {
        first_detail(&self.details)
    }

    fn get_details_debug_info(&self) -> Option<DebugInfo> {
        first_detail(&self.details)
    }

    fn get_details_quota_failure(&self) -> Option<QuotaFailure> {
        first_detail(&self.details)
    }

    fn get_details_error_info(&self) -> Option<ErrorInfo> {
        first_detail(&self.details)
    }

    fn get_details_precondition_failure(&self) -> Option<PreconditionFailure> {
        first_detail(&self.details)
    }

    fn get_details_bad_request(&self) -> Option<BadRequest> {
        first_detail(&self.details)
    }

    fn get_details_request_info(&self) -> Option<RequestInfo> {
        first_detail(&self.details)
    }

    fn get_details_resource_info(&self) -> Option<ResourceInfo> {
        first_detail(&self.details)
    }

    fn get_details_help(&self) -> Option<Help> {
        first_detail(&self.details)
    }

    fn get_details_localized_message(&self) -> Option<LocalizedMessage> {
        first_detail(&self.details)
    }
}

#[cfg(test)]
mod tests {
    use std::{collections::HashMap, time::Duration};

    use crate::protobuf::types::AnyExt;

    use super::*;

    fn full_error_details() -> ErrorDetails {
        let metadata = HashMap::from([("limitPerRequest".to_owned(), "100".to_owned())]);

        let mut err_details = ErrorDetails::new();
        err_details
            .set_retry_info(Some(Duration::from_secs(5)))
            .set_debug_info(
                vec!["trace3".into(), "trace2".into(), "trace1".into()],
                "details",
            )
            .add_quota_failure_violation("clientip:<ip address>", "description")
            .set_error_info("SOME_INFO", "example.local", metadata)
            .add_precondition_failure_violation("TOS", "example.local", "description")
            .add_bad_request_violation("field", "description")
            .set_request_info("request-id", "some-request-data")
            .set_resource_info("resource-type", "resource-name", "owner", "description")
            .add_help_link("link to resource", "resource.example.local")
            .set_localized_message("en-US", "message for the user");
        err_details
    }

    #[test]
    fn gen_status_with_details() {
        let err_details = full_error_details();

        let err_details_vec: Vec<ErrorDetail> = vec![
            RetryInfo::new(Some(Duration::from_secs(5))).into(),
            DebugInfo::new(
                vec!["trace3".into(), "trace2".into(), "trace1".into()],
                "details",
            )
            .into(),
            QuotaFailure::with_violation("clientip:<ip address>", "description").into(),
            ErrorInfo::new(
                "SOME_INFO",
                "example.local",
                HashMap::from([("limitPerRequest".to_owned(), "100".to_owned())]),
            )
            .into(),
            PreconditionFailure::with_violation("TOS", "example.local", "description").into(),
            BadRequest::with_violation("field", "description").into(),
            RequestInfo::new("request-id", "some-request-data").into(),
            ResourceInfo::new("resource-type", "resource-name", "owner", "description").into(),
            Help::with_link("link to resource", "resource.example.local").into(),
            LocalizedMessage::new("en-US", "message for the user").into(),
        ];

        let from_struct = Status::try_with_error_details(
            Code::InvalidArgument,
            "error with bad request details",
            err_details.clone(),
        )
        .unwrap();
        let from_vec = Status::try_with_error_details_vec(
            Code::InvalidArgument,
            "error with bad request details",
            err_details_vec.clone(),
        )
        .unwrap();

        assert_eq!(from_struct.details(), from_vec.details());
        assert_eq!(from_struct.check_error_details().unwrap(), err_details);
        assert_eq!(from_vec.check_error_details_vec().unwrap(), err_details_vec);
    }

    #[test]
    fn rpc_status_round_trip_mirrors_code_and_message() {
        let rpc_status = pb::Status {
            code: Code::NotFound as i32,
            message: "Simple error message".to_owned(),
            details: vec![
                Any::pack(&pb::RequestInfo {
                    request_id: "EchoRequest".to_owned(),
                    serving_data: "Param: SimpleError".to_owned(),
                }),
            ],
        };

        let status = Status::from_rpc_status(rpc_status.clone());
        assert_eq!(status.code(), Code::NotFound);
        assert_eq!(status.message(), "Simple error message");
        assert_eq!(status.get_rpc_status(), Some(rpc_status.clone()));

        let status: Status = rpc_status.clone().into();
        assert_eq!(
            status.get_details_request_info().unwrap().serving_data,
            "Param: SimpleError"
        );
    }

    #[test]
    fn unknown_rpc_code_maps_to_unknown() {
        let status = Status::from_rpc_status(pb::Status {
            code: 42,
            message: "odd".to_owned(),
            details: Vec::new(),
        });
        assert_eq!(status.code(), Code::Unknown);
        assert_eq!(status.get_rpc_status().unwrap().code, 42);
    }

    #[test]
    fn missing_or_malformed_details_give_none() {
        let plain = Status::not_found("nothing attached");
        assert_eq!(plain.get_rpc_status(), None);
        assert_eq!(plain.check_rpc_status().unwrap(), pb::Status::default());

        let garbage = Status::with_details(
            Code::Internal,
            "garbage",
            Bytes::from_static(&[0x1a, 0x7f, 0x00]),
        );
        assert_eq!(garbage.get_rpc_status(), None);
        assert!(garbage.check_rpc_status().is_err());
        assert!(garbage.get_error_details().is_empty());
        assert!(garbage.get_error_details_vec().is_empty());
        assert_eq!(garbage.get_details_error_info(), None);
    }

    #[test]
    fn first_matching_detail_wins() {
        let rpc_status = pb::Status {
            code: Code::Aborted as i32,
            message: "two infos".to_owned(),
            details: vec![
                Any {
                    type_url: ErrorInfo::TYPE_URL.to_owned(),
                    value: vec![0x0a, 0x10],
                },
                ErrorInfo::new("first", "d", HashMap::new()).into_any(),
                ErrorInfo::new("second", "d", HashMap::new()).into_any(),
            ],
        };

        assert_eq!(rpc_status.get_details_error_info().unwrap().reason, "first");
        assert!(rpc_status.check_error_details_vec().is_err());
        assert_eq!(rpc_status.get_error_details_vec().len(), 2);
    }

    #[test]
    fn lenient_vec_keeps_unknown_entries() {
        let custom = Any {
            type_url: "type.googleapis.com/acme.Custom".to_owned(),
            value: vec![1, 2, 3],
        };
        let rpc_status = pb::Status {
            code: Code::Internal as i32,
            message: String::new(),
            details: vec![custom.clone(), Help::with_link("d", "u").into_any()],
        };

        assert_eq!(
            rpc_status.get_error_details_vec(),
            vec![
                ErrorDetail::Unknown(custom),
                ErrorDetail::Help(Help::with_link("d", "u")),
            ]
        );
        assert!(rpc_status.get_error_details().has_help_links());
    }

    #[test]
    fn lookups_agree_on_foreign_type_url_hosts() {
        let mut any = ErrorInfo::new("reason", "domain", HashMap::new()).into_any();
        any.type_url = "example.com/google.rpc.ErrorInfo".to_owned();
        let rpc_status = pb::Status {
            code: Code::NotFound as i32,
            message: "foreign host".to_owned(),
            details: vec![any.clone()],
        };

        let expected = ErrorInfo::new("reason", "domain", HashMap::new());
        assert!(any.is::<pb::ErrorInfo>());
        assert!(any.safe_unpack::<pb::ErrorInfo>().is_some());
        assert_eq!(rpc_status.get_details_error_info(), Some(expected.clone()));
        assert_eq!(
            rpc_status.get_error_details_vec(),
            vec![ErrorDetail::ErrorInfo(expected)]
        );
    }
}
