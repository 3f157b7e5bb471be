use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        any::type_url_matches,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::super::std_messages::{
    BadRequest, DebugInfo, ErrorInfo, Help, LocalizedMessage, PreconditionFailure, QuotaFailure,
    RequestInfo, ResourceInfo, RetryInfo,
};

/// Wraps the structs corresponding to the standard error messages, allowing
/// the implementation and handling of vectors containing any of them.
///
/// Entries whose type URL is not one of the standard error messages are kept
/// as [`ErrorDetail::Unknown`], untouched.
#[non_exhaustive]
#[derive(Clone, Debug, PartialEq)]
pub enum ErrorDetail {
    /// Wraps the [`RetryInfo`] struct.
    RetryInfo(RetryInfo),

    /// Wraps the [`DebugInfo`] struct.
    DebugInfo(DebugInfo),

    /// Wraps the [`QuotaFailure`] struct.
    QuotaFailure(QuotaFailure),

    /// Wraps the [`ErrorInfo`] struct.
    ErrorInfo(ErrorInfo),

    /// Wraps the [`PreconditionFailure`] struct.
    PreconditionFailure(PreconditionFailure),

    /// Wraps the [`BadRequest`] struct.
    BadRequest(BadRequest),

    /// Wraps the [`RequestInfo`] struct.
    RequestInfo(RequestInfo),

    /// Wraps the [`ResourceInfo`] struct.
    ResourceInfo(ResourceInfo),

    /// Wraps the [`Help`] struct.
    Help(Help),

    /// Wraps the [`LocalizedMessage`] struct.
    LocalizedMessage(LocalizedMessage),

    /// A detail with a type URL outside of the standard set.
    Unknown(Any),
}

impl ErrorDetail {
    /// Type URL this detail is, or will be, packed under.
    #[must_use]
    pub fn type_url(&self) -> &str {
        match self {
            Self::RetryInfo(_) => RetryInfo::TYPE_URL,
            Self::DebugInfo(_) => DebugInfo::TYPE_URL,
            Self::QuotaFailure(_) => QuotaFailure::TYPE_URL,
            Self::ErrorInfo(_) => ErrorInfo::TYPE_URL,
            Self::PreconditionFailure(_) => PreconditionFailure::TYPE_URL,
            Self::BadRequest(_) => BadRequest::TYPE_URL,
            Self::RequestInfo(_) => RequestInfo::TYPE_URL,
            Self::ResourceInfo(_) => ResourceInfo::TYPE_URL,
            Self::Help(_) => Help::TYPE_URL,
            Self::LocalizedMessage(_) => LocalizedMessage::TYPE_URL,
            Self::Unknown(any) => any.type_url.as_str(),
        }
    }

    /// Pack this detail into an [`Any`].
    #[must_use]
    pub fn into_any(self) -> Any {
        match self {
            Self::RetryInfo(detail) => detail.into_any(),
            Self::DebugInfo(detail) => detail.into_any(),
            Self::QuotaFailure(detail) => detail.into_any(),
            Self::ErrorInfo(detail) => detail.into_any(),
            Self::PreconditionFailure(detail) => detail.into_any(),
            Self::BadRequest(detail) => detail.into_any(),
            Self::RequestInfo(detail) => detail.into_any(),
            Self::ResourceInfo(detail) => detail.into_any(),
            Self::Help(detail) => detail.into_any(),
            Self::LocalizedMessage(detail) => detail.into_any(),
            Self::Unknown(any) => any,
        }
    }

    /// Decode an [`Any`], dispatching on its type URL.
    ///
    /// Unrecognised type URLs never fail and produce [`ErrorDetail::Unknown`].
    /// A payload that does not decode against the schema its type URL names
    /// is returned as a [`DecodeError`].
    pub fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        macro_rules! dispatch {
            ($($detail:ident),+ $(,)?) => {
                $(
                    if type_url_matches(&any.type_url, $detail::TYPE_URL) {
                        return Ok($detail::from_any_ref(any)?.into());
                    }
                )+
            };
        }

        dispatch!(
            RetryInfo,
            DebugInfo,
            QuotaFailure,
            ErrorInfo,
            PreconditionFailure,
            BadRequest,
            RequestInfo,
            ResourceInfo,
            Help,
            LocalizedMessage,
        );
        Ok(Self::Unknown(any.clone()))
    }
}

macro_rules! impl_from_std_message {
    ($($variant:ident),+ $(,)?) => {
        $(
            impl From<$variant> for ErrorDetail {
                fn from(detail: $variant) -> Self {
                    Self::$variant(detail)
                }
            }
        )+
    };
}

impl_from_std_message!(
    RetryInfo,
    DebugInfo,
    QuotaFailure,
    ErrorInfo,
    PreconditionFailure,
    BadRequest,
    RequestInfo,
    ResourceInfo,
    Help,
    LocalizedMessage,
);

impl From<Any> for ErrorDetail {
    fn from(any: Any) -> Self {
        Self::Unknown(any)
    }
}
