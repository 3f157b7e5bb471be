use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used at the `violations` field of the [`QuotaFailure`] struct. Describes a
/// single quota violation.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuotaViolation {
    /// Subject on which the quota check failed.
    pub subject: String,

    /// Description of why the quota check failed.
    pub description: String,
}

impl QuotaViolation {
    /// Creates a new [`QuotaViolation`] struct.
    pub fn new(subject: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            description: description.into(),
        }
    }
}

impl From<pb::quota_failure::Violation> for QuotaViolation {
    fn from(value: pb::quota_failure::Violation) -> Self {
        Self {
            subject: value.subject,
            description: value.description,
        }
    }
}

impl From<QuotaViolation> for pb::quota_failure::Violation {
    fn from(value: QuotaViolation) -> Self {
        Self {
            subject: value.subject,
            description: value.description,
        }
    }
}

/// Used to encode/decode the `QuotaFailure` standard error message described
/// in [error_details.proto]. Describes how a quota check failed.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QuotaFailure {
    /// Describes all quota violations.
    pub violations: Vec<QuotaViolation>,
}

impl QuotaFailure {
    /// Type URL of the `QuotaFailure` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.QuotaFailure";

    /// Creates a new [`QuotaFailure`] struct.
    pub fn new(violations: impl Into<Vec<QuotaViolation>>) -> Self {
        Self {
            violations: violations.into(),
        }
    }

    /// Creates a new [`QuotaFailure`] struct with a single [`QuotaViolation`]
    /// in `violations`.
    pub fn with_violation(subject: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            violations: vec![QuotaViolation::new(subject, description)],
        }
    }

    /// Adds a [`QuotaViolation`] to [`QuotaFailure`]'s `violations`.
    pub fn add_violation(
        &mut self,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.violations
            .push(QuotaViolation::new(subject, description));
        self
    }

    /// Returns `true` if [`QuotaFailure`]'s `violations` vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl From<pb::QuotaFailure> for QuotaFailure {
    fn from(quota_failure: pb::QuotaFailure) -> Self {
        Self {
            violations: quota_failure
                .violations
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl From<QuotaFailure> for pb::QuotaFailure {
    fn from(quota_failure: QuotaFailure) -> Self {
        Self {
            violations: quota_failure
                .violations
                .into_iter()
                .map(Into::into)
                .collect(),
        }
    }
}

impl IntoAny for QuotaFailure {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::QuotaFailure::from(self))
    }
}

impl FromAnyRef for QuotaFailure {
    const TYPE_URL: &'static str = QuotaFailure::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::QuotaFailure>(any).map(Into::into)
    }
}
