use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used at the `violations` field of the [`PreconditionFailure`] struct.
/// Describes a single precondition failure.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreconditionViolation {
    /// Type of the precondition failure. Should be a service-specific enum,
    /// such as "TOS" for "Terms of Service violation".
    pub r#type: String,

    /// Subject, relative to the type, that failed.
    pub subject: String,

    /// A description of how the precondition failed.
    pub description: String,
}

impl PreconditionViolation {
    /// Creates a new [`PreconditionViolation`] struct.
    pub fn new(
        violation_type: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            r#type: violation_type.into(),
            subject: subject.into(),
            description: description.into(),
        }
    }
}

impl From<pb::precondition_failure::Violation> for PreconditionViolation {
    fn from(value: pb::precondition_failure::Violation) -> Self {
        Self {
            r#type: value.r#type,
            subject: value.subject,
            description: value.description,
        }
    }
}

impl From<PreconditionViolation> for pb::precondition_failure::Violation {
    fn from(value: PreconditionViolation) -> Self {
        Self {
            r#type: value.r#type,
            subject: value.subject,
            description: value.description,
        }
    }
}

/// Used to encode/decode the `PreconditionFailure` standard error message
/// described in [error_details.proto]. Describes what preconditions have
/// failed.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct PreconditionFailure {
    /// Describes all precondition violations of the request.
    pub violations: Vec<PreconditionViolation>,
}

impl PreconditionFailure {
    /// Type URL of the `PreconditionFailure` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.PreconditionFailure";

    /// Creates a new [`PreconditionFailure`] struct.
    pub fn new(violations: impl Into<Vec<PreconditionViolation>>) -> Self {
        Self {
            violations: violations.into(),
        }
    }

    /// Creates a new [`PreconditionFailure`] struct with a single
    /// [`PreconditionViolation`] in `violations`.
    pub fn with_violation(
        violation_type: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            violations: vec![PreconditionViolation::new(
                violation_type,
                subject,
                description,
            )],
        }
    }

    /// Adds a [`PreconditionViolation`] to [`PreconditionFailure`]'s
    /// `violations` vector.
    pub fn add_violation(
        &mut self,
        violation_type: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.violations.push(PreconditionViolation::new(
            violation_type,
            subject,
            description,
        ));
        self
    }

    /// Returns `true` if [`PreconditionFailure`]'s `violations` vector is
    /// empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.violations.is_empty()
    }
}

impl From<pb::PreconditionFailure> for PreconditionFailure {
    fn from(prec_failure: pb::PreconditionFailure) -> Self {
        Self {
            violations: prec_failure.violations.into_iter().map(Into::into).collect(),
        }
    }
}

impl From<PreconditionFailure> for pb::PreconditionFailure {
    fn from(prec_failure: PreconditionFailure) -> Self {
        Self {
            violations: prec_failure.violations.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoAny for PreconditionFailure {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::PreconditionFailure::from(self))
    }
}

impl FromAnyRef for PreconditionFailure {
    const TYPE_URL: &'static str = PreconditionFailure::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::PreconditionFailure>(any).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn gen_prec_failure() {
        let mut prec_failure = PreconditionFailure::with_violation("TOS", "example.local", "a");
        prec_failure.add_violation("FNF", "example.local", "b");

        assert_eq!(prec_failure.violations[1].r#type, "FNF");

        let decoded = PreconditionFailure::from_any_ref(&prec_failure.clone().into_any()).unwrap();
        assert_eq!(decoded, prec_failure);
        assert!(PreconditionFailure::default().is_empty());
    }
}
