use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used at the `field_violations` field of the [`BadRequest`] struct.
/// Describes a single bad request field.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldViolation {
    /// Path that leads to a field in the request body.
    pub field: String,

    /// Description of why the request element is bad.
    pub description: String,
}

impl FieldViolation {
    /// Creates a new [`FieldViolation`] struct.
    pub fn new(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            description: description.into(),
        }
    }
}

impl From<pb::bad_request::FieldViolation> for FieldViolation {
    fn from(value: pb::bad_request::FieldViolation) -> Self {
        Self::new(value.field, value.description)
    }
}

impl From<FieldViolation> for pb::bad_request::FieldViolation {
    fn from(value: FieldViolation) -> Self {
        Self {
            field: value.field,
            description: value.description,
        }
    }
}

/// Used to encode/decode the `BadRequest` standard error message described in
/// [error_details.proto]. Describes violations in a client request. Focuses
/// on the syntactic aspects of the request.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BadRequest {
    /// Describes all field violations of the request.
    pub field_violations: Vec<FieldViolation>,
}

impl BadRequest {
    /// Type URL of the `BadRequest` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.BadRequest";

    /// Creates a new [`BadRequest`] struct.
    pub fn new(field_violations: impl Into<Vec<FieldViolation>>) -> Self {
        Self {
            field_violations: field_violations.into(),
        }
    }

    /// Creates a new [`BadRequest`] struct with a single [`FieldViolation`] in
    /// `field_violations`.
    pub fn with_violation(field: impl Into<String>, description: impl Into<String>) -> Self {
        Self::new(vec![FieldViolation::new(field, description)])
    }

    /// Adds a [`FieldViolation`] to [`BadRequest`]'s `field_violations`.
    pub fn add_violation(
        &mut self,
        field: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.field_violations
            .push(FieldViolation::new(field, description));
        self
    }

    /// Returns `true` if [`BadRequest`]'s `field_violations` vector is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.field_violations.is_empty()
    }
}

impl From<pb::BadRequest> for BadRequest {
    fn from(bad_req: pb::BadRequest) -> Self {
        Self::new(
            bad_req
                .field_violations
                .into_iter()
                .map(FieldViolation::from)
                .collect::<Vec<_>>(),
        )
    }
}

impl From<BadRequest> for pb::BadRequest {
    fn from(bad_req: BadRequest) -> Self {
        Self {
            field_violations: bad_req.field_violations.into_iter().map(Into::into).collect(),
        }
    }
}

impl IntoAny for BadRequest {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::BadRequest::from(self))
    }
}

impl FromAnyRef for BadRequest {
    const TYPE_URL: &'static str = BadRequest::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::BadRequest>(any).map(Into::into)
    }
}
