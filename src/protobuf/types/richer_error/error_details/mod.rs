use std::{collections::HashMap, time};

use super::std_messages::{
    BadRequest, DebugInfo, ErrorInfo, FieldViolation, Help, HelpLink, LocalizedMessage,
    PreconditionFailure, PreconditionViolation, QuotaFailure, QuotaViolation, RequestInfo,
    ResourceInfo, RetryInfo,
};

pub(crate) mod vec;

use vec::ErrorDetail;

/// Holds at most one of each standard error message.
///
/// Used both to build a [`crate::Status`] carrying rich error details and to
/// read them back in a typed way. When a status carries the same message type
/// more than once, the last occurrence ends up in the slot; use
/// [`ErrorDetail`] vectors to observe every entry.
#[non_exhaustive]
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ErrorDetails {
    pub(crate) retry_info: Option<RetryInfo>,
    pub(crate) debug_info: Option<DebugInfo>,
    pub(crate) quota_failure: Option<QuotaFailure>,
    pub(crate) error_info: Option<ErrorInfo>,
    pub(crate) precondition_failure: Option<PreconditionFailure>,
    pub(crate) bad_request: Option<BadRequest>,
    pub(crate) request_info: Option<RequestInfo>,
    pub(crate) resource_info: Option<ResourceInfo>,
    pub(crate) help: Option<Help>,
    pub(crate) localized_message: Option<LocalizedMessage>,
}

macro_rules! slot_getters {
    ($($field:ident: $ty:ident),+ $(,)?) => {
        $(
            #[doc = concat!("Get [`", stringify!($ty), "`] details, if any.")]
            #[must_use]
            pub fn $field(&self) -> Option<&$ty> {
                self.$field.as_ref()
            }
        )+
    };
}

impl ErrorDetails {
    /// Creates an [`ErrorDetails`] without any detail set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an [`ErrorDetails`] holding only [`RetryInfo`] details.
    #[must_use]
    pub fn with_retry_info(retry_delay: Option<time::Duration>) -> Self {
        let mut details = Self::new();
        details.set_retry_info(retry_delay);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`DebugInfo`] details.
    pub fn with_debug_info(
        stack_entries: impl Into<Vec<String>>,
        detail: impl Into<String>,
    ) -> Self {
        let mut details = Self::new();
        details.set_debug_info(stack_entries, detail);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`QuotaFailure`] details.
    pub fn with_quota_failure(violations: impl Into<Vec<QuotaViolation>>) -> Self {
        let mut details = Self::new();
        details.set_quota_failure(violations);
        details
    }

    /// Creates an [`ErrorDetails`] holding a [`QuotaFailure`] with a single
    /// [`QuotaViolation`].
    pub fn with_quota_failure_violation(
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut details = Self::new();
        details.add_quota_failure_violation(subject, description);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`ErrorInfo`] details.
    pub fn with_error_info(
        reason: impl Into<String>,
        domain: impl Into<String>,
        metadata: impl Into<HashMap<String, String>>,
    ) -> Self {
        let mut details = Self::new();
        details.set_error_info(reason, domain, metadata);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`PreconditionFailure`]
    /// details.
    pub fn with_precondition_failure(violations: impl Into<Vec<PreconditionViolation>>) -> Self {
        let mut details = Self::new();
        details.set_precondition_failure(violations);
        details
    }

    /// Creates an [`ErrorDetails`] holding a [`PreconditionFailure`] with a
    /// single [`PreconditionViolation`].
    pub fn with_precondition_failure_violation(
        violation_type: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut details = Self::new();
        details.add_precondition_failure_violation(violation_type, subject, description);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`BadRequest`] details.
    pub fn with_bad_request(field_violations: impl Into<Vec<FieldViolation>>) -> Self {
        let mut details = Self::new();
        details.set_bad_request(field_violations);
        details
    }

    /// Creates an [`ErrorDetails`] holding a [`BadRequest`] with a single
    /// [`FieldViolation`].
    pub fn with_bad_request_violation(
        field: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut details = Self::new();
        details.add_bad_request_violation(field, description);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`RequestInfo`] details.
    pub fn with_request_info(
        request_id: impl Into<String>,
        serving_data: impl Into<String>,
    ) -> Self {
        let mut details = Self::new();
        details.set_request_info(request_id, serving_data);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`ResourceInfo`] details.
    pub fn with_resource_info(
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        owner: impl Into<String>,
        description: impl Into<String>,
    ) -> Self {
        let mut details = Self::new();
        details.set_resource_info(resource_type, resource_name, owner, description);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`Help`] details.
    pub fn with_help(links: impl Into<Vec<HelpLink>>) -> Self {
        let mut details = Self::new();
        details.set_help(links);
        details
    }

    /// Creates an [`ErrorDetails`] holding a [`Help`] with a single
    /// [`HelpLink`].
    pub fn with_help_link(description: impl Into<String>, url: impl Into<String>) -> Self {
        let mut details = Self::new();
        details.add_help_link(description, url);
        details
    }

    /// Creates an [`ErrorDetails`] holding only [`LocalizedMessage`] details.
    pub fn with_localized_message(locale: impl Into<String>, message: impl Into<String>) -> Self {
        let mut details = Self::new();
        details.set_localized_message(locale, message);
        details
    }

    slot_getters!(
        retry_info: RetryInfo,
        debug_info: DebugInfo,
        quota_failure: QuotaFailure,
        error_info: ErrorInfo,
        precondition_failure: PreconditionFailure,
        bad_request: BadRequest,
        request_info: RequestInfo,
        resource_info: ResourceInfo,
        help: Help,
        localized_message: LocalizedMessage,
    );

    /// Returns `true` when no detail is set.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Set [`RetryInfo`] details, replacing any previous value.
    pub fn set_retry_info(&mut self, retry_delay: Option<time::Duration>) -> &mut Self {
        self.retry_info = Some(RetryInfo::new(retry_delay));
        self
    }

    /// Set [`DebugInfo`] details, replacing any previous value.
    pub fn set_debug_info(
        &mut self,
        stack_entries: impl Into<Vec<String>>,
        detail: impl Into<String>,
    ) -> &mut Self {
        self.debug_info = Some(DebugInfo::new(stack_entries, detail));
        self
    }

    /// Set [`QuotaFailure`] details, replacing any previous value.
    pub fn set_quota_failure(&mut self, violations: impl Into<Vec<QuotaViolation>>) -> &mut Self {
        self.quota_failure = Some(QuotaFailure::new(violations));
        self
    }

    /// Append a [`QuotaViolation`], creating the [`QuotaFailure`] if needed.
    pub fn add_quota_failure_violation(
        &mut self,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.quota_failure
            .get_or_insert_with(QuotaFailure::default)
            .add_violation(subject, description);
        self
    }

    /// Returns `true` if [`QuotaFailure`] is set and holds at least one
    /// violation.
    #[must_use]
    pub fn has_quota_failure_violations(&self) -> bool {
        self.quota_failure
            .as_ref()
            .is_some_and(|quota_failure| !quota_failure.is_empty())
    }

    /// Set [`ErrorInfo`] details, replacing any previous value.
    pub fn set_error_info(
        &mut self,
        reason: impl Into<String>,
        domain: impl Into<String>,
        metadata: impl Into<HashMap<String, String>>,
    ) -> &mut Self {
        self.error_info = Some(ErrorInfo::new(reason, domain, metadata));
        self
    }

    /// Set [`PreconditionFailure`] details, replacing any previous value.
    pub fn set_precondition_failure(
        &mut self,
        violations: impl Into<Vec<PreconditionViolation>>,
    ) -> &mut Self {
        self.precondition_failure = Some(PreconditionFailure::new(violations));
        self
    }

    /// Append a [`PreconditionViolation`], creating the
    /// [`PreconditionFailure`] if needed.
    pub fn add_precondition_failure_violation(
        &mut self,
        violation_type: impl Into<String>,
        subject: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.precondition_failure
            .get_or_insert_with(PreconditionFailure::default)
            .add_violation(violation_type, subject, description);
        self
    }

    /// Returns `true` if [`PreconditionFailure`] is set and holds at least
    /// one violation.
    #[must_use]
    pub fn has_precondition_failure_violations(&self) -> bool {
        self.precondition_failure
            .as_ref()
            .is_some_and(|prec_failure| !prec_failure.is_empty())
    }

    /// Set [`BadRequest`] details, replacing any previous value.
    pub fn set_bad_request(&mut self, violations: impl Into<Vec<FieldViolation>>) -> &mut Self {
        self.bad_request = Some(BadRequest::new(violations));
        self
    }

    /// Append a [`FieldViolation`], creating the [`BadRequest`] if needed.
    pub fn add_bad_request_violation(
        &mut self,
        field: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.bad_request
            .get_or_insert_with(BadRequest::default)
            .add_violation(field, description);
        self
    }

    /// Returns `true` if [`BadRequest`] is set and holds at least one field
    /// violation.
    #[must_use]
    pub fn has_bad_request_violations(&self) -> bool {
        self.bad_request
            .as_ref()
            .is_some_and(|bad_request| !bad_request.is_empty())
    }

    /// Set [`RequestInfo`] details, replacing any previous value.
    pub fn set_request_info(
        &mut self,
        request_id: impl Into<String>,
        serving_data: impl Into<String>,
    ) -> &mut Self {
        self.request_info = Some(RequestInfo::new(request_id, serving_data));
        self
    }

    /// Set [`ResourceInfo`] details, replacing any previous value.
    pub fn set_resource_info(
        &mut self,
        resource_type: impl Into<String>,
        resource_name: impl Into<String>,
        owner: impl Into<String>,
        description: impl Into<String>,
    ) -> &mut Self {
        self.resource_info = Some(ResourceInfo::new(
            resource_type,
            resource_name,
            owner,
            description,
        ));
        self
    }

    /// Set [`Help`] details, replacing any previous value.
    pub fn set_help(&mut self, links: impl Into<Vec<HelpLink>>) -> &mut Self {
        self.help = Some(Help::new(links));
        self
    }

    /// Append a [`HelpLink`], creating the [`Help`] if needed.
    pub fn add_help_link(
        &mut self,
        description: impl Into<String>,
        url: impl Into<String>,
    ) -> &mut Self {
        self.help
            .get_or_insert_with(Help::default)
            .add_link(description, url);
        self
    }

    /// Returns `true` if [`Help`] is set and holds at least one link.
    #[must_use]
    pub fn has_help_links(&self) -> bool {
        self.help.as_ref().is_some_and(|help| !help.is_empty())
    }

    /// Set [`LocalizedMessage`] details, replacing any previous value.
    pub fn set_localized_message(
        &mut self,
        locale: impl Into<String>,
        message: impl Into<String>,
    ) -> &mut Self {
        self.localized_message = Some(LocalizedMessage::new(locale, message));
        self
    }

    /// Store a decoded detail in its slot. Unknown details have no slot and
    /// are dropped.
    pub(crate) fn absorb(&mut self, detail: ErrorDetail) {
        match detail {
            ErrorDetail::RetryInfo(d) => self.retry_info = Some(d),
            ErrorDetail::DebugInfo(d) => self.debug_info = Some(d),
            ErrorDetail::QuotaFailure(d) => self.quota_failure = Some(d),
            ErrorDetail::ErrorInfo(d) => self.error_info = Some(d),
            ErrorDetail::PreconditionFailure(d) => self.precondition_failure = Some(d),
            ErrorDetail::BadRequest(d) => self.bad_request = Some(d),
            ErrorDetail::RequestInfo(d) => self.request_info = Some(d),
            ErrorDetail::ResourceInfo(d) => self.resource_info = Some(d),
            ErrorDetail::Help(d) => self.help = Some(d),
            ErrorDetail::LocalizedMessage(d) => self.localized_message = Some(d),
            ErrorDetail::Unknown(any) => {
                tracing::trace!(type_url = %any.type_url, "no error details slot for type url");
            }
        }
    }

    /// The set details, in canonical order.
    pub(crate) fn into_details_vec(self) -> Vec<ErrorDetail> {
        let Self {
            retry_info,
            debug_info,
            quota_failure,
            error_info,
            precondition_failure,
            bad_request,
            request_info,
            resource_info,
            help,
            localized_message,
        } = self;

        [
            retry_info.map(ErrorDetail::from),
            debug_info.map(ErrorDetail::from),
            quota_failure.map(ErrorDetail::from),
            error_info.map(ErrorDetail::from),
            precondition_failure.map(ErrorDetail::from),
            bad_request.map(ErrorDetail::from),
            request_info.map(ErrorDetail::from),
            resource_info.map(ErrorDetail::from),
            help.map(ErrorDetail::from),
            localized_message.map(ErrorDetail::from),
        ]
        .into_iter()
        .flatten()
        .collect()
    }
}
