use std::time;

use crate::protobuf::{
    prost::{DecodeError, types::Any},
    types::{
        pb,
        richer_error::{FromAnyRef, IntoAny},
    },
};

use super::{decode_any, encode_any};

/// Used to encode/decode the `RetryInfo` standard error message described in
/// [error_details.proto]. Describes when the clients can retry a failed
/// request.
///
/// Note: When obtained from decoding `RetryInfo` messages, negative
/// `retry_delay`'s become 0.
///
/// [error_details.proto]: https://github.com/googleapis/googleapis/blob/master/google/rpc/error_details.proto
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RetryInfo {
    /// Informs the amount of time that clients should wait before retrying.
    pub retry_delay: Option<time::Duration>,
}

impl RetryInfo {
    /// Type URL of the `RetryInfo` standard error message type.
    pub const TYPE_URL: &'static str = "type.googleapis.com/google.rpc.RetryInfo";

    /// Should not exceed `prost_types::Duration` range. Limited to
    /// approximately 10,000 years.
    pub const MAX_RETRY_DELAY: time::Duration = time::Duration::new(315_576_000_000, 999_999_999);

    /// Creates a new [`RetryInfo`] struct. If `retry_delay` exceeds
    /// [`RetryInfo::MAX_RETRY_DELAY`], [`RetryInfo::MAX_RETRY_DELAY`] will
    /// be used instead.
    #[must_use]
    pub fn new(retry_delay: Option<time::Duration>) -> Self {
        Self {
            retry_delay: retry_delay.map(|delay| delay.min(Self::MAX_RETRY_DELAY)),
        }
    }

    /// Returns `true` if [`RetryInfo`]'s `retry_delay` is set as `None`, and
    /// `false` if it is not.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.retry_delay.is_none()
    }
}

impl From<pb::RetryInfo> for RetryInfo {
    fn from(retry_info: pb::RetryInfo) -> Self {
        let retry_delay = retry_info.retry_delay.map(|delay| {
            if delay.seconds < 0 || delay.nanos < 0 {
                return time::Duration::ZERO;
            }
            // both are non-negative at this point
            time::Duration::from_secs(delay.seconds.unsigned_abs())
                .saturating_add(time::Duration::from_nanos(u64::from(delay.nanos.unsigned_abs())))
        });

        Self { retry_delay }
    }
}

impl From<RetryInfo> for pb::RetryInfo {
    fn from(retry_info: RetryInfo) -> Self {
        let retry_delay = retry_info.retry_delay.map(|delay| {
            let delay = delay.min(RetryInfo::MAX_RETRY_DELAY);
            prost_types::Duration {
                seconds: i64::try_from(delay.as_secs()).unwrap_or(i64::MAX),
                nanos: i32::try_from(delay.subsec_nanos()).unwrap_or(i32::MAX),
            }
        });

        Self { retry_delay }
    }
}

impl IntoAny for RetryInfo {
    fn into_any(self) -> Any {
        encode_any(Self::TYPE_URL, &pb::RetryInfo::from(self))
    }
}

impl FromAnyRef for RetryInfo {
    const TYPE_URL: &'static str = RetryInfo::TYPE_URL;

    fn from_any_ref(any: &Any) -> Result<Self, DecodeError> {
        decode_any::<pb::RetryInfo>(any).map(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use prost::Name;

    use super::*;

    #[test]
    fn gen_retry_info() {
        let retry_info = RetryInfo::new(Some(Duration::from_secs(u64::MAX)));
        assert_eq!(retry_info.retry_delay, Some(RetryInfo::MAX_RETRY_DELAY));
        assert!(!retry_info.is_empty());

        let gen_any = RetryInfo::new(Some(Duration::from_secs(5))).into_any();
        assert_eq!(gen_any.type_url, RetryInfo::TYPE_URL);

        let decoded = RetryInfo::from_any_ref(&gen_any).unwrap();
        assert_eq!(decoded.retry_delay, Some(Duration::from_secs(5)));
        assert!(RetryInfo::default().is_empty());
    }

    #[test]
    fn negative_wire_delay_becomes_zero() {
        let wire = pb::RetryInfo {
            retry_delay: Some(prost_types::Duration {
                seconds: -3,
                nanos: 0,
            }),
        };
        assert_eq!(RetryInfo::from(wire).retry_delay, Some(Duration::ZERO));
    }

    #[test]
    fn type_url_matches_wire_schema() {
        assert_eq!(RetryInfo::TYPE_URL, pb::RetryInfo::type_url());
    }
}
