use std::{error::Error, fmt, hash::Hash};

use base64::Engine as _;
use bytes::Bytes;
use http::HeaderValue;

use crate::util::base64::{STANDARD, STANDARD_NO_PAD};

/// A possible error when converting a value into metadata.
#[derive(Debug, Default)]
pub struct InvalidMetadataValue {
    _priv: (),
}

impl InvalidMetadataValue {
    pub(crate) fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for InvalidMetadataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid gRPC metadata value")
    }
}

impl Error for InvalidMetadataValue {}

mod value_encoding {
    pub trait Sealed {}
}

/// The encoding of the values stored under a metadata key.
///
/// Keys ending in `-bin` carry binary values, which travel base64 encoded,
/// every other key carries printable ASCII.
pub trait ValueEncoding: Clone + Eq + Hash + value_encoding::Sealed {
    #[doc(hidden)]
    fn is_valid_key(key: &str) -> bool;

    #[doc(hidden)]
    fn encode(value: &[u8]) -> Result<HeaderValue, InvalidMetadataValue>;

    #[doc(hidden)]
    fn decode(value: &HeaderValue) -> Option<Bytes>;
}

/// Marker for printable ASCII metadata values.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Ascii {}

/// Marker for binary metadata values.
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
#[non_exhaustive]
pub enum Binary {}

impl value_encoding::Sealed for Ascii {}
impl value_encoding::Sealed for Binary {}

impl ValueEncoding for Ascii {
    fn is_valid_key(key: &str) -> bool {
        !key.ends_with("-bin")
    }

    fn encode(value: &[u8]) -> Result<HeaderValue, InvalidMetadataValue> {
        HeaderValue::from_bytes(value).map_err(|_err| InvalidMetadataValue::new())
    }

    fn decode(value: &HeaderValue) -> Option<Bytes> {
        Some(Bytes::copy_from_slice(value.as_bytes()))
    }
}

impl ValueEncoding for Binary {
    fn is_valid_key(key: &str) -> bool {
        key.ends_with("-bin")
    }

    fn encode(value: &[u8]) -> Result<HeaderValue, InvalidMetadataValue> {
        HeaderValue::from_maybe_shared(Bytes::from(STANDARD_NO_PAD.encode(value)))
            .map_err(|_err| InvalidMetadataValue::new())
    }

    fn decode(value: &HeaderValue) -> Option<Bytes> {
        match STANDARD.decode(value.as_bytes()) {
            Ok(decoded) => Some(decoded.into()),
            Err(err) => {
                tracing::debug!("failed to b64 decode binary metadata value: {err}");
                None
            }
        }
    }
}
