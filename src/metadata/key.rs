use std::{borrow::Borrow, error::Error, fmt, marker::PhantomData, str::FromStr};

use http::HeaderName;

use super::encoding::{Ascii, Binary, ValueEncoding};

/// Represents a custom metadata field name.
///
/// `MetadataKey` is used as the [`MetadataMap`] key. The value encoding
/// parameter enforces the `-bin` suffix rule of gRPC metadata.
///
/// [`MetadataMap`]: crate::metadata::MetadataMap
#[derive(Clone, Eq, PartialEq, Hash)]
pub struct MetadataKey<VE: ValueEncoding> {
    pub(crate) inner: HeaderName,
    phantom: PhantomData<VE>,
}

/// A possible error when converting a `MetadataKey` from another type.
#[derive(Debug, Default)]
pub struct InvalidMetadataKey {
    _priv: (),
}

/// An ascii metadata key.
pub type AsciiMetadataKey = MetadataKey<Ascii>;
/// A binary metadata key.
pub type BinaryMetadataKey = MetadataKey<Binary>;

impl<VE: ValueEncoding> MetadataKey<VE> {
    /// Converts a slice of bytes to a `MetadataKey`.
    ///
    /// This function normalizes the input.
    pub fn from_bytes(src: &[u8]) -> Result<Self, InvalidMetadataKey> {
        let name = HeaderName::from_bytes(src).map_err(|_err| InvalidMetadataKey::new())?;
        if !VE::is_valid_key(name.as_str()) {
            return Err(InvalidMetadataKey::new());
        }
        Ok(Self {
            inner: name,
            phantom: PhantomData,
        })
    }

    /// Converts a static string to a `MetadataKey`.
    ///
    /// The static string has to be lowercase and valid for its value
    /// encoding, which is only checked in debug builds.
    #[must_use]
    pub fn from_static(src: &'static str) -> Self {
        let name = HeaderName::from_static(src);
        debug_assert!(VE::is_valid_key(name.as_str()), "invalid metadata key");
        Self {
            inner: name,
            phantom: PhantomData,
        }
    }

    /// Returns a `str` representation of the metadata key.
    ///
    /// The returned string will always be lower case.
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.inner.as_str()
    }
}

impl<VE: ValueEncoding> FromStr for MetadataKey<VE> {
    type Err = InvalidMetadataKey;

    fn from_str(s: &str) -> Result<Self, InvalidMetadataKey> {
        Self::from_bytes(s.as_bytes())
    }
}

impl<VE: ValueEncoding> AsRef<str> for MetadataKey<VE> {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl<VE: ValueEncoding> Borrow<str> for MetadataKey<VE> {
    fn borrow(&self) -> &str {
        self.as_str()
    }
}

impl<VE: ValueEncoding> fmt::Debug for MetadataKey<VE> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self.as_str(), fmt)
    }
}

impl<VE: ValueEncoding> fmt::Display for MetadataKey<VE> {
    fn fmt(&self, fmt: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self.as_str(), fmt)
    }
}

impl<VE: ValueEncoding> PartialEq<str> for MetadataKey<VE> {
    #[inline]
    fn eq(&self, other: &str) -> bool {
        self.inner == other
    }
}

impl<VE: ValueEncoding> PartialEq<&str> for MetadataKey<VE> {
    #[inline]
    fn eq(&self, other: &&str) -> bool {
        self.inner == *other
    }
}

impl InvalidMetadataKey {
    #[doc(hidden)]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl fmt::Display for InvalidMetadataKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("invalid gRPC metadata key name")
    }
}

impl Error for InvalidMetadataKey {}

#[cfg(test)]
mod tests {
    use super::{AsciiMetadataKey, BinaryMetadataKey};

    #[test]
    fn test_from_bytes_binary() {
        assert!(BinaryMetadataKey::from_bytes(b"").is_err());
        assert!(BinaryMetadataKey::from_bytes(b"\xFF").is_err());
        assert!(BinaryMetadataKey::from_bytes(b"abc").is_err());
        assert_eq!(
            BinaryMetadataKey::from_bytes(b"grpc-status-details-bin")
                .unwrap()
                .as_str(),
            "grpc-status-details-bin"
        );
    }

    #[test]
    fn test_from_bytes_ascii() {
        assert!(AsciiMetadataKey::from_bytes(b"").is_err());
        assert!(AsciiMetadataKey::from_bytes(b"\xFF").is_err());
        assert_eq!(
            "x-request-id".parse::<AsciiMetadataKey>().unwrap(),
            "x-request-id"
        );
        assert!(AsciiMetadataKey::from_bytes(b"abc-bin").is_err());
    }

    #[test]
    fn keys_are_normalized_to_lowercase() {
        let key = AsciiMetadataKey::from_bytes(b"X-Trace").unwrap();
        assert_eq!(key.as_str(), "x-trace");
    }
}
