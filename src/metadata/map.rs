use bytes::Bytes;
use http::{
    HeaderMap, HeaderName, HeaderValue,
    header::{CONTENT_TYPE, TE, USER_AGENT},
};

use super::{
    encoding::{Ascii, Binary, InvalidMetadataValue, ValueEncoding},
    key::{AsciiMetadataKey, BinaryMetadataKey},
};

/// Headers owned by the gRPC protocol itself, never part of custom metadata.
const GRPC_RESERVED_HEADERS: [HeaderName; 9] = [
    HeaderName::from_static("grpc-status"),
    HeaderName::from_static("grpc-message"),
    HeaderName::from_static("grpc-status-details-bin"),
    HeaderName::from_static("grpc-encoding"),
    HeaderName::from_static("grpc-accept-encoding"),
    HeaderName::from_static("grpc-timeout"),
    CONTENT_TYPE,
    TE,
    USER_AGENT,
];

/// A set of gRPC custom metadata entries, as carried in headers and trailers.
///
/// Backed by an [`HeaderMap`]: a key can hold multiple values and lookups
/// return the first one that was inserted.
#[derive(Clone, Debug, Default)]
pub struct MetadataMap {
    headers: HeaderMap,
}

/// A borrowed metadata entry, tagged by its value encoding.
#[derive(Debug, Clone, Copy)]
pub enum KeyAndValueRef<'a> {
    /// An ascii metadata entry.
    Ascii(&'a str, &'a HeaderValue),
    /// A binary metadata entry, the value is still base64 encoded.
    Binary(&'a str, &'a HeaderValue),
}

impl KeyAndValueRef<'_> {
    /// The key of this entry.
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::Ascii(key, _) | Self::Binary(key, _) => key,
        }
    }

    /// The value bytes of this entry, base64 decoded for binary entries.
    ///
    /// Returns `None` when a binary value is not valid base64.
    #[must_use]
    pub fn to_bytes(&self) -> Option<Bytes> {
        match self {
            Self::Ascii(_, value) => Ascii::decode(value),
            Self::Binary(_, value) => Binary::decode(value),
        }
    }
}

impl AsRef<HeaderMap> for MetadataMap {
    fn as_ref(&self) -> &HeaderMap {
        &self.headers
    }
}

impl MetadataMap {
    /// Create an empty `MetadataMap`.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty `MetadataMap` with room for at least `capacity` entries.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            headers: HeaderMap::with_capacity(capacity),
        }
    }

    /// Wrap an existing [`HeaderMap`] as metadata.
    #[must_use]
    pub fn from_headers(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// Consume the map, returning the underlying headers.
    #[must_use]
    pub fn into_headers(self) -> HeaderMap {
        self.headers
    }

    pub(crate) fn into_sanitized_headers(mut self) -> HeaderMap {
        for reserved in &GRPC_RESERVED_HEADERS {
            self.headers.remove(reserved);
        }
        self.headers
    }

    pub(crate) fn sanitized(self) -> Self {
        Self::from_headers(self.into_sanitized_headers())
    }

    /// Number of values stored, counting every value of a repeated key.
    #[must_use]
    pub fn len(&self) -> usize {
        self.headers.len()
    }

    /// Returns `true` if no entries are stored.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.headers.is_empty()
    }

    /// Returns `true` if at least one value is stored under `key`.
    #[must_use]
    pub fn contains_key(&self, key: &str) -> bool {
        self.headers.contains_key(key)
    }

    /// Get the first ascii value stored under `key`.
    ///
    /// Binary keys and values that are not visible ascii yield `None`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&str> {
        if !Ascii::is_valid_key(key) {
            return None;
        }
        self.headers.get(key)?.to_str().ok()
    }

    /// Get the first binary value stored under `key`, base64 decoded.
    ///
    /// Ascii keys and malformed values yield `None`.
    #[must_use]
    pub fn get_bin(&self, key: &str) -> Option<Bytes> {
        if !Binary::is_valid_key(key) {
            return None;
        }
        Binary::decode(self.headers.get(key)?)
    }

    /// Get all decodable binary values stored under `key`, in insertion order.
    #[must_use]
    pub fn get_all_bin(&self, key: &str) -> Vec<Bytes> {
        if !Binary::is_valid_key(key) {
            return Vec::new();
        }
        self.headers
            .get_all(key)
            .iter()
            .filter_map(Binary::decode)
            .collect()
    }

    /// Insert an ascii value, replacing all values stored under `key`.
    pub fn insert(
        &mut self,
        key: AsciiMetadataKey,
        value: &str,
    ) -> Result<(), InvalidMetadataValue> {
        let value = Ascii::encode(value.as_bytes())?;
        self.headers.insert(key.inner, value);
        Ok(())
    }

    /// Insert a binary value, replacing all values stored under `key`.
    pub fn insert_bin(
        &mut self,
        key: BinaryMetadataKey,
        value: impl AsRef<[u8]>,
    ) -> Result<(), InvalidMetadataValue> {
        let value = Binary::encode(value.as_ref())?;
        self.headers.insert(key.inner, value);
        Ok(())
    }

    /// Append a binary value, keeping the values already stored under `key`.
    pub fn append_bin(
        &mut self,
        key: BinaryMetadataKey,
        value: impl AsRef<[u8]>,
    ) -> Result<(), InvalidMetadataValue> {
        let value = Binary::encode(value.as_ref())?;
        self.headers.append(key.inner, value);
        Ok(())
    }

    /// Remove every value stored under `key`, returns `true` if any was present.
    pub fn remove(&mut self, key: &str) -> bool {
        self.headers.remove(key).is_some()
    }

    /// Iterate over all entries, repeated keys yield one entry per value.
    pub fn iter(&self) -> impl Iterator<Item = KeyAndValueRef<'_>> {
        self.headers.iter().map(|(name, value)| {
            let key = name.as_str();
            if Binary::is_valid_key(key) {
                KeyAndValueRef::Binary(key, value)
            } else {
                KeyAndValueRef::Ascii(key, value)
            }
        })
    }
}
