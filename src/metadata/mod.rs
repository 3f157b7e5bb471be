//! gRPC custom metadata, the key/value entries sent along headers and
//! trailers of a call.

mod encoding;
mod key;
mod map;

pub use encoding::{Ascii, Binary, InvalidMetadataValue, ValueEncoding};
pub use key::{AsciiMetadataKey, BinaryMetadataKey, InvalidMetadataKey, MetadataKey};
pub use map::{KeyAndValueRef, MetadataMap};
