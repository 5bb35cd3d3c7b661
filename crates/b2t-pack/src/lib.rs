//! Document tree and codecs for b2t.
//!
//! [`Value`] is the shared intermediate representation. The [`json`]
//! module moves it to and from text, and each binary format lives in its
//! own module behind the [`BinaryCodec`] trait:
//!
//! - [`cbor`]: RFC 8949, decoding backed by `ciborium`
//! - [`msgpack`]: MessagePack
//! - [`ubjson`]: Universal Binary JSON, Draft 12

mod value;

pub mod cbor;
pub mod json;
pub mod msgpack;
pub mod ubjson;

pub use cbor::{CborCodec, CborError};
pub use msgpack::{MsgPackCodec, MsgPackError};
pub use ubjson::{UbjsonCodec, UbjsonError};
pub use value::Value;

/// Deepest container nesting any decoder will follow.
pub const MAX_DEPTH: usize = 512;

/// An encode/decode pair over [`Value`] for one binary format.
///
/// Encoding is total: every tree has a representation in every format.
/// Decoding reports corrupt, truncated or unrepresentable input through
/// the codec's own error type.
pub trait BinaryCodec {
    type Error: std::error::Error + Send + Sync + 'static;

    fn encode(&mut self, value: &Value) -> Vec<u8>;

    fn decode(&self, bytes: &[u8]) -> Result<Value, Self::Error>;
}

/// Expands a byte string into an array of byte-valued integers, the shape
/// binary payloads take in the document tree.
pub(crate) fn bytes_to_array(bytes: &[u8]) -> Value {
    Value::Array(bytes.iter().map(|b| Value::Integer(i64::from(*b))).collect())
}
