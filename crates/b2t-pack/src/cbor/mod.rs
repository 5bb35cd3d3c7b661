//! CBOR (RFC 8949).
//!
//! Encoding is hand-written on the shared [`Writer`](b2t_buffers::Writer);
//! decoding parses into `ciborium`'s value model and converts from there.

mod codec;
mod constants;
mod convert;
mod decoder;
mod encoder;
mod error;

pub use codec::CborCodec;
pub use convert::cbor_to_value;
pub use decoder::CborDecoder;
pub use encoder::CborEncoder;
pub use error::CborError;
