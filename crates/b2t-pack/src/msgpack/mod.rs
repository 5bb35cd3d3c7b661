//! MessagePack encoder/decoder.

mod codec;
mod decoder;
mod encoder;
mod error;

pub use codec::MsgPackCodec;
pub use decoder::MsgPackDecoder;
pub use encoder::MsgPackEncoder;
pub use error::MsgPackError;
