use super::decoder::MsgPackDecoder;
use super::encoder::MsgPackEncoder;
use super::error::MsgPackError;
use crate::{BinaryCodec, Value};

#[derive(Default)]
pub struct MsgPackCodec {
    encoder: MsgPackEncoder,
    decoder: MsgPackDecoder,
}

impl MsgPackCodec {
    pub fn new() -> Self {
        Self {
            encoder: MsgPackEncoder::new(),
            decoder: MsgPackDecoder::new(),
        }
    }
}

impl BinaryCodec for MsgPackCodec {
    type Error = MsgPackError;

    fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.encoder.encode(value)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, MsgPackError> {
        self.decoder.decode(bytes)
    }
}
