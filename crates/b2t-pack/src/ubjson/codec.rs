use super::decoder::UbjsonDecoder;
use super::encoder::UbjsonEncoder;
use super::error::UbjsonError;
use crate::{BinaryCodec, Value};

#[derive(Default)]
pub struct UbjsonCodec {
    encoder: UbjsonEncoder,
    decoder: UbjsonDecoder,
}

impl UbjsonCodec {
    pub fn new() -> Self {
        Self {
            encoder: UbjsonEncoder::new(),
            decoder: UbjsonDecoder::new(),
        }
    }
}

impl BinaryCodec for UbjsonCodec {
    type Error = UbjsonError;

    fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.encoder.encode(value)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, UbjsonError> {
        self.decoder.decode(bytes)
    }
}
