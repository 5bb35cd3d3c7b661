//! `CborCodec`: combined encoder/decoder pair.

use super::decoder::CborDecoder;
use super::encoder::CborEncoder;
use super::error::CborError;
use crate::{BinaryCodec, Value};

#[derive(Default)]
pub struct CborCodec {
    encoder: CborEncoder,
    decoder: CborDecoder,
}

impl CborCodec {
    pub fn new() -> Self {
        Self {
            encoder: CborEncoder::new(),
            decoder: CborDecoder::new(),
        }
    }
}

impl BinaryCodec for CborCodec {
    type Error = CborError;

    fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.encoder.encode(value)
    }

    fn decode(&self, bytes: &[u8]) -> Result<Value, CborError> {
        self.decoder.decode(bytes)
    }
}
