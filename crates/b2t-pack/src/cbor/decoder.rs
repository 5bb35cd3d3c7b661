use ciborium::de::Error as DeError;
use ciborium::value::Value as CborValue;
use std::io::Cursor;

use super::convert::cbor_to_value;
use super::error::CborError;
use crate::{Value, MAX_DEPTH};

/// CBOR decoder backed by `ciborium`.
///
/// Exactly one item is read; bytes left over after it are an error.
/// Containers nest at most [`MAX_DEPTH`] levels, as in the other decoders.
#[derive(Default)]
pub struct CborDecoder;

impl CborDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, bytes: &[u8]) -> Result<Value, CborError> {
        let mut cursor = Cursor::new(bytes);
        let item = ciborium::de::from_reader_with_recursion_limit::<CborValue, _>(
            &mut cursor,
            MAX_DEPTH,
        )
        .map_err(|e| match e {
            DeError::RecursionLimitExceeded => CborError::TooDeep(MAX_DEPTH),
            e => CborError::InvalidPayload(e.to_string()),
        })?;
        let consumed = cursor.position() as usize;
        if consumed != bytes.len() {
            return Err(CborError::TrailingBytes(bytes.len() - consumed));
        }
        cbor_to_value(item)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_indefinite_length_containers() {
        // [_ 1, 2]
        let v = CborDecoder::new().decode(&[0x9f, 0x01, 0x02, 0xff]).unwrap();
        assert_eq!(v, Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
    }

    #[test]
    fn decodes_half_precision_floats() {
        let v = CborDecoder::new().decode(&[0xf9, 0x3e, 0x00]).unwrap();
        assert_eq!(v, Value::Float(1.5));
    }

    #[test]
    fn truncated_input_is_invalid() {
        let err = CborDecoder::new().decode(&[0x83, 0x01]).unwrap_err();
        assert!(matches!(err, CborError::InvalidPayload(_)));
    }

    #[test]
    fn trailing_bytes_are_rejected() {
        let err = CborDecoder::new().decode(&[0x01, 0x02]).unwrap_err();
        assert_eq!(err, CborError::TrailingBytes(1));
    }

    #[test]
    fn nesting_is_capped() {
        // debug builds recurse through serde with large frames
        std::thread::Builder::new()
            .stack_size(64 << 20)
            .spawn(|| {
                let mut ok = vec![0x81u8; MAX_DEPTH - 1];
                ok.push(0x80);
                assert!(CborDecoder::new().decode(&ok).is_ok());

                let mut deep = vec![0x81u8; MAX_DEPTH];
                deep.push(0x80);
                assert_eq!(
                    CborDecoder::new().decode(&deep),
                    Err(CborError::TooDeep(MAX_DEPTH))
                );
            })
            .unwrap()
            .join()
            .unwrap();
    }

    #[test]
    fn empty_input_is_invalid() {
        assert!(CborDecoder::new().decode(&[]).is_err());
    }
}
