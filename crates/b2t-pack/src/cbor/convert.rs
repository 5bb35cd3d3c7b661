use ciborium::value::Value as CborValue;
use indexmap::IndexMap;

use super::error::CborError;
use crate::{bytes_to_array, Value};

/// Converts a decoded `ciborium` item into the document tree.
///
/// - integers outside `i64` become floats
/// - byte strings become arrays of byte-valued integers
/// - tags are dropped and their content converted
/// - map keys must be text strings; a repeated key keeps the last value
pub fn cbor_to_value(v: CborValue) -> Result<Value, CborError> {
    Ok(match v {
        CborValue::Null => Value::Null,
        CborValue::Bool(b) => Value::Bool(b),
        CborValue::Integer(i) => {
            let wide = i128::from(i);
            match i64::try_from(wide) {
                Ok(n) => Value::Integer(n),
                Err(_) => Value::Float(wide as f64),
            }
        }
        CborValue::Float(f) => Value::Float(f),
        CborValue::Text(s) => Value::Str(s),
        CborValue::Bytes(bytes) => bytes_to_array(&bytes),
        CborValue::Array(items) => Value::Array(
            items
                .into_iter()
                .map(cbor_to_value)
                .collect::<Result<_, _>>()?,
        ),
        CborValue::Map(entries) => {
            let mut out = IndexMap::with_capacity(entries.len());
            for (k, v) in entries {
                let key = match k {
                    CborValue::Text(s) => s,
                    other => return Err(CborError::NonStringKey(kind_name(&other))),
                };
                out.insert(key, cbor_to_value(v)?);
            }
            Value::Object(out)
        }
        CborValue::Tag(_, inner) => cbor_to_value(*inner)?,
        _ => return Err(CborError::Unsupported("simple value")),
    })
}

fn kind_name(v: &CborValue) -> &'static str {
    match v {
        CborValue::Integer(_) => "integer",
        CborValue::Bytes(_) => "byte string",
        CborValue::Float(_) => "float",
        CborValue::Text(_) => "text string",
        CborValue::Bool(_) => "boolean",
        CborValue::Null => "null",
        CborValue::Tag(..) => "tag",
        CborValue::Array(_) => "array",
        CborValue::Map(_) => "map",
        _ => "simple value",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wide_integers_fall_back_to_float() {
        let v = cbor_to_value(CborValue::Integer(u64::MAX.into())).unwrap();
        assert_eq!(v, Value::Float(u64::MAX as f64));
        let v = cbor_to_value(CborValue::Integer((-5i64).into())).unwrap();
        assert_eq!(v, Value::Integer(-5));
    }

    #[test]
    fn tags_are_transparent() {
        let tagged = CborValue::Tag(1, Box::new(CborValue::Integer(1_700_000_000.into())));
        assert_eq!(cbor_to_value(tagged).unwrap(), Value::Integer(1_700_000_000));
    }

    #[test]
    fn non_text_keys_are_rejected() {
        let map = CborValue::Map(vec![(CborValue::Integer(1.into()), CborValue::Null)]);
        assert_eq!(cbor_to_value(map), Err(CborError::NonStringKey("integer")));
    }

    #[test]
    fn byte_strings_expand() {
        let v = cbor_to_value(CborValue::Bytes(vec![1, 2])).unwrap();
        assert_eq!(v, Value::Array(vec![Value::Integer(1), Value::Integer(2)]));
    }
}
