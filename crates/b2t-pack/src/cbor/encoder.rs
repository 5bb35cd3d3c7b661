//! `CborEncoder`: writes a [`Value`] as definite-length CBOR.

use b2t_buffers::Writer;

use super::constants::*;
use crate::Value;

/// CBOR encoder.
///
/// Integers take the shortest head that fits, floats are written as
/// `f32` when that is lossless and as `f64` otherwise.
#[derive(Default)]
pub struct CborEncoder {
    pub writer: Writer,
}

impl CborEncoder {
    pub fn new() -> Self {
        Self {
            writer: Writer::new(),
        }
    }

    pub fn encode(&mut self, value: &Value) -> Vec<u8> {
        self.writer.reset();
        self.write_any(value);
        self.writer.flush()
    }

    pub fn write_any(&mut self, value: &Value) {
        match value {
            Value::Null => self.writer.u8(NULL),
            Value::Bool(b) => self.writer.u8(if *b { TRUE } else { FALSE }),
            Value::Integer(i) => self.write_integer(*i),
            Value::Float(f) => self.write_float(*f),
            Value::Str(s) => self.write_str(s),
            Value::Array(items) => {
                self.write_head(MAJOR_ARR, items.len() as u64);
                for item in items {
                    self.write_any(item);
                }
            }
            Value::Object(map) => {
                self.write_head(MAJOR_MAP, map.len() as u64);
                for (key, val) in map {
                    self.write_str(key);
                    self.write_any(val);
                }
            }
        }
    }

    /// Writes a major type with its argument in the shortest form.
    pub fn write_head(&mut self, major: u8, arg: u64) {
        let w = &mut self.writer;
        if arg < 24 {
            w.u8(major | arg as u8);
        } else if arg <= 0xff {
            w.u8(major | 24);
            w.u8(arg as u8);
        } else if arg <= 0xffff {
            w.u8u16(major | 25, arg as u16);
        } else if arg <= 0xffff_ffff {
            w.u8u32(major | 26, arg as u32);
        } else {
            w.u8u64(major | 27, arg);
        }
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_head(MAJOR_UIN, int as u64);
        } else {
            // -1 - n, computed without overflow for i64::MIN
            self.write_head(MAJOR_NIN, !(int as u64));
        }
    }

    pub fn write_float(&mut self, float: f64) {
        if is_f32_roundtrip(float) {
            self.writer.u8f32(FLOAT32, float as f32);
        } else {
            self.writer.u8f64(FLOAT64, float);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        self.write_head(MAJOR_STR, s.len() as u64);
        self.writer.utf8(s);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(v: Value) -> Vec<u8> {
        CborEncoder::new().encode(&v)
    }

    #[test]
    fn integer_heads() {
        assert_eq!(enc(Value::Integer(0)), [0x00]);
        assert_eq!(enc(Value::Integer(23)), [0x17]);
        assert_eq!(enc(Value::Integer(24)), [0x18, 0x18]);
        assert_eq!(enc(Value::Integer(1000)), [0x19, 0x03, 0xe8]);
        assert_eq!(enc(Value::Integer(-1)), [0x20]);
        assert_eq!(enc(Value::Integer(-1000)), [0x39, 0x03, 0xe7]);
        assert_eq!(
            enc(Value::Integer(i64::MIN)),
            [0x3b, 0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]
        );
    }

    #[test]
    fn floats_pick_narrowest_lossless_width() {
        assert_eq!(enc(Value::Float(1.5)), [0xfa, 0x3f, 0xc0, 0x00, 0x00]);
        assert_eq!(enc(Value::Float(0.1))[0], 0xfb);
    }

    #[test]
    fn containers_and_strings() {
        let v = Value::Array(vec![Value::Str("a".into()), Value::Null, Value::Bool(true)]);
        assert_eq!(enc(v), [0x83, 0x61, b'a', 0xf6, 0xf5]);
        let obj: Value = vec![("k".to_owned(), Value::Bool(false))].into_iter().collect();
        assert_eq!(enc(obj), [0xa1, 0x61, b'k', 0xf4]);
    }
}
