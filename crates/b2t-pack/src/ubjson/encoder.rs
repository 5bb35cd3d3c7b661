//! `UbjsonEncoder`: writes a [`Value`] as UBJSON.

use b2t_buffers::Writer;

use super::marker;
use crate::Value;

/// UBJSON encoder.
///
/// Containers are written in the plain `[ ... ]` / `{ ... }` form,
/// integers use the smallest marker that fits and floats use `D`.
#[derive(Default)]
pub struct UbjsonEncoder {
    pub writer: Writer,
}

impl UbjsonEncoder {
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
            Value::Null => self.writer.u8(marker::NULL),
            Value::Bool(b) => self.writer.u8(if *b { marker::TRUE } else { marker::FALSE }),
            Value::Integer(i) => self.write_integer(*i),
            Value::Float(f) => self.writer.u8f64(marker::FLOAT64, *f),
            Value::Str(s) => {
                self.writer.u8(marker::STRING);
                self.write_key(s);
            }
            Value::Array(items) => {
                self.writer.u8(marker::ARRAY_START);
                for item in items {
                    self.write_any(item);
                }
                self.writer.u8(marker::ARRAY_END);
            }
            Value::Object(map) => {
                self.writer.u8(marker::OBJECT_START);
                for (key, val) in map {
                    self.write_key(key);
                    self.write_any(val);
                }
                self.writer.u8(marker::OBJECT_END);
            }
        }
    }

    /// Writes an integer with the smallest marker that holds it.
    pub fn write_integer(&mut self, int: i64) {
        let w = &mut self.writer;
        if (0..=0xff).contains(&int) {
            w.u8(marker::UINT8);
            w.u8(int as u8);
        } else if (i64::from(i8::MIN)..0).contains(&int) {
            w.u8(marker::INT8);
            w.i8(int as i8);
        } else if i16::try_from(int).is_ok() {
            w.u8(marker::INT16);
            w.i16(int as i16);
        } else if i32::try_from(int).is_ok() {
            w.u8(marker::INT32);
            w.i32(int as i32);
        } else {
            w.u8(marker::INT64);
            w.i64(int);
        }
    }

    /// Writes a length-prefixed UTF-8 string without the `S` marker, the
    /// form object keys take.
    pub fn write_key(&mut self, s: &str) {
        self.write_integer(s.len() as i64);
        self.writer.utf8(s);
    }
}
