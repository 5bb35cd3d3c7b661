//! `MsgPackEncoder`: writes a [`Value`] as MessagePack.

use b2t_buffers::Writer;

use crate::Value;

/// MessagePack encoder.
///
/// Integers use the smallest family that holds them, up to `uint 64` /
/// `int 64`; floats are always `float 64`.
#[derive(Default)]
pub struct MsgPackEncoder {
    pub writer: Writer,
}

impl MsgPackEncoder {
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
            Value::Null => self.writer.u8(0xc0),
            Value::Bool(b) => self.writer.u8(if *b { 0xc3 } else { 0xc2 }),
            Value::Integer(i) => self.write_integer(*i),
            Value::Float(f) => self.writer.u8f64(0xcb, *f),
            Value::Str(s) => self.write_str(s),
            Value::Array(items) => {
                self.write_arr_hdr(items.len());
                for item in items {
                    self.write_any(item);
                }
            }
            Value::Object(map) => {
                self.write_obj_hdr(map.len());
                for (key, val) in map {
                    self.write_str(key);
                    self.write_any(val);
                }
            }
        }
    }

    pub fn write_integer(&mut self, int: i64) {
        if int >= 0 {
            self.write_u_integer(int as u64);
            return;
        }
        let w = &mut self.writer;
        if int >= -0x20 {
            // negative fixint
            w.i8(int as i8);
        } else if int >= i64::from(i8::MIN) {
            w.u8(0xd0);
            w.i8(int as i8);
        } else if int >= i64::from(i16::MIN) {
            w.u8(0xd1);
            w.i16(int as i16);
        } else if int >= i64::from(i32::MIN) {
            w.u8(0xd2);
            w.i32(int as i32);
        } else {
            w.u8(0xd3);
            w.i64(int);
        }
    }

    pub fn write_u_integer(&mut self, uint: u64) {
        let w = &mut self.writer;
        if uint <= 0x7f {
            w.u8(uint as u8);
        } else if uint <= 0xff {
            w.u8(0xcc);
            w.u8(uint as u8);
        } else if uint <= 0xffff {
            w.u8u16(0xcd, uint as u16);
        } else if uint <= 0xffff_ffff {
            w.u8u32(0xce, uint as u32);
        } else {
            w.u8u64(0xcf, uint);
        }
    }

    pub fn write_str(&mut self, s: &str) {
        let length = s.len();
        if length <= 0x1f {
            self.writer.u8(0xa0 | length as u8);
        } else if length <= 0xff {
            self.writer.u8(0xd9);
            self.writer.u8(length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(0xda, length as u16);
        } else {
            self.writer.u8u32(0xdb, length as u32);
        }
        self.writer.utf8(s);
    }

    pub fn write_arr_hdr(&mut self, length: usize) {
        if length <= 0xf {
            self.writer.u8(0x90 | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(0xdc, length as u16);
        } else {
            self.writer.u8u32(0xdd, length as u32);
        }
    }

    pub fn write_obj_hdr(&mut self, length: usize) {
        if length <= 0xf {
            self.writer.u8(0x80 | length as u8);
        } else if length <= 0xffff {
            self.writer.u8u16(0xde, length as u16);
        } else {
            self.writer.u8u32(0xdf, length as u32);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enc(v: Value) -> Vec<u8> {
        MsgPackEncoder::new().encode(&v)
    }

    #[test]
    fn integer_families() {
        assert_eq!(enc(Value::Integer(5)), [0x05]);
        assert_eq!(enc(Value::Integer(200)), [0xcc, 200]);
        assert_eq!(enc(Value::Integer(-1)), [0xff]);
        assert_eq!(enc(Value::Integer(-32)), [0xe0]);
        assert_eq!(enc(Value::Integer(-33)), [0xd0, 0xdf]);
        assert_eq!(enc(Value::Integer(-200)), [0xd1, 0xff, 0x38]);
        assert_eq!(enc(Value::Integer(1 << 40))[0], 0xcf);
        assert_eq!(enc(Value::Integer(i64::MIN))[0], 0xd3);
    }

    #[test]
    fn strings_and_containers() {
        assert_eq!(enc(Value::Str("hi".into())), [0xa2, b'h', b'i']);
        assert_eq!(enc(Value::Str("x".repeat(40)))[..2], [0xd9, 40]);
        let v = Value::Array(vec![Value::Null, Value::Bool(false)]);
        assert_eq!(enc(v), [0x92, 0xc0, 0xc2]);
        let obj: Value = vec![("a".to_owned(), Value::Integer(1))].into_iter().collect();
        assert_eq!(enc(obj), [0x81, 0xa1, b'a', 0x01]);
    }

    #[test]
    fn floats_are_float64() {
        let out = enc(Value::Float(2.0));
        assert_eq!(out[0], 0xcb);
        assert_eq!(out.len(), 9);
    }
}
