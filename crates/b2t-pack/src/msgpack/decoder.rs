//! `MsgPackDecoder`: reads one MessagePack value into a [`Value`].

use b2t_buffers::Reader;
use indexmap::IndexMap;

use super::error::MsgPackError;
use crate::{bytes_to_array, Value, MAX_DEPTH};

/// Stateless MessagePack decoder.
///
/// `bin` payloads become arrays of byte-valued integers, `uint 64` values
/// above `i64::MAX` become floats, and extension types are rejected.
#[derive(Default)]
pub struct MsgPackDecoder;

impl MsgPackDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &[u8]) -> Result<Value, MsgPackError> {
        let mut r = Reader::new(input);
        let value = self.read_any(&mut r, 0)?;
        if !r.is_done() {
            return Err(MsgPackError::TrailingBytes(r.remaining()));
        }
        Ok(value)
    }

    fn read_any(&self, r: &mut Reader, depth: usize) -> Result<Value, MsgPackError> {
        let offset = r.x;
        let byte = r.u8()?;
        match byte {
            0x00..=0x7f => Ok(Value::Integer(i64::from(byte))),
            0x80..=0x8f => self.read_obj(r, usize::from(byte & 0xf), depth),
            0x90..=0x9f => self.read_arr(r, usize::from(byte & 0xf), depth),
            0xa0..=0xbf => self.read_str(r, usize::from(byte & 0x1f)),
            0xc0 => Ok(Value::Null),
            0xc2 => Ok(Value::Bool(false)),
            0xc3 => Ok(Value::Bool(true)),
            0xc4 => {
                let n = usize::from(r.u8()?);
                Ok(bytes_to_array(r.buf(n)?))
            }
            0xc5 => {
                let n = usize::from(r.u16()?);
                Ok(bytes_to_array(r.buf(n)?))
            }
            0xc6 => {
                let n = r.u32()? as usize;
                Ok(bytes_to_array(r.buf(n)?))
            }
            0xc7..=0xc9 => {
                let len = match byte {
                    0xc7 => usize::from(r.u8()?),
                    0xc8 => usize::from(r.u16()?),
                    _ => r.u32()? as usize,
                };
                Err(MsgPackError::Extension(self.skip_ext(r, len)?))
            }
            0xca => Ok(Value::Float(f64::from(r.f32()?))),
            0xcb => Ok(Value::Float(r.f64()?)),
            0xcc => Ok(Value::Integer(i64::from(r.u8()?))),
            0xcd => Ok(Value::Integer(i64::from(r.u16()?))),
            0xce => Ok(Value::Integer(i64::from(r.u32()?))),
            0xcf => {
                let n = r.u64()?;
                Ok(i64::try_from(n).map_or(Value::Float(n as f64), Value::Integer))
            }
            0xd0 => Ok(Value::Integer(i64::from(r.i8()?))),
            0xd1 => Ok(Value::Integer(i64::from(r.i16()?))),
            0xd2 => Ok(Value::Integer(i64::from(r.i32()?))),
            0xd3 => Ok(Value::Integer(r.i64()?)),
            0xd4..=0xd8 => {
                let len = 1usize << (byte - 0xd4);
                Err(MsgPackError::Extension(self.skip_ext(r, len)?))
            }
            0xd9 => {
                let n = usize::from(r.u8()?);
                self.read_str(r, n)
            }
            0xda => {
                let n = usize::from(r.u16()?);
                self.read_str(r, n)
            }
            0xdb => {
                let n = r.u32()? as usize;
                self.read_str(r, n)
            }
            0xdc => {
                let n = usize::from(r.u16()?);
                self.read_arr(r, n, depth)
            }
            0xdd => {
                let n = r.u32()? as usize;
                self.read_arr(r, n, depth)
            }
            0xde => {
                let n = usize::from(r.u16()?);
                self.read_obj(r, n, depth)
            }
            0xdf => {
                let n = r.u32()? as usize;
                self.read_obj(r, n, depth)
            }
            // negative fixint
            0xe0..=0xff => Ok(Value::Integer(i64::from(byte as i8))),
            // 0xc1 is reserved
            _ => Err(MsgPackError::InvalidMarker { marker: byte, offset }),
        }
    }

    /// Reads the type byte and payload of an extension so truncation is
    /// reported before the extension itself.
    fn skip_ext(&self, r: &mut Reader, len: usize) -> Result<i8, MsgPackError> {
        let tag = r.i8()?;
        r.buf(len)?;
        Ok(tag)
    }

    fn read_str(&self, r: &mut Reader, len: usize) -> Result<Value, MsgPackError> {
        Ok(Value::Str(r.utf8(len)?.to_owned()))
    }

    fn read_arr(&self, r: &mut Reader, len: usize, depth: usize) -> Result<Value, MsgPackError> {
        if depth >= MAX_DEPTH {
            return Err(MsgPackError::TooDeep(MAX_DEPTH));
        }
        // every element takes at least one byte
        let mut arr = Vec::with_capacity(len.min(r.remaining()));
        for _ in 0..len {
            arr.push(self.read_any(r, depth + 1)?);
        }
        Ok(Value::Array(arr))
    }

    fn read_obj(&self, r: &mut Reader, len: usize, depth: usize) -> Result<Value, MsgPackError> {
        if depth >= MAX_DEPTH {
            return Err(MsgPackError::TooDeep(MAX_DEPTH));
        }
        let mut obj = IndexMap::with_capacity(len.min(r.remaining() / 2));
        for _ in 0..len {
            let key_offset = r.x;
            let key = match self.read_any(r, depth + 1)? {
                Value::Str(s) => s,
                _ => return Err(MsgPackError::NonStringKey(key_offset)),
            };
            let val = self.read_any(r, depth + 1)?;
            obj.insert(key, val);
        }
        Ok(Value::Object(obj))
    }
}
