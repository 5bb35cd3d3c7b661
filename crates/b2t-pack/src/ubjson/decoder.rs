//! `UbjsonDecoder`: reads one UBJSON value into a [`Value`].

use b2t_buffers::{BufferError, Reader};
use indexmap::IndexMap;

use super::error::UbjsonError;
use super::marker::*;
use crate::{Value, MAX_DEPTH};

/// Total element count a document may claim across all typed containers
/// whose elements carry no payload (`[$Z#...`). Such elements take no
/// input bytes, so the limit spans the whole document rather than each
/// container.
pub const MAX_UNSIZED_COUNT: usize = 1 << 16;

/// Stateless UBJSON decoder.
///
/// Accepts both plain and optimized (`$` / `#`) containers. No-op markers
/// are skipped wherever a value or a closing marker may appear.
#[derive(Default)]
pub struct UbjsonDecoder;

impl UbjsonDecoder {
    pub fn new() -> Self {
        Self
    }

    pub fn decode(&self, input: &[u8]) -> Result<Value, UbjsonError> {
        let mut r = Reader::new(input);
        let m = self.next_marker(&mut r)?;
        let mut budget = MAX_UNSIZED_COUNT;
        let value = self.read_value(&mut r, m, 0, &mut budget)?;
        while !r.is_done() && r.peek()? == NOOP {
            r.u8()?;
        }
        if !r.is_done() {
            return Err(UbjsonError::TrailingBytes(r.remaining()));
        }
        Ok(value)
    }

    fn next_marker(&self, r: &mut Reader) -> Result<u8, UbjsonError> {
        loop {
            let m = r.u8()?;
            if m != NOOP {
                return Ok(m);
            }
        }
    }

    fn read_value(
        &self,
        r: &mut Reader,
        m: u8,
        depth: usize,
        budget: &mut usize,
    ) -> Result<Value, UbjsonError> {
        let offset = r.x.saturating_sub(1);
        match m {
            NULL => Ok(Value::Null),
            TRUE => Ok(Value::Bool(true)),
            FALSE => Ok(Value::Bool(false)),
            INT8 | UINT8 | INT16 | INT32 | INT64 => Ok(Value::Integer(self.read_int(r, m, offset)?)),
            FLOAT32 => Ok(Value::Float(f64::from(r.f32()?))),
            FLOAT64 => Ok(Value::Float(r.f64()?)),
            HIGH_PRECISION => {
                let len = self.read_length(r)?;
                high_precision(r.utf8(len)?)
            }
            // a single byte is valid UTF-8 only when it is ASCII
            CHAR => Ok(Value::Str(r.utf8(1)?.to_owned())),
            STRING => {
                let len = self.read_length(r)?;
                Ok(Value::Str(r.utf8(len)?.to_owned()))
            }
            ARRAY_START => self.read_arr(r, depth, budget),
            OBJECT_START => self.read_obj(r, depth, budget),
            _ => Err(UbjsonError::UnexpectedMarker { marker: m, offset }),
        }
    }

    fn read_int(&self, r: &mut Reader, m: u8, offset: usize) -> Result<i64, UbjsonError> {
        Ok(match m {
            INT8 => i64::from(r.i8()?),
            UINT8 => i64::from(r.u8()?),
            INT16 => i64::from(r.i16()?),
            INT32 => i64::from(r.i32()?),
            INT64 => r.i64()?,
            _ => return Err(UbjsonError::UnexpectedMarker { marker: m, offset }),
        })
    }

    fn read_length(&self, r: &mut Reader) -> Result<usize, UbjsonError> {
        let offset = r.x;
        let m = r.u8()?;
        self.length_from(r, m, offset)
    }

    fn length_from(&self, r: &mut Reader, m: u8, offset: usize) -> Result<usize, UbjsonError> {
        let n = self.read_int(r, m, offset)?;
        usize::try_from(n).map_err(|_| UbjsonError::NegativeLength(n))
    }

    /// Reads the optional `$type` and `#count` that may follow `[` or `{`.
    ///
    /// Payload-free element counts are charged against `budget`.
    fn read_header(
        &self,
        r: &mut Reader,
        budget: &mut usize,
    ) -> Result<(Option<u8>, Option<usize>), UbjsonError> {
        let mut kind = None;
        if r.peek()? == TYPE {
            r.u8()?;
            let offset = r.x;
            let t = r.u8()?;
            if matches!(t, NOOP | ARRAY_END | OBJECT_END | TYPE | COUNT) {
                return Err(UbjsonError::UnexpectedMarker { marker: t, offset });
            }
            kind = Some(t);
        }
        let mut count = None;
        if r.peek()? == COUNT {
            r.u8()?;
            let n = self.read_length(r)?;
            if matches!(kind, Some(NULL | TRUE | FALSE)) {
                if n > *budget {
                    return Err(UbjsonError::CountTooLarge(n));
                }
                *budget -= n;
            } else if n > r.remaining() {
                // every element takes at least one byte
                return Err(BufferError::UnexpectedEof {
                    offset: r.x,
                    needed: n - r.remaining(),
                }
                .into());
            }
            count = Some(n);
        }
        if kind.is_some() && count.is_none() {
            return Err(UbjsonError::MissingCount);
        }
        Ok((kind, count))
    }

    fn element_marker(&self, r: &mut Reader, kind: Option<u8>) -> Result<u8, UbjsonError> {
        match kind {
            Some(t) => Ok(t),
            None => self.next_marker(r),
        }
    }

    fn read_arr(&self, r: &mut Reader, depth: usize, budget: &mut usize) -> Result<Value, UbjsonError> {
        if depth >= MAX_DEPTH {
            return Err(UbjsonError::TooDeep(MAX_DEPTH));
        }
        let (kind, count) = self.read_header(r, budget)?;
        let mut arr = Vec::with_capacity(count.unwrap_or(0).min(r.remaining()));
        match count {
            Some(n) => {
                for _ in 0..n {
                    let m = self.element_marker(r, kind)?;
                    arr.push(self.read_value(r, m, depth + 1, budget)?);
                }
            }
            None => loop {
                let m = self.next_marker(r)?;
                if m == ARRAY_END {
                    break;
                }
                arr.push(self.read_value(r, m, depth + 1, budget)?);
            },
        }
        Ok(Value::Array(arr))
    }

    fn read_obj(&self, r: &mut Reader, depth: usize, budget: &mut usize) -> Result<Value, UbjsonError> {
        if depth >= MAX_DEPTH {
            return Err(UbjsonError::TooDeep(MAX_DEPTH));
        }
        let (kind, count) = self.read_header(r, budget)?;
        let mut obj = IndexMap::with_capacity(count.unwrap_or(0).min(r.remaining()));
        match count {
            Some(n) => {
                for _ in 0..n {
                    let len = self.read_length(r)?;
                    let key = r.utf8(len)?.to_owned();
                    let m = self.element_marker(r, kind)?;
                    obj.insert(key, self.read_value(r, m, depth + 1, budget)?);
                }
            }
            None => loop {
                let m = self.next_marker(r)?;
                if m == OBJECT_END {
                    break;
                }
                let offset = r.x - 1;
                let len = self.length_from(r, m, offset)?;
                let key = r.utf8(len)?.to_owned();
                let m = self.next_marker(r)?;
                obj.insert(key, self.read_value(r, m, depth + 1, budget)?);
            },
        }
        Ok(Value::Object(obj))
    }
}

/// Converts the decimal text of an `H` value into an integer or a float.
fn high_precision(text: &str) -> Result<Value, UbjsonError> {
    let n: serde_json::Number = serde_json::from_str(text)
        .map_err(|_| UbjsonError::InvalidHighPrecision(text.to_owned()))?;
    Ok(match n.as_i64() {
        Some(i) => Value::Integer(i),
        None => Value::Float(n.as_f64().unwrap_or(f64::NAN)),
    })
}
