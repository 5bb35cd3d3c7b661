//! Bounds-checked byte reader with cursor tracking.

use std::str;

use crate::BufferError;

/// Reads big-endian primitives from a byte slice.
///
/// Every read checks the remaining length first, so truncated input
/// surfaces as [`BufferError::UnexpectedEof`].
///
/// # Example
///
/// ```
/// use b2t_buffers::Reader;
///
/// let data = [0x01, 0x02, 0x03];
/// let mut reader = Reader::new(&data);
/// assert_eq!(reader.u8().unwrap(), 0x01);
/// assert_eq!(reader.u16().unwrap(), 0x0203);
/// assert!(reader.u8().is_err());
/// ```
pub struct Reader<'a> {
    data: &'a [u8],
    /// Cursor position.
    pub x: usize,
}

macro_rules! read_be {
    ($name:ident, $ty:ty, $n:literal) => {
        #[inline]
        pub fn $name(&mut self) -> Result<$ty, BufferError> {
            let bytes: [u8; $n] = self.array()?;
            Ok(<$ty>::from_be_bytes(bytes))
        }
    };
}

impl<'a> Reader<'a> {
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, x: 0 }
    }

    /// Number of bytes left after the cursor.
    pub fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.x)
    }

    pub fn is_done(&self) -> bool {
        self.x >= self.data.len()
    }

    #[inline]
    fn check(&self, n: usize) -> Result<(), BufferError> {
        if self.remaining() < n {
            Err(BufferError::UnexpectedEof {
                offset: self.x,
                needed: n - self.remaining(),
            })
        } else {
            Ok(())
        }
    }

    #[inline]
    fn array<const N: usize>(&mut self) -> Result<[u8; N], BufferError> {
        self.check(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(&self.data[self.x..self.x + N]);
        self.x += N;
        Ok(out)
    }

    /// Returns the byte under the cursor without consuming it.
    #[inline]
    pub fn peek(&self) -> Result<u8, BufferError> {
        self.check(1)?;
        Ok(self.data[self.x])
    }

    #[inline]
    pub fn u8(&mut self) -> Result<u8, BufferError> {
        self.check(1)?;
        let v = self.data[self.x];
        self.x += 1;
        Ok(v)
    }

    #[inline]
    pub fn i8(&mut self) -> Result<i8, BufferError> {
        self.u8().map(|b| b as i8)
    }

    read_be!(u16, u16, 2);
    read_be!(i16, i16, 2);
    read_be!(u32, u32, 4);
    read_be!(i32, i32, 4);
    read_be!(u64, u64, 8);
    read_be!(i64, i64, 8);
    read_be!(f32, f32, 4);
    read_be!(f64, f64, 8);

    /// Returns the next `size` bytes and advances past them.
    pub fn buf(&mut self, size: usize) -> Result<&'a [u8], BufferError> {
        self.check(size)?;
        let out = &self.data[self.x..self.x + size];
        self.x += size;
        Ok(out)
    }

    /// Reads `size` bytes as a UTF-8 string.
    pub fn utf8(&mut self, size: usize) -> Result<&'a str, BufferError> {
        let start = self.x;
        let bytes = self.buf(size)?;
        str::from_utf8(bytes).map_err(|_| BufferError::InvalidUtf8(start))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reads_big_endian_integers() {
        let data = [0xff, 0xfe, 0x00, 0x00, 0x01, 0x00];
        let mut r = Reader::new(&data);
        assert_eq!(r.i16().unwrap(), -2);
        assert_eq!(r.u32().unwrap(), 256);
        assert!(r.is_done());
    }

    #[test]
    fn truncated_read_reports_offset() {
        let data = [0x01, 0x02];
        let mut r = Reader::new(&data);
        r.u8().unwrap();
        assert_eq!(
            r.u32(),
            Err(BufferError::UnexpectedEof { offset: 1, needed: 3 })
        );
        // cursor is untouched by a failed read
        assert_eq!(r.x, 1);
    }

    #[test]
    fn utf8_rejects_invalid_sequences() {
        let data = [b'o', b'k', 0xc3, 0x28];
        let mut r = Reader::new(&data);
        assert_eq!(r.utf8(2).unwrap(), "ok");
        assert_eq!(r.utf8(2), Err(BufferError::InvalidUtf8(2)));
    }

    #[test]
    fn peek_does_not_advance() {
        let data = [0x5d];
        let r = Reader::new(&data);
        assert_eq!(r.peek().unwrap(), 0x5d);
        assert_eq!(r.remaining(), 1);
    }
}
