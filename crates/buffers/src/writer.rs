//! Growable byte writer.

/// Appends big-endian primitives to an owned buffer.
///
/// Codecs keep one writer around and call [`Writer::flush`] after each
/// top-level value; the buffer is cleared but its allocation is kept.
///
/// # Example
///
/// ```
/// use b2t_buffers::Writer;
///
/// let mut writer = Writer::new();
/// writer.u8(0x01);
/// writer.u16(0x0203);
/// assert_eq!(writer.flush(), [0x01, 0x02, 0x03]);
/// ```
#[derive(Debug, Default)]
pub struct Writer {
    buf: Vec<u8>,
}

impl Writer {
    pub fn new() -> Self {
        Self::with_capacity(1024)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written since the last flush.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Drops anything written since the last flush.
    pub fn reset(&mut self) {
        self.buf.clear();
    }

    /// Returns the written bytes and empties the writer.
    pub fn flush(&mut self) -> Vec<u8> {
        let out = self.buf.clone();
        self.buf.clear();
        out
    }

    #[inline]
    pub fn u8(&mut self, val: u8) {
        self.buf.push(val);
    }

    #[inline]
    pub fn i8(&mut self, val: i8) {
        self.buf.push(val as u8);
    }

    #[inline]
    pub fn u16(&mut self, val: u16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i16(&mut self, val: i16) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u32(&mut self, val: u32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i32(&mut self, val: i32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn u64(&mut self, val: u64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn i64(&mut self, val: i64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn f32(&mut self, val: f32) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    #[inline]
    pub fn f64(&mut self, val: f64) {
        self.buf.extend_from_slice(&val.to_be_bytes());
    }

    /// Writes a marker byte followed by a `u16` payload.
    #[inline]
    pub fn u8u16(&mut self, marker: u8, val: u16) {
        self.u8(marker);
        self.u16(val);
    }

    /// Writes a marker byte followed by a `u32` payload.
    #[inline]
    pub fn u8u32(&mut self, marker: u8, val: u32) {
        self.u8(marker);
        self.u32(val);
    }

    /// Writes a marker byte followed by a `u64` payload.
    #[inline]
    pub fn u8u64(&mut self, marker: u8, val: u64) {
        self.u8(marker);
        self.u64(val);
    }

    /// Writes a marker byte followed by an `f32` payload.
    #[inline]
    pub fn u8f32(&mut self, marker: u8, val: f32) {
        self.u8(marker);
        self.f32(val);
    }

    /// Writes a marker byte followed by an `f64` payload.
    #[inline]
    pub fn u8f64(&mut self, marker: u8, val: f64) {
        self.u8(marker);
        self.f64(val);
    }

    /// Writes the UTF-8 bytes of `s` and returns how many were written.
    pub fn utf8(&mut self, s: &str) -> usize {
        self.buf.extend_from_slice(s.as_bytes());
        s.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn writes_big_endian() {
        let mut w = Writer::new();
        w.u16(0x0102);
        w.i32(-2);
        w.u8u64(0xcf, 1);
        assert_eq!(
            w.flush(),
            [0x01, 0x02, 0xff, 0xff, 0xff, 0xfe, 0xcf, 0, 0, 0, 0, 0, 0, 0, 1]
        );
    }

    #[test]
    fn flush_empties_the_writer() {
        let mut w = Writer::new();
        w.u8(1);
        assert_eq!(w.flush(), [1]);
        assert!(w.is_empty());
        w.utf8("hé");
        assert_eq!(w.len(), 3);
        w.reset();
        assert_eq!(w.flush(), Vec::<u8>::new());
    }

    #[test]
    fn f64_roundtrips_through_bytes() {
        let mut w = Writer::new();
        w.u8f64(0xcb, 1.5);
        let out = w.flush();
        assert_eq!(out[0], 0xcb);
        assert_eq!(f64::from_be_bytes(out[1..].try_into().unwrap()), 1.5);
    }
}
