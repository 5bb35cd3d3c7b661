//! Byte buffers shared by the hand-written binary codecs.
//!
//! [`Writer`] appends big-endian primitives to a growable buffer and
//! [`Reader`] consumes them again, reporting truncated input as
//! [`BufferError`] instead of panicking.

mod reader;
mod writer;

pub use reader::Reader;
pub use writer::Writer;

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BufferError {
    #[error("unexpected end of input at offset {offset}: needed {needed} more byte(s)")]
    UnexpectedEof { offset: usize, needed: usize },
    #[error("invalid utf-8 in string at offset {0}")]
    InvalidUtf8(usize),
}
