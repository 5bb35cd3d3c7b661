use b2t_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UbjsonError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("unexpected marker 0x{marker:02x} at offset {offset}")]
    UnexpectedMarker { marker: u8, offset: usize },
    #[error("negative length {0}")]
    NegativeLength(i64),
    #[error("optimized container declares a type but no count")]
    MissingCount,
    #[error("typed container count {0} exceeds the expansion limit")]
    CountTooLarge(usize),
    #[error("invalid high-precision number {0:?}")]
    InvalidHighPrecision(String),
    #[error("containers nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("{0} trailing byte(s) after the value")]
    TrailingBytes(usize),
}
