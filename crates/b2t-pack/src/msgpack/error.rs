use b2t_buffers::BufferError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum MsgPackError {
    #[error(transparent)]
    Buffer(#[from] BufferError),
    #[error("invalid marker 0x{marker:02x} at offset {offset}")]
    InvalidMarker { marker: u8, offset: usize },
    #[error("extension type {0} has no document representation")]
    Extension(i8),
    #[error("map key at offset {0} is not a string")]
    NonStringKey(usize),
    #[error("containers nested deeper than {0} levels")]
    TooDeep(usize),
    #[error("{0} trailing byte(s) after the value")]
    TrailingBytes(usize),
}
