use thiserror::Error;

use crate::dispatch::Format;

/// Every way a conversion can fail. None of them are retried and no
/// partial result accompanies them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum Error {
    /// Input text is not a valid document.
    #[error("parse error at line {line}, column {column}: {message}")]
    Parse {
        line: usize,
        column: usize,
        message: String,
    },
    /// The selected codec could not decode the bytes.
    #[error("malformed {format} input: {reason}")]
    MalformedBinaryInput { format: Format, reason: String },
    /// A format or kind selector names nothing this crate supports.
    #[error("unsupported format: {0}")]
    UnsupportedFormat(String),
    /// A host value has no document-tree counterpart.
    #[error("unsupported value kind: {0}")]
    UnsupportedValueKind(String),
}

impl From<serde_json::Error> for Error {
    fn from(e: serde_json::Error) -> Self {
        Error::Parse {
            line: e.line(),
            column: e.column(),
            message: e.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
