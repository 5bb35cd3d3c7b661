use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CborError {
    #[error("invalid cbor payload: {0}")]
    InvalidPayload(String),
    #[error("map key must be a text string, found {0}")]
    NonStringKey(&'static str),
    #[error("unsupported cbor item: {0}")]
    Unsupported(&'static str),
    #[error("{0} trailing byte(s) after the cbor item")]
    TrailingBytes(usize),
    #[error("containers nested deeper than {0} levels")]
    TooDeep(usize),
}
