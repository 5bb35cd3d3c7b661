//! Universal Binary JSON (Draft 12).
//!
//! Wire format markers:
//! - `Z` null, `N` no-op, `T` / `F` booleans
//! - `i` int8, `U` uint8, `I` int16, `l` int32, `L` int64 (big-endian)
//! - `d` float32, `D` float64, `H` high-precision number (decimal text)
//! - `C` single ASCII char, `S` string: length integer + UTF-8 bytes
//! - `[` ... `]` arrays, `{` ... `}` objects (keys carry no `S` marker)
//! - optimized containers: `$<type>` and/or `#<count>` after the opening
//!   marker; with a count there is no closing marker

mod codec;
mod decoder;
mod encoder;
mod error;

pub use codec::UbjsonCodec;
pub use decoder::{UbjsonDecoder, MAX_UNSIZED_COUNT};
pub use encoder::UbjsonEncoder;
pub use error::UbjsonError;

pub(crate) mod marker {
    pub const NULL: u8 = b'Z';
    pub const NOOP: u8 = b'N';
    pub const TRUE: u8 = b'T';
    pub const FALSE: u8 = b'F';
    pub const INT8: u8 = b'i';
    pub const UINT8: u8 = b'U';
    pub const INT16: u8 = b'I';
    pub const INT32: u8 = b'l';
    pub const INT64: u8 = b'L';
    pub const FLOAT32: u8 = b'd';
    pub const FLOAT64: u8 = b'D';
    pub const HIGH_PRECISION: u8 = b'H';
    pub const CHAR: u8 = b'C';
    pub const STRING: u8 = b'S';
    pub const ARRAY_START: u8 = b'[';
    pub const ARRAY_END: u8 = b']';
    pub const OBJECT_START: u8 = b'{';
    pub const OBJECT_END: u8 = b'}';
    pub const TYPE: u8 = b'$';
    pub const COUNT: u8 = b'#';
}
