//! Converts documents between JSON text, a scripting host's dynamic
//! values and the CBOR, MessagePack and UBJSON binary formats.
//!
//! The host is reached through [`HostRuntime`]; [`table`] provides a
//! Lua-style implementation of it.
//!
//! ```
//! use b2t::table::{HostValue, TableHost};
//!
//! let mut host = TableHost::new();
//! let bytes = b2t::to_cbor(r#"{"array":[0,1,2,3]}"#).unwrap();
//! let value = b2t::from_cbor(&mut host, &bytes).unwrap();
//! let array = value.as_table().unwrap().get("array").and_then(HostValue::as_table).unwrap();
//! assert_eq!(array.len(), 4);
//! ```

pub mod bridge;
pub mod cli;
pub mod dispatch;
mod error;
pub mod host;
pub mod table;

pub use b2t_pack::Value;
pub use bridge::{classify_number, classify_table, from_dynamic, to_dynamic, NumberClass, TableShape};
pub use dispatch::{
    decode, decode_text, decode_value, encode, encode_text, encode_value, from_bin, from_cbor,
    from_msgpack, from_ubjson, to_bin, to_cbor, to_msgpack, to_ubjson, DataKind, DecodeOptions,
    Format, Input, Output,
};
pub use error::{Error, Result};
pub use host::{HostKind, HostRuntime};
