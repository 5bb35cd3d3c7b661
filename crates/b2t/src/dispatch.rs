//! Routes documents through exactly one binary codec.
//!
//! The lower half ([`encode_value`], [`decode_value`]) works on document
//! trees. [`encode`] and [`decode`] add the text and host-value sides, and
//! [`to_bin`] / [`from_bin`] take the string selectors a scripting host
//! passes in.

use std::fmt;
use std::str::FromStr;

use b2t_pack::{json, BinaryCodec, CborCodec, MsgPackCodec, UbjsonCodec, Value};
use tracing::debug;

use crate::bridge::{from_dynamic, to_dynamic};
use crate::error::{Error, Result};
use crate::host::{HostKind, HostRuntime};

/// Binary format selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Format {
    Cbor,
    MessagePack,
    Ubjson,
}

impl Format {
    pub const ALL: [Format; 3] = [Format::Cbor, Format::MessagePack, Format::Ubjson];

    pub fn name(self) -> &'static str {
        match self {
            Format::Cbor => "cbor",
            Format::MessagePack => "msgpack",
            Format::Ubjson => "ubjson",
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Format {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "cbor" => Ok(Format::Cbor),
            "msgpack" | "messagepack" => Ok(Format::MessagePack),
            "ubjson" => Ok(Format::Ubjson),
            _ => Err(Error::UnsupportedFormat(s.to_owned())),
        }
    }
}

/// Which side of the bridge a call reads from or produces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataKind {
    Text,
    DynamicValue,
}

impl FromStr for DataKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "text" | "json" => Ok(DataKind::Text),
            "dynamic" | "table" => Ok(DataKind::DynamicValue),
            _ => Err(Error::UnsupportedFormat(s.to_owned())),
        }
    }
}

/// Source document for [`encode`].
#[derive(Debug, Clone, Copy)]
pub enum Input<'a, V> {
    Text(&'a str),
    Dynamic(&'a V),
}

/// Result of [`decode`].
#[derive(Debug, Clone, PartialEq)]
pub enum Output<V> {
    Text(String),
    Dynamic(V),
}

impl<V> Output<V> {
    pub fn into_text(self) -> Option<String> {
        match self {
            Output::Text(text) => Some(text),
            Output::Dynamic(_) => None,
        }
    }

    pub fn into_dynamic(self) -> Option<V> {
        match self {
            Output::Dynamic(value) => Some(value),
            Output::Text(_) => None,
        }
    }
}

/// Options for [`decode`] when producing text.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DecodeOptions {
    /// `None` for compact output, `Some(n)` for `n` spaces per level.
    pub indent: Option<usize>,
}

impl DecodeOptions {
    pub fn compact() -> Self {
        Self::default()
    }

    pub fn pretty(indent: usize) -> Self {
        Self {
            indent: Some(indent),
        }
    }
}

/// Encodes a document tree. Every tree has an encoding in every format.
pub fn encode_value(value: &Value, format: Format) -> Vec<u8> {
    let bytes = match format {
        Format::Cbor => CborCodec::new().encode(value),
        Format::MessagePack => MsgPackCodec::new().encode(value),
        Format::Ubjson => UbjsonCodec::new().encode(value),
    };
    debug!(%format, size = bytes.len(), "encoded document");
    bytes
}

/// Decodes exactly one document from `bytes`.
pub fn decode_value(bytes: &[u8], format: Format) -> Result<Value> {
    let value = match format {
        Format::Cbor => decode_with(&CborCodec::new(), bytes, format),
        Format::MessagePack => decode_with(&MsgPackCodec::new(), bytes, format),
        Format::Ubjson => decode_with(&UbjsonCodec::new(), bytes, format),
    }?;
    debug!(%format, size = bytes.len(), kind = value.kind_name(), "decoded document");
    Ok(value)
}

fn decode_with<C: BinaryCodec>(codec: &C, bytes: &[u8], format: Format) -> Result<Value> {
    codec.decode(bytes).map_err(|e| {
        debug!(%format, error = %e, "decode failed");
        Error::MalformedBinaryInput {
            format,
            reason: e.to_string(),
        }
    })
}

/// Parses JSON text and encodes it.
pub fn encode_text(text: &str, format: Format) -> Result<Vec<u8>> {
    let value = json::parse(text).map_err(|e| {
        debug!(error = %e, "text input rejected");
        Error::from(e)
    })?;
    Ok(encode_value(&value, format))
}

/// Decodes bytes and serializes the document as JSON text.
pub fn decode_text(bytes: &[u8], format: Format, options: DecodeOptions) -> Result<String> {
    let value = decode_value(bytes, format)?;
    Ok(json::serialize(&value, options.indent))
}

/// Encodes text or a host value.
pub fn encode<H: HostRuntime>(
    host: &H,
    input: Input<'_, H::Value>,
    format: Format,
) -> Result<Vec<u8>> {
    match input {
        Input::Text(text) => encode_text(text, format),
        Input::Dynamic(value) => {
            let value = from_dynamic(host, value).map_err(|e| {
                debug!(error = %e, "host value rejected");
                e
            })?;
            Ok(encode_value(&value, format))
        }
    }
}

/// Decodes bytes into text or a host value.
pub fn decode<H: HostRuntime>(
    host: &mut H,
    bytes: &[u8],
    kind: DataKind,
    format: Format,
    options: DecodeOptions,
) -> Result<Output<H::Value>> {
    let value = decode_value(bytes, format)?;
    Ok(match kind {
        DataKind::Text => Output::Text(json::serialize(&value, options.indent)),
        DataKind::DynamicValue => Output::Dynamic(to_dynamic(host, value)),
    })
}

/// Host entry point: `source_kind` says whether `data` is a JSON string
/// or a value to convert. Selectors are checked before any work.
///
/// With a `"text"` source, `data` must be a host string.
pub fn to_bin<H: HostRuntime>(
    host: &H,
    data: &H::Value,
    source_kind: &str,
    format: &str,
) -> Result<Vec<u8>> {
    let kind = DataKind::from_str(source_kind)?;
    let format = Format::from_str(format)?;
    match kind {
        DataKind::Text => match host.kind(data) {
            HostKind::String(text) => encode_text(text, format),
            other => Err(Error::UnsupportedValueKind(format!(
                "{} given where text was expected",
                other.name()
            ))),
        },
        DataKind::DynamicValue => encode(host, Input::Dynamic(data), format),
    }
}

/// Host entry point: decodes `bytes` into a host string (for
/// `"text"`) or a converted host value (for `"dynamic"`). `indent` only
/// applies to text.
pub fn from_bin<H: HostRuntime>(
    host: &mut H,
    bytes: &[u8],
    dest_kind: &str,
    format: &str,
    indent: Option<usize>,
) -> Result<H::Value> {
    let kind = DataKind::from_str(dest_kind)?;
    let format = Format::from_str(format)?;
    match decode(host, bytes, kind, format, DecodeOptions { indent })? {
        Output::Text(text) => Ok(host.string(text)),
        Output::Dynamic(value) => Ok(value),
    }
}

/// JSON text to CBOR.
pub fn to_cbor(text: &str) -> Result<Vec<u8>> {
    encode_text(text, Format::Cbor)
}

/// CBOR to a host value.
pub fn from_cbor<H: HostRuntime>(host: &mut H, bytes: &[u8]) -> Result<H::Value> {
    Ok(to_dynamic(host, decode_value(bytes, Format::Cbor)?))
}

/// JSON text to MessagePack.
pub fn to_msgpack(text: &str) -> Result<Vec<u8>> {
    encode_text(text, Format::MessagePack)
}

pub fn from_msgpack<H: HostRuntime>(host: &mut H, bytes: &[u8]) -> Result<H::Value> {
    Ok(to_dynamic(host, decode_value(bytes, Format::MessagePack)?))
}

/// JSON text to UBJSON.
pub fn to_ubjson(text: &str) -> Result<Vec<u8>> {
    encode_text(text, Format::Ubjson)
}

pub fn from_ubjson<H: HostRuntime>(host: &mut H, bytes: &[u8]) -> Result<H::Value> {
    Ok(to_dynamic(host, decode_value(bytes, Format::Ubjson)?))
}
