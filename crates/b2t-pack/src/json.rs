//! JSON text codec for [`Value`].
//!
//! Parsing goes through `serde_json` with `preserve_order`, so object
//! members come out in document order. Serialization is either compact
//! or pretty-printed with a fixed number of spaces per nesting level.

use serde::Serialize;
use serde_json::ser::{CompactFormatter, Formatter, PrettyFormatter};

use crate::Value;

/// Parses JSON text into a document tree.
///
/// Integer literals that fit `i64` become [`Value::Integer`]; everything
/// else numeric (fractions, exponents, integers above `i64::MAX`) becomes
/// [`Value::Float`].
pub fn parse(text: &str) -> Result<Value, serde_json::Error> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    Ok(Value::from(value))
}

/// Serializes a document tree to JSON text.
///
/// `indent` of `None` produces compact output. `Some(n)` puts every array
/// element and object member on its own line, indented by `n` spaces per
/// level; `Some(0)` keeps the line breaks but no indentation.
pub fn serialize(value: &Value, indent: Option<usize>) -> String {
    match indent {
        None => write_with(value, CompactFormatter),
        Some(width) => {
            let pad = vec![b' '; width];
            write_with(value, PrettyFormatter::with_indent(&pad))
        }
    }
}

fn write_with<F: Formatter>(value: &Value, formatter: F) -> String {
    let mut out = Vec::with_capacity(128);
    let mut ser = serde_json::Serializer::with_formatter(&mut out, formatter);
    if let Err(e) = value.serialize(&mut ser) {
        unreachable!("writing to a Vec with string keys and f64 as null cannot fail: {e}");
    }
    match String::from_utf8(out) {
        Ok(text) => text,
        Err(e) => unreachable!("serde_json emits UTF-8: {e}"),
    }
}
