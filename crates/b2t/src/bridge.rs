//! Recursive conversion between host values and the document tree.
//!
//! The host side is reached only through [`HostRuntime`]. Two decisions
//! the host cannot make for us live here as explicit steps:
//!
//! - [`classify_number`] decides whether an untyped host number is an
//!   integer or a float.
//! - [`classify_table`] decides whether a host table is a sequence or a
//!   map before anything inside it is converted.

use b2t_pack::{Value, MAX_DEPTH};
use tracing::trace;

use crate::error::{Error, Result};
use crate::host::{HostKind, HostRuntime};

/// 2^63, the first magnitude outside `i64`.
const I64_LIMIT: f64 = 9_223_372_036_854_775_808.0;

/// Outcome of [`classify_number`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum NumberClass {
    Integer(i64),
    Float(f64),
}

impl From<NumberClass> for Value {
    fn from(class: NumberClass) -> Self {
        match class {
            NumberClass::Integer(i) => Value::Integer(i),
            NumberClass::Float(f) => Value::Float(f),
        }
    }
}

/// Integer when `n` is finite, has no fractional part and lies in
/// `[-2^63, 2^63)`; float otherwise.
///
/// Host numbers carry no type, so `2.0` and `2` both classify as
/// `Integer(2)`. `-0.0` classifies as `Integer(0)`.
pub fn classify_number(n: f64) -> NumberClass {
    if n.is_finite() && n.fract() == 0.0 && (-I64_LIMIT..I64_LIMIT).contains(&n) {
        NumberClass::Integer(n as i64)
    } else {
        NumberClass::Float(n)
    }
}

/// Outcome of [`classify_table`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TableShape {
    /// Every key is a number; carries the host's sequence length.
    Sequence(usize),
    /// At least one key is not a number.
    Map,
}

/// Sequence iff every key is a number. An empty table is a sequence of
/// length 0.
pub fn classify_table<H: HostRuntime>(host: &H, table: &H::Table) -> TableShape {
    let numeric = host
        .keys(table)
        .into_iter()
        .all(|key| matches!(host.key_kind(key), HostKind::Number(_)));
    if numeric {
        TableShape::Sequence(host.sequence_len(table))
    } else {
        TableShape::Map
    }
}

/// Builds the host value for a document tree. Never fails.
///
/// Array element `i` lands at sequence position `i + 1`. Object keys are
/// copied verbatim.
pub fn to_dynamic<H: HostRuntime>(host: &mut H, value: Value) -> H::Value {
    match value {
        Value::Null => host.nil(),
        Value::Bool(b) => host.boolean(b),
        Value::Integer(i) => host.integer(i),
        Value::Float(f) => host.float(f),
        Value::Str(s) => host.string(s),
        Value::Array(items) => {
            let mut table = host.create_table(items.len(), 0);
            for (i, item) in items.into_iter().enumerate() {
                let item = to_dynamic(host, item);
                host.set_indexed(&mut table, i + 1, item);
            }
            host.table(table)
        }
        Value::Object(members) => {
            let mut table = host.create_table(0, members.len());
            for (key, item) in members {
                let item = to_dynamic(host, item);
                host.set_keyed(&mut table, key, item);
            }
            host.table(table)
        }
    }
}

/// Builds the document tree for a host value.
///
/// Sequences read positions `1..=len`, absent positions become null.
/// Map keys are coerced to strings and sorted. Host kinds with no
/// document form, non-string-like keys and tables nested deeper than
/// [`MAX_DEPTH`] fail with [`Error::UnsupportedValueKind`].
pub fn from_dynamic<H: HostRuntime>(host: &H, value: &H::Value) -> Result<Value> {
    convert(host, value, 0)
}

fn convert<H: HostRuntime>(host: &H, value: &H::Value, depth: usize) -> Result<Value> {
    let table = match host.kind(value) {
        HostKind::Nil => return Ok(Value::Null),
        HostKind::Boolean(b) => return Ok(Value::Bool(b)),
        HostKind::Number(n) => return Ok(classify_number(n).into()),
        HostKind::String(s) => return Ok(Value::Str(s.to_owned())),
        HostKind::Table(table) => table,
        other => return Err(Error::UnsupportedValueKind(other.name().to_owned())),
    };
    if depth >= MAX_DEPTH {
        return Err(Error::UnsupportedValueKind(format!(
            "table nested deeper than {MAX_DEPTH} levels"
        )));
    }

    let shape = classify_table(host, table);
    trace!(depth, ?shape, "converting table");
    match shape {
        TableShape::Sequence(len) => {
            let mut items = Vec::with_capacity(len);
            for position in 1..=len {
                items.push(match host.get_indexed(table, position) {
                    Some(item) => convert(host, item, depth + 1)?,
                    None => Value::Null,
                });
            }
            Ok(Value::Array(items))
        }
        TableShape::Map => {
            let keys = host.keys(table);
            let mut members = Vec::with_capacity(keys.len());
            for key in keys {
                let name = key_string(host, key)?;
                let item = match host.get_keyed(table, key) {
                    Some(item) => convert(host, item, depth + 1)?,
                    None => Value::Null,
                };
                members.push((name, item));
            }
            // Stable, so equal names keep host order and the later one wins.
            members.sort_by(|a, b| a.0.cmp(&b.0));
            Ok(Value::Object(members.into_iter().collect()))
        }
    }
}

fn key_string<H: HostRuntime>(host: &H, key: &H::Key) -> Result<String> {
    match host.key_kind(key) {
        HostKind::String(s) => Ok(s.to_owned()),
        HostKind::Number(n) => Ok(match classify_number(n) {
            NumberClass::Integer(i) => i.to_string(),
            NumberClass::Float(f) => serde_json::Number::from_f64(f)
                .map(|n| n.to_string())
                .unwrap_or_else(|| f.to_string()),
        }),
        HostKind::Boolean(b) => Ok(b.to_string()),
        other => Err(Error::UnsupportedValueKind(format!("{} key", other.name()))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::table::{HostValue, Table, TableHost, TableKey};

    #[test]
    fn integral_numbers_are_integers() {
        assert_eq!(classify_number(0.0), NumberClass::Integer(0));
        assert_eq!(classify_number(64.0), NumberClass::Integer(64));
        assert_eq!(classify_number(-7.0), NumberClass::Integer(-7));
        assert_eq!(classify_number(2.0), NumberClass::Integer(2));
        assert_eq!(classify_number(2.5), NumberClass::Float(2.5));
        assert_eq!(classify_number(-0.5), NumberClass::Float(-0.5));
    }

    #[test]
    fn negative_zero_is_integer_zero() {
        assert_eq!(classify_number(-0.0), NumberClass::Integer(0));
    }

    #[test]
    fn i64_range_edges() {
        assert_eq!(classify_number(-I64_LIMIT), NumberClass::Integer(i64::MIN));
        assert_eq!(classify_number(I64_LIMIT), NumberClass::Float(I64_LIMIT));
        assert_eq!(classify_number(-I64_LIMIT * 2.0), NumberClass::Float(-I64_LIMIT * 2.0));
        // largest f64 below 2^63
        let below = 9_223_372_036_854_774_784.0;
        assert_eq!(classify_number(below), NumberClass::Integer(9_223_372_036_854_774_784));
        assert_eq!(classify_number(1e300), NumberClass::Float(1e300));
    }

    #[test]
    fn non_finite_numbers_are_floats() {
        assert!(matches!(classify_number(f64::NAN), NumberClass::Float(f) if f.is_nan()));
        assert_eq!(classify_number(f64::INFINITY), NumberClass::Float(f64::INFINITY));
        assert_eq!(classify_number(f64::NEG_INFINITY), NumberClass::Float(f64::NEG_INFINITY));
    }

    #[test]
    fn empty_table_is_a_sequence() {
        let host = TableHost::new();
        assert_eq!(classify_table(&host, &Table::new()), TableShape::Sequence(0));
    }

    #[test]
    fn numeric_key_strings() {
        let host = TableHost::new();
        let mut t = Table::new();
        t.set("name", HostValue::from("x"));
        t.set(TableKey::number(1.5).unwrap(), HostValue::from(true));
        t.set(3i64, HostValue::from(false));
        t.set(true, HostValue::from(1i64));
        let v = from_dynamic(&host, &HostValue::Table(t)).unwrap();
        let keys: Vec<&str> = v.as_object().unwrap().keys().map(String::as_str).collect();
        assert_eq!(keys, ["1.5", "3", "name", "true"]);
    }

    #[test]
    fn self_nesting_stops_at_depth_limit() {
        let mut value = HostValue::Table(Table::new());
        for _ in 0..MAX_DEPTH + 1 {
            value = HostValue::Table(Table::sequence([value]));
        }
        let err = from_dynamic(&TableHost::new(), &value).unwrap_err();
        assert!(matches!(err, Error::UnsupportedValueKind(ref m) if m.contains("deeper")));
    }
}
