//! A Lua-style value model implementing [`HostRuntime`].
//!
//! Used by the command-line tools and as the reference host in tests.
//! Tables follow Lua's rules where conversion can observe them: a float
//! key with no fractional part is the same key as the integer, assigning
//! nil removes an entry, and the length operator returns a border.

use indexmap::IndexMap;

use crate::host::{HostKind, HostRuntime};

/// A value of the table runtime.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum HostValue {
    #[default]
    Nil,
    Boolean(bool),
    Number(f64),
    String(String),
    Table(Table),
    /// A function handle, named for diagnostics only.
    Function(String),
    /// An opaque handle owned by the embedding program.
    UserData(String),
}

impl HostValue {
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            HostValue::Table(t) => Some(t),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            HostValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            HostValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_nil(&self) -> bool {
        matches!(self, HostValue::Nil)
    }
}

impl From<bool> for HostValue {
    fn from(b: bool) -> Self {
        HostValue::Boolean(b)
    }
}

impl From<f64> for HostValue {
    fn from(n: f64) -> Self {
        HostValue::Number(n)
    }
}

impl From<i64> for HostValue {
    fn from(n: i64) -> Self {
        HostValue::Number(n as f64)
    }
}

impl From<&str> for HostValue {
    fn from(s: &str) -> Self {
        HostValue::String(s.to_owned())
    }
}

impl From<String> for HostValue {
    fn from(s: String) -> Self {
        HostValue::String(s)
    }
}

impl From<Table> for HostValue {
    fn from(t: Table) -> Self {
        HostValue::Table(t)
    }
}

/// A normalized table key. Nil and NaN cannot be keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TableKey {
    Integer(i64),
    /// Bit pattern of a float key with a fractional part or out of
    /// integer range.
    Float(u64),
    Boolean(bool),
    String(String),
}

impl TableKey {
    /// Normalizes a number key; `None` for NaN.
    pub fn number(n: f64) -> Option<TableKey> {
        if n.is_nan() {
            return None;
        }
        if n.fract() == 0.0 && n >= i64::MIN as f64 && n < i64::MAX as f64 {
            Some(TableKey::Integer(n as i64))
        } else {
            Some(TableKey::Float(n.to_bits()))
        }
    }
}

impl From<i64> for TableKey {
    fn from(i: i64) -> Self {
        TableKey::Integer(i)
    }
}

impl From<bool> for TableKey {
    fn from(b: bool) -> Self {
        TableKey::Boolean(b)
    }
}

impl From<&str> for TableKey {
    fn from(s: &str) -> Self {
        TableKey::String(s.to_owned())
    }
}

impl From<String> for TableKey {
    fn from(s: String) -> Self {
        TableKey::String(s)
    }
}

/// Associative container keeping keys in insertion order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    entries: IndexMap<TableKey, HostValue>,
}

impl Table {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            entries: IndexMap::with_capacity(capacity),
        }
    }

    /// Builds a sequence with `items` at positions `1..`.
    pub fn sequence<I: IntoIterator<Item = HostValue>>(items: I) -> Self {
        let mut table = Table::new();
        for (i, item) in items.into_iter().enumerate() {
            table.set(i as i64 + 1, item);
        }
        table
    }

    pub fn from_pairs<K, I>(pairs: I) -> Self
    where
        K: Into<TableKey>,
        I: IntoIterator<Item = (K, HostValue)>,
    {
        let mut table = Table::new();
        for (key, value) in pairs {
            table.set(key, value);
        }
        table
    }

    /// Assigns `value` to `key`; nil removes the entry.
    pub fn set<K: Into<TableKey>>(&mut self, key: K, value: HostValue) {
        let key = key.into();
        if value.is_nil() {
            self.entries.shift_remove(&key);
        } else {
            self.entries.insert(key, value);
        }
    }

    pub fn get<K: Into<TableKey>>(&self, key: K) -> Option<&HostValue> {
        self.entries.get(&key.into())
    }

    /// Value at 1-based `position`.
    pub fn at(&self, position: usize) -> Option<&HostValue> {
        i64::try_from(position)
            .ok()
            .and_then(|i| self.entries.get(&TableKey::Integer(i)))
    }

    pub fn keys(&self) -> impl Iterator<Item = &TableKey> {
        self.entries.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Lua's length operator: some `n` with `t[n]` non-nil and `t[n+1]`
    /// nil, or 0 when `t[1]` is nil.
    ///
    /// When every key is a positive integer and the keys fill at least
    /// half of `1..=max`, the largest key is the border returned, so
    /// sequences with holes keep their full extent. Otherwise the
    /// smallest border is returned.
    pub fn len(&self) -> usize {
        let mut max = 0usize;
        let mut all_positions = true;
        for key in self.entries.keys() {
            match key {
                TableKey::Integer(i) if *i > 0 => max = max.max(*i as usize),
                _ => {
                    all_positions = false;
                    break;
                }
            }
        }
        if all_positions && max <= 2 * self.entries.len() {
            return max;
        }
        let mut n = 0;
        while self.at(n + 1).is_some() {
            n += 1;
        }
        n
    }
}

/// The [`HostRuntime`] handle for [`HostValue`] and [`Table`].
#[derive(Debug, Default, Clone, Copy)]
pub struct TableHost;

impl TableHost {
    pub fn new() -> Self {
        Self
    }
}

impl HostRuntime for TableHost {
    type Value = HostValue;
    type Table = Table;
    type Key = TableKey;

    fn kind<'a>(&self, value: &'a HostValue) -> HostKind<'a, Table> {
        match value {
            HostValue::Nil => HostKind::Nil,
            HostValue::Boolean(b) => HostKind::Boolean(*b),
            HostValue::Number(n) => HostKind::Number(*n),
            HostValue::String(s) => HostKind::String(s),
            HostValue::Table(t) => HostKind::Table(t),
            HostValue::Function(_) => HostKind::Other("function"),
            HostValue::UserData(_) => HostKind::Other("userdata"),
        }
    }

    fn key_kind<'a>(&self, key: &'a TableKey) -> HostKind<'a, Table> {
        match key {
            TableKey::Integer(i) => HostKind::Number(*i as f64),
            TableKey::Float(bits) => HostKind::Number(f64::from_bits(*bits)),
            TableKey::Boolean(b) => HostKind::Boolean(*b),
            TableKey::String(s) => HostKind::String(s),
        }
    }

    fn keys<'a>(&self, table: &'a Table) -> Vec<&'a TableKey> {
        table.keys().collect()
    }

    fn get_keyed<'a>(&self, table: &'a Table, key: &TableKey) -> Option<&'a HostValue> {
        table.entries.get(key)
    }

    fn get_indexed<'a>(&self, table: &'a Table, position: usize) -> Option<&'a HostValue> {
        table.at(position)
    }

    fn sequence_len(&self, table: &Table) -> usize {
        table.len()
    }

    fn nil(&mut self) -> HostValue {
        HostValue::Nil
    }

    fn boolean(&mut self, b: bool) -> HostValue {
        HostValue::Boolean(b)
    }

    fn integer(&mut self, i: i64) -> HostValue {
        HostValue::Number(i as f64)
    }

    fn float(&mut self, f: f64) -> HostValue {
        HostValue::Number(f)
    }

    fn string(&mut self, s: String) -> HostValue {
        HostValue::String(s)
    }

    fn create_table(&mut self, seq: usize, map: usize) -> Table {
        Table::with_capacity(seq + map)
    }

    fn set_indexed(&mut self, table: &mut Table, position: usize, value: HostValue) {
        table.set(position as i64, value);
    }

    fn set_keyed(&mut self, table: &mut Table, key: String, value: HostValue) {
        table.set(key, value);
    }

    fn table(&mut self, table: Table) -> HostValue {
        HostValue::Table(table)
    }
}
