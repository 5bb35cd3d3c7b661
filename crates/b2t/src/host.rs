//! Adapter between the conversion code and a scripting host's values.
//!
//! The bridge never looks inside host values directly. A host runtime
//! implements [`HostRuntime`] once and the bridge works through it for
//! both inspection and construction.

/// What a host value (or table key) is, as far as conversion cares.
///
/// Host numbers carry no integer/float distinction, so they are always
/// reported as `f64`.
#[derive(Debug)]
pub enum HostKind<'a, T> {
    Nil,
    Boolean(bool),
    Number(f64),
    String(&'a str),
    Table(&'a T),
    /// Functions, userdata, threads and anything else with no document
    /// form; carries the host's name for the kind.
    Other(&'static str),
}

impl<T> HostKind<'_, T> {
    pub fn name(&self) -> &'static str {
        match self {
            HostKind::Nil => "nil",
            HostKind::Boolean(_) => "boolean",
            HostKind::Number(_) => "number",
            HostKind::String(_) => "string",
            HostKind::Table(_) => "table",
            HostKind::Other(name) => *name,
        }
    }
}

/// Inspection and construction primitives of a host runtime.
pub trait HostRuntime {
    /// Any host value.
    type Value;
    /// The host's associative container.
    type Table;
    /// A key stored in a [`Self::Table`].
    type Key;

    fn kind<'a>(&self, value: &'a Self::Value) -> HostKind<'a, Self::Table>;

    fn key_kind<'a>(&self, key: &'a Self::Key) -> HostKind<'a, Self::Table>;

    /// Keys of `table`, in whatever order the host iterates them.
    fn keys<'a>(&self, table: &'a Self::Table) -> Vec<&'a Self::Key>;

    fn get_keyed<'a>(&self, table: &'a Self::Table, key: &Self::Key) -> Option<&'a Self::Value>;

    /// Value at 1-based sequence `position`.
    fn get_indexed<'a>(&self, table: &'a Self::Table, position: usize) -> Option<&'a Self::Value>;

    /// The host's length operator for sequences.
    fn sequence_len(&self, table: &Self::Table) -> usize;

    fn nil(&mut self) -> Self::Value;

    fn boolean(&mut self, b: bool) -> Self::Value;

    fn integer(&mut self, i: i64) -> Self::Value;

    fn float(&mut self, f: f64) -> Self::Value;

    fn string(&mut self, s: String) -> Self::Value;

    /// New empty table sized for `seq` sequence slots and `map` keyed slots.
    fn create_table(&mut self, seq: usize, map: usize) -> Self::Table;

    fn set_indexed(&mut self, table: &mut Self::Table, position: usize, value: Self::Value);

    fn set_keyed(&mut self, table: &mut Self::Table, key: String, value: Self::Value);

    /// Wraps a finished table as a host value.
    fn table(&mut self, table: Self::Table) -> Self::Value;
}
