//! Logical schema types: `DataType`, `Column` and `Schema`.
//!
//! A `Schema` is an immutable *set* of columns. Columns keep their declared
//! order for display and serialization, but equality and hashing ignore it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::hash::{hash_name, hash_one, names_equal};

/// Shared handle to a schema. Rows and relations hold these, never copies.
pub type SchemaRef = Arc<Schema>;

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DataType {
    Boolean,
    Int32,
    Int64,
    Float32,
    Float64,
    Utf8,
    Binary,
    /// A nested, relation-valued column (see the `image` operator).
    Relation(SchemaRef),
}

impl DataType {
    pub fn name(&self) -> &'static str {
        match self {
            DataType::Boolean => "boolean",
            DataType::Int32 => "int32",
            DataType::Int64 => "int64",
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Utf8 => "utf8",
            DataType::Binary => "binary",
            DataType::Relation(_) => "relation",
        }
    }
}

/// An attribute of a relation: a name plus a type.
///
/// Name identity is case-insensitive: `Id` and `ID` are the same column.
#[derive(Debug, Clone)]
pub struct Column {
    pub name: String,
    pub data_type: DataType,
}

impl Column {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }

    pub fn name_equals(&self, name: &str) -> bool {
        names_equal(&self.name, name)
    }
}

impl PartialEq for Column {
    fn eq(&self, other: &Self) -> bool {
        self.name_equals(&other.name) && self.data_type == other.data_type
    }
}

impl Eq for Column {}

impl Hash for Column {
    fn hash<H: Hasher>(&self, state: &mut H) {
        hash_name(&self.name, state);
        self.data_type.hash(state);
    }
}

impl fmt::Display for Column {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

/// The metadata for a relation: an immutable, order-independent set of columns.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    columns: Vec<Column>,
    hash: u64,
}

impl Schema {
    /// Build a schema, rejecting empty column lists and duplicate names.
    pub fn new(name: impl Into<String>, columns: Vec<Column>) -> Result<Self> {
        let name = name.into();
        if columns.is_empty() {
            return Err(Error::EmptySchema(name));
        }
        for (i, col) in columns.iter().enumerate() {
            if columns[..i].iter().any(|c| c.name_equals(&col.name)) {
                return Err(Error::DuplicateColumn {
                    schema: name,
                    column: col.name.clone(),
                });
            }
        }
        let hash = columns
            .iter()
            .fold(0u64, |acc, c| acc.wrapping_add(hash_one(c)));
        Ok(Self {
            name,
            columns,
            hash,
        })
    }

    /// Convenience for building a shared schema.
    pub fn shared(name: impl Into<String>, columns: Vec<Column>) -> Result<SchemaRef> {
        Self::new(name, columns).map(Arc::new)
    }

    /// The (optional, informational) name of this schema.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Order-independent hash, computed once at construction.
    pub fn hash_code(&self) -> u64 {
        self.hash
    }

    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Column> {
        self.columns.iter()
    }

    pub fn len(&self) -> usize {
        self.columns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.index_of(name).is_some()
    }

    pub fn index_of(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c.name_equals(name))
    }

    /// Look up a column by name, failing with `UnknownColumn`.
    pub fn lookup(&self, name: &str) -> Result<&Column> {
        self.columns
            .iter()
            .find(|c| c.name_equals(name))
            .ok_or_else(|| Error::unknown_column(&self.name, name))
    }

    pub(crate) fn check_column(&self, name: &str) -> Result<usize> {
        self.index_of(name)
            .ok_or_else(|| Error::unknown_column(&self.name, name))
    }

    /// A copy of this schema under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            columns: self.columns.clone(),
            hash: self.hash,
        }
    }

    /// `a`'s columns plus any of `b`'s columns whose name is not already in `a`.
    pub fn merge(a: &Schema, b: &Schema, name: impl Into<String>) -> Result<Schema> {
        let mut columns = a.columns.clone();
        columns.extend(b.iter().filter(|c| !a.contains(&c.name)).cloned());
        Schema::new(name, columns)
    }

    /// Columns present (by name and type) in both schemas, in `a`'s order.
    pub fn common(a: &Schema, b: &Schema) -> Vec<Column> {
        a.iter().filter(|c| b.columns.contains(c)).cloned().collect()
    }

    /// The named columns, in the order given. Every name must exist.
    pub fn select(&self, names: &[&str], name: impl Into<String>) -> Result<Schema> {
        let columns = names
            .iter()
            .map(|n| self.lookup(n).cloned())
            .collect::<Result<Vec<_>>>()?;
        Schema::new(name, columns)
    }

    /// All columns except the named ones. Every name must exist.
    pub fn without(&self, names: &[&str], name: impl Into<String>) -> Result<Schema> {
        for n in names {
            self.check_column(n)?;
        }
        let columns = self
            .iter()
            .filter(|c| !names.iter().any(|n| c.name_equals(n)))
            .cloned()
            .collect();
        Schema::new(name, columns)
    }

    /// Append one column, failing with `DuplicateColumn` on a name clash.
    pub fn with_column(&self, column: Column, name: impl Into<String>) -> Result<Schema> {
        let mut columns = self.columns.clone();
        columns.push(column);
        Schema::new(name, columns)
    }
}

impl PartialEq for Schema {
    fn eq(&self, other: &Self) -> bool {
        self.hash == other.hash
            && self.columns.len() == other.columns.len()
            && self.columns.iter().all(|c| other.columns.contains(c))
    }
}

impl Eq for Schema {}

impl Hash for Schema {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.hash);
    }
}

impl fmt::Display for Schema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.name.is_empty() {
            return f.write_str(&self.name);
        }
        let names: Vec<&str> = self.columns.iter().map(|c| c.name.as_str()).collect();
        write!(f, "{{{}}}", names.join(", "))
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a Column;
    type IntoIter = std::slice::Iter<'a, Column>;

    fn into_iter(self) -> Self::IntoIter {
        self.columns.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cols(names: &[(&str, DataType)]) -> Vec<Column> {
        names
            .iter()
            .map(|(n, t)| Column::new(*n, t.clone()))
            .collect()
    }

    #[test]
    fn empty_schema_is_rejected() {
        let err = Schema::new("empty", vec![]).unwrap_err();
        assert_eq!(err, Error::EmptySchema("empty".into()));
    }

    #[test]
    fn duplicate_names_ignore_case() {
        let err = Schema::new(
            "dup",
            cols(&[("id", DataType::Int64), ("ID", DataType::Utf8)]),
        )
        .unwrap_err();
        assert!(matches!(err, Error::DuplicateColumn { column, .. } if column == "ID"));
    }

    #[test]
    fn equality_ignores_order_and_name() {
        let a = Schema::new("a", cols(&[("x", DataType::Int64), ("y", DataType::Utf8)])).unwrap();
        let b = Schema::new("b", cols(&[("Y", DataType::Utf8), ("x", DataType::Int64)])).unwrap();
        assert_eq!(a, b);
        assert_eq!(hash_one(&a), hash_one(&b));
    }

    #[test]
    fn type_participates_in_equality() {
        let a = Schema::new("a", cols(&[("x", DataType::Int64)])).unwrap();
        let b = Schema::new("b", cols(&[("x", DataType::Utf8)])).unwrap();
        assert_ne!(a, b);
    }

    #[test]
    fn lookup_and_contains() {
        let s = Schema::new("s", cols(&[("Name", DataType::Utf8)])).unwrap();
        assert!(s.contains("name"));
        assert_eq!(s.lookup("NAME").unwrap().name, "Name");
        assert!(matches!(
            s.lookup("age"),
            Err(Error::UnknownColumn { column, .. }) if column == "age"
        ));
    }

    #[test]
    fn merge_keeps_left_columns() {
        let a = Schema::new("a", cols(&[("id", DataType::Int64), ("x", DataType::Utf8)])).unwrap();
        let b = Schema::new("b", cols(&[("ID", DataType::Int64), ("y", DataType::Utf8)])).unwrap();
        let m = Schema::merge(&a, &b, "m").unwrap();
        let names: Vec<&str> = m.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["id", "x", "y"]);
    }

    #[test]
    fn without_rejects_unknown_names() {
        let s = Schema::new("s", cols(&[("a", DataType::Utf8), ("b", DataType::Utf8)])).unwrap();
        assert_eq!(s.without(&["A"], "").unwrap().len(), 1);
        assert!(s.without(&["c"], "").is_err());
    }
}
