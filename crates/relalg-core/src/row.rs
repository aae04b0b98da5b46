//! Rows: immutable name-indexed tuples bound to a schema.
//!
//! A row is either *stored* (owns its values) or a thin decorator over one or
//! two inner rows. Decorators never copy values; they only change which names
//! resolve and where. Every lookup is validated against the row's own schema,
//! so a column hidden by a projection is unreachable even though the inner row
//! still holds it.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::error::{Error, Result};
use crate::hash::{hash_pair, names_equal};
use crate::relation::MaterializedRelation;
use crate::schema::{Column, SchemaRef};
use crate::types::Value;

/// Reverse rename table: new name -> old name.
#[derive(Debug, Default)]
pub struct RenameMap {
    pairs: Vec<(String, String)>,
}

impl RenameMap {
    /// Build from `(old, new)` changes; stores the inverse.
    pub fn from_changes<'a, I>(changes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let pairs = changes
            .into_iter()
            .map(|(old, new)| (new.to_string(), old.to_string()))
            .collect();
        Self { pairs }
    }

    pub fn old_name(&self, new_name: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(new, _)| names_equal(new, new_name))
            .map(|(_, old)| old.as_str())
    }
}

enum Repr {
    Stored(Vec<Value>),
    Extended {
        inner: Row,
        column: Column,
        value: Value,
    },
    Renamed {
        inner: Row,
        reverse: Arc<RenameMap>,
    },
    Projected {
        inner: Row,
    },
    Joined {
        left: Row,
        right: Row,
    },
}

/// A relational tuple with a fixed schema. Cloning is cheap.
#[derive(Clone)]
pub struct Row {
    schema: SchemaRef,
    repr: Arc<Repr>,
}

impl Row {
    /// A stored row; `values` are aligned with `schema`'s column order.
    pub fn new(schema: SchemaRef, values: Vec<Value>) -> Result<Self> {
        if values.len() != schema.len() {
            return Err(Error::MalformedInput(format!(
                "row has {} values but schema '{}' has {} columns",
                values.len(),
                schema,
                schema.len()
            )));
        }
        Ok(Self {
            schema,
            repr: Arc::new(Repr::Stored(values)),
        })
    }

    /// A stored row from `(name, value)` pairs given in any order.
    pub fn from_pairs<'a, I>(schema: SchemaRef, pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, Value)>,
    {
        let mut slots: Vec<Option<Value>> = vec![None; schema.len()];
        for (name, value) in pairs {
            let idx = schema.check_column(name)?;
            if slots[idx].replace(value).is_some() {
                return Err(Error::MalformedInput(format!(
                    "value for column '{}' supplied twice",
                    name
                )));
            }
        }
        let values = slots
            .into_iter()
            .zip(schema.iter())
            .map(|(slot, col)| {
                slot.ok_or_else(|| {
                    Error::MalformedInput(format!("no value supplied for column '{}'", col.name))
                })
            })
            .collect::<Result<Vec<_>>>()?;
        Ok(Self {
            schema,
            repr: Arc::new(Repr::Stored(values)),
        })
    }

    /// `inner` plus one extra column. `schema` must be `inner`'s schema plus `column`.
    pub fn extended(schema: SchemaRef, inner: Row, column: Column, value: Value) -> Self {
        Self {
            schema,
            repr: Arc::new(Repr::Extended {
                inner,
                column,
                value,
            }),
        }
    }

    /// `inner` seen through renamed columns.
    pub fn renamed(schema: SchemaRef, inner: Row, reverse: Arc<RenameMap>) -> Self {
        Self {
            schema,
            repr: Arc::new(Repr::Renamed { inner, reverse }),
        }
    }

    /// `inner` restricted to the columns of `schema`.
    pub fn projected(schema: SchemaRef, inner: Row) -> Self {
        Self {
            schema,
            repr: Arc::new(Repr::Projected { inner }),
        }
    }

    /// `left` and `right` combined under their unioned `schema`.
    pub fn joined(schema: SchemaRef, left: Row, right: Row) -> Self {
        Self {
            schema,
            repr: Arc::new(Repr::Joined { left, right }),
        }
    }

    pub fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    /// Value of the named column, failing with `UnknownColumn`.
    pub fn get(&self, name: &str) -> Result<&Value> {
        match &*self.repr {
            Repr::Stored(values) => Ok(&values[self.schema.check_column(name)?]),
            Repr::Extended {
                inner,
                column,
                value,
            } => {
                if column.name_equals(name) {
                    Ok(value)
                } else {
                    inner.get(name)
                }
            }
            Repr::Renamed { inner, reverse } => {
                self.schema.check_column(name)?;
                match reverse.old_name(name) {
                    Some(old) => inner.get(old),
                    None => inner.get(name),
                }
            }
            Repr::Projected { inner } => {
                self.schema.check_column(name)?;
                inner.get(name)
            }
            Repr::Joined { left, right } => {
                if left.schema.contains(name) {
                    left.get(name)
                } else {
                    right.get(name)
                }
            }
        }
    }

    /// `(column, value)` pairs in schema order.
    pub fn values(&self) -> impl Iterator<Item = Result<(&Column, &Value)>> + '_ {
        self.schema
            .iter()
            .map(move |c| self.get(&c.name).map(|v| (c, v)))
    }

    pub fn get_str(&self, name: &str) -> Result<&str> {
        match self.get(name)? {
            Value::Str(s) => Ok(s),
            other => Err(mismatch(name, "utf8", other)),
        }
    }

    pub fn get_i64(&self, name: &str) -> Result<i64> {
        match self.get(name)? {
            Value::I32(i) => Ok(i64::from(*i)),
            Value::I64(i) => Ok(*i),
            other => Err(mismatch(name, "integer", other)),
        }
    }

    pub fn get_f64(&self, name: &str) -> Result<f64> {
        match self.get(name)? {
            Value::I32(i) => Ok(f64::from(*i)),
            Value::I64(i) => Ok(*i as f64),
            Value::F32(f) => Ok(f64::from(*f)),
            Value::F64(f) => Ok(*f),
            other => Err(mismatch(name, "number", other)),
        }
    }

    pub fn get_bool(&self, name: &str) -> Result<bool> {
        match self.get(name)? {
            Value::Bool(b) => Ok(*b),
            other => Err(mismatch(name, "boolean", other)),
        }
    }

    pub fn get_relation(&self, name: &str) -> Result<&Arc<MaterializedRelation>> {
        match self.get(name)? {
            Value::Rel(r) => Ok(r),
            other => Err(mismatch(name, "relation", other)),
        }
    }

    fn content_hash(&self) -> u64 {
        let mut hc = self.schema.hash_code();
        for col in self.schema.iter() {
            if let Ok(v) = self.get(&col.name) {
                hc = hc.wrapping_add(hash_pair(&col.name, v));
            }
        }
        hc
    }
}

fn mismatch(column: &str, expected: &'static str, found: &Value) -> Error {
    Error::TypeMismatch {
        column: column.to_string(),
        expected,
        found: found.kind(),
    }
}

impl PartialEq for Row {
    fn eq(&self, other: &Self) -> bool {
        if self.schema != other.schema {
            return false;
        }
        if Arc::ptr_eq(&self.repr, &other.repr) {
            return true;
        }
        self.schema
            .iter()
            .all(|c| match (self.get(&c.name), other.get(&c.name)) {
                (Ok(a), Ok(b)) => a == b,
                _ => false,
            })
    }
}

impl Eq for Row {}

impl Hash for Row {
    fn hash<H: Hasher>(&self, state: &mut H) {
        state.write_u64(self.content_hash());
    }
}

impl fmt::Debug for Row {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut m = f.debug_map();
        for col in self.schema.iter() {
            match self.get(&col.name) {
                Ok(v) => m.entry(&col.name, v),
                Err(_) => m.entry(&col.name, &"<unreachable>"),
            };
        }
        m.finish()
    }
}
