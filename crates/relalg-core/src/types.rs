//! Cell values.
//!
//! `Value` is the dynamically-typed content of one cell. Floats compare and
//! hash by bit pattern so that every value can key a hash set; relation-valued
//! cells compare as sets of rows.

use std::cmp::Ordering;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use crate::relation::{MaterializedRelation, Relation};
use crate::schema::DataType;

#[derive(Debug, Clone)]
pub enum Value {
    Null,
    Bool(bool),
    I32(i32),
    I64(i64),
    F32(f32),
    F64(f64),
    Str(String),
    Bin(Vec<u8>),
    Rel(Arc<MaterializedRelation>),
}

impl Value {
    /// The data type of this value, or `None` for `Null`.
    pub fn data_type(&self) -> Option<DataType> {
        Some(match self {
            Value::Null => return None,
            Value::Bool(_) => DataType::Boolean,
            Value::I32(_) => DataType::Int32,
            Value::I64(_) => DataType::Int64,
            Value::F32(_) => DataType::Float32,
            Value::F64(_) => DataType::Float64,
            Value::Str(_) => DataType::Utf8,
            Value::Bin(_) => DataType::Binary,
            Value::Rel(r) => DataType::Relation(r.schema().clone()),
        })
    }

    /// Short human-readable kind name, used in type mismatch errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "boolean",
            Value::I32(_) => "int32",
            Value::I64(_) => "int64",
            Value::F32(_) => "float32",
            Value::F64(_) => "float64",
            Value::Str(_) => "utf8",
            Value::Bin(_) => "binary",
            Value::Rel(_) => "relation",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    /// Total order used for sorting: nulls first, then by kind, then by value.
    ///
    /// Relation-valued cells order by row count, then by their order-independent
    /// row hash. Two unequal relations can still compare `Equal` when their
    /// hashes collide.
    pub fn total_cmp(&self, other: &Value) -> Ordering {
        use Value::*;

        match (self, other) {
            (Null, Null) => Ordering::Equal,
            (Null, _) => Ordering::Less,
            (_, Null) => Ordering::Greater,
            (Bool(x), Bool(y)) => x.cmp(y),
            (I32(x), I32(y)) => x.cmp(y),
            (I64(x), I64(y)) => x.cmp(y),
            (F32(x), F32(y)) => x.total_cmp(y),
            (F64(x), F64(y)) => x.total_cmp(y),
            (Str(x), Str(y)) => x.cmp(y),
            (Bin(x), Bin(y)) => x.cmp(y),
            (Rel(x), Rel(y)) => x
                .len()
                .cmp(&y.len())
                .then_with(|| x.set_hash().cmp(&y.set_hash())),
            // Mixed types: order by variant order
            _ => type_order(self).cmp(&type_order(other)),
        }
    }
}

/// Assign a numeric order to value kinds for mixed-type comparisons.
fn type_order(v: &Value) -> u8 {
    use Value::*;
    match v {
        Null => 0,
        Bool(_) => 1,
        I32(_) => 2,
        I64(_) => 3,
        F32(_) => 4,
        F64(_) => 5,
        Str(_) => 6,
        Bin(_) => 7,
        Rel(_) => 8,
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        use Value::*;
        match (self, other) {
            (Null, Null) => true,
            (Bool(x), Bool(y)) => x == y,
            (I32(x), I32(y)) => x == y,
            (I64(x), I64(y)) => x == y,
            (F32(x), F32(y)) => x.to_bits() == y.to_bits(),
            (F64(x), F64(y)) => x.to_bits() == y.to_bits(),
            (Str(x), Str(y)) => x == y,
            (Bin(x), Bin(y)) => x == y,
            (Rel(x), Rel(y)) => Arc::ptr_eq(x, y) || x.set_eq(y),
            _ => false,
        }
    }
}

impl Eq for Value {}

impl Hash for Value {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Write type discriminant first
        state.write_u8(type_order(self));
        match self {
            Value::Null => {}
            Value::Bool(b) => b.hash(state),
            Value::I32(i) => i.hash(state),
            Value::I64(i) => i.hash(state),
            Value::F32(f) => f.to_bits().hash(state),
            Value::F64(f) => f.to_bits().hash(state),
            Value::Str(s) => s.hash(state),
            Value::Bin(b) => b.hash(state),
            Value::Rel(r) => state.write_u64(r.set_hash()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Null => Ok(()),
            Value::Bool(b) => write!(f, "{}", b),
            Value::I32(i) => write!(f, "{}", i),
            Value::I64(i) => write!(f, "{}", i),
            Value::F32(x) => write!(f, "{}", x),
            Value::F64(x) => write!(f, "{}", x),
            Value::Str(s) => f.write_str(s),
            Value::Bin(b) => {
                for byte in b {
                    write!(f, "{:02x}", byte)?;
                }
                Ok(())
            }
            Value::Rel(r) => write!(f, "[{} rows]", r.len()),
        }
    }
}

/// Rust types that can be stored in a cell with a statically known column type.
///
/// `extend` uses this to type the new column from the function's result type.
pub trait IntoValue {
    fn data_type() -> DataType;
    fn into_value(self) -> Value;
}

macro_rules! into_value {
    ($t:ty, $dt:ident, $variant:ident) => {
        impl IntoValue for $t {
            fn data_type() -> DataType {
                DataType::$dt
            }
            fn into_value(self) -> Value {
                Value::$variant(self.into())
            }
        }

        impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::$variant(v.into())
            }
        }
    };
}

into_value!(bool, Boolean, Bool);
into_value!(i32, Int32, I32);
into_value!(i64, Int64, I64);
into_value!(f32, Float32, F32);
into_value!(f64, Float64, F64);
into_value!(String, Utf8, Str);
into_value!(&str, Utf8, Str);
into_value!(Vec<u8>, Binary, Bin);

impl<T: IntoValue> IntoValue for Option<T> {
    fn data_type() -> DataType {
        T::data_type()
    }
    fn into_value(self) -> Value {
        self.map(IntoValue::into_value).unwrap_or(Value::Null)
    }
}
