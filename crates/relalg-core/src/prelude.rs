//! Convenient re-exports for downstream crates.

pub use crate::config::RelConfig;
pub use crate::error::{Error, Result};
pub use crate::relation::{
    DerivedRelation, MaterializedRelation, Mode, Relation, RelationRef, RowIter,
    SinglePassRelation,
};
pub use crate::row::Row;
pub use crate::schema::{Column, DataType, Schema, SchemaRef};
pub use crate::types::{IntoValue, Value};
