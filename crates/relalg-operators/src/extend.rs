//! Extend: append one computed column.

use std::sync::Arc;

use relalg_core::prelude::*;

use crate::yields_distinct;

/// Append column `name`, typed by `f`'s result type.
///
/// Fails with `DuplicateColumn` if `name` already exists.
pub fn extend<T, F>(rel: &RelationRef, name: &str, f: F) -> Result<RelationRef>
where
    T: IntoValue,
    F: Fn(&Row) -> Result<T> + Send + Sync + 'static,
{
    let column = Column::new(name, T::data_type());
    extend_with(rel, column, move |row| f(row).map(IntoValue::into_value))
}

/// Append `column`, computing each value with `f`.
pub fn extend_with<F>(rel: &RelationRef, column: Column, f: F) -> Result<RelationRef>
where
    F: Fn(&Row) -> Result<Value> + Send + Sync + 'static,
{
    let schema: SchemaRef = Arc::new(
        rel.schema()
            .with_column(column.clone(), rel.schema().name())?,
    );
    let f = Arc::new(f);
    let upstream = Arc::clone(rel);
    let out = schema.clone();
    Ok(DerivedRelation::new(schema, move || {
        let (schema, column, f) = (out.clone(), column.clone(), Arc::clone(&f));
        let rows = upstream.rows()?;
        Ok(Box::new(rows.map(move |r| {
            let row = r?;
            let value = f(&row)?;
            Ok(Row::extended(schema.clone(), row, column.clone(), value))
        })) as RowIter)
    })
    .with_mode(rel.mode())
    .assume_distinct(yields_distinct(rel))
    .into_ref())
}
