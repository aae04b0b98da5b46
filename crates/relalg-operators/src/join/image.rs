//! Image relation: nest the matching part of `b` inside each row of `a`.

use std::collections::HashMap;
use std::sync::Arc;

use relalg_core::prelude::*;
use relalg_core::relation::nested_relation;

use super::{join_columns, key_of};
use crate::yields_distinct;

/// Extend `a` with relation-valued column `name`.
///
/// For each row of `a`, the new cell holds the rows of `b` sharing its values
/// on the common columns, projected onto `b`'s other columns. Rows without a
/// match get an empty relation. Fails with `EmptySchema` if `b` has no columns
/// beyond the common ones, and `DuplicateColumn` if `name` is taken in `a`.
pub fn image(a: &RelationRef, b: &RelationRef, name: &str) -> Result<RelationRef> {
    let key = join_columns(a, b)?;
    let key_names: Vec<&str> = key.iter().map(|c| c.name.as_str()).collect();
    let nested: SchemaRef = Arc::new(b.schema().without(&key_names, b.schema().name())?);
    let column = Column::new(name, DataType::Relation(nested.clone()));
    let schema: SchemaRef = Arc::new(
        a.schema()
            .with_column(column.clone(), a.schema().name())?,
    );

    let (left, right) = (Arc::clone(a), Arc::clone(b));
    let out = schema.clone();
    Ok(DerivedRelation::new(schema, move || {
        let mut groups: HashMap<Row, Vec<Row>> = HashMap::new();
        for row in right.rows()? {
            let row = row?;
            let part = Row::projected(nested.clone(), row.clone());
            groups.entry(key_of(&key, &row)).or_default().push(part);
        }
        let groups: HashMap<Row, Value> = groups
            .into_iter()
            .map(|(k, rows)| (k, Value::Rel(Arc::new(nested_relation(nested.clone(), rows)))))
            .collect();
        let empty = Value::Rel(Arc::new(nested_relation(nested.clone(), Vec::new())));

        let (key, schema, column) = (key.clone(), out.clone(), column.clone());
        Ok(Box::new(left.rows()?.map(move |r| {
            let row = r?;
            let value = groups
                .get(&key_of(&key, &row))
                .unwrap_or(&empty)
                .clone();
            Ok(Row::extended(schema.clone(), row, column.clone(), value))
        })) as RowIter)
    })
    .with_mode(a.mode())
    .assume_distinct(yields_distinct(a))
    .into_ref())
}
