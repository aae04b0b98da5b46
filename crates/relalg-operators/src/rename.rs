//! Rename: replace column names. Rows are wrapped with the inverse map.

use std::sync::Arc;

use relalg_core::prelude::*;
use relalg_core::row::RenameMap;

use crate::yields_distinct;

/// Apply `(old, new)` name changes (set mode).
///
/// Renaming an unknown column fails with `UnknownColumn`; a change that leaves
/// two columns with the same name fails with `DuplicateColumn`. Swaps are fine.
pub fn rename(rel: &RelationRef, changes: &[(&str, &str)]) -> Result<RelationRef> {
    renamed(rel, changes, Mode::Set)
}

/// Bag variant of `rename`.
pub fn rename_all(rel: &RelationRef, changes: &[(&str, &str)]) -> Result<RelationRef> {
    renamed(rel, changes, Mode::Bag)
}

fn renamed(rel: &RelationRef, changes: &[(&str, &str)], mode: Mode) -> Result<RelationRef> {
    let source = rel.schema();
    for (i, (old, _)) in changes.iter().enumerate() {
        source.lookup(old)?;
        if changes[..i]
            .iter()
            .any(|(prev, _)| relalg_core::hash::names_equal(prev, old))
        {
            return Err(Error::InvalidArgument(format!(
                "column '{}' is renamed more than once",
                old
            )));
        }
    }

    let columns = source
        .iter()
        .map(|c| match changes.iter().find(|(old, _)| c.name_equals(old)) {
            Some((_, new)) => Column::new(*new, c.data_type.clone()),
            None => c.clone(),
        })
        .collect();
    let schema: SchemaRef = Arc::new(Schema::new(source.name(), columns)?);
    let reverse = Arc::new(RenameMap::from_changes(changes.iter().copied()));

    let upstream = Arc::clone(rel);
    let out = schema.clone();
    Ok(DerivedRelation::new(schema, move || {
        let (schema, reverse) = (out.clone(), Arc::clone(&reverse));
        let rows = upstream.rows()?;
        Ok(Box::new(rows.map(move |r| {
            r.map(|row| Row::renamed(schema.clone(), row, Arc::clone(&reverse)))
        })) as RowIter)
    })
    .with_mode(mode)
    .assume_distinct(yields_distinct(rel))
    .into_ref())
}
