//! Project: narrow a relation to a subset of its columns.
//!
//! Rows are wrapped, not copied: the projected row still holds the removed
//! values, but its schema makes them unreachable. Narrowing can make distinct
//! rows collide, so the set-mode variants deduplicate afterwards.

use std::sync::Arc;

use relalg_core::prelude::*;

/// Keep only `names` (set mode). Unknown names fail with `UnknownColumn`.
pub fn project(rel: &RelationRef, names: &[&str]) -> Result<RelationRef> {
    let schema = rel.schema().select(names, rel.schema().name())?;
    Ok(projected(rel, schema, Mode::Set))
}

/// Bag variant of `project`.
pub fn project_all(rel: &RelationRef, names: &[&str]) -> Result<RelationRef> {
    let schema = rel.schema().select(names, rel.schema().name())?;
    Ok(projected(rel, schema, Mode::Bag))
}

/// Remove `names`, keeping every other column (set mode).
pub fn project_away(rel: &RelationRef, names: &[&str]) -> Result<RelationRef> {
    let schema = rel.schema().without(names, rel.schema().name())?;
    Ok(projected(rel, schema, Mode::Set))
}

/// Bag variant of `project_away`.
pub fn project_away_all(rel: &RelationRef, names: &[&str]) -> Result<RelationRef> {
    let schema = rel.schema().without(names, rel.schema().name())?;
    Ok(projected(rel, schema, Mode::Bag))
}

fn projected(rel: &RelationRef, schema: Schema, mode: Mode) -> RelationRef {
    let schema: SchemaRef = Arc::new(schema);
    let upstream = Arc::clone(rel);
    let out = schema.clone();
    DerivedRelation::new(schema, move || {
        let schema = out.clone();
        let rows = upstream.rows()?;
        Ok(Box::new(rows.map(move |r| r.map(|row| Row::projected(schema.clone(), row)))) as RowIter)
    })
    .with_mode(mode)
    .into_ref()
}
