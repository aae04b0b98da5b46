//! Union, intersection and difference over relations with equal schemas,
//! plus the `distinct` and `bag` views.
//!
//! The second operand is the build side: intersection and difference drain
//! it into a hash set when enumeration starts, then stream the first operand.

use std::collections::HashSet;
use std::sync::Arc;

use relalg_core::prelude::*;
use relalg_core::relation::Distinct;

use crate::yields_distinct;

/// Fail with `SchemaMismatch` unless `a` and `b` have the same column set.
pub fn ensure_schema_matches(a: &RelationRef, b: &RelationRef) -> Result<()> {
    if **a.schema() != **b.schema() {
        return Err(Error::SchemaMismatch {
            left: a.schema().to_string(),
            right: b.schema().to_string(),
        });
    }
    Ok(())
}

/// Rows in `a` or `b` (set mode).
pub fn union(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    chained(a, b, Mode::Set)
}

/// Every row of `a` followed by every row of `b`, duplicates kept.
pub fn union_all(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    chained(a, b, Mode::Bag)
}

/// Rows of `a` that also appear in `b` (set mode).
pub fn intersect(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    probe(a, b, true, Mode::Set)
}

/// Bag variant of `intersect`: each row of `a` is kept as often as it occurs.
pub fn intersect_all(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    probe(a, b, true, Mode::Bag)
}

/// Rows of `a` that do not appear in `b` (set mode).
pub fn difference(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    probe(a, b, false, Mode::Set)
}

/// Bag variant of `difference`.
pub fn difference_all(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    probe(a, b, false, Mode::Bag)
}

/// Set-mode view of any relation.
pub fn distinct(rel: &RelationRef) -> RelationRef {
    let upstream = Arc::clone(rel);
    DerivedRelation::new(rel.schema().clone(), move || {
        let rows = upstream.rows_all()?;
        if upstream.is_distinct() {
            Ok(rows)
        } else {
            Ok(Box::new(Distinct::new(rows)) as RowIter)
        }
    })
    .assume_distinct(true)
    .into_ref()
}

/// Bag-mode view of any relation: its physical rows, duplicates included.
pub fn bag(rel: &RelationRef) -> RelationRef {
    let upstream = Arc::clone(rel);
    DerivedRelation::new(rel.schema().clone(), move || upstream.rows_all())
        .with_mode(Mode::Bag)
        .assume_distinct(rel.is_distinct())
        .into_ref()
}

fn chained(a: &RelationRef, b: &RelationRef, mode: Mode) -> Result<RelationRef> {
    ensure_schema_matches(a, b)?;
    let schema = a.schema().clone();
    let (left, right) = (Arc::clone(a), Arc::clone(b));
    let out = schema.clone();
    Ok(DerivedRelation::new(schema, move || {
        let first = left.rows()?;
        let second = right.rows()?;
        if Arc::ptr_eq(&out, right.schema()) {
            return Ok(Box::new(first.chain(second)) as RowIter);
        }
        // Rebind so every yielded row reports the output schema's column order.
        let schema = out.clone();
        let rebound = second.map(move |r| r.map(|row| Row::projected(schema.clone(), row)));
        Ok(Box::new(first.chain(rebound)) as RowIter)
    })
    .with_mode(mode)
    .into_ref())
}

fn probe(a: &RelationRef, b: &RelationRef, keep_found: bool, mode: Mode) -> Result<RelationRef> {
    ensure_schema_matches(a, b)?;
    let (left, right) = (Arc::clone(a), Arc::clone(b));
    Ok(DerivedRelation::new(a.schema().clone(), move || {
        let build: HashSet<Row> = right.rows()?.collect::<Result<_>>()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(schema = %right.schema(), rows = build.len(), "set operation build side");
        let rows = left.rows()?;
        Ok(Box::new(rows.filter(move |r| match r {
            Ok(row) => build.contains(row) == keep_found,
            Err(_) => true,
        })) as RowIter)
    })
    .with_mode(mode)
    .assume_distinct(yields_distinct(a))
    .into_ref())
}
