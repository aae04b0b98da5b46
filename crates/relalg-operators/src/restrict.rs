//! Restrict: keep (or, for the `away` variants, drop) rows matching a predicate.
//!
//! Predicates are fallible so they can use the typed row accessors:
//! `|r| Ok(r.get_i64("age")? > 18)`.

use std::sync::Arc;

use relalg_core::prelude::*;

use crate::yields_distinct;

/// Shared predicate, invoked once per row on every enumeration.
pub type Predicate = Arc<dyn Fn(&Row) -> Result<bool> + Send + Sync>;

/// Rows of `rel` where `predicate` holds (set mode).
pub fn restrict<P>(rel: &RelationRef, predicate: P) -> RelationRef
where
    P: Fn(&Row) -> Result<bool> + Send + Sync + 'static,
{
    filter(rel, Arc::new(predicate), false, Mode::Set)
}

/// Rows of `rel` where `predicate` does not hold (set mode).
pub fn restrict_away<P>(rel: &RelationRef, predicate: P) -> RelationRef
where
    P: Fn(&Row) -> Result<bool> + Send + Sync + 'static,
{
    filter(rel, Arc::new(predicate), true, Mode::Set)
}

/// Bag variant of `restrict`.
pub fn restrict_all<P>(rel: &RelationRef, predicate: P) -> RelationRef
where
    P: Fn(&Row) -> Result<bool> + Send + Sync + 'static,
{
    filter(rel, Arc::new(predicate), false, Mode::Bag)
}

/// Bag variant of `restrict_away`.
pub fn restrict_away_all<P>(rel: &RelationRef, predicate: P) -> RelationRef
where
    P: Fn(&Row) -> Result<bool> + Send + Sync + 'static,
{
    filter(rel, Arc::new(predicate), true, Mode::Bag)
}

fn filter(rel: &RelationRef, predicate: Predicate, invert: bool, mode: Mode) -> RelationRef {
    let upstream = Arc::clone(rel);
    let distinct = yields_distinct(rel);
    DerivedRelation::new(rel.schema().clone(), move || {
        let predicate = Arc::clone(&predicate);
        let rows = upstream.rows()?;
        Ok(Box::new(rows.filter_map(move |r| keep(r, &*predicate, invert))) as RowIter)
    })
    .with_mode(mode)
    .assume_distinct(distinct)
    .into_ref()
}

fn keep(
    item: Result<Row>,
    predicate: &(dyn Fn(&Row) -> Result<bool> + Send + Sync),
    invert: bool,
) -> Option<Result<Row>> {
    let row = match item {
        Ok(row) => row,
        Err(e) => return Some(Err(e)),
    };
    match predicate(&row) {
        Ok(matched) if matched != invert => Some(Ok(row)),
        Ok(_) => None,
        Err(e) => Some(Err(e)),
    }
}
