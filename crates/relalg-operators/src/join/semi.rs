//! Semi-join and its complement: filter `a` by key membership in `b`.

use std::collections::HashSet;
use std::sync::Arc;

use relalg_core::prelude::*;

use super::{join_columns, key_of};
use crate::yields_distinct;

/// Rows of `a` with at least one row of `b` sharing their common-column values.
pub fn semi_join(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    membership(a, b, true)
}

/// Alias of `semi_join`.
pub fn matching(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    semi_join(a, b)
}

/// Rows of `a` with no row of `b` sharing their common-column values.
pub fn not_matching(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    membership(a, b, false)
}

/// Alias of `not_matching`.
pub fn semi_difference(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    not_matching(a, b)
}

fn membership(a: &RelationRef, b: &RelationRef, keep_found: bool) -> Result<RelationRef> {
    let key = join_columns(a, b)?;
    let (left, right) = (Arc::clone(a), Arc::clone(b));
    Ok(DerivedRelation::new(a.schema().clone(), move || {
        let keys: HashSet<Row> = right
            .rows()?
            .map(|r| r.map(|row| key_of(&key, &row)))
            .collect::<Result<_>>()?;
        #[cfg(feature = "tracing")]
        tracing::debug!(schema = %right.schema(), keys = keys.len(), "semi-join build side");
        let key = key.clone();
        Ok(Box::new(left.rows()?.filter(move |r| match r {
            Ok(row) => keys.contains(&key_of(&key, row)) == keep_found,
            Err(_) => true,
        })) as RowIter)
    })
    .with_mode(a.mode())
    .assume_distinct(yields_distinct(a))
    .into_ref())
}
