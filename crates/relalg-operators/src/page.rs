//! Paging and materialization.

use std::sync::Arc;

use relalg_core::prelude::*;

use crate::yields_distinct;

/// The zero-based `page` of `size` rows from `rel.rows()`.
///
/// Fails with `InvalidArgument` when `size` is zero or the offset overflows.
pub fn page(rel: &RelationRef, size: usize, page: usize) -> Result<RelationRef> {
    if size == 0 {
        return Err(Error::InvalidArgument("page size must be positive".into()));
    }
    let skip = size
        .checked_mul(page)
        .ok_or_else(|| Error::InvalidArgument(format!("page {} of size {} is out of range", page, size)))?;

    let upstream = Arc::clone(rel);
    Ok(DerivedRelation::new(rel.schema().clone(), move || {
        let mut seen = 0usize;
        let rows = upstream.rows()?.filter(move |r| {
            if r.is_err() {
                return true;
            }
            seen += 1;
            seen > skip
        });
        Ok(Box::new(rows.take(size)) as RowIter)
    })
    .with_mode(rel.mode())
    .assume_distinct(yields_distinct(rel))
    .into_ref())
}

/// Drain `rel` once into memory so it can be enumerated any number of times.
pub fn materialize(rel: &RelationRef) -> Result<RelationRef> {
    Ok(MaterializedRelation::new(&**rel)?.into_ref())
}
