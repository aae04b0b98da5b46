//! Stable ordering by one or more columns.

use std::cmp::Ordering;
use std::sync::Arc;

use relalg_core::prelude::*;

/// Sort `rel` by `names`, in priority order.
///
/// Rows are collected from `rel.rows()` each time the result is enumerated and
/// sorted with `Value::total_cmp` (nulls first). Ties keep their input order.
/// The result is in bag mode so the order survives enumeration; set-mode inputs
/// are already duplicate-free at that point.
pub fn order_by(rel: &RelationRef, names: &[&str]) -> Result<RelationRef> {
    if names.is_empty() {
        return Err(Error::InvalidArgument("order_by needs at least one column".into()));
    }
    let keys = names
        .iter()
        .map(|n| rel.schema().lookup(n).map(|c| c.name.clone()))
        .collect::<Result<Vec<_>>>()?;

    let upstream = Arc::clone(rel);
    Ok(DerivedRelation::new(rel.schema().clone(), move || {
        let mut keyed = upstream
            .rows()?
            .map(|r| r.and_then(|row| Ok((extract_sort_tuple(&row, &keys)?, row))))
            .collect::<Result<Vec<_>>>()?;
        keyed.sort_by(|(a, _), (b, _)| compare_value_tuples(a, b));
        Ok(Box::new(keyed.into_iter().map(|(_, row)| Ok(row))) as RowIter)
    })
    .with_mode(Mode::Bag)
    .assume_distinct(rel.mode() == Mode::Set)
    .into_ref())
}

/// Extract the sort key tuple for a row.
fn extract_sort_tuple(row: &Row, keys: &[String]) -> Result<Vec<Value>> {
    keys.iter().map(|k| row.get(k).cloned()).collect()
}

/// Compare two key tuples column by column.
fn compare_value_tuples(a: &[Value], b: &[Value]) -> Ordering {
    for (x, y) in a.iter().zip(b.iter()) {
        match x.total_cmp(y) {
            Ordering::Equal => continue,
            other => return other,
        }
    }
    a.len().cmp(&b.len())
}
