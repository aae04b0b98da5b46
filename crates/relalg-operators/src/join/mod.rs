//! Joins keyed on the columns two relations share.
//!
//! Every join drains its second argument into a hash table keyed by the
//! projection onto the common columns, then streams the first argument.

pub mod hash;
pub mod image;
pub mod semi;

use std::sync::Arc;

use relalg_core::prelude::*;

/// Key schema for joining `a` with `b`: the columns (name and type) present in
/// both. Fails with `NoCommonColumns` when there are none.
pub fn join_columns(a: &RelationRef, b: &RelationRef) -> Result<SchemaRef> {
    let common = Schema::common(a.schema(), b.schema());
    if common.is_empty() {
        return Err(Error::NoCommonColumns {
            left: a.schema().to_string(),
            right: b.schema().to_string(),
        });
    }
    #[cfg(feature = "tracing")]
    tracing::debug!(
        left = %a.schema(),
        right = %b.schema(),
        columns = ?common.iter().map(|c| c.name.as_str()).collect::<Vec<_>>(),
        "join columns"
    );
    Ok(Arc::new(Schema::new("", common)?))
}

/// Project `row` onto the join key.
pub(crate) fn key_of(key: &SchemaRef, row: &Row) -> Row {
    Row::projected(key.clone(), row.clone())
}
