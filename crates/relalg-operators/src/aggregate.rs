//! Scalar aggregates over a whole relation.

use relalg_core::prelude::*;

/// Sum of the numeric column `name` over `rel.rows()`.
///
/// Nulls count as zero. Text cells are parsed as numbers, so a column read
/// from CSV can be summed directly; a cell that does not parse fails with
/// `TypeMismatch`. Set-mode relations sum each distinct row once.
pub fn sum(rel: &RelationRef, name: &str) -> Result<f64> {
    rel.schema().lookup(name)?;
    let mut total = 0.0;
    for row in rel.rows()? {
        total += cell_as_f64(&row?, name)?;
    }
    Ok(total)
}

fn cell_as_f64(row: &Row, name: &str) -> Result<f64> {
    match row.get(name)? {
        Value::Null => Ok(0.0),
        Value::Str(s) => s.trim().parse().map_err(|_| Error::TypeMismatch {
            column: name.to_string(),
            expected: "number",
            found: "utf8",
        }),
        _ => row.get_f64(name),
    }
}
