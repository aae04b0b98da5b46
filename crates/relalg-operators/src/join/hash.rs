//! Natural join: one combined row per matching pair.

use std::collections::HashMap;
use std::sync::Arc;

use relalg_core::prelude::*;

use super::{join_columns, key_of};

/// Natural join of `a` and `b` on their common columns.
///
/// The output schema is `a`'s columns followed by `b`'s remaining ones.
pub fn natural_join(a: &RelationRef, b: &RelationRef) -> Result<RelationRef> {
    let key = join_columns(a, b)?;
    let schema: SchemaRef = Arc::new(Schema::merge(a.schema(), b.schema(), a.schema().name())?);
    // A right column hidden behind a same-named left column of another type can
    // make distinct pairs collapse into equal rows.
    let lossless = schema.len() + key.len() == a.schema().len() + b.schema().len();
    let distinct = a.mode() == Mode::Set && b.mode() == Mode::Set && lossless;

    let (left, right) = (Arc::clone(a), Arc::clone(b));
    let out = schema.clone();
    Ok(DerivedRelation::new(schema, move || {
        let mut table: HashMap<Row, Vec<Row>> = HashMap::new();
        for row in right.rows()? {
            let row = row?;
            table.entry(key_of(&key, &row)).or_default().push(row);
        }
        #[cfg(feature = "tracing")]
        tracing::debug!(schema = %right.schema(), keys = table.len(), "join build side");
        Ok(Box::new(HashJoinProbe {
            probe: left.rows()?,
            table,
            key: key.clone(),
            schema: out.clone(),
            current: None,
            pos: 0,
        }) as RowIter)
    })
    .assume_distinct(distinct)
    .into_ref())
}

/// Streams the probe side, emitting one joined row per build-side match.
struct HashJoinProbe {
    probe: RowIter,
    table: HashMap<Row, Vec<Row>>,
    key: SchemaRef,
    schema: SchemaRef,
    current: Option<(Row, Row)>,
    pos: usize,
}

impl Iterator for HashJoinProbe {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some((left, key)) = &self.current {
                if let Some(right) = self.table.get(key).and_then(|m| m.get(self.pos)) {
                    self.pos += 1;
                    return Some(Ok(Row::joined(
                        self.schema.clone(),
                        left.clone(),
                        right.clone(),
                    )));
                }
                self.current = None;
            }
            match self.probe.next()? {
                Ok(left) => {
                    let key = key_of(&self.key, &left);
                    if self.table.contains_key(&key) {
                        self.current = Some((left, key));
                        self.pos = 0;
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}
