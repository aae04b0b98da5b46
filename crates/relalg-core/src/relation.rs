//! Relations: lazy, pull-based sequences of rows sharing one schema.
//!
//! Three shapes exist:
//! - `SinglePassRelation` wraps a one-shot source (a CSV stream, a cursor).
//! - `DerivedRelation` wraps a row producer; every enumeration re-runs it.
//! - `MaterializedRelation` drains a source once and replays the stored rows.
//!
//! `rows_all()` is the physical sequence. `rows()` is the default enumeration
//! and removes duplicates for `Mode::Set` relations.

use std::collections::HashSet;
use std::fmt;
use std::sync::{Arc, Mutex};

use crate::error::{Error, Result};
use crate::hash::hash_one;
use crate::row::Row;
use crate::schema::SchemaRef;

/// Boxed stream of rows. Items are fallible so a source can fail mid-stream.
pub type RowIter = Box<dyn Iterator<Item = Result<Row>> + Send>;

/// Shared handle to any relation. Operators take and return these.
pub type RelationRef = Arc<dyn Relation>;

/// Whether a relation's default enumeration removes duplicate rows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Set semantics: no two equal rows.
    #[default]
    Set,
    /// Bag semantics: duplicates and multiplicities are kept.
    Bag,
}

pub trait Relation: Send + Sync {
    /// The schema every yielded row is bound to.
    fn schema(&self) -> &SchemaRef;

    /// The physical row sequence, duplicates included.
    fn rows_all(&self) -> Result<RowIter>;

    fn mode(&self) -> Mode {
        Mode::Set
    }

    /// True when `rows_all()` can never yield two equal rows.
    fn is_distinct(&self) -> bool {
        false
    }

    /// Default enumeration, honouring `mode()`.
    fn rows(&self) -> Result<RowIter> {
        let rows = self.rows_all()?;
        if self.mode() == Mode::Set && !self.is_distinct() {
            Ok(Box::new(Distinct::new(rows)))
        } else {
            Ok(rows)
        }
    }

    /// Drain the default enumeration into a vector.
    fn to_vec(&self) -> Result<Vec<Row>> {
        self.rows()?.collect()
    }

    /// Number of rows in the default enumeration.
    fn cardinality(&self) -> Result<usize> {
        self.rows()?.try_fold(0usize, |n, r| r.map(|_| n + 1))
    }
}

/// Drops any row equal to one already yielded in the same pass.
pub struct Distinct<I> {
    inner: I,
    seen: HashSet<Row>,
}

impl<I> Distinct<I> {
    pub fn new(inner: I) -> Self {
        Self {
            inner,
            seen: HashSet::new(),
        }
    }
}

impl<I> Iterator for Distinct<I>
where
    I: Iterator<Item = Result<Row>>,
{
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.inner.next()? {
                Ok(row) => {
                    if self.seen.insert(row.clone()) {
                        return Some(Ok(row));
                    }
                }
                Err(e) => return Some(Err(e)),
            }
        }
    }
}

type Producer = dyn Fn() -> Result<RowIter> + Send + Sync;

/// A relation defined by a row producer over some upstream relation(s).
///
/// Holds no per-enumeration state: each call to `rows_all()` invokes the
/// producer afresh, which re-runs the upstream pipeline.
pub struct DerivedRelation {
    schema: SchemaRef,
    mode: Mode,
    distinct: bool,
    produce: Box<Producer>,
}

impl DerivedRelation {
    pub fn new<F>(schema: SchemaRef, produce: F) -> Self
    where
        F: Fn() -> Result<RowIter> + Send + Sync + 'static,
    {
        Self {
            schema,
            mode: Mode::Set,
            distinct: false,
            produce: Box::new(produce),
        }
    }

    pub fn with_mode(mut self, mode: Mode) -> Self {
        self.mode = mode;
        self
    }

    /// Declare that the producer never yields duplicates, so set-mode
    /// enumeration can skip its hash set.
    pub fn assume_distinct(mut self, distinct: bool) -> Self {
        self.distinct = distinct;
        self
    }

    pub fn into_ref(self) -> RelationRef {
        Arc::new(self)
    }
}

impl Relation for DerivedRelation {
    fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    fn rows_all(&self) -> Result<RowIter> {
        (self.produce)()
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn is_distinct(&self) -> bool {
        self.distinct
    }
}

impl fmt::Debug for DerivedRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DerivedRelation")
            .field("schema", &self.schema.to_string())
            .field("mode", &self.mode)
            .finish()
    }
}

/// A relation over a source that can only be read once.
///
/// The second enumeration fails with `Exhausted`; callers that need to read
/// the data again should materialize it first.
pub struct SinglePassRelation {
    schema: SchemaRef,
    source: Mutex<Option<RowIter>>,
}

impl SinglePassRelation {
    pub fn new(schema: SchemaRef, source: RowIter) -> Self {
        Self {
            schema,
            source: Mutex::new(Some(source)),
        }
    }
}

impl Relation for SinglePassRelation {
    fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    fn rows_all(&self) -> Result<RowIter> {
        let mut guard = self
            .source
            .lock()
            .map_err(|_| Error::Invariant("single-pass source lock poisoned".into()))?;
        guard
            .take()
            .ok_or_else(|| Error::Exhausted(self.schema.to_string()))
    }
}

/// Rows drained once into memory; re-enumerable and safe to share.
pub struct MaterializedRelation {
    schema: SchemaRef,
    rows: Arc<Vec<Row>>,
    mode: Mode,
    distinct: bool,
}

impl MaterializedRelation {
    /// Drain `source`'s default enumeration exactly once.
    pub fn new(source: &dyn Relation) -> Result<Self> {
        let rows = source.rows()?.collect::<Result<Vec<_>>>()?;
        let mode = source.mode();
        #[cfg(feature = "tracing")]
        tracing::trace!(schema = %source.schema(), rows = rows.len(), "materialized relation");
        Ok(Self {
            schema: source.schema().clone(),
            rows: Arc::new(rows),
            mode,
            distinct: mode == Mode::Set || source.is_distinct(),
        })
    }

    /// Wrap rows produced elsewhere. Every row must carry `schema`.
    pub fn from_rows(schema: SchemaRef, rows: Vec<Row>, mode: Mode) -> Result<Self> {
        if let Some(bad) = rows.iter().find(|r| **r.schema() != *schema) {
            return Err(Error::SchemaMismatch {
                left: schema.to_string(),
                right: bad.schema().to_string(),
            });
        }
        Ok(Self {
            schema,
            rows: Arc::new(rows),
            mode,
            distinct: false,
        })
    }

    /// Like `from_rows` for rows already known to be unique.
    pub(crate) fn from_distinct_rows(schema: SchemaRef, rows: Vec<Row>) -> Self {
        Self {
            schema,
            rows: Arc::new(rows),
            mode: Mode::Set,
            distinct: true,
        }
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn get(&self, idx: usize) -> Option<&Row> {
        self.rows.get(idx)
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Row> {
        self.rows.iter()
    }

    pub fn into_ref(self) -> RelationRef {
        Arc::new(self)
    }

    /// Set equality: same schema and the same distinct rows, in any order.
    pub fn set_eq(&self, other: &MaterializedRelation) -> bool {
        if *self.schema != *other.schema {
            return false;
        }
        let a: HashSet<&Row> = self.rows.iter().collect();
        let b: HashSet<&Row> = other.rows.iter().collect();
        a == b
    }

    /// Order-independent hash consistent with `set_eq`.
    pub fn set_hash(&self) -> u64 {
        let distinct: HashSet<&Row> = self.rows.iter().collect();
        distinct
            .into_iter()
            .fold(self.schema.hash_code(), |acc, r| acc.wrapping_add(hash_one(r)))
    }
}

/// Build the relation-valued cell for a group of rows, dropping duplicates.
pub fn nested_relation(schema: SchemaRef, rows: Vec<Row>) -> MaterializedRelation {
    let mut seen = HashSet::with_capacity(rows.len());
    let unique = rows.into_iter().filter(|r| seen.insert(r.clone())).collect();
    MaterializedRelation::from_distinct_rows(schema, unique)
}

impl Relation for MaterializedRelation {
    fn schema(&self) -> &SchemaRef {
        &self.schema
    }

    fn rows_all(&self) -> Result<RowIter> {
        let rows = Arc::clone(&self.rows);
        Ok(Box::new((0..rows.len()).map(move |i| Ok(rows[i].clone()))))
    }

    fn mode(&self) -> Mode {
        self.mode
    }

    fn is_distinct(&self) -> bool {
        self.distinct
    }

    fn cardinality(&self) -> Result<usize> {
        if self.mode == Mode::Bag || self.distinct {
            Ok(self.rows.len())
        } else {
            self.rows()?.try_fold(0usize, |n, r| r.map(|_| n + 1))
        }
    }
}

impl fmt::Debug for MaterializedRelation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MaterializedRelation")
            .field("schema", &self.schema.to_string())
            .field("rows", &self.rows)
            .finish()
    }
}
