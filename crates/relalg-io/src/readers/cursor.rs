//! Relations over forward-only tabular cursors (database readers and the like).

use std::sync::Arc;

use relalg_core::prelude::*;

/// A forward-only result set.
///
/// `columns` describes every row; `advance` moves to the next row and returns
/// `false` past the end; `current` returns the row the cursor is on.
pub trait TabularCursor: Send {
    fn columns(&self) -> Vec<Column>;
    fn advance(&mut self) -> Result<bool>;
    fn current(&self) -> Vec<Value>;
}

/// Wrap `cursor` as a single-pass relation named `name`.
///
/// A row whose width differs from the column metadata fails with
/// `MalformedInput` when it is reached.
pub fn cursor_relation<C>(name: &str, cursor: C) -> Result<RelationRef>
where
    C: TabularCursor + 'static,
{
    let schema: SchemaRef = Arc::new(Schema::new(name, cursor.columns())?);
    let rows = CursorRows {
        schema: schema.clone(),
        cursor,
        done: false,
    };
    Ok(Arc::new(SinglePassRelation::new(schema, Box::new(rows))))
}

struct CursorRows<C> {
    schema: SchemaRef,
    cursor: C,
    done: bool,
}

impl<C: TabularCursor> Iterator for CursorRows<C> {
    type Item = Result<Row>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.cursor.advance() {
            Ok(true) => Some(Row::new(self.schema.clone(), self.cursor.current())),
            Ok(false) => {
                self.done = true;
                None
            }
            Err(e) => {
                self.done = true;
                Some(Err(e))
            }
        }
    }
}
