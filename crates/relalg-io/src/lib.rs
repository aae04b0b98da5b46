#![forbid(unsafe_code)]
//! relalg-io: getting relations in and out.
//!
//! Sources (`readers`) build relations from CSV text, in-memory records and
//! tabular cursors. Sinks (`writers`) render any relation as CSV, JSON, XML or
//! an aligned text table. `json` holds a small streaming tokenizer.

pub mod error;
pub mod json;
pub mod readers;
pub mod writers;

#[doc(hidden)]
pub use relalg_core;

pub use error::{Error, Result};
pub use readers::csv::CsvReader;
pub use readers::cursor::{cursor_relation, TabularCursor};
pub use readers::object::{Accessor, ObjectRelation, Record};
pub use writers::csv::CsvWriter;
pub use writers::json::JsonWriter;
pub use writers::pretty::PrettyWriter;
pub use writers::xml::XmlWriter;
