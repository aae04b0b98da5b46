#![forbid(unsafe_code)]
//! relalg-core: the data model of the relational-algebra engine.
//!
//! - `schema`: columns and order-independent schemas.
//! - `types`: cell values.
//! - `row`: immutable rows and the decorator rows operators build.
//! - `relation`: lazy, materialized and single-pass relations.
//!
//! No I/O lives here; adapters are in `relalg-io`, operators in
//! `relalg-operators`.

pub mod config;
pub mod error;
pub mod hash;
pub mod prelude;
pub mod relation;
pub mod row;
pub mod schema;
pub mod types;

pub use error::{Error, Result};
