//! Relation sources.
//!
//! CSV and cursor sources are single-pass: enumerate them once, or
//! materialize first. Object sources re-enumerate freely.

pub mod csv;
pub mod cursor;
pub mod object;
