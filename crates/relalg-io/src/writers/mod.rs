//! Sinks. Each writer drains `rows()` once, so the relation's mode decides
//! whether duplicates are written.

pub mod csv;
pub mod json;
pub mod pretty;
pub mod xml;
