use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    #[error("schema '{0}' must have at least one column")]
    EmptySchema(String),

    #[error("schema '{schema}' must have unique columns: '{column}' is duplicated")]
    DuplicateColumn { schema: String, column: String },

    #[error("unknown column '{column}' in schema '{schema}'")]
    UnknownColumn { schema: String, column: String },

    #[error("schemas '{left}' and '{right}' are incompatible")]
    SchemaMismatch { left: String, right: String },

    #[error("schemas '{left}' and '{right}' do not have any common columns")]
    NoCommonColumns { left: String, right: String },

    #[error("malformed input: {0}")]
    MalformedInput(String),

    #[error("column '{column}' holds {found}, expected {expected}")]
    TypeMismatch {
        column: String,
        expected: &'static str,
        found: &'static str,
    },

    #[error("relation '{0}' can only be enumerated once")]
    Exhausted(String),

    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    // The core crate does not do I/O, but adapters map their I/O and parser
    // errors into this variant when they surface mid-enumeration.
    #[error("I/O-like error (mapped into core): {0}")]
    IoLike(String),

    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}

impl Error {
    pub(crate) fn unknown_column(schema: &str, column: &str) -> Self {
        Error::UnknownColumn {
            schema: schema.to_string(),
            column: column.to_string(),
        }
    }
}
