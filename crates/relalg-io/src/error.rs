use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("io: {0}")]
    Io(#[from] std::io::Error),

    #[error("csv: {0}")]
    Csv(#[from] csv::Error),

    #[error("json: {0}")]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Core(#[from] relalg_core::Error),
}

impl From<Error> for relalg_core::Error {
    /// Rows surface through `relalg_core::Result`, so adapter failures met
    /// mid-enumeration are folded into the core taxonomy.
    fn from(e: Error) -> Self {
        match e {
            Error::Core(e) => e,
            Error::Io(e) => relalg_core::Error::IoLike(e.to_string()),
            Error::Csv(e) => csv_to_core(e),
            Error::Json(e) => relalg_core::Error::MalformedInput(e.to_string()),
        }
    }
}

pub(crate) fn csv_to_core(e: csv::Error) -> relalg_core::Error {
    if e.is_io_error() {
        relalg_core::Error::IoLike(e.to_string())
    } else {
        relalg_core::Error::MalformedInput(e.to_string())
    }
}
