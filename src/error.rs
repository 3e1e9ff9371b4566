use thiserror::Error;

pub type Result<T> = std::result::Result<T, PennyError>;

#[derive(Debug, Error)]
pub enum PennyError {
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Sqlite(#[from] rusqlite::Error),

    /// The import payload is not a JSON array at all. Nothing is processed.
    #[error("{0}")]
    Structural(String),

    /// One or more entries failed a field check. The whole batch is rejected
    /// so the user can fix every problem in one round-trip.
    #[error("Parsing errors:\n{}", .0.join("\n"))]
    Validation(Vec<String>),

    /// Structurally valid payload with zero entries.
    #[error("No valid transactions found in the input data.")]
    NoValidTransactions,

    #[error("Settings error: {0}")]
    Settings(String),

    #[error("{0}")]
    Other(String),
}
