use thiserror::Error;

#[derive(Error, Debug)]
pub enum DataError {
    #[error("No data file found for ticker '{0}'")]
    NotFound(String),

    #[error("Invalid ticker identifier '{0}'")]
    InvalidTicker(String),

    #[error("Malformed data at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("Failed to read CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to read the data directory: {0}")]
    Io(#[from] std::io::Error),
}

/// A single cell that could not be interpreted.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FieldError {
    #[error("unrecognised timestamp '{0}'")]
    Timestamp(String),

    #[error("non-numeric price '{0}'")]
    Price(String),

    #[error("price '{0}' has {1} ticks, 32nds quotes allow at most 31")]
    TicksOutOfRange(String, u32),
}
