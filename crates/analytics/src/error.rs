use chrono::NaiveDate;
use core_types::CoreError;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalyticsError {
    #[error("Invalid date range: start {start} is after end {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid input for {0}: {1}")]
    InvalidInput(String, String),

    #[error("Calculation error: Division by zero encountered in '{0}'")]
    DivisionByZero(String),
}

impl From<CoreError> for AnalyticsError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::InvalidRange { start, end } => AnalyticsError::InvalidRange { start, end },
            CoreError::InvalidInput(field, message) => AnalyticsError::InvalidInput(field, message),
        }
    }
}
