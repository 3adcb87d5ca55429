use analytics::AnalyticsError;
use axum::{
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use core_types::CoreError;
use market_data::DataError;
use serde_json::json;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Data error: {0}")]
    Data(#[from] DataError),
    #[error("Analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
    #[error("Invalid parameter: {0}")]
    Core(#[from] CoreError),
    #[error("Bad request: {0}")]
    BadRequest(String),
    #[error("Internal error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Data(DataError::NotFound(_)) => StatusCode::NOT_FOUND,
            AppError::Data(DataError::InvalidTicker(_))
            | AppError::Analytics(AnalyticsError::InvalidRange { .. })
            | AppError::Analytics(AnalyticsError::InvalidInput(..))
            | AppError::Core(_)
            | AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::Data(_)
            | AppError::Analytics(AnalyticsError::DivisionByZero(_))
            | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

/// Converts our custom `AppError` into an HTTP response.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        let error_message = match &self {
            // Parse failures keep their line number in the body.
            AppError::Data(err @ DataError::Parse { .. }) => {
                tracing::error!(error = %err, "Ticker file could not be parsed.");
                err.to_string()
            }
            AppError::Data(err @ (DataError::Csv(_) | DataError::Io(_))) => {
                tracing::error!(error = ?err, "Data error.");
                "An error occurred while reading market data".to_string()
            }
            AppError::Internal(message) => {
                tracing::error!(error = %message, "Internal error.");
                "An internal error occurred".to_string()
            }
            AppError::Analytics(err @ AnalyticsError::DivisionByZero(_)) => {
                tracing::error!(error = %err, "Analytics error.");
                err.to_string()
            }
            AppError::Data(err) => err.to_string(),
            AppError::Analytics(err) => err.to_string(),
            AppError::Core(err) => err.to_string(),
            AppError::BadRequest(message) => message.clone(),
        };

        let body = Json(json!({ "error": error_message }));
        (status, body).into_response()
    }
}
