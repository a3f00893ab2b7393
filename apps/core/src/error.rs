use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;

/// Application-wide error type.
///
/// Capability implementations use it internally and convert it to a fallback
/// reply at their boundary; it only reaches HTTP clients for faults nobody
/// anticipated.
#[derive(Debug, Error)]
pub enum AppError {
    /// Missing or malformed configuration (e.g., an invalid URL in the environment).
    #[error("Configuration error: {0}")]
    Config(String),

    /// Transport-level HTTP failure talking to a provider.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// A provider answered, but not with what we asked for.
    #[error("Provider error: {0}")]
    Provider(String),

    /// Represents errors from operations that did not complete in time.
    #[error("Operation timed out: {0}")]
    Timeout(String),

    /// Represents unexpected internal errors that indicate a bug.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tokio::time::error::Elapsed> for AppError {
    fn from(err: tokio::time::error::Elapsed) -> Self {
        AppError::Timeout(err.to_string())
    }
}

impl From<url::ParseError> for AppError {
    fn from(err: url::ParseError) -> Self {
        AppError::Config(format!("URL parse error: {}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::Config(format!("Invalid settings: {}", err))
    }
}

/// Body returned to HTTP clients on a hard failure.
#[derive(Debug, Serialize)]
#[cfg_attr(test, derive(serde::Deserialize))]
pub struct ErrorResponse {
    pub detail: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        tracing::error!(error = %self, "Request failed");
        let body = ErrorResponse {
            detail: self.to_string(),
        };
        (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
    }
}
