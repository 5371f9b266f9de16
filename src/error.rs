//! Error types for the Local Library server

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension,
};
use thiserror::Error;

/// Main application error type
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Too many requests")]
    TooManyRequests,

    #[error("Database error: {0}")]
    Database(#[from] mongodb::error::Error),

    #[error("Internal server error: {0}")]
    Internal(String),
}

/// What went wrong, attached to the response extensions so the error-page
/// middleware can render it with access to the configuration.
#[derive(Debug, Clone)]
pub struct ErrorReport {
    pub status: StatusCode,
    /// Message safe to show to any client
    pub message: String,
    /// Internal detail, only rendered in development mode
    pub detail: Option<String>,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::TooManyRequests => StatusCode::TOO_MANY_REQUESTS,
            AppError::Database(_) | AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    pub fn report(&self) -> ErrorReport {
        let (message, detail) = match self {
            AppError::NotFound(msg) | AppError::BadRequest(msg) => (msg.clone(), None),
            AppError::TooManyRequests => ("Too many requests, please try again later".to_string(), None),
            AppError::Database(e) => ("Database error".to_string(), Some(format!("{:?}", e))),
            AppError::Internal(msg) => ("Internal server error".to_string(), Some(msg.clone())),
        };

        ErrorReport {
            status: self.status(),
            message,
            detail,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        match &self {
            AppError::Database(e) => tracing::error!("Database error: {:?}", e),
            AppError::Internal(msg) => tracing::error!("Internal error: {}", msg),
            AppError::NotFound(msg) | AppError::BadRequest(msg) => {
                tracing::debug!("Request rejected ({}): {}", self.status(), msg)
            }
            AppError::TooManyRequests => tracing::warn!("Rate limit exceeded"),
        }

        let report = self.report();
        (report.status, Extension(report)).into_response()
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
