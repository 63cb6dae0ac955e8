// ============================
// crates/backend-lib/src/error.rs
// ============================
//! Central error type + Axum integration.
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::auth::AuthError;

/// Application error types with error codes and context
#[derive(Error, Debug)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Authentication error: {0}")]
    Auth(#[from] AuthError),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Internal error: {0}")]
    Internal(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl AppError {
    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::InvalidCredentials | AppError::Auth(_) => StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::InvalidCredentials => "AUTH_001",
            AppError::Auth(_) => "AUTH_002",
            AppError::Config(_) => "CFG_001",
            AppError::Internal(_) => "INT_001",
            AppError::InvalidInput(_) => "VAL_001",
            AppError::Json(_) => "JSON_001",
            AppError::Io(_) => "IO_001",
        }
    }

    /// Get a sanitized message suitable for production use
    ///
    /// Credential and token failures deliberately collapse into one generic
    /// message so the response never reveals which check failed.
    pub fn sanitized_message(&self) -> String {
        match self {
            AppError::InvalidCredentials | AppError::Auth(_) => {
                "Authentication failed".to_string()
            }
            AppError::Config(_) => "Service misconfigured".to_string(),
            AppError::Internal(_) => "An internal server error occurred".to_string(),
            AppError::InvalidInput(_) => "Invalid input provided".to_string(),
            AppError::Json(_) => "Invalid request format".to_string(),
            AppError::Io(_) => "Internal server error".to_string(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let error_code = self.error_code();

        // Auth failures are always sanitized, even in development
        let message = match self {
            AppError::InvalidCredentials | AppError::Auth(_) => self.sanitized_message(),
            _ if cfg!(debug_assertions) => self.to_string(),
            _ => self.sanitized_message(),
        };

        let body = serde_json::json!({
            "error": {
                "code": error_code,
                "message": message,
            }
        });

        (status, axum::Json(body)).into_response()
    }
}
