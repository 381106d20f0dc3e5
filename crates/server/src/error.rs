//! Unified error handling.
//!
//! Provides a unified `AppError` type mapped onto HTTP responses. All route
//! handlers return `Result<T, AppError>`; nothing here is ever fatal to the
//! process - every failure is scoped to the single request that caused it.

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::store::StoreError;

/// Application-level error type for the server.
#[derive(Debug, Error)]
pub enum AppError {
    /// Client-side validation failed before any store write.
    #[error("Validation error: {0}")]
    Validation(String),

    /// Caller is not authenticated (or credentials were wrong).
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Store operation failed (includes the not-found case).
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Internal server error.
    #[error("Internal error: {0}")]
    Internal(String),
}

impl From<tower_sessions::session::Error> for AppError {
    fn from(err: tower_sessions::session::Error) -> Self {
        Self::Internal(format!("session error: {err}"))
    }
}

/// JSON body returned for every error response.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub success: bool,
    pub message: String,
}

impl ErrorBody {
    #[must_use]
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Log server-side failures; validation noise stays at debug
        if matches!(
            self,
            Self::Internal(_) | Self::Store(StoreError::Storage(_))
        ) {
            tracing::error!(error = %self, "Request error");
        }

        let status = match &self {
            Self::Validation(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Store(StoreError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Store(StoreError::Storage(_)) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        };

        // Don't expose internal error details to clients
        let message = match &self {
            Self::Validation(msg) | Self::Unauthorized(msg) => msg.clone(),
            Self::Store(err @ StoreError::NotFound(_)) => err.to_string(),
            Self::Store(StoreError::Storage(_)) | Self::Internal(_) => {
                "Ocorreu um erro. Tente novamente mais tarde.".to_owned()
            }
        };

        (status, Json(ErrorBody::new(message))).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
