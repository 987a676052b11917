//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use crate::store::StoreError;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Message returned for every API request while the store is not connected
pub const STORE_UNAVAILABLE_MESSAGE: &str = "Database not connected";

/// Application-level error types
///
/// Each variant maps to one HTTP status via `IntoResponse`.
#[derive(Error, Debug)]
pub enum AppError {
    /// A required request field is absent or blank
    #[error("Missing required field: {0}")]
    MissingField(String),

    /// The request body is missing, not JSON, or has the wrong shape
    #[error("Invalid request body: {0}")]
    InvalidBody(String),

    /// A profile with the given name already exists
    #[error("Profile already exists: {0}")]
    ProfileExists(String),

    /// Profile with the given name was not found
    #[error("Profile not found: {0}")]
    ProfileNotFound(String),

    /// Schedule with the given name was not found in the active profile
    #[error("Schedule not found: {0}")]
    ScheduleNotFound(String),

    /// Attempt to delete the reserved default profile
    #[error("The default profile cannot be deleted")]
    DefaultProfileProtected,

    /// The store connection has not been established
    #[error("{}", STORE_UNAVAILABLE_MESSAGE)]
    StoreUnavailable,

    /// Error reported by the store backend
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// Holiday data could not be loaded
    #[error("Holiday data is unavailable")]
    HolidaysUnavailable,

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::MissingField(_) => StatusCode::BAD_REQUEST,
            AppError::InvalidBody(_) => StatusCode::BAD_REQUEST,
            AppError::ProfileExists(_) => StatusCode::CONFLICT,
            AppError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
            AppError::ScheduleNotFound(_) => StatusCode::NOT_FOUND,
            AppError::DefaultProfileProtected => StatusCode::BAD_REQUEST,
            AppError::StoreUnavailable => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(StoreError::Unavailable(_)) => StatusCode::SERVICE_UNAVAILABLE,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::HolidaysUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::InvalidBody(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        if status.is_server_error() {
            tracing::error!(status = status.as_u16(), "{}", self);
        }

        let body = Json(json!({
            "message": self.to_string(),
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
