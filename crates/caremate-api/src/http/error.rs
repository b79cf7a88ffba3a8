//! Application error type mapping to HTTP status codes and envelope format.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use caremate_types::error::{AuthError, StoreError};

use crate::http::response::ApiResponse;

/// Application-level error that maps to HTTP responses.
#[derive(Debug)]
pub enum AppError {
    /// Auth boundary errors.
    Auth(AuthError),
    /// Store errors that do surface (list/create outside an exchange).
    Store(StoreError),
    /// Missing or invalid bearer token.
    Unauthorized(String),
    /// Validation error.
    Validation(String),
    /// A conflicting action is already in flight.
    Conflict(String),
    /// Generic internal error.
    Internal(String),
}

impl From<AuthError> for AppError {
    fn from(e: AuthError) -> Self {
        AppError::Auth(e)
    }
}

impl From<StoreError> for AppError {
    fn from(e: StoreError) -> Self {
        AppError::Store(e)
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Auth(AuthError::EmailTaken(email)) => (
                StatusCode::CONFLICT,
                "EMAIL_TAKEN",
                format!("Email '{email}' is already registered"),
            ),
            AppError::Auth(AuthError::UnknownEmail) => (
                StatusCode::UNAUTHORIZED,
                "UNKNOWN_EMAIL",
                "No account for that email".to_string(),
            ),
            AppError::Auth(AuthError::InvalidToken) => (
                StatusCode::UNAUTHORIZED,
                "INVALID_TOKEN",
                "Invalid or expired token".to_string(),
            ),
            AppError::Auth(e) => (StatusCode::INTERNAL_SERVER_ERROR, "AUTH_ERROR", e.to_string()),
            // A denied row and a missing row are deliberately the same
            // from the outside.
            AppError::Store(StoreError::NotFound) | AppError::Store(StoreError::Denied) => (
                StatusCode::NOT_FOUND,
                "SESSION_NOT_FOUND",
                "Session not found".to_string(),
            ),
            AppError::Store(e) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "STORE_ERROR", e.to_string())
            }
            AppError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
            AppError::Internal(msg) => {
                (StatusCode::INTERNAL_SERVER_ERROR, "INTERNAL_ERROR", msg.clone())
            }
        };

        (status, Json(ApiResponse::failure(code, message))).into_response()
    }
}
