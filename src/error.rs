//! Error taxonomy shared by every handler.
//!
//! Handler-detected failures answer `{msg}` with their own status code.
//! Anything the framework rejects before a handler runs (malformed body,
//! non-integer path id, unknown route, unsupported method) and unexpected
//! store failures answer the uniform `{message, status_code}` envelope instead.

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        FromRequest, FromRequestParts,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum ApiError {
    /// Missing, empty or oversized required field.
    #[error("{0}")]
    Validation(&'static str),

    /// Id does not resolve to a record.
    #[error("{0}")]
    NotFound(&'static str),

    /// Duplicate value for a unique field.
    #[error("{0}")]
    Conflict(&'static str),

    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("internal error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::Validation(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::FORBIDDEN,
            ApiError::Database(_) | ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

/// Body of every handler-level answer that only carries a message.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub msg: &'static str,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(msg) | ApiError::NotFound(msg) | ApiError::Conflict(msg) => {
                (status, Json(MessageResponse { msg })).into_response()
            }
            ApiError::Database(e) => {
                error!(error = %e, "unhandled database error");
                ApiException::new(status, "Internal server error").into_response()
            }
            ApiError::Internal(e) => {
                error!(error = %e, "internal error");
                ApiException::new(status, "Internal server error").into_response()
            }
        }
    }
}

/// Uniform envelope for framework-level failures.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct ApiException {
    pub message: String,
    pub status_code: u16,
}

impl ApiException {
    pub fn new(status: StatusCode, message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            status_code: status.as_u16(),
        }
    }
}

impl IntoResponse for ApiException {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}

impl From<JsonRejection> for ApiException {
    fn from(rejection: JsonRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

impl From<PathRejection> for ApiException {
    fn from(rejection: PathRejection) -> Self {
        Self::new(rejection.status(), rejection.body_text())
    }
}

/// `axum::Json` whose rejection is answered with [`ApiException`].
#[derive(FromRequest)]
#[from_request(via(axum::Json), rejection(ApiException))]
pub struct JsonBody<T>(pub T);

/// `axum::extract::Path` whose rejection is answered with [`ApiException`].
#[derive(FromRequestParts)]
#[from_request(via(axum::extract::Path), rejection(ApiException))]
pub struct IdPath<T>(pub T);

pub async fn not_found() -> ApiException {
    ApiException::new(StatusCode::NOT_FOUND, "Not found")
}

pub async fn method_not_allowed() -> ApiException {
    ApiException::new(StatusCode::METHOD_NOT_ALLOWED, "Method not allowed")
}

/// Maps a unique-constraint violation to [`ApiError::Conflict`].
pub fn conflict_on_unique(e: sqlx::Error, msg: &'static str) -> ApiError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_unique_violation() => ApiError::Conflict(msg),
        _ => ApiError::Database(e),
    }
}

/// Maps a foreign-key violation to [`ApiError::NotFound`].
pub fn not_found_on_foreign_key(e: sqlx::Error, msg: &'static str) -> ApiError {
    match e.as_database_error() {
        Some(db_err) if db_err.is_foreign_key_violation() => ApiError::NotFound(msg),
        _ => ApiError::Database(e),
    }
}
