//! HTTP error mapping.
//!
//! Handlers return [`AppError`]; the [`IntoResponse`] impl turns every
//! variant into the `{ "error", "code" }` JSON body the frontend keys on.
//! Database errors are sanitized on the way out: unique-constraint hits
//! become 409s, anything else logs the real error and answers with a
//! generic 500.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use playrental_core::error::CoreError;
use serde_json::json;

/// Error type returned by every handler in this crate.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// Domain rule violation surfaced from `playrental_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// Query failure surfaced from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// Malformed or unacceptable input caught at the HTTP layer.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A missing resource identified by something other than its id
    /// (e.g. a user looked up by email).
    #[error("Not found: {0}")]
    NotFound(String),

    /// Anything the client cannot fix. The message is logged, never sent.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

/// What the client sees for a 500, regardless of cause.
const INTERNAL_MESSAGE: &str = "An internal error occurred";

impl AppError {
    /// HTTP status, machine-readable code, and user-facing message.
    fn parts(&self) -> (StatusCode, &'static str, String) {
        match self {
            AppError::Core(core) => core_parts(core),
            AppError::Database(err) => database_parts(err),
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    INTERNAL_MESSAGE.to_string(),
                )
            }
        }
    }
}

fn core_parts(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::PaymentDeclined(msg) => {
            (StatusCode::PAYMENT_REQUIRED, "PAYMENT_DECLINED", msg.clone())
        }
        CoreError::Unauthorized(msg) => (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone()),
        CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                INTERNAL_MESSAGE.to_string(),
            )
        }
    }
}

/// Sanitize sqlx failures before they reach the client.
///
/// `RowNotFound` is a plain 404. A PostgreSQL unique violation (23505) on
/// one of our `uq_`-prefixed constraints is a 409 naming the constraint.
/// Every other shape logs the real error and answers 500.
fn database_parts(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        );
    }

    if let sqlx::Error::Database(db_err) = err {
        if db_err.code().as_deref() == Some("23505") {
            let constraint = db_err.constraint().unwrap_or("unknown");
            if constraint.starts_with("uq_") {
                return (
                    StatusCode::CONFLICT,
                    "CONFLICT",
                    format!("Duplicate value violates unique constraint: {constraint}"),
                );
            }
        }
    }

    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        INTERNAL_MESSAGE.to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = self.parts();
        (status, Json(json!({ "error": message, "code": code }))).into_response()
    }
}
