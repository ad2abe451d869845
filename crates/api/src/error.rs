use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use shopsync_adapters::AdapterError;
use shopsync_core::error::CoreError;
use shopsync_engine::EngineError;

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] and [`EngineError`] for domain errors and adds
/// HTTP-specific variants. Implements [`IntoResponse`] to produce
/// consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `shopsync_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// An error from the reconciliation engine or webhook ingestor.
    #[error(transparent)]
    Engine(#[from] EngineError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// A resource addressed by a natural key (not a numeric id) was not
    /// found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The caller's identity is missing or not accepted.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => classify_core_error(core),

            AppError::Engine(engine) => match engine {
                EngineError::Core(core) => classify_core_error(core),
                EngineError::Database(err) => classify_sqlx_error(err),
                EngineError::Adapter(err) => classify_adapter_error(err),
                EngineError::SignatureInvalid => (
                    StatusCode::UNAUTHORIZED,
                    "INVALID_SIGNATURE",
                    "Invalid webhook signature".to_string(),
                ),
            },

            AppError::Database(err) => classify_sqlx_error(err),

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::Unauthorized(msg) => {
                (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
            }
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal error occurred".to_string(),
                )
            }
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Classify a domain error into an HTTP status, error code, and message.
fn classify_core_error(err: &CoreError) -> (StatusCode, &'static str, String) {
    match err {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => {
            (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
        }
        CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
        CoreError::InsufficientPlatforms(_) => (
            StatusCode::BAD_REQUEST,
            "INSUFFICIENT_PLATFORMS",
            err.to_string(),
        ),
        CoreError::Internal(msg) => {
            tracing::error!(error = %msg, "Internal core error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}

/// Classify an adapter fault that escaped the per-item loop (listing
/// calls, connect tests reached through the engine).
fn classify_adapter_error(err: &AdapterError) -> (StatusCode, &'static str, String) {
    match err {
        AdapterError::Auth(_) => (
            StatusCode::BAD_GATEWAY,
            "PLATFORM_AUTH_ERROR",
            err.to_string(),
        ),
        AdapterError::RateLimit { .. } => (
            StatusCode::BAD_GATEWAY,
            "PLATFORM_RATE_LIMITED",
            err.to_string(),
        ),
        _ => (StatusCode::BAD_GATEWAY, "PLATFORM_ERROR", err.to_string()),
    }
}

/// Classify a sqlx error into an HTTP status, error code, and message.
///
/// - `RowNotFound` maps to 404.
/// - Unique constraint violations (constraint name starting with `uq_`) map to 409.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, &'static str, String) {
    match err {
        sqlx::Error::RowNotFound => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            "Resource not found".to_string(),
        ),
        sqlx::Error::Database(db_err) => {
            // PostgreSQL unique constraint violation: error code 23505
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
            tracing::error!(error = %db_err, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
        other => {
            tracing::error!(error = %other, "Database error");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "INTERNAL_ERROR",
                "An internal error occurred".to_string(),
            )
        }
    }
}
