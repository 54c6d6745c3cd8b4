use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use cinerate_core::error::CoreError;
use cinerate_db::error::{is_check_violation, is_foreign_key_violation};
use cinerate_db::RepoError;
use serde_json::json;

/// Message used for every request that fails parsing or schema validation.
pub const INVALID_REQUEST_MESSAGE: &str = "Invalid request data";

/// Message used for every unexpected failure; details go to the log only.
pub const INTERNAL_ERROR_MESSAGE: &str = "An internal error occurred";

/// Message for a director or genre id that does not resolve.
pub const INVALID_REFERENCE_MESSAGE: &str = "Invalid director_id or genres";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce the failure envelope.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `cinerate_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The request body, path or query string could not be parsed or
    /// failed schema validation.
    #[error("Invalid request data")]
    InvalidRequest,

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<RepoError> for AppError {
    fn from(err: RepoError) -> Self {
        match err {
            RepoError::InvalidDirector(_) | RepoError::InvalidGenres => AppError::Core(
                CoreError::InvalidReference(INVALID_REFERENCE_MESSAGE.to_string()),
            ),
            RepoError::Database(err) => AppError::Database(err),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => {
                    tracing::debug!(entity, id, "Entity not found");
                    (StatusCode::NOT_FOUND, format!("{entity} not found"))
                }
                CoreError::Validation(msg) | CoreError::InvalidReference(msg) => {
                    (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
                }
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        INTERNAL_ERROR_MESSAGE.to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- HTTP-specific errors ---
            AppError::InvalidRequest => (
                StatusCode::UNPROCESSABLE_ENTITY,
                INVALID_REQUEST_MESSAGE.to_string(),
            ),
            AppError::InternalError(msg) => {
                tracing::error!(error = %msg, "Internal error");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    INTERNAL_ERROR_MESSAGE.to_string(),
                )
            }
        };

        failure_response(status, &message)
    }
}

/// Render `{"status": "failure", "error": {"code", "message"}}` with the
/// code mirroring the HTTP status.
pub fn failure_response(status: StatusCode, message: &str) -> Response {
    let body = json!({
        "status": "failure",
        "error": {
            "code": status.as_u16(),
            "message": message,
        },
    });

    (status, axum::Json(body)).into_response()
}

/// Classify a sqlx error into an HTTP status and message.
///
/// - `RowNotFound` maps to 404.
/// - Foreign key violations (23503) map to 422 invalid-reference.
/// - Check violations (23514) map to 422 invalid-input.
/// - Everything else maps to 500 with a sanitized message.
fn classify_sqlx_error(err: &sqlx::Error) -> (StatusCode, String) {
    if matches!(err, sqlx::Error::RowNotFound) {
        return (StatusCode::NOT_FOUND, "Not found".to_string());
    }
    if is_foreign_key_violation(err) {
        tracing::warn!(error = %err, "Foreign key violation");
        return (
            StatusCode::UNPROCESSABLE_ENTITY,
            INVALID_REFERENCE_MESSAGE.to_string(),
        );
    }
    if is_check_violation(err) {
        tracing::warn!(error = %err, "Check constraint violation");
        return (StatusCode::UNPROCESSABLE_ENTITY, "Validation error".to_string());
    }

    tracing::error!(error = %err, "Database error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        INTERNAL_ERROR_MESSAGE.to_string(),
    )
}
