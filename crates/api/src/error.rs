use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use recolour_core::error::{CoreError, StoreError};
use recolour_engine::PhotoError;

pub const MSG_INVALID_PAYLOAD: &str = "Invalid payload";
pub const MSG_INVALID_QUERY: &str = "Invalid query parameters";
pub const MSG_INVALID_TRANSITION: &str = "Invalid ticket state transition";
pub const MSG_UNAUTHORIZED: &str = "Missing or invalid Authorization header";
pub const MSG_FORBIDDEN: &str = "Insufficient permissions";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds HTTP-specific variants.
/// Implements [`IntoResponse`] to produce consistent JSON error responses.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `recolour_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A not-found with a caller-facing message, for resources below a ticket.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The request body failed to parse or validate.
    #[error("Invalid payload")]
    InvalidPayload,

    /// The query string failed to parse or validate.
    #[error("Invalid query parameters")]
    InvalidQuery,
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl From<StoreError> for AppError {
    fn from(err: StoreError) -> Self {
        AppError::Core(err.into())
    }
}

impl From<PhotoError> for AppError {
    fn from(err: PhotoError) -> Self {
        AppError::Core(err.into())
    }
}

fn internal(msg: &str) -> (StatusCode, &'static str, String) {
    tracing::error!(error = %msg, "Internal error");
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        "INTERNAL_ERROR",
        "An internal error occurred".to_string(),
    )
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, .. } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("{entity} not found"),
                ),
                CoreError::InvalidTransition { .. } => (
                    StatusCode::BAD_REQUEST,
                    "INVALID_TRANSITION",
                    MSG_INVALID_TRANSITION.to_string(),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Unauthorized(msg) => {
                    (StatusCode::UNAUTHORIZED, "UNAUTHORIZED", msg.clone())
                }
                CoreError::Forbidden(msg) => (StatusCode::FORBIDDEN, "FORBIDDEN", msg.clone()),
                CoreError::UnsupportedFileType { .. } => (
                    StatusCode::BAD_REQUEST,
                    "UNSUPPORTED_FILE_TYPE",
                    core.to_string(),
                ),
                CoreError::Internal(msg) => internal(msg),
            },

            // --- HTTP-specific errors ---
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, "NOT_FOUND", msg.clone()),
            AppError::InvalidPayload => (
                StatusCode::BAD_REQUEST,
                "INVALID_PAYLOAD",
                MSG_INVALID_PAYLOAD.to_string(),
            ),
            AppError::InvalidQuery => (
                StatusCode::BAD_REQUEST,
                "INVALID_QUERY",
                MSG_INVALID_QUERY.to_string(),
            ),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}
