use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use ctei_core::error::CoreError;
use ctei_core::validation::{FieldErrors, INVALID_FORM_MESSAGE};
use ctei_scoring::OracleError;
use serde_json::json;

/// Generic retryable message shown when the scoring oracle fails.
pub const SCORING_FAILED_MESSAGE: &str =
    "An error occurred while scoring the project. Please try again.";

/// Application-level error type for HTTP handlers.
///
/// Wraps [`CoreError`] for domain errors and adds the workflow-specific
/// variants (field validation, scoring). Implements [`IntoResponse`] to
/// produce consistent JSON error responses; nothing propagates to the
/// rendering layer untranslated.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `ctei_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A database error from sqlx.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The scoring oracle failed or answered with malformed data.
    #[error("Scoring error: {0}")]
    Oracle(#[from] OracleError),

    /// Aggregate field-validation failure for a submitted form.
    #[error("Form validation failed")]
    Form(FieldErrors),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// An internal error with a human-readable message.
    #[error("Internal error: {0}")]
    InternalError(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // Field errors carry an extra `fields` object; everything else is
        // the plain `{error, code}` envelope.
        if let AppError::Form(fields) = &self {
            let body = json!({
                "error": INVALID_FORM_MESSAGE,
                "code": "VALIDATION_ERROR",
                "fields": fields,
            });
            return (StatusCode::UNPROCESSABLE_ENTITY, axum::Json(body)).into_response();
        }

        let (status, code, message) = match &self {
            // --- CoreError variants ---
            AppError::Core(core) => match core {
                CoreError::NotFound { entity, id } => (
                    StatusCode::NOT_FOUND,
                    "NOT_FOUND",
                    format!("No se encontró {entity} con id {id}"),
                ),
                CoreError::Validation(msg) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone())
                }
                CoreError::Conflict(msg) => (StatusCode::CONFLICT, "CONFLICT", msg.clone()),
                CoreError::Internal(msg) => {
                    tracing::error!(error = %msg, "Internal core error");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
            },

            // --- Database errors ---
            AppError::Database(err) => classify_sqlx_error(err),

            // --- Scoring oracle failures ---
            AppError::Oracle(err) => {
                tracing::warn!(error = %err, "Scoring oracle failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "SCORING_ERROR",
                    SCORING_FAILED_MESSAGE.to_string(),
                )
            }

            // Handled above.
            AppError::Form(_) => unreachable!(),

            // --- HTTP-specific errors ---
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
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
