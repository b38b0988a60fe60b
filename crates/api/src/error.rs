use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;

use tourops_cloud::BlobError;
use tourops_core::error::CoreError;
use tourops_db::error::StoreError;
use tourops_extract::ExtractError;

/// Application-level error type for HTTP handlers.
///
/// Wraps the gateway error kinds and maps each to a distinct HTTP shape,
/// so a caller can tell a validation problem from a missing record, a
/// store outage, or a failed AI extraction. Nothing is swallowed: 5xx
/// details are logged and sanitized, everything else carries its message.
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    /// A domain-level error from `tourops_core`.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A document-store gateway error.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// A blob-store gateway error.
    #[error("Blob storage error: {0}")]
    Blob(#[from] BlobError),

    /// A contract-extraction error.
    #[error("Extraction failed: {0}")]
    Extraction(#[from] ExtractError),

    /// A bad request with a human-readable message.
    #[error("Bad request: {0}")]
    BadRequest(String),
}

/// Convenience type alias for handler return values.
pub type AppResult<T> = Result<T, AppError>;

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::Core(core) => core_response(core),

            AppError::Store(store) => match store {
                StoreError::Core(core) => core_response(core),
                StoreError::Corrupt { .. } => {
                    tracing::error!(error = %store, "Corrupt show document");
                    (
                        StatusCode::INTERNAL_SERVER_ERROR,
                        "INTERNAL_ERROR",
                        "An internal error occurred".to_string(),
                    )
                }
                StoreError::Unavailable(err) => {
                    tracing::error!(error = %err, "Document store unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORE_UNAVAILABLE",
                        "The record store is temporarily unavailable; please retry".to_string(),
                    )
                }
            },

            AppError::Blob(blob) => match blob {
                BlobError::InvalidSegment(_) => {
                    (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", blob.to_string())
                }
                BlobError::Unavailable(err) => {
                    tracing::error!(error = %err, "Blob store unavailable");
                    (
                        StatusCode::SERVICE_UNAVAILABLE,
                        "STORE_UNAVAILABLE",
                        "File storage is temporarily unavailable; please retry".to_string(),
                    )
                }
            },

            // Distinct from store errors on purpose: the user should see
            // that AI extraction failed, not that saving did.
            AppError::Extraction(err) => {
                tracing::warn!(error = %err, "Contract extraction failed");
                (
                    StatusCode::BAD_GATEWAY,
                    "EXTRACTION_FAILED",
                    format!("Contract extraction failed: {err}"),
                )
            }

            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, "BAD_REQUEST", msg.clone()),
        };

        let body = json!({
            "error": message,
            "code": code,
        });

        (status, axum::Json(body)).into_response()
    }
}

/// Map a domain error to an HTTP status, error code, and message.
fn core_response(core: &CoreError) -> (StatusCode, &'static str, String) {
    match core {
        CoreError::NotFound { entity, id } => (
            StatusCode::NOT_FOUND,
            "NOT_FOUND",
            format!("{entity} with id {id} not found"),
        ),
        CoreError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
    }
}
