use tourops_core::error::CoreError;
use uuid::Uuid;

/// Failure modes of the document-store gateway.
///
/// Transport and pool failures surface as [`StoreError::Unavailable`] and
/// must propagate to the caller; they are never swallowed or retried
/// here. A stored payload that no longer normalizes is [`Corrupt`] — a
/// store-side defect, distinct from invalid caller input.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("stored document for show {id} is invalid: {reason}")]
    Corrupt { id: Uuid, reason: String },

    #[error("document store unavailable: {0}")]
    Unavailable(#[from] sqlx::Error),
}
