//! Blob-store side of the persistence gateway.
//!
//! Attachment bytes live in an object store addressed by the path
//! convention `organizations/{org_id}/shows/{show_id}/{file_name}`; a
//! write returns a retrievable locator. Two providers implement the
//! [`BlobStore`] trait: S3 for deployment, local filesystem for
//! development and tests. Writing a blob never touches the show
//! document — recording the attachment is the caller's second step.

pub mod local;
pub mod s3;

use async_trait::async_trait;
use uuid::Uuid;

pub use local::LocalBlobStore;
pub use s3::S3BlobStore;

/// Failure modes of the blob store.
#[derive(Debug, thiserror::Error)]
pub enum BlobError {
    #[error("blob store unavailable: {0}")]
    Unavailable(String),

    #[error("invalid blob path segment `{0}`")]
    InvalidSegment(String),
}

/// Abstraction over the managed object store.
#[async_trait]
pub trait BlobStore: Send + Sync {
    /// Store raw bytes under the attachment path convention and return
    /// a retrievable locator.
    async fn put(
        &self,
        org_id: &str,
        show_id: Uuid,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobError>;
}

/// Build the hierarchical object key for one attachment.
///
/// Caller-supplied segments must not be empty or escape the hierarchy.
pub fn blob_key(org_id: &str, show_id: Uuid, file_name: &str) -> Result<String, BlobError> {
    for segment in [org_id, file_name] {
        let trimmed = segment.trim();
        if trimmed.is_empty()
            || trimmed.contains('/')
            || trimmed.contains('\\')
            || trimmed == "."
            || trimmed == ".."
        {
            return Err(BlobError::InvalidSegment(segment.to_string()));
        }
    }
    Ok(format!(
        "organizations/{}/shows/{}/{}",
        org_id.trim(),
        show_id,
        file_name.trim()
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn key_follows_the_path_convention() {
        let id: Uuid = "7e5c5a31-4f3c-4e6d-9a2b-08d6a2e1c111".parse().unwrap();
        let key = blob_key("play-dead-mgmt", id, "contract.pdf").unwrap();
        assert_eq!(
            key,
            "organizations/play-dead-mgmt/shows/7e5c5a31-4f3c-4e6d-9a2b-08d6a2e1c111/contract.pdf"
        );
    }

    #[test]
    fn rejects_traversal_and_empty_segments() {
        let id = Uuid::new_v4();
        assert!(blob_key("", id, "contract.pdf").is_err());
        assert!(blob_key("org", id, "../secrets.pdf").is_err());
        assert!(blob_key("org", id, "a/b.pdf").is_err());
        assert!(blob_key("org", id, "..").is_err());
    }
}
