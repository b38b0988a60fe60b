//! Local-filesystem blob store provider, for development and tests.

use std::path::PathBuf;

use async_trait::async_trait;
use uuid::Uuid;

use crate::{blob_key, BlobError, BlobStore};

/// Object storage rooted at a directory; keys become relative paths.
pub struct LocalBlobStore {
    base_path: PathBuf,
}

impl LocalBlobStore {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }
}

#[async_trait]
impl BlobStore for LocalBlobStore {
    async fn put(
        &self,
        org_id: &str,
        show_id: Uuid,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobError> {
        let key = blob_key(org_id, show_id, file_name)?;
        let path = self.base_path.join(&key);

        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| BlobError::Unavailable(e.to_string()))?;
        }
        tokio::fs::write(&path, &bytes)
            .await
            .map_err(|e| BlobError::Unavailable(e.to_string()))?;

        tracing::debug!(path = %path.display(), size = bytes.len(), "Attachment blob stored");
        Ok(format!("file://{}", path.display()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn put_writes_bytes_and_returns_locator() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());
        let show_id = Uuid::new_v4();

        let locator = store
            .put("play-dead-mgmt", show_id, "contract.pdf", b"%PDF-1.7 demo".to_vec())
            .await
            .unwrap();

        assert!(locator.starts_with("file://"));
        let written = dir
            .path()
            .join("organizations/play-dead-mgmt/shows")
            .join(show_id.to_string())
            .join("contract.pdf");
        assert_eq!(std::fs::read(written).unwrap(), b"%PDF-1.7 demo");
    }

    #[tokio::test]
    async fn put_rejects_bad_file_names() {
        let dir = tempfile::tempdir().unwrap();
        let store = LocalBlobStore::new(dir.path());

        let err = store
            .put("org", Uuid::new_v4(), "../escape.pdf", vec![1])
            .await
            .unwrap_err();
        assert!(matches!(err, BlobError::InvalidSegment(_)));
    }
}
