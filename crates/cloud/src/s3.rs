//! S3 blob store provider.

use async_trait::async_trait;
use aws_sdk_s3::primitives::ByteStream;
use uuid::Uuid;

use crate::{blob_key, BlobError, BlobStore};

/// Object storage backed by an S3 (or S3-compatible) bucket.
pub struct S3BlobStore {
    client: aws_sdk_s3::Client,
    bucket: String,
    /// Optional CDN / virtual-host base for returned locators; falls back
    /// to the canonical bucket URL.
    public_base_url: Option<String>,
}

impl S3BlobStore {
    /// Build a client from the ambient AWS environment (credentials,
    /// region) and the configured bucket.
    pub async fn from_env(bucket: String, public_base_url: Option<String>) -> Self {
        let config = aws_config::load_from_env().await;
        Self {
            client: aws_sdk_s3::Client::new(&config),
            bucket,
            public_base_url,
        }
    }

    fn locator(&self, key: &str) -> String {
        match &self.public_base_url {
            Some(base) => format!("{}/{key}", base.trim_end_matches('/')),
            None => format!("https://{}.s3.amazonaws.com/{key}", self.bucket),
        }
    }
}

#[async_trait]
impl BlobStore for S3BlobStore {
    async fn put(
        &self,
        org_id: &str,
        show_id: Uuid,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, BlobError> {
        let key = blob_key(org_id, show_id, file_name)?;
        let size = bytes.len();

        self.client
            .put_object()
            .bucket(&self.bucket)
            .key(&key)
            .body(ByteStream::from(bytes))
            .send()
            .await
            .map_err(|e| BlobError::Unavailable(e.to_string()))?;

        tracing::info!(bucket = %self.bucket, key = %key, size, "Attachment blob stored");
        Ok(self.locator(&key))
    }
}
