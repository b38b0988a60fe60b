//! Client for the external contract-understanding service.
//!
//! One multipart `POST` per uploaded PDF; the response is the flat JSON
//! field set mapped by `tourops_core::extraction`. Any transport error,
//! non-2xx status, or unparseable body is an extraction failure the
//! caller presents for manual retry — no automatic retry happens here,
//! and the result is only ever a candidate, never a committed show.

use async_trait::async_trait;

use tourops_core::extraction::ExtractedFields;

/// Errors from the extraction service boundary.
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("extraction request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The service returned a non-2xx status code.
    #[error("extraction service error ({status}): {body}")]
    Api {
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },

    /// The service answered 2xx but the body was not the expected shape.
    #[error("extraction returned an unusable result: {0}")]
    Decode(String),

    /// The uploaded bytes are not a PDF; nothing was sent.
    #[error("uploaded file is not a PDF")]
    NotPdf,
}

/// Abstraction over the document-understanding call, so the API layer
/// can be exercised against a stub.
#[async_trait]
pub trait ContractExtractor: Send + Sync {
    async fn extract(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ExtractedFields, ExtractError>;
}

/// HTTP client for the real extraction endpoint.
pub struct ExtractorClient {
    client: reqwest::Client,
    endpoint_url: String,
    api_key: Option<String>,
}

impl ExtractorClient {
    pub fn new(endpoint_url: String, api_key: Option<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint_url,
            api_key,
        }
    }

    /// Reuse an existing [`reqwest::Client`] for connection pooling.
    pub fn with_client(
        client: reqwest::Client,
        endpoint_url: String,
        api_key: Option<String>,
    ) -> Self {
        Self {
            client,
            endpoint_url,
            api_key,
        }
    }
}

#[async_trait]
impl ContractExtractor for ExtractorClient {
    async fn extract(
        &self,
        file_name: &str,
        bytes: Vec<u8>,
    ) -> Result<ExtractedFields, ExtractError> {
        if !bytes.starts_with(b"%PDF") {
            return Err(ExtractError::NotPdf);
        }
        let size = bytes.len();

        let part = reqwest::multipart::Part::bytes(bytes)
            .file_name(file_name.to_string())
            .mime_str("application/pdf")?;
        let form = reqwest::multipart::Form::new().part("file", part);

        let mut request = self.client.post(&self.endpoint_url).multipart(form);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unreadable body>".to_string());
            return Err(ExtractError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let body = response.text().await?;
        let fields: ExtractedFields = serde_json::from_str(&body)
            .map_err(|e| ExtractError::Decode(e.to_string()))?;

        tracing::info!(file_name, size, "Contract extraction completed");
        Ok(fields)
    }
}
