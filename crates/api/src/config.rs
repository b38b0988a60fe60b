use std::path::PathBuf;

/// Server configuration loaded from environment variables.
///
/// Listener and CORS settings have development defaults; store and
/// extraction settings that are required fail fast at startup rather
/// than surfacing as runtime errors to end users.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Bind address (default: `0.0.0.0`).
    pub host: String,
    /// Bind port (default: `3000`).
    pub port: u16,
    /// Allowed CORS origins, parsed from comma-separated `CORS_ORIGINS`.
    pub cors_origins: Vec<String>,
    /// HTTP request timeout in seconds (default: `30`).
    pub request_timeout_secs: u64,
    /// Blob storage backend selection.
    pub blob: BlobConfig,
    /// Contract-extraction endpoint.
    pub extractor: ExtractorConfig,
}

/// Which blob store backs attachment uploads.
#[derive(Debug, Clone)]
pub enum BlobConfig {
    /// S3 bucket; locators default to the canonical bucket URL unless a
    /// public base URL is configured.
    S3 {
        bucket: String,
        public_base_url: Option<String>,
    },
    /// Local directory, for development.
    Local { base_path: PathBuf },
}

/// External document-understanding service.
#[derive(Debug, Clone)]
pub struct ExtractorConfig {
    pub endpoint_url: String,
    pub api_key: Option<String>,
}

impl ServerConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                | Default                 | Notes                        |
    /// |------------------------|-------------------------|------------------------------|
    /// | `HOST`                 | `0.0.0.0`               |                              |
    /// | `PORT`                 | `3000`                  |                              |
    /// | `CORS_ORIGINS`         | `http://localhost:3001` |                              |
    /// | `REQUEST_TIMEOUT_SECS` | `30`                    |                              |
    /// | `BLOB_BACKEND`         | `local`                 | `local` or `s3`              |
    /// | `BLOB_BASE_PATH`       | `./data/blobs`          | local backend                |
    /// | `BLOB_BUCKET`          | —                       | required for the s3 backend  |
    /// | `BLOB_PUBLIC_BASE_URL` | —                       | optional, s3 backend         |
    /// | `EXTRACTOR_URL`        | —                       | required                     |
    /// | `EXTRACTOR_API_KEY`    | —                       | optional bearer token        |
    pub fn from_env() -> Self {
        let host = std::env::var("HOST").unwrap_or_else(|_| "0.0.0.0".into());

        let port: u16 = std::env::var("PORT")
            .unwrap_or_else(|_| "3000".into())
            .parse()
            .expect("PORT must be a valid u16");

        let cors_origins: Vec<String> = std::env::var("CORS_ORIGINS")
            .unwrap_or_else(|_| "http://localhost:3001".into())
            .split(',')
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .collect();

        let request_timeout_secs: u64 = std::env::var("REQUEST_TIMEOUT_SECS")
            .unwrap_or_else(|_| "30".into())
            .parse()
            .expect("REQUEST_TIMEOUT_SECS must be a valid u64");

        let blob = match std::env::var("BLOB_BACKEND")
            .unwrap_or_else(|_| "local".into())
            .as_str()
        {
            "s3" => BlobConfig::S3 {
                bucket: std::env::var("BLOB_BUCKET")
                    .expect("BLOB_BUCKET must be set for the s3 blob backend"),
                public_base_url: std::env::var("BLOB_PUBLIC_BASE_URL").ok(),
            },
            "local" => BlobConfig::Local {
                base_path: std::env::var("BLOB_BASE_PATH")
                    .unwrap_or_else(|_| "./data/blobs".into())
                    .into(),
            },
            other => panic!("Unknown BLOB_BACKEND '{other}'. Must be 'local' or 's3'"),
        };

        let extractor = ExtractorConfig {
            endpoint_url: std::env::var("EXTRACTOR_URL").expect("EXTRACTOR_URL must be set"),
            api_key: std::env::var("EXTRACTOR_API_KEY").ok(),
        };

        Self {
            host,
            port,
            cors_origins,
            request_timeout_secs,
            blob,
            extractor,
        }
    }
}
