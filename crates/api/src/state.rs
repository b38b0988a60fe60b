use std::sync::Arc;

use tourops_cloud::BlobStore;
use tourops_extract::ContractExtractor;

use crate::config::ServerConfig;

/// Shared application state available to all axum handlers via
/// `State<AppState>`.
///
/// Cheaply cloneable; the gateways are constructed once at startup (or by
/// the test harness) and injected here — there is no ambient global
/// client anywhere in the workspace.
#[derive(Clone)]
pub struct AppState {
    /// Document store connection pool.
    pub pool: tourops_db::DbPool,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
    /// Blob store for attachment bytes.
    pub blob: Arc<dyn BlobStore>,
    /// Contract-extraction service client.
    pub extractor: Arc<dyn ContractExtractor>,
}
