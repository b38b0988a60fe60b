use axum::routing::post;
use axum::Router;

use crate::handlers::extraction;
use crate::state::AppState;

/// Contract extraction endpoint.
pub fn router() -> Router<AppState> {
    Router::new().route("/extract", post(extraction::extract_contract))
}
