pub mod extraction;
pub mod health;
pub mod shows;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// Route hierarchy:
///
/// ```text
/// /shows                       list (?artist_id, ?status=a,b), create
/// /shows/{id}                  get, patch, delete (?confirm=true)
/// /shows/{id}/attachments      upload attachment (multipart)
/// /extract                     contract extraction (multipart)
/// /seed                        insert demo shows when empty
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(shows::router())
        .merge(extraction::router())
}
