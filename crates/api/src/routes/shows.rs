use axum::routing::{get, post};
use axum::Router;

use crate::handlers::{attachments, seed, shows};
use crate::state::AppState;

/// Show CRUD, attachment upload, and demo seeding.
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/shows",
            get(shows::list_shows).post(shows::create_show),
        )
        .route(
            "/shows/{id}",
            get(shows::get_show)
                .patch(shows::update_show)
                .delete(shows::delete_show),
        )
        .route(
            "/shows/{id}/attachments",
            post(attachments::upload_attachment),
        )
        .route("/seed", post(seed::seed_demo_shows))
}
