//! Handlers for the show collection: list/filter, create, detail,
//! field-level patch, and confirmed delete.

use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use uuid::Uuid;

use tourops_core::error::CoreError;
use tourops_core::filter::{filter_by_status, parse_status_filter};
use tourops_core::patch::ShowPatch;
use tourops_core::show::NewShow;
use tourops_db::repositories::ShowRepo;

use crate::error::{AppError, AppResult};
use crate::response::{DataResponse, ListResponse};
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for the show list.
#[derive(Debug, serde::Deserialize)]
pub struct ListShowsParams {
    pub artist_id: String,
    /// Comma-separated status filter, e.g. `Confirmed,Pending`.
    /// Filtering happens in memory over the fetched collection.
    pub status: Option<String>,
}

/// Query parameters for delete confirmation.
#[derive(Debug, serde::Deserialize)]
pub struct DeleteShowParams {
    #[serde(default)]
    pub confirm: bool,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /shows?artist_id=&status=
///
/// The full collection for an artist, date ascending; the optional status
/// filter narrows it without another fetch.
pub async fn list_shows(
    State(state): State<AppState>,
    Query(params): Query<ListShowsParams>,
) -> AppResult<impl IntoResponse> {
    let shows = ShowRepo::list_by_artist(&state.pool, &params.artist_id).await?;
    let total = shows.len();

    let shows = match params.status.as_deref() {
        Some(raw) => {
            let selected = parse_status_filter(raw)?;
            filter_by_status(shows, &selected)
        }
        None => shows,
    };

    Ok(Json(ListResponse {
        filtered: shows.len(),
        total,
        data: shows,
    }))
}

/// POST /shows
///
/// Create a show from a manually-entered form or an accepted extraction
/// candidate. The payload is normalized and validated before any store
/// call; the store assigns the id and the gateway stamps the timestamps.
pub async fn create_show(
    State(state): State<AppState>,
    Json(raw): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let new = NewShow::normalize(raw)?;
    let show = ShowRepo::create(&state.pool, &new).await?;

    tracing::info!(
        show_id = %show.id,
        artist_id = %show.artist_id,
        venue = %show.venue.name,
        "Show created via API"
    );

    Ok((StatusCode::CREATED, Json(DataResponse { data: show })))
}

/// GET /shows/{id}
///
/// Detail fetch for one show.
pub async fn get_show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> AppResult<impl IntoResponse> {
    let show = ShowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Show", id })?;

    Ok(Json(DataResponse { data: show }))
}

/// PATCH /shows/{id}
///
/// Apply a field patch: only the keys present in the payload are
/// touched (`null` clears, a value replaces), and `updatedAt` is always
/// refreshed. Returns the stored record so the edit view can replace its
/// committed copy with the server round-trip.
pub async fn update_show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(raw): Json<serde_json::Value>,
) -> AppResult<impl IntoResponse> {
    let patch: ShowPatch = serde_json::from_value(raw)
        .map_err(|e| CoreError::Validation(format!("invalid patch payload: {e}")))?;
    let show = ShowRepo::apply_patch(&state.pool, id, &patch).await?;

    tracing::info!(show_id = %id, "Show patched via API");

    Ok(Json(DataResponse { data: show }))
}

/// DELETE /shows/{id}?confirm=true
///
/// Irreversible delete. Requires the explicit confirmation flag the
/// detail view sets after the user confirms; deleting an id that no
/// longer exists is 404.
pub async fn delete_show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Query(params): Query<DeleteShowParams>,
) -> AppResult<impl IntoResponse> {
    if !params.confirm {
        return Err(AppError::BadRequest(
            "Deleting a show cannot be undone; pass confirm=true to proceed".to_string(),
        ));
    }

    ShowRepo::delete(&state.pool, id).await?;

    tracing::info!(show_id = %id, "Show deleted via API");

    Ok(StatusCode::NO_CONTENT)
}
