//! Contract extraction: turn an uploaded PDF into a show candidate.
//!
//! The candidate is returned for review and is never committed here; an
//! accepted candidate comes back through the normal create path with the
//! same validation as manual input.

use axum::extract::{Multipart, State};
use axum::response::IntoResponse;
use axum::Json;

use tourops_core::extraction::ShowDraft;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// POST /extract (multipart)
///
/// Field: `file` — one contract PDF.
pub async fn extract_contract(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_data: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        if field.name() == Some("file") {
            let file_name = field.file_name().unwrap_or("contract.pdf").to_string();
            let data = field
                .bytes()
                .await
                .map_err(|e| AppError::BadRequest(e.to_string()))?;
            file_data = Some((file_name, data.to_vec()));
        }
    }

    let (file_name, bytes) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let fields = state.extractor.extract(&file_name, bytes).await?;
    let draft = ShowDraft::from_fields(fields);

    tracing::info!(
        file_name = %file_name,
        usable = !draft.is_empty(),
        "Contract extraction produced a candidate"
    );

    Ok(Json(DataResponse { data: draft }))
}
