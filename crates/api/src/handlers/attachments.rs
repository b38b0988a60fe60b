//! Attachment upload: store the blob, then record it on the show.
//!
//! The two writes are independent calls with no atomicity between them.
//! If the document update fails after the blob write, the orphaned
//! locator is logged and the error surfaces; nothing is retried here.

use axum::extract::{Multipart, Path, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use chrono::Utc;
use serde::Serialize;
use uuid::Uuid;

use tourops_core::error::CoreError;
use tourops_core::patch::{Patch, ShowPatch};
use tourops_core::show::{Attachment, AttachmentKind, Show};
use tourops_db::repositories::ShowRepo;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Fallback for uploads that do not say who sent them. There is no
/// authenticated user to attribute uploads to.
const DEFAULT_UPLOADER: &str = "unknown";

/// Response payload: the recorded attachment (with its locator) and the
/// refreshed show.
#[derive(Debug, Serialize)]
pub struct AttachmentUpload {
    pub attachment: Attachment,
    pub show: Show,
}

/// POST /shows/{id}/attachments (multipart)
///
/// Fields: `file` (required), `type` (attachment kind, default `Other`),
/// `uploadedBy` (optional).
pub async fn upload_attachment(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut kind = AttachmentKind::Other;
    let mut uploaded_by = DEFAULT_UPLOADER.to_string();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let file_name = field
                    .file_name()
                    .map(str::to_string)
                    .ok_or_else(|| {
                        AppError::BadRequest("'file' field must carry a filename".into())
                    })?;
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                file_data = Some((file_name, data.to_vec()));
            }
            "type" => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
                kind = AttachmentKind::parse(text.trim())?;
            }
            "uploadedBy" => {
                uploaded_by = field
                    .text()
                    .await
                    .map_err(|e| AppError::BadRequest(e.to_string()))?;
            }
            _ => {} // ignore unknown fields
        }
    }

    let (file_name, bytes) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;
    if bytes.is_empty() {
        return Err(AppError::BadRequest("Uploaded file is empty".into()));
    }
    let file_size = bytes.len() as u64;

    // The show must exist before the blob is written; its org scopes the
    // storage path.
    let show = ShowRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(CoreError::NotFound { entity: "Show", id })?;

    let locator = state
        .blob
        .put(&show.org_id, id, &file_name, bytes)
        .await?;

    let attachment = Attachment {
        id: Uuid::new_v4(),
        kind,
        file_path: locator,
        file_name,
        file_size,
        uploaded_by,
        uploaded_at: Utc::now(),
    };

    let mut attachments = show.attachments.clone();
    attachments.push(attachment.clone());
    let patch = ShowPatch {
        attachments: Patch::Set(attachments),
        ..Default::default()
    };

    let updated = ShowRepo::apply_patch(&state.pool, id, &patch)
        .await
        .inspect_err(|_| {
            tracing::error!(
                show_id = %id,
                locator = %attachment.file_path,
                "Attachment blob stored but recording it on the show failed"
            );
        })?;

    tracing::info!(
        show_id = %id,
        file_name = %attachment.file_name,
        file_size,
        "Attachment uploaded"
    );

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: AttachmentUpload {
                attachment,
                show: updated,
            },
        }),
    ))
}
