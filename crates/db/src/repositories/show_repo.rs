//! Repository for the `shows` document collection.
//!
//! The store is addressed like a document database: the payload is one
//! JSONB value per show, queried by equality on `artist_id` only. Sorting
//! and filtering happen in the caller, and every payload passes through
//! [`Show::from_document`] before it is handed out.

use chrono::Utc;
use sqlx::PgPool;
use uuid::Uuid;

use tourops_core::error::CoreError;
use tourops_core::patch::ShowPatch;
use tourops_core::show::{NewShow, Show};

use crate::error::StoreError;
use crate::models::show_row::ShowRow;

const COLUMNS: &str = "id, artist_id, seq, doc";

/// Provides CRUD operations for show documents.
pub struct ShowRepo;

impl ShowRepo {
    /// All shows for an artist, normalized and sorted ascending by date
    /// (ties broken by insertion order). Empty when none exist.
    pub async fn list_by_artist(
        pool: &PgPool,
        artist_id: &str,
    ) -> Result<Vec<Show>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM shows WHERE artist_id = $1");
        let rows = sqlx::query_as::<_, ShowRow>(&query)
            .bind(artist_id)
            .fetch_all(pool)
            .await?;

        let mut shows = Vec::with_capacity(rows.len());
        for row in rows {
            shows.push((row.seq, normalize_row(row)?));
        }
        // The caller sorts, not the store.
        shows.sort_by(|(seq_a, a), (seq_b, b)| a.date.cmp(&b.date).then(seq_a.cmp(seq_b)));
        Ok(shows.into_iter().map(|(_, show)| show).collect())
    }

    /// Find one show by its store-assigned id.
    pub async fn find_by_id(pool: &PgPool, id: Uuid) -> Result<Option<Show>, StoreError> {
        let query = format!("SELECT {COLUMNS} FROM shows WHERE id = $1");
        let row = sqlx::query_as::<_, ShowRow>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await?;
        row.map(normalize_row).transpose()
    }

    /// Persist a new show. Validation happens before anything is sent to
    /// the store, so a rejected create leaves no record behind. Both
    /// timestamps are stamped here; the store assigns the id. Returns the
    /// stored record round-tripped through normalization.
    pub async fn create(pool: &PgPool, new: &NewShow) -> Result<Show, StoreError> {
        new.validate()?;
        let doc = new.to_document(Utc::now())?;

        let query = format!("INSERT INTO shows (artist_id, doc) VALUES ($1, $2) RETURNING {COLUMNS}");
        let row = sqlx::query_as::<_, ShowRow>(&query)
            .bind(&new.artist_id)
            .bind(&doc)
            .fetch_one(pool)
            .await?;

        tracing::info!(
            show_id = %row.id,
            artist_id = %row.artist_id,
            "Show created"
        );

        normalize_row(row)
    }

    /// Apply a field patch to one show.
    ///
    /// Read-modify-write under a row lock: only the fields the patch
    /// mentions change, and `updated_at` is refreshed unconditionally —
    /// even for an empty patch. Concurrent patches are serialized by the
    /// lock and land last-write-wins per field.
    pub async fn apply_patch(
        pool: &PgPool,
        id: Uuid,
        patch: &ShowPatch,
    ) -> Result<Show, StoreError> {
        let mut tx = pool.begin().await?;

        let query = format!("SELECT {COLUMNS} FROM shows WHERE id = $1 FOR UPDATE");
        let row = sqlx::query_as::<_, ShowRow>(&query)
            .bind(id)
            .fetch_optional(&mut *tx)
            .await?
            .ok_or(CoreError::NotFound { entity: "Show", id })?;

        let current = normalize_row(row)?;
        let mut updated = patch.apply(&current)?;
        updated.updated_at = Utc::now();
        let doc = updated.to_document()?;

        sqlx::query("UPDATE shows SET doc = $2 WHERE id = $1")
            .bind(id)
            .bind(&doc)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;

        tracing::info!(show_id = %id, "Show updated");
        Ok(updated)
    }

    /// Irreversibly remove one show. Deleting an id that does not exist
    /// is `NotFound`, not a silent no-op.
    pub async fn delete(pool: &PgPool, id: Uuid) -> Result<(), StoreError> {
        let result = sqlx::query("DELETE FROM shows WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;

        if result.rows_affected() == 0 {
            return Err(StoreError::Core(CoreError::NotFound {
                entity: "Show",
                id,
            }));
        }

        tracing::info!(show_id = %id, "Show deleted");
        Ok(())
    }
}

/// Normalize a row's payload, tagging failures as store corruption
/// rather than caller error.
fn normalize_row(row: ShowRow) -> Result<Show, StoreError> {
    Show::from_document(row.id, row.doc).map_err(|e| StoreError::Corrupt {
        id: row.id,
        reason: e.to_string(),
    })
}
