//! Raw row shape for the `shows` document table.

use sqlx::FromRow;
use uuid::Uuid;

/// One row from `shows`: the store-assigned key, the equality-query key,
/// the insertion sequence, and the JSONB payload. `seq` exists only to
/// break date ties deterministically; it never leaves the gateway.
#[derive(Debug, Clone, FromRow)]
pub struct ShowRow {
    pub id: Uuid,
    pub artist_id: String,
    pub seq: i64,
    pub doc: serde_json::Value,
}
