/// All record identifiers are store-assigned UUIDs.
pub type ShowId = uuid::Uuid;

/// All timestamps are UTC.
pub type Timestamp = chrono::DateTime<chrono::Utc>;
