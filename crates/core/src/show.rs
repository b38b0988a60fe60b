//! The show record model.
//!
//! [`Show`] is the canonical in-memory shape of one scheduled performance.
//! [`Show::normalize`] is the single untyped-to-typed boundary: every
//! loosely-typed payload (store document, create request, accepted
//! extraction candidate) passes through it before anything downstream may
//! treat the record as trusted.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use uuid::Uuid;

use crate::error::CoreError;
use crate::time;
use crate::types::{ShowId, Timestamp};

/// Currency applied when a payload omits one.
pub const DEFAULT_CURRENCY: &str = "USD";

// ---------------------------------------------------------------------------
// Enumerations
// ---------------------------------------------------------------------------

/// Booking status of a show. Closed set; anything else is a validation
/// failure at the `normalize` boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShowStatus {
    Confirmed,
    Pending,
    Block,
    Hold,
    Off,
    #[serde(rename = "Public Appearance")]
    PublicAppearance,
    Tentative,
}

impl ShowStatus {
    /// Every status, in display order.
    pub const ALL: [ShowStatus; 7] = [
        ShowStatus::Confirmed,
        ShowStatus::Pending,
        ShowStatus::Block,
        ShowStatus::Hold,
        ShowStatus::Off,
        ShowStatus::PublicAppearance,
        ShowStatus::Tentative,
    ];

    /// Parse from the wire label.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "Confirmed" => Ok(Self::Confirmed),
            "Pending" => Ok(Self::Pending),
            "Block" => Ok(Self::Block),
            "Hold" => Ok(Self::Hold),
            "Off" => Ok(Self::Off),
            "Public Appearance" => Ok(Self::PublicAppearance),
            "Tentative" => Ok(Self::Tentative),
            other => Err(CoreError::Validation(format!(
                "Unknown show status '{other}'"
            ))),
        }
    }

    /// Wire and display label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Pending => "Pending",
            Self::Block => "Block",
            Self::Hold => "Hold",
            Self::Off => "Off",
            Self::PublicAppearance => "Public Appearance",
            Self::Tentative => "Tentative",
        }
    }
}

impl fmt::Display for ShowStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Kind of document attached to a show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttachmentKind {
    Contract,
    Offer,
    Rider,
    W9,
    Insurance,
    Settlement,
    Other,
}

impl AttachmentKind {
    /// Parse from the wire label.
    pub fn parse(s: &str) -> Result<Self, CoreError> {
        match s {
            "Contract" => Ok(Self::Contract),
            "Offer" => Ok(Self::Offer),
            "Rider" => Ok(Self::Rider),
            "W9" => Ok(Self::W9),
            "Insurance" => Ok(Self::Insurance),
            "Settlement" => Ok(Self::Settlement),
            "Other" => Ok(Self::Other),
            other => Err(CoreError::Validation(format!(
                "Unknown attachment type '{other}'"
            ))),
        }
    }
}

// ---------------------------------------------------------------------------
// Nested value objects
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    pub city: String,
    pub state: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Venue {
    pub name: String,
    pub address: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub capacity: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Financials {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guarantee: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bonus: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deal_notes: Option<String>,
    #[serde(default = "default_currency")]
    pub currency: String,
}

fn default_currency() -> String {
    DEFAULT_CURRENCY.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Buyer {
    pub company: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub office_address: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatory_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatory_phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub signatory_email: Option<String>,
}

/// One crew entry; sequence order is display order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CrewMember {
    pub role: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Travel {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hotel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub flights: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ground: Option<String>,
}

/// A file attached to a show. Owned by exactly one show; the blob itself
/// lives in the blob store under the locator in `file_path`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: AttachmentKind,
    pub file_path: String,
    pub file_name: String,
    pub file_size: u64,
    pub uploaded_by: String,
    pub uploaded_at: Timestamp,
}

// ---------------------------------------------------------------------------
// Show
// ---------------------------------------------------------------------------

/// One scheduled performance with venue, financial, and logistical details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Show {
    /// Store-assigned, immutable after creation.
    pub id: ShowId,
    pub org_id: String,
    pub tour_id: String,
    pub artist_id: String,
    pub status: ShowStatus,
    /// Sort key for any rendered list (ascending).
    pub date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curfew: Option<String>,
    pub location: Location,
    pub venue: Venue,
    pub financials: Financials,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    /// Never null; absence is an empty sequence.
    #[serde(default)]
    pub production: Vec<CrewMember>,
    /// Never null; absence is an empty sequence.
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel: Option<Travel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// Set once at creation, never changed.
    pub created_at: Timestamp,
    /// Refreshed on every successful persisted mutation.
    pub updated_at: Timestamp,
}

impl Show {
    /// Turn a loosely-typed payload into a fully-typed show.
    ///
    /// Date-like fields are coerced via [`crate::time::coerce_datetime`],
    /// the never-null sequences and the default currency are applied, and
    /// the closed enumerations plus required fields are validated. Fails
    /// with [`CoreError::Validation`] on anything out of shape.
    ///
    /// Idempotent: normalizing the serialization of a normalized show
    /// yields an equal show.
    pub fn normalize(raw: Value) -> Result<Self, CoreError> {
        let mut map = as_object(raw)?;
        normalize_payload(&mut map)?;
        coerce_date_key(&mut map, "createdAt")?;
        coerce_date_key(&mut map, "updatedAt")?;

        let show: Show = serde_json::from_value(Value::Object(map))
            .map_err(|e| CoreError::Validation(format!("invalid show document: {e}")))?;
        show.validate()?;
        Ok(show)
    }

    /// Normalize a store payload that carries its id out-of-band.
    pub fn from_document(id: Uuid, doc: Value) -> Result<Self, CoreError> {
        let mut map = as_object(doc)?;
        map.insert("id".to_string(), Value::String(id.to_string()));
        Self::normalize(Value::Object(map))
    }

    /// Serialize to the store payload shape: the full record minus `id`,
    /// which the store keeps out-of-band.
    pub fn to_document(&self) -> Result<Value, CoreError> {
        let mut map = as_object(to_json(self)?)?;
        map.remove("id");
        Ok(Value::Object(map))
    }

    /// Check the record invariants that the type system alone cannot.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_nonempty(&self.org_id, "orgId")?;
        require_nonempty(&self.tour_id, "tourId")?;
        require_nonempty(&self.artist_id, "artistId")?;
        validate_nested(
            &self.location,
            &self.venue,
            &self.financials,
            self.buyer.as_ref(),
            &self.production,
            &self.attachments,
        )
    }
}

// ---------------------------------------------------------------------------
// NewShow
// ---------------------------------------------------------------------------

/// Creation input: everything the caller supplies for a new show. The
/// store assigns `id`, and the gateway stamps both timestamps.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewShow {
    pub org_id: String,
    pub tour_id: String,
    pub artist_id: String,
    pub status: ShowStatus,
    pub date: Timestamp,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub door_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub set_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub curfew: Option<String>,
    pub location: Location,
    pub venue: Venue,
    pub financials: Financials,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub buyer: Option<Buyer>,
    #[serde(default)]
    pub production: Vec<CrewMember>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub travel: Option<Travel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl NewShow {
    /// Normalize a loosely-typed creation payload.
    ///
    /// Same coercions as [`Show::normalize`]; store-assigned keys
    /// (`id`, `createdAt`, `updatedAt`) are stripped if a client sent
    /// them, never trusted.
    pub fn normalize(raw: Value) -> Result<Self, CoreError> {
        let mut map = as_object(raw)?;
        for key in ["id", "createdAt", "updatedAt"] {
            map.remove(key);
        }
        normalize_payload(&mut map)?;

        let new: NewShow = serde_json::from_value(Value::Object(map))
            .map_err(|e| CoreError::Validation(format!("invalid show payload: {e}")))?;
        new.validate()?;
        Ok(new)
    }

    /// Check the creation invariants. Must pass before any network call.
    pub fn validate(&self) -> Result<(), CoreError> {
        require_nonempty(&self.org_id, "orgId")?;
        require_nonempty(&self.tour_id, "tourId")?;
        require_nonempty(&self.artist_id, "artistId")?;
        validate_nested(
            &self.location,
            &self.venue,
            &self.financials,
            self.buyer.as_ref(),
            &self.production,
            &self.attachments,
        )
    }

    /// Build the store payload for first persistence, stamping both
    /// timestamps with `now`.
    pub fn to_document(&self, now: Timestamp) -> Result<Value, CoreError> {
        let mut map = as_object(to_json(self)?)?;
        let stamp = Value::String(now.to_rfc3339());
        map.insert("createdAt".to_string(), stamp.clone());
        map.insert("updatedAt".to_string(), stamp);
        Ok(Value::Object(map))
    }
}

// ---------------------------------------------------------------------------
// Normalization plumbing
// ---------------------------------------------------------------------------

fn as_object(raw: Value) -> Result<Map<String, Value>, CoreError> {
    match raw {
        Value::Object(map) => Ok(map),
        other => Err(CoreError::Validation(format!(
            "show payload must be a JSON object, got {other}"
        ))),
    }
}

fn to_json<T: Serialize>(value: &T) -> Result<Value, CoreError> {
    serde_json::to_value(value)
        .map_err(|e| CoreError::Validation(format!("unserializable show record: {e}")))
}

/// Rewrite a date-like key in place as an RFC 3339 string. Absent and
/// null values are left alone; the typed deserialization decides whether
/// the field was required.
fn coerce_date_key(map: &mut Map<String, Value>, key: &str) -> Result<(), CoreError> {
    match map.get(key) {
        None | Some(Value::Null) => Ok(()),
        Some(value) => {
            let dt = time::coerce_datetime(value).ok_or_else(|| {
                CoreError::Validation(format!("`{key}` is not a recognizable date-time: {value}"))
            })?;
            map.insert(key.to_string(), Value::String(dt.to_rfc3339()));
            Ok(())
        }
    }
}

/// Coercions shared by store documents and creation payloads: date
/// fields, never-null sequences, default currency.
fn normalize_payload(map: &mut Map<String, Value>) -> Result<(), CoreError> {
    coerce_date_key(map, "date")?;

    if let Some(Value::Array(items)) = map.get_mut("attachments") {
        for item in items.iter_mut() {
            if let Value::Object(att) = item {
                coerce_date_key(att, "uploadedAt")?;
            }
        }
    }

    for key in ["production", "attachments"] {
        if matches!(map.get(key), None | Some(Value::Null)) {
            map.insert(key.to_string(), Value::Array(Vec::new()));
        }
    }

    if let Some(Value::Object(financials)) = map.get_mut("financials") {
        let blank = match financials.get("currency") {
            None | Some(Value::Null) => true,
            Some(Value::String(s)) => s.trim().is_empty(),
            _ => false,
        };
        if blank {
            financials.insert(
                "currency".to_string(),
                Value::String(DEFAULT_CURRENCY.to_string()),
            );
        }
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Invariant checks
// ---------------------------------------------------------------------------

fn require_nonempty(value: &str, field: &str) -> Result<(), CoreError> {
    if value.trim().is_empty() {
        return Err(CoreError::Validation(format!("`{field}` must not be empty")));
    }
    Ok(())
}

fn validate_nested(
    location: &Location,
    venue: &Venue,
    financials: &Financials,
    buyer: Option<&Buyer>,
    production: &[CrewMember],
    attachments: &[Attachment],
) -> Result<(), CoreError> {
    require_nonempty(&location.city, "location.city")?;
    require_nonempty(&location.state, "location.state")?;
    require_nonempty(&location.country, "location.country")?;

    require_nonempty(&venue.name, "venue.name")?;
    require_nonempty(&venue.address, "venue.address")?;

    require_nonempty(&financials.currency, "financials.currency")?;
    if let Some(guarantee) = financials.guarantee {
        if !guarantee.is_finite() || guarantee < 0.0 {
            return Err(CoreError::Validation(
                "`financials.guarantee` must be a non-negative number".to_string(),
            ));
        }
    }

    if let Some(buyer) = buyer {
        require_nonempty(&buyer.company, "buyer.company")?;
    }

    for crew in production {
        require_nonempty(&crew.role, "production[].role")?;
        require_nonempty(&crew.name, "production[].name")?;
    }

    for attachment in attachments {
        require_nonempty(&attachment.file_name, "attachments[].fileName")?;
        require_nonempty(&attachment.file_path, "attachments[].filePath")?;
    }

    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use serde_json::json;

    fn sample_doc() -> Value {
        json!({
            "id": "7e5c5a31-4f3c-4e6d-9a2b-08d6a2e1c111",
            "orgId": "play-dead-mgmt",
            "tourId": "fall-2025",
            "artistId": "bryan-martin",
            "status": "Confirmed",
            "date": "2025-10-10T19:00:00Z",
            "location": { "city": "Orlando", "state": "FL", "country": "USA" },
            "venue": {
                "name": "The Plaza Live",
                "address": "425 North Bumby Avenue, Orlando, FL 32803",
                "phone": "407-228-1220",
                "capacity": 1330
            },
            "financials": { "guarantee": 7500.0, "currency": "USD" },
            "buyer": { "company": "AEG Presents SE, LLC", "signatoryName": "Nathan" },
            "production": [ { "role": "Prod", "name": "Zach", "phone": "+1 407-555-0123" } ],
            "attachments": [],
            "createdAt": "2025-09-01T00:00:00Z",
            "updatedAt": "2025-09-01T00:00:00Z"
        })
    }

    #[test]
    fn normalize_accepts_well_formed_document() {
        let show = Show::normalize(sample_doc()).unwrap();
        assert_eq!(show.status, ShowStatus::Confirmed);
        assert_eq!(show.venue.capacity, Some(1330));
        assert_eq!(show.location.city, "Orlando");
        assert_eq!(show.production.len(), 1);
    }

    #[test]
    fn normalize_is_idempotent() {
        let once = Show::normalize(sample_doc()).unwrap();
        let twice = Show::normalize(serde_json::to_value(&once).unwrap()).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn normalize_rejects_unknown_status() {
        let mut doc = sample_doc();
        doc["status"] = json!("Cancelled");
        assert_matches!(Show::normalize(doc), Err(CoreError::Validation(_)));
    }

    #[test]
    fn normalize_accepts_every_closed_status() {
        for status in ShowStatus::ALL {
            let mut doc = sample_doc();
            doc["status"] = json!(status.label());
            assert_eq!(Show::normalize(doc).unwrap().status, status);
        }
    }

    #[test]
    fn normalize_requires_date() {
        let mut doc = sample_doc();
        doc.as_object_mut().unwrap().remove("date");
        assert_matches!(Show::normalize(doc), Err(CoreError::Validation(_)));
    }

    #[test]
    fn date_representations_converge() {
        let from_string = Show::normalize(sample_doc()).unwrap();

        let mut doc = sample_doc();
        doc["date"] = json!(from_string.date.timestamp_millis());
        let from_millis = Show::normalize(doc).unwrap();
        assert_eq!(from_string.date, from_millis.date);

        let mut doc = sample_doc();
        doc["date"] = json!({ "seconds": from_string.date.timestamp(), "nanos": 0 });
        let from_object = Show::normalize(doc).unwrap();
        assert_eq!(from_string.date, from_object.date);
    }

    #[test]
    fn missing_currency_defaults_to_usd() {
        let mut doc = sample_doc();
        doc["financials"] = json!({ "guarantee": 5000.0 });
        let show = Show::normalize(doc).unwrap();
        assert_eq!(show.financials.currency, DEFAULT_CURRENCY);
    }

    #[test]
    fn null_sequences_become_empty() {
        let mut doc = sample_doc();
        doc["production"] = json!(null);
        doc["attachments"] = json!(null);
        let show = Show::normalize(doc).unwrap();
        assert!(show.production.is_empty());
        assert!(show.attachments.is_empty());
    }

    #[test]
    fn negative_guarantee_is_rejected() {
        let mut doc = sample_doc();
        doc["financials"]["guarantee"] = json!(-1.0);
        assert_matches!(Show::normalize(doc), Err(CoreError::Validation(_)));
    }

    #[test]
    fn empty_venue_name_is_rejected() {
        let mut doc = sample_doc();
        doc["venue"]["name"] = json!("   ");
        assert_matches!(Show::normalize(doc), Err(CoreError::Validation(_)));
    }

    #[test]
    fn document_round_trip_preserves_everything_but_id() {
        let show = Show::normalize(sample_doc()).unwrap();
        let doc = show.to_document().unwrap();
        assert!(doc.get("id").is_none());

        let back = Show::from_document(show.id, doc).unwrap();
        assert_eq!(show, back);
    }

    #[test]
    fn new_show_strips_store_assigned_keys() {
        let new = NewShow::normalize(sample_doc()).unwrap();
        let doc = new
            .to_document("2025-09-02T00:00:00Z".parse().unwrap())
            .unwrap();
        assert_eq!(doc["createdAt"], json!("2025-09-02T00:00:00+00:00"));
        assert_eq!(doc["updatedAt"], doc["createdAt"]);
        assert!(doc.get("id").is_none());
    }

    #[test]
    fn attachment_kind_wire_labels() {
        assert_eq!(AttachmentKind::parse("W9").unwrap(), AttachmentKind::W9);
        assert!(AttachmentKind::parse("Receipt").is_err());
        let att = json!({
            "id": "7e5c5a31-4f3c-4e6d-9a2b-08d6a2e1c222",
            "type": "Contract",
            "filePath": "organizations/o/shows/s/contract.pdf",
            "fileName": "contract.pdf",
            "fileSize": 1024,
            "uploadedBy": "tour-manager",
            "uploadedAt": "2025-09-01T00:00:00Z"
        });
        let parsed: Attachment = serde_json::from_value(att).unwrap();
        assert_eq!(parsed.kind, AttachmentKind::Contract);
    }
}
