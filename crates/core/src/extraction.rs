//! Mapping from contract-extraction results to a show candidate.
//!
//! The external document-understanding service returns a flat, loosely
//! populated JSON object. [`ShowDraft::from_fields`] maps it onto the
//! optional subset of show fields the service can plausibly fill. The
//! draft is a *candidate*: it is never committed directly, and a create
//! built from it passes the same validation as manual input. Fields the
//! service does not return — or returns as junk — stay absent, never
//! defaulted.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::show::ShowStatus;
use crate::time;

/// Wire shape of the extraction endpoint's response. Every field is
/// optional; `status` is a free string that must be re-validated.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ExtractedFields {
    pub date: Option<String>,
    pub venue_name: Option<String>,
    pub venue_address: Option<String>,
    pub venue_city: Option<String>,
    pub venue_state: Option<String>,
    pub venue_country: Option<String>,
    pub venue_capacity: Option<f64>,
    pub guarantee: Option<f64>,
    pub currency: Option<String>,
    pub buyer_company: Option<String>,
    pub status: Option<String>,
}

/// Typed show candidate assembled from extraction output. Flat on
/// purpose: the caller merges it with scoping keys and builds a full
/// creation payload for review.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShowDraft {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<DateTime<Utc>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_city: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_state: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_country: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub guarantee: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub buyer_company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<ShowStatus>,
}

impl ShowDraft {
    /// Map wire fields onto the typed candidate.
    ///
    /// Lenient by design: a value that does not survive coercion (blank
    /// string, unparseable date, unknown status, negative number) is
    /// dropped to absent. Whether the final record is acceptable is
    /// decided later by the normal creation validation.
    pub fn from_fields(fields: ExtractedFields) -> Self {
        ShowDraft {
            date: fields
                .date
                .as_deref()
                .and_then(time::parse_datetime_str),
            venue_name: clean(fields.venue_name),
            venue_address: clean(fields.venue_address),
            venue_city: clean(fields.venue_city),
            venue_state: clean(fields.venue_state),
            venue_country: clean(fields.venue_country),
            venue_capacity: fields
                .venue_capacity
                .filter(|c| c.is_finite() && *c >= 0.0)
                .map(|c| c as u32),
            guarantee: fields.guarantee.filter(|g| g.is_finite() && *g >= 0.0),
            currency: clean(fields.currency),
            buyer_company: clean(fields.buyer_company),
            status: fields
                .status
                .as_deref()
                .and_then(|s| ShowStatus::parse(s.trim()).ok()),
        }
    }

    /// True when extraction produced nothing usable.
    pub fn is_empty(&self) -> bool {
        *self == ShowDraft::default()
    }
}

/// Trim a wire string; blank becomes absent.
fn clean(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
