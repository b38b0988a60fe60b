//! Date-time coercion for loosely-typed document input.
//!
//! Store payloads and extraction results carry date-like values in several
//! shapes; everything converges to `DateTime<Utc>` here. Accepted forms:
//!
//! - RFC 3339 strings (`2025-10-10T19:00:00Z`, with or without offset)
//! - Naive date-times (`2025-10-10T19:00:00`, space separator also accepted)
//! - Date-only strings (`2025-10-10`), interpreted as midnight UTC
//! - Integer epoch milliseconds
//! - `{ "seconds": i64, "nanos": u32 }` timestamp objects

use chrono::{DateTime, NaiveDate, NaiveDateTime, TimeZone, Utc};
use serde_json::Value;

/// Coerce a JSON value into a UTC date-time. Returns `None` when the value
/// is not in any accepted form.
pub fn coerce_datetime(value: &Value) -> Option<DateTime<Utc>> {
    match value {
        Value::String(s) => parse_datetime_str(s),
        Value::Number(n) => Utc.timestamp_millis_opt(n.as_i64()?).single(),
        Value::Object(map) => {
            let seconds = map.get("seconds")?.as_i64()?;
            let nanos = map.get("nanos").and_then(Value::as_u64).unwrap_or(0);
            Utc.timestamp_opt(seconds, u32::try_from(nanos).ok()?).single()
        }
        _ => None,
    }
}

/// Parse a date-time string in any accepted textual form.
pub fn parse_datetime_str(s: &str) -> Option<DateTime<Utc>> {
    let s = s.trim();
    if s.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }

    for fmt in ["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"] {
        if let Ok(naive) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }

    if let Ok(date) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(Utc.from_utc_datetime(&date.and_hms_opt(0, 0, 0)?));
    }

    None
}
