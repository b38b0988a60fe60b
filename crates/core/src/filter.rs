//! Status filtering for the show list view.
//!
//! The list view holds the full collection in memory and narrows it with
//! a pure predicate; changing the filter never triggers a re-fetch.

use std::collections::HashSet;

use crate::error::CoreError;
use crate::show::{Show, ShowStatus};

/// Keep the shows whose status is in `selected`, preserving input order.
pub fn filter_by_status(shows: Vec<Show>, selected: &HashSet<ShowStatus>) -> Vec<Show> {
    shows
        .into_iter()
        .filter(|show| selected.contains(&show.status))
        .collect()
}

/// Parse a comma-separated status filter (`"Confirmed,Pending"`).
///
/// An unknown status in the list is a validation failure rather than a
/// silently empty filter.
pub fn parse_status_filter(raw: &str) -> Result<HashSet<ShowStatus>, CoreError> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(ShowStatus::parse)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn show(status: ShowStatus, day: u32) -> Show {
        Show::normalize(json!({
            "id": uuid::Uuid::new_v4().to_string(),
            "orgId": "play-dead-mgmt",
            "tourId": "fall-2025",
            "artistId": "bryan-martin",
            "status": status.label(),
            "date": format!("2025-10-{day:02}T20:00:00Z"),
            "location": { "city": "Orlando", "state": "FL", "country": "USA" },
            "venue": { "name": "Venue", "address": "Somewhere" },
            "financials": { "currency": "USD" },
            "createdAt": "2025-09-01T00:00:00Z",
            "updatedAt": "2025-09-01T00:00:00Z"
        }))
        .unwrap()
    }

    #[test]
    fn filter_keeps_matching_shows_in_order() {
        let shows = vec![
            show(ShowStatus::Confirmed, 1),
            show(ShowStatus::Confirmed, 2),
            show(ShowStatus::Pending, 3),
            show(ShowStatus::Hold, 4),
            show(ShowStatus::Off, 5),
        ];
        let selected = HashSet::from([ShowStatus::Confirmed, ShowStatus::Pending]);

        let filtered = filter_by_status(shows, &selected);

        assert_eq!(filtered.len(), 3);
        let days: Vec<u32> = filtered
            .iter()
            .map(|s| chrono::Datelike::day(&s.date))
            .collect();
        assert_eq!(days, vec![1, 2, 3]);
    }

    #[test]
    fn empty_selection_filters_everything() {
        let shows = vec![show(ShowStatus::Confirmed, 1)];
        assert!(filter_by_status(shows, &HashSet::new()).is_empty());
    }

    #[test]
    fn parse_filter_accepts_labels_with_spaces() {
        let selected = parse_status_filter("Confirmed, Public Appearance").unwrap();
        assert_eq!(
            selected,
            HashSet::from([ShowStatus::Confirmed, ShowStatus::PublicAppearance])
        );
    }

    #[test]
    fn parse_filter_rejects_unknown_status() {
        assert!(parse_status_filter("Confirmed,Cancelled").is_err());
    }
}
