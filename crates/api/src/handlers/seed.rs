//! Demo seeding for an empty database.
//!
//! Inserts a handful of realistic shows through the normal create path so
//! a fresh environment has something to render. A non-empty collection is
//! left alone.

use axum::extract::State;
use axum::response::IntoResponse;
use axum::Json;
use serde::Serialize;
use serde_json::json;

use tourops_core::error::CoreError;
use tourops_core::show::NewShow;
use tourops_db::repositories::ShowRepo;

use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

const DEMO_ORG: &str = "play-dead-mgmt";
const DEMO_TOUR: &str = "fall-2025";
const DEMO_ARTIST: &str = "bryan-martin";

#[derive(Debug, Serialize)]
pub struct SeedResult {
    pub inserted: usize,
}

/// POST /seed
///
/// Insert the demo shows when the demo artist has none.
pub async fn seed_demo_shows(State(state): State<AppState>) -> AppResult<impl IntoResponse> {
    let existing = ShowRepo::list_by_artist(&state.pool, DEMO_ARTIST).await?;
    if !existing.is_empty() {
        return Ok(Json(DataResponse {
            data: SeedResult { inserted: 0 },
        }));
    }

    let shows = demo_shows()?;
    for show in &shows {
        ShowRepo::create(&state.pool, show).await?;
    }

    tracing::info!(inserted = shows.len(), artist_id = DEMO_ARTIST, "Database seeded");

    Ok(Json(DataResponse {
        data: SeedResult {
            inserted: shows.len(),
        },
    }))
}

fn demo_shows() -> Result<Vec<NewShow>, CoreError> {
    [
        json!({
            "orgId": DEMO_ORG,
            "tourId": DEMO_TOUR,
            "artistId": DEMO_ARTIST,
            "status": "Confirmed",
            "date": "2025-10-10T19:00:00",
            "location": { "city": "Orlando", "state": "FL", "country": "USA" },
            "venue": {
                "name": "The Plaza Live",
                "address": "425 North Bumby Avenue, Orlando, FL 32803",
                "phone": "407-228-1220",
                "website": "www.plazaliveorlando.com",
                "capacity": 1330
            },
            "financials": { "guarantee": 7500, "currency": "USD" },
            "buyer": { "company": "AEG Presents SE, LLC", "signatoryName": "Nathan" },
            "production": [ { "role": "Prod", "name": "Zach", "phone": "+1 407-555-0123" } ]
        }),
        json!({
            "orgId": DEMO_ORG,
            "tourId": DEMO_TOUR,
            "artistId": DEMO_ARTIST,
            "status": "Confirmed",
            "date": "2025-10-11T20:00:00",
            "location": { "city": "Largo", "state": "FL", "country": "USA" },
            "venue": {
                "name": "Cowboys Dance Hall",
                "address": "12333 66th Street North, Largo, FL 33773",
                "phone": "+1 727-418-7106",
                "capacity": 800
            },
            "financials": { "guarantee": 6000, "currency": "USD" },
            "buyer": { "company": "Cowboys Dance Hall LLC" }
        }),
        json!({
            "orgId": DEMO_ORG,
            "tourId": DEMO_TOUR,
            "artistId": DEMO_ARTIST,
            "status": "Pending",
            "date": "2025-10-16T20:00:00",
            "location": { "city": "Starkville", "state": "MS", "country": "USA" },
            "venue": {
                "name": "Rick's Cafe",
                "address": "319B Highway 182 East, Starkville, MS 39759",
                "phone": "601-324-7425",
                "capacity": 800
            },
            "financials": { "guarantee": 5000, "currency": "USD" },
            "buyer": { "company": "Rick's Cafe" }
        }),
    ]
    .into_iter()
    .map(NewShow::normalize)
    .collect()
}
