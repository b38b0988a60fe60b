//! Integration tests for the contract-extraction endpoint.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, get, post_multipart, StubExtractor};
use sqlx::PgPool;

use tourops_core::extraction::ExtractedFields;

fn extracted_fields() -> ExtractedFields {
    serde_json::from_value(serde_json::json!({
        "date": "2025-10-16",
        "venueName": "Rick's Cafe",
        "venueAddress": "319B Highway 182 East",
        "venueCity": "Starkville",
        "venueState": "MS",
        "venueCountry": "USA",
        "venueCapacity": 800,
        "guarantee": 5000,
        "currency": "USD",
        "buyerCompany": "Rick's Cafe",
        "status": "Pending"
    }))
    .unwrap()
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn extraction_returns_a_candidate_without_creating_a_show(pool: PgPool) {
    let app = common::build_test_app_with_extractor(
        pool,
        Arc::new(StubExtractor::Success(extracted_fields())),
    );

    let response = post_multipart(
        app.clone(),
        "/api/v1/extract",
        "contract.pdf",
        b"%PDF-1.7 contract",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::OK);
    let body = body_json(response).await;

    assert_eq!(body["data"]["venueName"], "Rick's Cafe");
    assert_eq!(body["data"]["venueCapacity"], 800);
    assert_eq!(body["data"]["guarantee"], 5000.0);
    assert_eq!(body["data"]["status"], "Pending");
    assert!(body["data"]["date"].as_str().unwrap().starts_with("2025-10-16"));

    // A candidate is never auto-committed.
    let listed = body_json(
        get(app, "/api/v1/shows?artist_id=bryan-martin").await,
    )
    .await;
    assert_eq!(listed["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn extraction_failure_is_distinct_and_has_no_side_effects(pool: PgPool) {
    let app = common::build_test_app_with_extractor(pool, Arc::new(StubExtractor::Failure));

    let response = post_multipart(
        app.clone(),
        "/api/v1/extract",
        "garbage.pdf",
        b"%PDF-1.7 unreadable",
        &[],
    )
    .await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
    let body = body_json(response).await;
    // Distinct code so the caller can tell AI failure from a store error.
    assert_eq!(body["code"], "EXTRACTION_FAILED");

    let listed = body_json(
        get(app, "/api/v1/shows?artist_id=bryan-martin").await,
    )
    .await;
    assert_eq!(listed["total"], 0);
}

#[sqlx::test(migrations = "../../db/migrations")]
async fn extraction_requires_a_file_field(pool: PgPool) {
    let app = common::build_test_app(pool);

    // A multipart body with only text fields and no `file` part.
    let response = post_multipart_no_file(app).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

async fn post_multipart_no_file(app: axum::Router) -> axum::http::Response<axum::body::Body> {
    use axum::body::Body;
    use axum::http::header::CONTENT_TYPE;
    use axum::http::{Method, Request};
    use tower::ServiceExt;

    const BOUNDARY: &str = "tourops-test-boundary";
    let body = format!(
        "--{BOUNDARY}\r\nContent-Disposition: form-data; name=\"note\"\r\n\r\nhello\r\n--{BOUNDARY}--\r\n"
    );

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/extract")
        .header(
            CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        )
        .body(Body::from(body))
        .unwrap();
    app.oneshot(request).await.unwrap()
}
