//! Request validation failures that are caught before any database access.

mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::{assert_error_envelope, body_json, build_test_app, send_json, token_for};

#[tokio::test]
async fn bulk_status_with_empty_job_ids_returns_400() {
    let app = build_test_app();
    let token = token_for(1, "admin");

    let response = send_json(
        app,
        "POST",
        "/api/v1/admin/ops/bulk-status",
        Some(&token),
        json!({ "jobIds": [], "newStatus": "editing" }),
    )
    .await;

    assert_error_envelope(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn bulk_status_with_unknown_status_enumerates_known_statuses() {
    let app = build_test_app();
    let token = token_for(1, "admin");

    let response = send_json(
        app,
        "POST",
        "/api/v1/admin/ops/bulk-status",
        Some(&token),
        json!({ "jobIds": [1, 2], "newStatus": "shipped" }),
    )
    .await;

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"]["code"], "VALIDATION_ERROR");

    let message = body["error"]["message"]
        .as_str()
        .expect("message must be a string");
    assert!(message.contains("Unknown ops status 'shipped'"));
    assert!(message.contains("scheduled"));
    assert!(message.contains("delivered"));
}

#[tokio::test]
async fn bulk_status_with_oversized_job_ids_returns_400() {
    let app = build_test_app();
    let token = token_for(1, "admin");

    let ids: Vec<i64> = (1..=10_000).collect();
    let response = send_json(
        app,
        "POST",
        "/api/v1/admin/ops/bulk-status",
        Some(&token),
        json!({ "jobIds": ids, "newStatus": "scheduled" }),
    )
    .await;

    assert_error_envelope(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn bulk_retry_with_oversized_job_ids_returns_400() {
    let app = build_test_app();
    let token = token_for(1, "admin");

    let ids: Vec<i64> = (1..=101).collect();
    let response = send_json(
        app,
        "PUT",
        "/api/v1/processing/retry",
        Some(&token),
        json!({ "jobIds": ids }),
    )
    .await;

    assert_error_envelope(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn bulk_retry_with_empty_job_ids_returns_400() {
    let app = build_test_app();
    let token = token_for(1, "admin");

    let response = send_json(
        app,
        "PUT",
        "/api/v1/processing/retry",
        Some(&token),
        json!({ "jobIds": [] }),
    )
    .await;

    assert_error_envelope(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}

#[tokio::test]
async fn job_list_with_unknown_status_filter_returns_400() {
    let app = build_test_app();
    let token = token_for(1, "editor");

    let response = send_json(
        app,
        "GET",
        "/api/v1/admin/ops/jobs?status=bogus",
        Some(&token),
        json!(null),
    )
    .await;

    assert_error_envelope(response, StatusCode::BAD_REQUEST, "VALIDATION_ERROR").await;
}
