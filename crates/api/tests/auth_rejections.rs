//! Authentication and authorization rejections.
//!
//! All of these are rejected by extractors before any database access,
//! so they run against the lazy pool without a live server.

mod common;

use axum::body::Body;
use axum::http::{Request, StatusCode};
use serde_json::json;
use tower::ServiceExt;

use common::{assert_error_envelope, build_test_app, get, send_json, token_for};

#[tokio::test]
async fn missing_token_returns_401() {
    let app = build_test_app();

    let response = get(app, "/api/v1/admin/staff").await;
    assert_error_envelope(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn malformed_authorization_header_returns_401() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/api/v1/admin/staff")
        .header("authorization", "Basic dXNlcjpwYXNz")
        .body(Body::empty())
        .expect("request build should succeed");
    let response = app.oneshot(request).await.expect("request should complete");

    assert_error_envelope(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn garbage_bearer_token_returns_401() {
    let app = build_test_app();

    let request = Request::builder()
        .uri("/api/v1/admin/ops/jobs")
        .header("authorization", "Bearer not-a-real-token")
        .body(Body::empty())
        .expect("request build should succeed");
    let response = app.oneshot(request).await.expect("request should complete");

    assert_error_envelope(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn token_signed_with_wrong_secret_returns_401() {
    let app = build_test_app();

    let wrong_config = focal_api::auth::jwt::JwtConfig {
        secret: "a-completely-different-secret".to_string(),
        access_token_expiry_mins: 60,
    };
    let token = focal_api::auth::jwt::generate_access_token(1, "admin", &wrong_config)
        .expect("token generation should succeed");

    let request = Request::builder()
        .uri("/api/v1/admin/staff")
        .header("authorization", format!("Bearer {token}"))
        .body(Body::empty())
        .expect("request build should succeed");
    let response = app.oneshot(request).await.expect("request should complete");

    assert_error_envelope(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}

#[tokio::test]
async fn non_admin_on_admin_route_returns_403() {
    let app = build_test_app();
    let token = token_for(7, "photographer");

    let response = send_json(
        app,
        "POST",
        "/api/v1/admin/staff/3/deactivate",
        Some(&token),
        json!({}),
    )
    .await;

    assert_error_envelope(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[tokio::test]
async fn non_admin_cannot_create_api_keys() {
    let app = build_test_app();
    let token = token_for(7, "editor");

    let response = send_json(
        app,
        "POST",
        "/api/v1/admin/api-keys",
        Some(&token),
        json!({ "name": "partner-feed" }),
    )
    .await;

    assert_error_envelope(response, StatusCode::FORBIDDEN, "FORBIDDEN").await;
}

#[tokio::test]
async fn location_route_without_api_key_returns_401() {
    let app = build_test_app();

    let response = get(app, "/api/v1/location/scores?address=123+Main+St").await;
    assert_error_envelope(response, StatusCode::UNAUTHORIZED, "UNAUTHORIZED").await;
}
