//! Integration tests for sessions, health, dashboard and livestream glue.
//!
//! Run with: cargo test --test auth_integration

mod common;

use axum::body::Body;
use axum::http::{header, Method, Request, StatusCode};
use common::{
    create_test_app, create_test_event, get_request, json_request, login, parse_response_body,
    TEST_PASSWORD,
};
use serde_json::json;
use tower::ServiceExt;

// ============================================================================
// Sessions
// ============================================================================

#[tokio::test]
async fn test_login_issues_session_token() {
    let app = create_test_app().await;

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            json!({"username": "admin", "password": TEST_PASSWORD}).to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert!(body["token"].as_str().is_some());
    assert_eq!(body["expiresIn"], 3600);
}

#[tokio::test]
async fn test_login_rejects_bad_credentials() {
    let app = create_test_app().await;

    for (username, password) in [("admin", "wrong"), ("intruder", TEST_PASSWORD)] {
        let request = Request::builder()
            .method(Method::POST)
            .uri("/api/v1/auth/login")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(
                json!({"username": username, "password": password}).to_string(),
            ))
            .unwrap();

        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }
}

#[tokio::test]
async fn test_admin_routes_require_session_token() {
    let app = create_test_app().await;

    // No token at all.
    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/v1/admin/events")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);

    // Garbage token.
    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/events", "not-a-token"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_current_session_reports_admin_identity() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/auth/session", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(parse_response_body(response).await["username"], "admin");
}

// ============================================================================
// Health
// ============================================================================

#[tokio::test]
async fn test_health_endpoints_are_public() {
    let app = create_test_app().await;

    for uri in ["/api/health", "/api/health/live", "/api/health/ready"] {
        let request = Request::builder()
            .method(Method::GET)
            .uri(uri)
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK, "{uri} must be public");
    }

    let request = Request::builder()
        .method(Method::GET)
        .uri("/api/health")
        .body(Body::empty())
        .unwrap();
    let body = parse_response_body(app.clone().oneshot(request).await.unwrap()).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["store"]["subscriptions_live"], true);
}

// ============================================================================
// Dashboard
// ============================================================================

#[tokio::test]
async fn test_dashboard_tallies_follow_the_snapshots() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/dashboard", &token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["events"]["total"], 0);
    assert_eq!(body["sermons"]["averageViews"], 0.0);
    assert!(body.get("degradedCollections").is_none());

    create_test_event(&app, &token, "Sunday Service", "worship").await;
    create_test_event(&app, &token, "Food Drive", "outreach").await;

    let request = json_request(
        Method::POST,
        "/api/v1/admin/prayer-requests",
        json!({
            "name": "Mary",
            "email": "mary@example.com",
            "message": "Please pray for my family.",
            "isUrgent": true
        }),
        &token,
    );
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::CREATED
    );

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/dashboard", &token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["events"]["total"], 2);
    assert_eq!(body["events"]["byStatus"]["upcoming"], 2);
    assert_eq!(body["prayerRequests"]["total"], 1);
    assert_eq!(body["prayerRequests"]["new"], 1);
    assert_eq!(body["prayerRequests"]["urgent"], 1);
    assert!(body["generatedAt"].as_str().is_some());
}

// ============================================================================
// Livestream glue
// ============================================================================

#[tokio::test]
async fn test_livestream_endpoints_surface_missing_configuration() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/livestream/status", &token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "configuration_error");

    let request = json_request(
        Method::POST,
        "/api/v1/admin/livestream/start",
        json!({}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
}

// ============================================================================
// Media glue
// ============================================================================

#[tokio::test]
async fn test_media_upload_surfaces_missing_configuration() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let request = common::multipart_request(
        "/api/v1/admin/media",
        &token,
        Some(("banner.jpg", b"bytes")),
        &[],
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "configuration_error");
}
