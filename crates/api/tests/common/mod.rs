//! Common test utilities for integration tests.
//!
//! Every test drives the full router over a fresh in-memory document store,
//! so the suite is hermetic: no external database, media host or stream
//! service is required.

// Allow dead code in this module - these helpers are shared across several
// integration test binaries and not every binary uses all of them.
#![allow(dead_code)]

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    response::Response,
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use tower::ServiceExt;

use church_manager_api::app::{build_state, create_app};
use church_manager_api::config::Config;
use persistence::memory::MemoryStore;
use persistence::store::DocumentStore;

/// Plaintext admin password used by the test configuration.
pub const TEST_PASSWORD: &str = "walk-by-faith";

/// Test configuration with a freshly hashed admin credential.
pub fn test_config() -> Config {
    let hash = shared::password::hash_password(TEST_PASSWORD).expect("hashing test password");
    Config::load_for_test(&[
        ("session.secret", "integration-test-secret"),
        ("session.admin_username", "admin"),
        ("session.admin_password_hash", hash.as_str()),
    ])
    .expect("Failed to load test config")
}

/// Builds an app over a fresh in-memory store.
pub async fn create_test_app() -> Router {
    let store: Arc<dyn DocumentStore> = Arc::new(MemoryStore::new());
    let (state, _stream_health_tx) = build_state(test_config(), store).await;
    create_app(state)
}

/// Logs in as the test admin and returns the session token.
pub async fn login(app: &Router) -> String {
    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/auth/login")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(
            serde_json::json!({"username": "admin", "password": TEST_PASSWORD}).to_string(),
        ))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK, "login must succeed");

    let body = parse_response_body(response).await;
    body["token"].as_str().expect("token in response").to_string()
}

/// JSON request with a Bearer session token.
pub fn json_request(method: Method, uri: &str, body: Value, token: &str) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body.to_string()))
        .unwrap()
}

/// Bodyless GET with a Bearer session token.
pub fn get_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::GET)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Bodyless DELETE with a Bearer session token.
pub fn delete_request(uri: &str, token: &str) -> Request<Body> {
    Request::builder()
        .method(Method::DELETE)
        .uri(uri)
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::empty())
        .unwrap()
}

/// Multipart request carrying a single file field plus optional text fields.
pub fn multipart_request(
    uri: &str,
    token: &str,
    file_field: Option<(&str, &[u8])>,
    text_fields: &[(&str, &str)],
) -> Request<Body> {
    let boundary = "integration-test-boundary";
    let mut body = Vec::new();

    if let Some((filename, bytes)) = file_field {
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"{filename}\"\r\nContent-Type: image/jpeg\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\r\n");
    }

    for (name, value) in text_fields {
        body.extend_from_slice(
            format!("--{boundary}\r\nContent-Disposition: form-data; name=\"{name}\"\r\n\r\n{value}\r\n")
                .as_bytes(),
        );
    }

    body.extend_from_slice(format!("--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .header(header::AUTHORIZATION, format!("Bearer {}", token))
        .body(Body::from(body))
        .unwrap()
}

/// Reads and parses a JSON response body; empty bodies parse to `Null`.
pub async fn parse_response_body(response: Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    }
}

/// Creates an event through the API and returns its id.
pub async fn create_test_event(app: &Router, token: &str, title: &str, category: &str) -> String {
    let request = json_request(
        Method::POST,
        "/api/v1/admin/events",
        serde_json::json!({
            "title": title,
            "date": "2026-09-20",
            "category": category,
            "featuredImage": "https://cdn.example.com/events/banner.jpg"
        }),
        token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    parse_response_body(response).await["id"]
        .as_str()
        .unwrap()
        .to_string()
}
