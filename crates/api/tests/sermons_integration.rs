//! Integration tests for sermon management endpoints.
//!
//! Run with: cargo test --test sermons_integration

mod common;

use axum::http::{Method, StatusCode};
use axum::Router;
use common::{create_test_app, delete_request, get_request, json_request, login, parse_response_body};
use serde_json::json;
use tower::ServiceExt;

async fn create_sermon(app: &Router, token: &str, title: &str, audio_url: &str) -> String {
    let request = json_request(
        Method::POST,
        "/api/v1/admin/sermons",
        json!({
            "title": title,
            "speaker": "Pastor John",
            "date": "2026-03-01",
            "audioUrl": audio_url,
            "status": "published"
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

// ============================================================================
// Recording exclusivity
// ============================================================================

#[tokio::test]
async fn test_create_sermon_with_audio_only() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let request = json_request(
        Method::POST,
        "/api/v1/admin/sermons",
        json!({
            "title": "Walking in Faith",
            "speaker": "Pastor John",
            "date": "2026-03-01",
            "series": "Foundations",
            "scriptureReferences": ["Hebrews 11:1", "James 2:17"],
            "tags": ["faith", "works"],
            "audioUrl": "https://cdn.example.com/sermons/faith.mp3"
        }),
        &token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);

    let body = parse_response_body(response).await;
    assert_eq!(body["audioUrl"], "https://cdn.example.com/sermons/faith.mp3");
    assert!(body.get("videoUrl").is_none());
    assert_eq!(body["status"], "draft");
    assert_eq!(body["viewCount"], 0);
    assert_eq!(body["scriptureReferences"][0], "Hebrews 11:1");
}

#[tokio::test]
async fn test_create_sermon_with_both_recordings_never_reaches_the_store() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let request = json_request(
        Method::POST,
        "/api/v1/admin/sermons",
        json!({
            "title": "Double Recording",
            "speaker": "Pastor John",
            "date": "2026-03-01",
            "audioUrl": "https://cdn.example.com/s.mp3",
            "videoUrl": "https://cdn.example.com/s.mp4"
        }),
        &token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/sermons", &token))
        .await
        .unwrap();
    assert_eq!(parse_response_body(response).await["total"], 0);
}

#[tokio::test]
async fn test_create_sermon_with_no_recording_is_rejected() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let request = json_request(
        Method::POST,
        "/api/v1/admin/sermons",
        json!({
            "title": "Silent Sermon",
            "speaker": "Pastor John",
            "date": "2026-03-01"
        }),
        &token,
    );

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = parse_response_body(response).await;
    assert_eq!(body["error"], "validation_error");
}

#[tokio::test]
async fn test_update_switching_to_video_clears_audio() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let id = create_sermon(
        &app,
        &token,
        "The Power of Prayer",
        "https://cdn.example.com/prayer.mp3",
    )
    .await;

    let request = json_request(
        Method::PATCH,
        &format!("/api/v1/admin/sermons/{id}"),
        json!({"videoUrl": "https://cdn.example.com/prayer.mp4"}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body["videoUrl"], "https://cdn.example.com/prayer.mp4");
    assert!(body.get("audioUrl").is_none());
}

#[tokio::test]
async fn test_update_with_both_recordings_is_rejected() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let id = create_sermon(&app, &token, "Hope", "https://cdn.example.com/hope.mp3").await;

    let request = json_request(
        Method::PATCH,
        &format!("/api/v1/admin/sermons/{id}"),
        json!({
            "audioUrl": "https://cdn.example.com/hope2.mp3",
            "videoUrl": "https://cdn.example.com/hope.mp4"
        }),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

// ============================================================================
// Monotonic counters
// ============================================================================

#[tokio::test]
async fn test_view_count_cannot_decrease() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let id = create_sermon(&app, &token, "Grace", "https://cdn.example.com/grace.mp3").await;

    let request = json_request(
        Method::PATCH,
        &format!("/api/v1/admin/sermons/{id}"),
        json!({"viewCount": 40, "downloadCount": 12}),
        &token,
    );
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::OK
    );

    // Decreasing either counter is rejected.
    let request = json_request(
        Method::PATCH,
        &format!("/api/v1/admin/sermons/{id}"),
        json!({"viewCount": 39}),
        &token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let request = json_request(
        Method::PATCH,
        &format!("/api/v1/admin/sermons/{id}"),
        json!({"downloadCount": 5}),
        &token,
    );
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::BAD_REQUEST
    );

    // Equal or larger is fine.
    let request = json_request(
        Method::PATCH,
        &format!("/api/v1/admin/sermons/{id}"),
        json!({"viewCount": 40}),
        &token,
    );
    assert_eq!(
        app.clone().oneshot(request).await.unwrap().status(),
        StatusCode::OK
    );
}

// ============================================================================
// Search and statistics
// ============================================================================

#[tokio::test]
async fn test_search_faith_returns_only_matching_sermon() {
    let app = create_test_app().await;
    let token = login(&app).await;

    create_sermon(&app, &token, "Walking in Faith", "https://cdn.example.com/1.mp3").await;
    create_sermon(&app, &token, "The Power of Prayer", "https://cdn.example.com/2.mp3").await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/sermons?search=faith", &token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body["total"], 1);
    assert_eq!(body["sermons"][0]["title"], "Walking in Faith");
}

#[tokio::test]
async fn test_stats_on_empty_collection_average_is_zero() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/sermons/stats", &token))
        .await
        .unwrap();
    let stats = parse_response_body(response).await;
    assert_eq!(stats["total"], 0);
    // Defined as 0 for an empty snapshot, never NaN.
    assert_eq!(stats["averageViews"], 0.0);
}

#[tokio::test]
async fn test_stats_follow_the_snapshot() {
    let app = create_test_app().await;
    let token = login(&app).await;

    let a = create_sermon(&app, &token, "Hope", "https://cdn.example.com/a.mp3").await;
    let b = create_sermon(&app, &token, "Grace", "https://cdn.example.com/b.mp3").await;

    for (id, views) in [(&a, 30), (&b, 10)] {
        let request = json_request(
            Method::PATCH,
            &format!("/api/v1/admin/sermons/{id}"),
            json!({"viewCount": views}),
            &token,
        );
        assert_eq!(
            app.clone().oneshot(request).await.unwrap().status(),
            StatusCode::OK
        );
    }

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/sermons/stats", &token))
        .await
        .unwrap();
    let stats = parse_response_body(response).await;
    assert_eq!(stats["total"], 2);
    assert_eq!(stats["published"], 2);
    assert_eq!(stats["totalViews"], 40);
    assert_eq!(stats["averageViews"], 20.0);

    // Deleting one recomputes the aggregate from the replaced snapshot.
    let response = app
        .clone()
        .oneshot(delete_request(
            &format!("/api/v1/admin/sermons/{a}?confirm=true"),
            &token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .clone()
        .oneshot(get_request("/api/v1/admin/sermons/stats", &token))
        .await
        .unwrap();
    let stats = parse_response_body(response).await;
    assert_eq!(stats["totalViews"], 10);
    assert_eq!(stats["averageViews"], 10.0);
}
