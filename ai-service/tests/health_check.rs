//! Integration tests for the infrastructure routes.

mod common;

use ai_service::services::providers::mock::MockModelClient;
use axum::http::StatusCode;
use common::{app_with, degraded_app, get};

#[tokio::test]
async fn health_check_returns_ok() {
    let (app, _) = app_with(MockModelClient::new());

    let (status, body) = get(app, "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["service"], "AI Embedding & Summarization Service");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn health_check_is_ok_when_model_client_failed() {
    let (status, body) = get(degraded_app(), "/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
}

#[tokio::test]
async fn readiness_follows_model_client_state() {
    let (app, _) = app_with(MockModelClient::new());
    let (status, _) = get(app, "/ready").await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = get(degraded_app(), "/ready").await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn root_lists_endpoints() {
    let (status, body) = get(degraded_app(), "/").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["endpoints"]["summarization"], "/summarize");
    assert_eq!(body["endpoints"]["embedding"], "/api/embed");
    assert_eq!(body["endpoints"]["batch_embedding"], "/api/embed/batch");
}

#[tokio::test]
async fn responses_carry_request_id() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let response = degraded_app()
        .oneshot(
            Request::builder()
                .uri("/health")
                .header("x-request-id", "req-42")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], "req-42");
}

#[tokio::test]
async fn cors_preflight_allows_any_origin() {
    use axum::body::Body;
    use axum::http::Request;
    use tower::ServiceExt;

    let response = degraded_app()
        .oneshot(
            Request::builder()
                .method("OPTIONS")
                .uri("/api/embed")
                .header("origin", "http://localhost:3000")
                .header("access-control-request-method", "POST")
                .header("access-control-request-headers", "content-type")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert!(response.status().is_success());
    assert_eq!(response.headers()["access-control-allow-origin"], "*");
    assert!(response
        .headers()
        .contains_key("access-control-allow-methods"));
}
