//! Integration tests for POST /summarize.

mod common;

use ai_service::services::providers::mock::{MockModelClient, RecordedCall};
use axum::http::StatusCode;
use common::{app_with, degraded_app, post_json, post_raw};
use serde_json::json;

#[tokio::test]
async fn summarize_returns_trimmed_completion() {
    let (app, mock) = app_with(MockModelClient::new().with_completion("  Greeting post.  \n"));

    let (status, body) = post_json(
        app,
        "/summarize",
        json!({ "title": "", "content": "Hello world" }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "summary": "Greeting post." }));

    let calls = mock.calls();
    assert_eq!(calls.len(), 1);
    match &calls[0] {
        RecordedCall::Complete { prompt } => assert!(prompt.contains("Content: Hello world")),
        other => panic!("unexpected call: {:?}", other),
    }
}

#[tokio::test]
async fn title_is_optional_and_included_when_given() {
    let (app, mock) = app_with(MockModelClient::new());

    let (status, _) = post_json(
        app,
        "/summarize",
        json!({ "title": "Borrowing", "content": "References must not outlive owners." }),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    match mock.calls().as_slice() {
        [RecordedCall::Complete { prompt }] => {
            assert!(prompt.contains("Title: Borrowing"));
            assert!(prompt.contains("Content: References must not outlive owners."));
        }
        other => panic!("unexpected calls: {:?}", other),
    }
}

#[tokio::test]
async fn missing_content_is_rejected_without_calling_the_model() {
    let (app, mock) = app_with(MockModelClient::new());

    let (status, body) = post_json(app, "/summarize", json!({ "title": "Only a title" })).await;

    assert!(status.is_client_error());
    assert!(body["detail"].is_string());
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn malformed_json_is_a_bad_request() {
    let (app, mock) = app_with(MockModelClient::new());

    let (status, _) = post_raw(app, "/summarize", "{\"content\": ", Some("application/json")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn oversized_body_is_rejected_with_413() {
    let (app, mock) = app_with(MockModelClient::new());
    let body = json!({ "content": "x".repeat(3 * 1024 * 1024) }).to_string();

    let (status, body) = post_raw(app, "/summarize", &body, Some("application/json")).await;

    assert_eq!(status, StatusCode::PAYLOAD_TOO_LARGE);
    assert!(body["detail"].is_string());
    assert!(mock.calls().is_empty());
}

#[tokio::test]
async fn provider_failure_returns_generic_500() {
    let (app, _) = app_with(MockModelClient::new().failing_completion());

    let (status, body) = post_json(app, "/summarize", json!({ "content": "Hello" })).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["detail"], "Failed to generate summary via AI service.");
}

#[tokio::test]
async fn uninitialized_client_returns_503() {
    let (status, body) = post_json(degraded_app(), "/summarize", json!({ "content": "Hello" })).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["detail"], "AI Service initialization failed.");
}
