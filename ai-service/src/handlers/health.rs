use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use serde_json::json;

use crate::services::metrics::get_metrics;
use crate::startup::{AppState, SERVICE_DISPLAY_NAME};

/// Health check endpoint for Docker/K8s liveness probes.
///
/// Always 200: a missing provider credential degrades the AI routes but the
/// process itself is healthy.
pub async fn health_check() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(json!({
            "status": "healthy",
            "service": SERVICE_DISPLAY_NAME,
            "version": env!("CARGO_PKG_VERSION")
        })),
    )
}

/// Readiness check endpoint for K8s readiness probes.
pub async fn readiness_check(State(state): State<AppState>) -> impl IntoResponse {
    if state.is_ready() {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    }
}

pub async fn service_info() -> impl IntoResponse {
    Json(json!({
        "message": "AI Service API",
        "health": "/health",
        "endpoints": {
            "summarization": "/summarize",
            "embedding": "/api/embed",
            "batch_embedding": "/api/embed/batch"
        }
    }))
}

pub async fn metrics() -> impl IntoResponse {
    (
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        get_metrics(),
    )
}
