//! Application startup and lifecycle management.

use crate::config::AiConfig;
use crate::handlers;
use crate::services::providers::gemini::GeminiClient;
use crate::services::providers::ModelClient;
use crate::services::{EmbeddingService, SummarizationService};
use axum::{
    middleware::from_fn,
    routing::{get, post},
    Router,
};
use service_core::error::AppError;
use service_core::middleware::{metrics_middleware, request_id_middleware, REQUEST_ID_HEADER};
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::signal;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

pub const SERVICE_NAME: &str = "ai-service";

/// Name reported by `/health` and `/`.
pub const SERVICE_DISPLAY_NAME: &str = "AI Embedding & Summarization Service";

const AI_UNAVAILABLE_DETAIL: &str = "AI Service initialization failed.";

/// Services that need a working model client.
#[derive(Clone)]
pub struct AiServices {
    pub summarization: SummarizationService,
    pub embedding: EmbeddingService,
}

impl AiServices {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            summarization: SummarizationService::new(client.clone()),
            embedding: EmbeddingService::new(client),
        }
    }
}

/// Shared application state.
///
/// `ai` is `None` when the model client could not be constructed; AI routes
/// then answer 503 while health and info routes keep working.
#[derive(Clone)]
pub struct AppState {
    ai: Option<AiServices>,
}

impl AppState {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self {
            ai: Some(AiServices::new(client)),
        }
    }

    pub fn degraded() -> Self {
        Self { ai: None }
    }

    /// Model-backed services, or 503 if the client failed to initialize.
    pub fn ai(&self) -> Result<&AiServices, AppError> {
        self.ai
            .as_ref()
            .ok_or_else(|| AppError::ServiceUnavailable(AI_UNAVAILABLE_DETAIL.to_string()))
    }

    pub fn is_ready(&self) -> bool {
        self.ai.is_some()
    }
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::service_info))
        .route("/health", get(handlers::health_check))
        .route("/ready", get(handlers::readiness_check))
        .route("/metrics", get(handlers::metrics))
        .route("/summarize", post(handlers::summarize))
        .route("/api/embed", post(handlers::embed_text))
        .route("/api/embed/batch", post(handlers::embed_batch))
        .layer(from_fn(metrics_middleware))
        .layer(
            TraceLayer::new_for_http().make_span_with(|request: &axum::http::Request<_>| {
                let request_id = request
                    .headers()
                    .get(REQUEST_ID_HEADER)
                    .and_then(|value| value.to_str().ok())
                    .unwrap_or("-");

                tracing::info_span!(
                    "http_request",
                    request_id = %request_id,
                    method = %request.method(),
                    uri = %request.uri(),
                    version = ?request.version(),
                )
            }),
        )
        .layer(from_fn(request_id_middleware))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// Construct the Gemini-backed state, falling back to degraded mode.
fn build_state(config: &AiConfig) -> AppState {
    match GeminiClient::new(config.gemini_config()) {
        Ok(client) => {
            tracing::info!(
                text_model = %config.models.text_model,
                embedding_model = %config.models.embedding_model,
                "Initialized Gemini model client"
            );
            AppState::new(Arc::new(client))
        }
        Err(e) => {
            tracing::warn!(
                error = %e,
                "Gemini model client unavailable; AI routes will return 503"
            );
            AppState::degraded()
        }
    }
}

/// Application container for managing server lifecycle.
pub struct Application {
    port: u16,
    listener: TcpListener,
    state: AppState,
}

impl Application {
    /// Build the application with the given configuration.
    pub async fn build(config: AiConfig) -> Result<Self, AppError> {
        let state = build_state(&config);
        Self::build_with_state(config, state).await
    }

    /// Build the application around an already constructed state.
    pub async fn build_with_state(config: AiConfig, state: AppState) -> Result<Self, AppError> {
        // port 0 = random port for testing
        let addr = config.common.bind_address();
        let listener = TcpListener::bind(&addr).await.map_err(|e| {
            tracing::error!("Failed to bind HTTP listener to {}: {}", addr, e);
            AppError::from(e)
        })?;
        let port = listener.local_addr()?.port();

        tracing::info!("AI service listening on port {}", port);

        Ok(Self {
            port,
            listener,
            state,
        })
    }

    /// Get the port the server is listening on.
    pub fn port(&self) -> u16 {
        self.port
    }

    /// Run the application until a shutdown signal arrives.
    pub async fn run_until_stopped(self) -> std::io::Result<()> {
        let router = build_router(self.state);

        axum::serve(self.listener, router)
            .with_graceful_shutdown(shutdown_signal())
            .await
            .map_err(|e| {
                tracing::error!("HTTP server error: {}", e);
                e
            })
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sigterm) => {
                sigterm.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received");
}
