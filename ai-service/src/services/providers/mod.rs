//! Remote model client abstraction.
//!
//! Services talk to the generative-AI provider only through [`ModelClient`],
//! so the Gemini adapter can be swapped for [`mock::MockModelClient`] in tests.

pub mod gemini;
pub mod mock;

use async_trait::async_trait;
use serde::Deserialize;
use thiserror::Error;

/// Error type for provider operations.
#[derive(Error, Debug)]
pub enum ProviderError {
    #[error("Provider not configured: {0}")]
    NotConfigured(String),

    #[error("API error: {0}")]
    ApiError(String),

    #[error("Rate limited")]
    RateLimited,

    #[error("Content filtered")]
    ContentFiltered,

    #[error("Network error: {0}")]
    NetworkError(String),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ProviderError {
    /// Short label used for the `error_type` metric dimension.
    pub fn kind(&self) -> &'static str {
        match self {
            ProviderError::NotConfigured(_) => "not_configured",
            ProviderError::ApiError(_) => "api_error",
            ProviderError::RateLimited => "rate_limited",
            ProviderError::ContentFiltered => "content_filtered",
            ProviderError::NetworkError(_) => "network_error",
            ProviderError::InvalidResponse(_) => "invalid_response",
        }
    }
}

/// Tells the embedding model whether text is a document to index or a
/// query to match against indexed documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TaskHint {
    #[default]
    Document,
    Query,
}

impl TaskHint {
    pub fn as_str(&self) -> &'static str {
        match self {
            TaskHint::Document => "document",
            TaskHint::Query => "query",
        }
    }
}

/// Trait for the remote generative-AI provider.
#[async_trait]
pub trait ModelClient: Send + Sync {
    /// Generate a completion for `prompt`. Returns whitespace-trimmed text.
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError>;

    /// Generate an embedding vector for `text`.
    async fn embed(&self, text: &str, hint: TaskHint) -> Result<Vec<f32>, ProviderError>;

    /// Embedding model name as reported to API callers.
    fn embedding_model(&self) -> &str;
}
