//! HTTP handlers for the AI service.
//!
//! Provider failures are translated to HTTP here and nowhere else: the
//! provider's error is logged, the caller gets a generic detail message.

pub mod embedding;
pub mod health;
pub mod summarization;

pub use embedding::{embed_batch, embed_text};
pub use health::{health_check, metrics, readiness_check, service_info};
pub use summarization::summarize;

use crate::services::providers::ProviderError;
use service_core::error::AppError;

fn provider_failure(err: ProviderError, detail: &str) -> AppError {
    tracing::error!(error = %err, error_type = err.kind(), "AI provider call failed");
    AppError::ProviderFailure(detail.to_string())
}
