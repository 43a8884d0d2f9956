use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::services::providers::TaskHint;

/// Most texts accepted by one batch request (the provider's own
/// per-request batch limit).
pub const MAX_BATCH_SIZE: usize = 100;

// `validator`'s length bounds are `u64`.
const MAX_BATCH_SIZE_U64: u64 = MAX_BATCH_SIZE as u64;

#[derive(Debug, Deserialize, Validate)]
pub struct EmbedRequest {
    pub text: String,
    #[serde(default)]
    pub task_type: TaskHint,
}

#[derive(Debug, Deserialize, Validate)]
pub struct BatchEmbedRequest {
    #[validate(length(max = MAX_BATCH_SIZE_U64, message = "Too many texts in one batch"))]
    pub texts: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EmbedResponse {
    pub embedding: Vec<f32>,
    pub dimensions: usize,
    pub model: String,
}

impl EmbedResponse {
    pub fn new(embedding: Vec<f32>, model: impl Into<String>) -> Self {
        Self {
            dimensions: embedding.len(),
            embedding,
            model: model.into(),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BatchEmbedResponse {
    pub embeddings: Vec<Vec<f32>>,
    pub count: usize,
    /// Length of the first embedding, 0 for an empty batch.
    pub dimensions: usize,
    pub model: String,
}

impl BatchEmbedResponse {
    pub fn new(embeddings: Vec<Vec<f32>>, model: impl Into<String>) -> Self {
        Self {
            count: embeddings.len(),
            dimensions: embeddings.first().map(Vec::len).unwrap_or(0),
            embeddings,
            model: model.into(),
        }
    }
}
