//! Gemini provider implementation.
//!
//! Text completions go through `generateContent`, embeddings through
//! `embedContent`. One outbound request per call, bounded by the client
//! timeout, never retried.

use super::{ModelClient, ProviderError, TaskHint};
use crate::services::metrics;
use async_trait::async_trait;
use reqwest::{Client, StatusCode};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Header carrying the API key; keeps the key out of request URLs and logs.
const API_KEY_HEADER: &str = "x-goog-api-key";

/// Gemini provider configuration.
#[derive(Debug, Clone)]
pub struct GeminiConfig {
    pub api_key: String,
    pub api_base: String,
    pub text_model: String,
    pub embedding_model: String,
    pub timeout: Duration,
}

/// Gemini model client.
pub struct GeminiClient {
    config: GeminiConfig,
    client: Client,
}

impl GeminiClient {
    /// Fails when the API key is blank or the HTTP client cannot be built.
    pub fn new(config: GeminiConfig) -> Result<Self, ProviderError> {
        if config.api_key.trim().is_empty() {
            return Err(ProviderError::NotConfigured(
                "Gemini API key not configured".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| {
                ProviderError::NotConfigured(format!("Failed to create HTTP client: {}", e))
            })?;

        Ok(Self { config, client })
    }

    /// Build the API URL for the given model and method.
    fn api_url(&self, model: &str, method: &str) -> String {
        format!(
            "{}/models/{}:{}",
            self.config.api_base.trim_end_matches('/'),
            model_id(model),
            method
        )
    }

    async fn post_json<B, R>(&self, url: &str, body: &B) -> Result<R, ProviderError>
    where
        B: Serialize + ?Sized,
        R: DeserializeOwned,
    {
        let response = self
            .client
            .post(url)
            .header(API_KEY_HEADER, &self.config.api_key)
            .json(body)
            .send()
            .await
            .map_err(|e| ProviderError::NetworkError(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();

            if status == StatusCode::TOO_MANY_REQUESTS {
                return Err(ProviderError::RateLimited);
            }

            return Err(ProviderError::ApiError(format!(
                "Gemini API error {}: {}",
                status, error_text
            )));
        }

        response
            .json::<R>()
            .await
            .map_err(|e| ProviderError::InvalidResponse(format!("Failed to parse response: {}", e)))
    }

    async fn generate_content(&self, prompt: &str) -> Result<String, ProviderError> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                role: Some("user".to_string()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        };

        let url = self.api_url(&self.config.text_model, "generateContent");
        let response: GenerateContentResponse = self.post_json(&url, &request).await?;

        if response
            .prompt_feedback
            .as_ref()
            .and_then(|f| f.block_reason.as_ref())
            .is_some()
        {
            return Err(ProviderError::ContentFiltered);
        }

        let candidate = response
            .candidates
            .into_iter()
            .next()
            .ok_or_else(|| ProviderError::InvalidResponse("No candidates returned".to_string()))?;

        if candidate.finish_reason.as_deref() == Some("SAFETY") {
            return Err(ProviderError::ContentFiltered);
        }

        let text: String = candidate
            .content
            .map(|c| c.parts.into_iter().filter_map(|p| p.text).collect())
            .unwrap_or_default();

        let text = text.trim();
        if text.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "Response contained no text".to_string(),
            ));
        }

        Ok(text.to_string())
    }

    async fn embed_content(&self, text: &str, hint: TaskHint) -> Result<Vec<f32>, ProviderError> {
        let request = EmbedContentRequest {
            model: format!("models/{}", model_id(&self.config.embedding_model)),
            content: Content {
                role: None,
                parts: vec![Part {
                    text: Some(text.to_string()),
                }],
            },
            task_type: task_type(hint),
        };

        let url = self.api_url(&self.config.embedding_model, "embedContent");
        let response: EmbedContentResponse = self.post_json(&url, &request).await?;

        if response.embedding.values.is_empty() {
            return Err(ProviderError::InvalidResponse(
                "Embedding contained no values".to_string(),
            ));
        }

        Ok(response.embedding.values)
    }
}

#[async_trait]
impl ModelClient for GeminiClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        tracing::debug!(
            model = %self.config.text_model,
            prompt_len = prompt.len(),
            "Sending generateContent request to Gemini API"
        );

        let start = Instant::now();
        let result = self.generate_content(prompt).await;
        metrics::record_provider_call(
            "generate_content",
            &self.config.text_model,
            start.elapsed(),
            result.as_ref().err(),
        );
        result
    }

    async fn embed(&self, text: &str, hint: TaskHint) -> Result<Vec<f32>, ProviderError> {
        tracing::debug!(
            model = %self.config.embedding_model,
            task_type = hint.as_str(),
            text_len = text.len(),
            "Sending embedContent request to Gemini API"
        );

        let start = Instant::now();
        let result = self.embed_content(text, hint).await;
        metrics::record_provider_call(
            "embed_content",
            &self.config.embedding_model,
            start.elapsed(),
            result.as_ref().err(),
        );
        result
    }

    fn embedding_model(&self) -> &str {
        model_id(&self.config.embedding_model)
    }
}

/// Model name without the `models/` resource prefix.
pub fn model_id(model: &str) -> &str {
    model.strip_prefix("models/").unwrap_or(model)
}

fn task_type(hint: TaskHint) -> &'static str {
    match hint {
        TaskHint::Document => "RETRIEVAL_DOCUMENT",
        TaskHint::Query => "RETRIEVAL_QUERY",
    }
}

// ============================================================================
// Gemini API Request/Response Types
// ============================================================================

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct EmbedContentRequest {
    model: String,
    content: Content,
    task_type: &'static str,
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Content {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<String>,
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
    #[serde(default)]
    prompt_feedback: Option<PromptFeedback>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct Candidate {
    #[serde(default)]
    content: Option<Content>,
    #[serde(default)]
    finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PromptFeedback {
    #[serde(default)]
    block_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
struct EmbedContentResponse {
    embedding: ContentEmbedding,
}

#[derive(Debug, Deserialize)]
struct ContentEmbedding {
    #[serde(default)]
    values: Vec<f32>,
}
