//! Mock model client for testing.

use super::{ModelClient, ProviderError, TaskHint};
use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

/// A call observed by [`MockModelClient`].
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedCall {
    Complete { prompt: String },
    Embed { text: String, hint: TaskHint },
}

/// Substitutable model client that records every call.
///
/// Embeddings are tagged with the zero-based index of the embed call, so a
/// caller can tell which request produced which vector.
pub struct MockModelClient {
    completion: String,
    dimensions: usize,
    fail_completion: bool,
    fail_embed_at: Option<usize>,
    embed_calls: AtomicUsize,
    calls: Mutex<Vec<RecordedCall>>,
}

impl Default for MockModelClient {
    fn default() -> Self {
        Self::new()
    }
}

impl MockModelClient {
    pub fn new() -> Self {
        Self {
            completion: "Mock summary.".to_string(),
            dimensions: 768,
            fail_completion: false,
            fail_embed_at: None,
            embed_calls: AtomicUsize::new(0),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Text returned verbatim by `complete`, surrounding whitespace included.
    pub fn with_completion(mut self, completion: impl Into<String>) -> Self {
        self.completion = completion.into();
        self
    }

    /// Length of every returned embedding.
    pub fn with_dimensions(mut self, dimensions: usize) -> Self {
        self.dimensions = dimensions;
        self
    }

    /// Make every `complete` call fail.
    pub fn failing_completion(mut self) -> Self {
        self.fail_completion = true;
        self
    }

    /// Make the embed call with this zero-based index fail.
    pub fn failing_embed_at(mut self, index: usize) -> Self {
        self.fail_embed_at = Some(index);
        self
    }

    /// Calls observed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCall> {
        self.lock_calls().clone()
    }

    fn record(&self, call: RecordedCall) {
        self.lock_calls().push(call);
    }

    fn lock_calls(&self) -> std::sync::MutexGuard<'_, Vec<RecordedCall>> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner())
    }
}

#[async_trait]
impl ModelClient for MockModelClient {
    async fn complete(&self, prompt: &str) -> Result<String, ProviderError> {
        self.record(RecordedCall::Complete {
            prompt: prompt.to_string(),
        });

        if self.fail_completion {
            return Err(ProviderError::ApiError(
                "Mock completion failure".to_string(),
            ));
        }

        Ok(self.completion.clone())
    }

    async fn embed(&self, text: &str, hint: TaskHint) -> Result<Vec<f32>, ProviderError> {
        let index = self.embed_calls.fetch_add(1, Ordering::SeqCst);
        self.record(RecordedCall::Embed {
            text: text.to_string(),
            hint,
        });

        if self.fail_embed_at == Some(index) {
            return Err(ProviderError::NetworkError(format!(
                "Mock embed failure on call {}",
                index
            )));
        }

        Ok(vec![index as f32; self.dimensions])
    }

    fn embedding_model(&self) -> &str {
        "mock-embedding"
    }
}
