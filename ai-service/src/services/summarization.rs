//! Post summarization on top of the text completion model.

use std::sync::Arc;

use super::providers::{ModelClient, ProviderError};

/// Build the instruction prompt sent to the completion model.
///
/// The single-sentence limit is an instruction to the model only; the
/// returned text is not checked against it.
pub fn build_prompt(title: &str, content: &str) -> String {
    let full_text = format!("Title: {}\n\nContent: {}", title, content);

    format!(
        "You are a summarization expert. Summarize the following post content into a single, \
concise paragraph (maximum 1 sentence). The summary should focus on the main topic \
and key takeaways.\n\
\n\
POST CONTENT:\n\
---\n\
{}\n\
---\n",
        full_text.trim()
    )
}

#[derive(Clone)]
pub struct SummarizationService {
    client: Arc<dyn ModelClient>,
}

impl SummarizationService {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    #[tracing::instrument(skip_all, fields(title_len = title.len(), content_len = content.len()))]
    pub async fn summarize(&self, title: &str, content: &str) -> Result<String, ProviderError> {
        let prompt = build_prompt(title, content);

        match self.client.complete(&prompt).await {
            Ok(text) => Ok(text.trim().to_string()),
            Err(e) => {
                tracing::error!(error = %e, "Summary generation failed");
                Err(e)
            }
        }
    }
}
