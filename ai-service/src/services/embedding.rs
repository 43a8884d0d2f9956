//! Embedding generation for documents and search queries.

use std::sync::Arc;

use super::providers::{ModelClient, ProviderError, TaskHint};

#[derive(Clone)]
pub struct EmbeddingService {
    client: Arc<dyn ModelClient>,
}

impl EmbeddingService {
    pub fn new(client: Arc<dyn ModelClient>) -> Self {
        Self { client }
    }

    /// Embedding model name reported in responses.
    pub fn model(&self) -> &str {
        self.client.embedding_model()
    }

    pub async fn embed(&self, text: &str, hint: TaskHint) -> Result<Vec<f32>, ProviderError> {
        match hint {
            TaskHint::Document => self.embed_document(text).await,
            TaskHint::Query => self.embed_query(text).await,
        }
    }

    /// Embed text that will be indexed.
    pub async fn embed_document(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.client
            .embed(text, TaskHint::Document)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Document embedding failed"))
    }

    /// Embed a search query.
    pub async fn embed_query(&self, text: &str) -> Result<Vec<f32>, ProviderError> {
        self.client
            .embed(text, TaskHint::Query)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Query embedding failed"))
    }

    /// Embed each text as a document, one call at a time, in input order.
    ///
    /// All-or-nothing: the first failure aborts the batch and no partial
    /// results are returned.
    #[tracing::instrument(skip_all, fields(count = texts.len()))]
    pub async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, ProviderError> {
        let mut embeddings = Vec::with_capacity(texts.len());

        for (index, text) in texts.iter().enumerate() {
            let embedding = self.embed_document(text).await.inspect_err(|_| {
                tracing::error!(index, "Batch embedding aborted");
            })?;
            embeddings.push(embedding);
        }

        Ok(embeddings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::providers::mock::{MockModelClient, RecordedCall};

    fn texts(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[tokio::test]
    async fn document_and_query_use_their_own_hints() {
        let mock = Arc::new(MockModelClient::new().with_dimensions(4));
        let service = EmbeddingService::new(mock.clone());

        service.embed_document("doc").await.unwrap();
        service.embed_query("query").await.unwrap();

        assert_eq!(
            mock.calls(),
            vec![
                RecordedCall::Embed {
                    text: "doc".to_string(),
                    hint: TaskHint::Document
                },
                RecordedCall::Embed {
                    text: "query".to_string(),
                    hint: TaskHint::Query
                },
            ]
        );
    }

    #[tokio::test]
    async fn batch_preserves_input_order() {
        let mock = Arc::new(MockModelClient::new().with_dimensions(2));
        let service = EmbeddingService::new(mock.clone());

        let embeddings = service.embed_batch(&texts(&["a", "b", "c"])).await.unwrap();

        assert_eq!(embeddings, vec![vec![0.0, 0.0], vec![1.0, 1.0], vec![2.0, 2.0]]);
        let embedded: Vec<String> = mock
            .calls()
            .into_iter()
            .map(|call| match call {
                RecordedCall::Embed { text, hint } => {
                    assert_eq!(hint, TaskHint::Document);
                    text
                }
                other => panic!("unexpected call: {:?}", other),
            })
            .collect();
        assert_eq!(embedded, texts(&["a", "b", "c"]));
    }

    #[tokio::test]
    async fn batch_failure_aborts_without_partial_results() {
        let mock = Arc::new(MockModelClient::new().failing_embed_at(1));
        let service = EmbeddingService::new(mock.clone());

        let result = service.embed_batch(&texts(&["a", "b", "c"])).await;

        assert!(matches!(result, Err(ProviderError::NetworkError(_))));
        // The third text is never sent.
        assert_eq!(mock.calls().len(), 2);
    }

    #[tokio::test]
    async fn empty_batch_makes_no_calls() {
        let mock = Arc::new(MockModelClient::new());
        let service = EmbeddingService::new(mock.clone());

        let embeddings = service.embed_batch(&[]).await.unwrap();

        assert!(embeddings.is_empty());
        assert!(mock.calls().is_empty());
    }
}
