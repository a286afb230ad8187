//! Retrieval orchestration.
//!
//! Embeds the query, asks the vector store for the top-K documents, and
//! formats them for prompt augmentation. Result ordering is whatever the
//! store returned; it is never re-sorted here.

use std::sync::Arc;

use crate::core::errors::AppError;
use crate::llm::provider::ChatProvider;
use crate::rag::augment::build_augmented_prompt;
use crate::rag::store::{DocumentMatch, VectorStore};

/// Literal sentinel used when the index returns no documents.
pub const NO_CONTEXT_SENTINEL: &str = "No retrieval context found.";

pub struct Retriever {
    store: Arc<dyn VectorStore>,
    provider: Arc<dyn ChatProvider>,
    embedding_model: String,
    top_k: usize,
}

impl Retriever {
    pub fn new(
        store: Arc<dyn VectorStore>,
        provider: Arc<dyn ChatProvider>,
        embedding_model: String,
        top_k: usize,
    ) -> Self {
        Self {
            store,
            provider,
            embedding_model,
            top_k,
        }
    }

    pub async fn retrieve(&self, query: &str) -> Result<String, AppError> {
        let embeddings = self
            .provider
            .embed(&[query.to_string()], &self.embedding_model)
            .await?;
        let query_embedding = embeddings
            .first()
            .ok_or_else(|| AppError::Internal("embedding response was empty".to_string()))?;

        let matches = self.store.search(query_embedding, self.top_k).await?;
        tracing::debug!(matches = matches.len(), "similarity search complete");

        if matches.is_empty() {
            return Ok(NO_CONTEXT_SENTINEL.to_string());
        }

        Ok(format_matches(&matches))
    }

    /// Retrieval composed with prompt augmentation.
    pub async fn augmented_prompt(&self, query: &str) -> Result<String, AppError> {
        let context = self.retrieve(query).await?;
        Ok(build_augmented_prompt(query, &context))
    }
}

/// Two-line block per document, blocks separated by a blank line.
pub fn format_matches(matches: &[DocumentMatch]) -> String {
    let blocks: Vec<String> = matches
        .iter()
        .map(|m| format!("Document: {}\nMetadata: {}", m.document.content, m.document.metadata))
        .collect();
    blocks.join("\n\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use tokio::sync::mpsc;

    use crate::llm::types::{ChatRequest, RawStreamDelta};
    use crate::rag::store::StoredDocument;

    struct FixedStore {
        matches: Vec<DocumentMatch>,
    }

    #[async_trait]
    impl VectorStore for FixedStore {
        async fn insert_batch(
            &self,
            _items: Vec<(StoredDocument, Vec<f32>)>,
        ) -> Result<(), AppError> {
            Ok(())
        }

        async fn search(
            &self,
            _query_embedding: &[f32],
            limit: usize,
        ) -> Result<Vec<DocumentMatch>, AppError> {
            Ok(self.matches.iter().take(limit).cloned().collect())
        }

        async fn count(&self) -> Result<usize, AppError> {
            Ok(self.matches.len())
        }
    }

    struct EmbedOnlyProvider;

    #[async_trait]
    impl ChatProvider for EmbedOnlyProvider {
        fn name(&self) -> &str {
            "fake"
        }

        async fn health_check(&self) -> Result<bool, AppError> {
            Ok(true)
        }

        async fn stream_chat(
            &self,
            _request: ChatRequest,
            _model_id: &str,
        ) -> Result<mpsc::Receiver<Result<RawStreamDelta, AppError>>, AppError> {
            let (_tx, rx) = mpsc::channel(1);
            Ok(rx)
        }

        async fn embed(
            &self,
            inputs: &[String],
            _model_id: &str,
        ) -> Result<Vec<Vec<f32>>, AppError> {
            Ok(inputs.iter().map(|_| vec![1.0, 0.0]).collect())
        }
    }

    fn make_match(id: &str, content: &str) -> DocumentMatch {
        DocumentMatch {
            document: StoredDocument {
                id: id.to_string(),
                content: content.to_string(),
                metadata: serde_json::json!({ "source": "travel_brochure" }),
            },
            score: 0.9,
        }
    }

    fn retriever(matches: Vec<DocumentMatch>) -> Retriever {
        Retriever::new(
            Arc::new(FixedStore { matches }),
            Arc::new(EmbedOnlyProvider),
            "embed-model".to_string(),
            2,
        )
    }

    #[tokio::test]
    async fn empty_index_returns_literal_sentinel() {
        let result = retriever(vec![]).retrieve("anything").await.unwrap();
        assert_eq!(result, NO_CONTEXT_SENTINEL);
    }

    #[tokio::test]
    async fn matches_format_as_document_metadata_blocks() {
        let result = retriever(vec![
            make_match("d1", "Insurance covers emergencies."),
            make_match("d2", "Concierge support around the clock."),
        ])
        .retrieve("insurance")
        .await
        .unwrap();

        let blocks: Vec<&str> = result.split("\n\n").collect();
        assert_eq!(blocks.len(), 2);
        assert!(blocks[0].starts_with("Document: Insurance covers emergencies.\nMetadata: "));
        assert!(blocks[1].starts_with("Document: Concierge support around the clock."));
    }

    #[tokio::test]
    async fn store_order_is_preserved() {
        let result = retriever(vec![make_match("d2", "second ranked"), make_match("d1", "first ranked")])
            .retrieve("query")
            .await
            .unwrap();

        let second_pos = result.find("second ranked").unwrap();
        let first_pos = result.find("first ranked").unwrap();
        assert!(second_pos < first_pos);
    }

    #[tokio::test]
    async fn augmented_prompt_embeds_sentinel_under_retrieved_context() {
        let prompt = retriever(vec![]).augmented_prompt("any question").await.unwrap();
        assert!(prompt.contains(&format!("Retrieved Context:\n{}", NO_CONTEXT_SENTINEL)));
        assert!(prompt.contains("User Query: any question"));
    }
}
