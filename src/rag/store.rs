//! VectorStore trait — abstract interface for the similarity-search backend.
//!
//! The primary implementation is `SqliteVectorStore` in the `sqlite` module.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::core::errors::AppError;

/// A corpus document, immutable once inserted.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredDocument {
    /// Unique document identifier.
    pub id: String,
    /// Free-text content.
    pub content: String,
    /// Fixed metadata attached at insert time.
    pub metadata: Value,
}

/// Result of a similarity search.
#[derive(Debug, Clone)]
pub struct DocumentMatch {
    pub document: StoredDocument,
    /// Similarity score (higher = better).
    pub score: f32,
}

#[async_trait]
pub trait VectorStore: Send + Sync {
    /// Insert documents with their embedding vectors. Re-inserting an id
    /// replaces the previous row, so ids stay unique within the collection.
    async fn insert_batch(&self, items: Vec<(StoredDocument, Vec<f32>)>) -> Result<(), AppError>;

    /// Documents most similar to the query embedding, ranked by the store.
    /// Callers must not re-sort the result.
    async fn search(
        &self,
        query_embedding: &[f32],
        limit: usize,
    ) -> Result<Vec<DocumentMatch>, AppError>;

    /// Total number of stored documents.
    async fn count(&self) -> Result<usize, AppError>;
}
