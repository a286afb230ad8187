//! Fixed travel-service corpus and one-time seeding.

use crate::core::errors::AppError;
use crate::llm::provider::ChatProvider;
use crate::rag::store::{StoredDocument, VectorStore};

const CORPUS: [(&str, &str); 5] = [
    (
        "doc-1",
        "Contoso Travel offers luxury vacation packages to exotic destinations worldwide.",
    ),
    (
        "doc-2",
        "Our premium travel services include personalized itinerary planning and 24/7 concierge support.",
    ),
    (
        "doc-3",
        "Contoso's travel insurance covers medical emergencies, trip cancellations, and lost baggage.",
    ),
    (
        "doc-4",
        "Popular destinations include the Maldives, Swiss Alps, and African safaris.",
    ),
    (
        "doc-5",
        "Contoso Travel provides exclusive access to boutique hotels and private guided tours.",
    ),
];

pub fn corpus_documents() -> Vec<StoredDocument> {
    CORPUS
        .iter()
        .map(|(id, text)| StoredDocument {
            id: (*id).to_string(),
            content: (*text).to_string(),
            metadata: serde_json::json!({ "source": "travel_brochure", "type": "service_description" }),
        })
        .collect()
}

/// Embeds and inserts the corpus only when the collection is empty.
pub async fn seed_corpus(
    store: &dyn VectorStore,
    provider: &dyn ChatProvider,
    embedding_model: &str,
) -> Result<(), AppError> {
    if store.count().await? > 0 {
        tracing::info!("corpus already seeded, skipping");
        return Ok(());
    }

    let documents = corpus_documents();
    let inputs: Vec<String> = documents.iter().map(|d| d.content.clone()).collect();
    let embeddings = provider.embed(&inputs, embedding_model).await?;

    if embeddings.len() != documents.len() {
        return Err(AppError::Internal(format!(
            "embedding count mismatch: expected {}, got {}",
            documents.len(),
            embeddings.len()
        )));
    }

    let count = documents.len();
    store
        .insert_batch(documents.into_iter().zip(embeddings).collect())
        .await?;

    tracing::info!(documents = count, "seeded corpus");
    Ok(())
}
