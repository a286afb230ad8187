use async_trait::async_trait;
use tokio::sync::mpsc;

use super::types::{ChatRequest, RawStreamDelta};
use crate::core::errors::AppError;

#[async_trait]
pub trait ChatProvider: Send + Sync {
    /// return the provider name (e.g. "openai")
    fn name(&self) -> &str;

    /// check if the endpoint is reachable
    async fn health_check(&self) -> Result<bool, AppError>;

    /// chat completion, streaming; the channel closing signals completion
    async fn stream_chat(
        &self,
        request: ChatRequest,
        model_id: &str,
    ) -> Result<mpsc::Receiver<Result<RawStreamDelta, AppError>>, AppError>;

    /// generate embeddings
    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, AppError>;
}
