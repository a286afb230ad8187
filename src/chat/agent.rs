//! Chat agent: one streamed model pass with tool dispatch.
//!
//! Text deltas are forwarded as-is. Completed tool calls surface as a
//! request event, are executed against the registry, and their outcome
//! surfaces as a result event. Execution errors become the result string so
//! the model can see the failure on the next pass. The agent never re-invokes
//! the model itself; the conversation loop owns that decision.

use std::sync::Arc;

use serde_json::{json, Value};
use tokio::sync::mpsc;

use crate::chat::transcript::Transcript;
use crate::core::errors::AppError;
use crate::llm::provider::ChatProvider;
use crate::llm::types::{ChatRequest, FunctionChoice, RawStreamDelta, StreamEvent};
use crate::tools::ToolRegistry;

pub struct ChatAgent {
    provider: Arc<dyn ChatProvider>,
    tools: Arc<ToolRegistry>,
    model_id: String,
    function_choice: FunctionChoice,
}

impl ChatAgent {
    pub fn new(
        provider: Arc<dyn ChatProvider>,
        tools: Arc<ToolRegistry>,
        model_id: String,
        function_choice: FunctionChoice,
    ) -> Self {
        Self {
            provider,
            tools,
            model_id,
            function_choice,
        }
    }

    pub async fn invoke_stream(
        &self,
        transcript: &Transcript,
    ) -> Result<mpsc::Receiver<Result<StreamEvent, AppError>>, AppError> {
        let request = ChatRequest::new(transcript.as_messages())
            .with_tools(self.tools.specs(), self.function_choice);
        let mut raw = self.provider.stream_chat(request, &self.model_id).await?;

        let (tx, rx) = mpsc::channel(32);
        let tools = Arc::clone(&self.tools);

        tokio::spawn(async move {
            while let Some(item) = raw.recv().await {
                match item {
                    Ok(RawStreamDelta::Content(text)) => {
                        if tx.send(Ok(StreamEvent::TextDelta(text))).await.is_err() {
                            return;
                        }
                    }
                    Ok(RawStreamDelta::ToolCalls(calls)) => {
                        for call in calls {
                            let request_event = StreamEvent::ToolCallRequest {
                                name: call.name.clone(),
                                arguments: call.arguments.clone(),
                            };
                            if tx.send(Ok(request_event)).await.is_err() {
                                return;
                            }

                            let args: Value =
                                serde_json::from_str(&call.arguments).unwrap_or_else(|_| json!({}));
                            let result = match tools.execute(&call.name, &args) {
                                Ok(result) => result,
                                Err(e) => {
                                    tracing::warn!(tool = %call.name, error = %e, "tool call failed");
                                    format!("Tool error: {}", e)
                                }
                            };

                            let result_event = StreamEvent::ToolCallResult {
                                name: call.name,
                                result,
                            };
                            if tx.send(Ok(result_event)).await.is_err() {
                                return;
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(e)).await;
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }
}
