use async_trait::async_trait;
use futures_util::StreamExt;
use reqwest::Client;
use serde_json::{json, Value};
use tokio::sync::mpsc;

use super::provider::ChatProvider;
use super::types::{ChatRequest, RawStreamDelta, ToolCall};
use crate::core::errors::AppError;

/// OpenAI-compatible chat-completion client.
///
/// Talks to any endpoint exposing `/chat/completions` and `/embeddings`
/// with bearer authentication and SSE streaming.
#[derive(Clone)]
pub struct OpenAiProvider {
    base_url: String,
    api_key: String,
    client: Client,
}

impl OpenAiProvider {
    pub fn new(base_url: String, api_key: String) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            client: Client::new(),
        }
    }

    fn chat_body(request: &ChatRequest, model_id: &str, stream: bool) -> Value {
        let mut body = json!({
            "model": model_id,
            "messages": request.messages,
            "stream": stream,
        });

        if let Some(obj) = body.as_object_mut() {
            if !request.tools.is_empty() {
                obj.insert("tools".to_string(), json!(request.tools));
                obj.insert(
                    "tool_choice".to_string(),
                    json!(request.function_choice.as_wire()),
                );
            }
            if let Some(t) = request.temperature {
                obj.insert("temperature".to_string(), json!(t));
            }
            if let Some(t) = request.max_tokens {
                obj.insert("max_tokens".to_string(), json!(t));
            }
        }

        body
    }
}

/// Assembles per-index tool-call fragments from streamed deltas.
///
/// The endpoint streams tool calls as partial objects: the first delta for an
/// index carries the function name, later deltas append argument text.
#[derive(Debug, Default)]
pub struct ToolCallAccumulator {
    pending: Vec<ToolCall>,
    finished: bool,
}

impl ToolCallAccumulator {
    pub fn apply(&mut self, payload: &Value) {
        let Some(deltas) = payload["choices"][0]["delta"]["tool_calls"].as_array() else {
            return;
        };

        for delta in deltas {
            let index = delta["index"].as_u64().unwrap_or(0) as usize;
            while self.pending.len() <= index {
                self.pending.push(ToolCall {
                    name: String::new(),
                    arguments: String::new(),
                });
            }

            if let Some(name) = delta["function"]["name"].as_str() {
                self.pending[index].name.push_str(name);
            }
            if let Some(fragment) = delta["function"]["arguments"].as_str() {
                self.pending[index].arguments.push_str(fragment);
            }
        }
    }

    /// Returns the assembled calls once; later calls yield `None`.
    pub fn finish(&mut self) -> Option<Vec<ToolCall>> {
        if self.finished || self.pending.is_empty() {
            return None;
        }
        self.finished = true;
        Some(std::mem::take(&mut self.pending))
    }
}

pub fn content_delta(payload: &Value) -> Option<&str> {
    payload["choices"][0]["delta"]["content"]
        .as_str()
        .filter(|s| !s.is_empty())
}

pub fn finished_with_tool_calls(payload: &Value) -> bool {
    payload["choices"][0]["finish_reason"].as_str() == Some("tool_calls")
}

#[async_trait]
impl ChatProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn health_check(&self) -> Result<bool, AppError> {
        let url = format!("{}/models", self.base_url);
        let res = self
            .client
            .get(&url)
            .bearer_auth(&self.api_key)
            .send()
            .await;
        match res {
            Ok(resp) => Ok(resp.status().is_success()),
            Err(_) => Ok(false),
        }
    }

    async fn stream_chat(
        &self,
        request: ChatRequest,
        model_id: &str,
    ) -> Result<mpsc::Receiver<Result<RawStreamDelta, AppError>>, AppError> {
        let url = format!("{}/chat/completions", self.base_url);
        let body = Self::chat_body(&request, model_id, true);

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(AppError::internal)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!("chat stream error: {}", text)));
        }

        let (tx, rx) = mpsc::channel(32);
        let mut stream = res.bytes_stream();

        tokio::spawn(async move {
            let mut accumulator = ToolCallAccumulator::default();
            // SSE lines can split across byte chunks; carry the remainder.
            let mut carry = String::new();

            while let Some(item) = stream.next().await {
                match item {
                    Ok(bytes) => {
                        carry.push_str(&String::from_utf8_lossy(&bytes));
                        while let Some(pos) = carry.find('\n') {
                            let line = carry[..pos].trim().to_string();
                            carry.drain(..=pos);
                            if line.is_empty() {
                                continue;
                            }
                            if line == "data: [DONE]" {
                                if let Some(calls) = accumulator.finish() {
                                    let _ = tx.send(Ok(RawStreamDelta::ToolCalls(calls))).await;
                                }
                                return;
                            }

                            let Some(data) = line.strip_prefix("data: ") else {
                                continue;
                            };
                            let Ok(payload) = serde_json::from_str::<Value>(data) else {
                                continue;
                            };

                            if let Some(content) = content_delta(&payload) {
                                if tx
                                    .send(Ok(RawStreamDelta::Content(content.to_string())))
                                    .await
                                    .is_err()
                                {
                                    return;
                                }
                            }

                            accumulator.apply(&payload);
                            if finished_with_tool_calls(&payload) {
                                if let Some(calls) = accumulator.finish() {
                                    if tx
                                        .send(Ok(RawStreamDelta::ToolCalls(calls)))
                                        .await
                                        .is_err()
                                    {
                                        return;
                                    }
                                }
                            }
                        }
                    }
                    Err(e) => {
                        let _ = tx.send(Err(AppError::internal(e))).await;
                        return;
                    }
                }
            }
        });

        Ok(rx)
    }

    async fn embed(&self, inputs: &[String], model_id: &str) -> Result<Vec<Vec<f32>>, AppError> {
        let url = format!("{}/embeddings", self.base_url);

        let body = json!({
            "model": model_id,
            "input": inputs,
        });

        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await
            .map_err(AppError::internal)?;

        if !res.status().is_success() {
            let text = res.text().await.unwrap_or_default();
            return Err(AppError::Internal(format!("embedding error: {}", text)));
        }

        let payload: Value = res.json().await.map_err(AppError::internal)?;

        let mut embeddings = Vec::new();
        if let Some(data) = payload["data"].as_array() {
            for item in data {
                if let Some(vals) = item["embedding"].as_array() {
                    let vec: Vec<f32> = vals
                        .iter()
                        .filter_map(|v| v.as_f64().map(|f| f as f32))
                        .collect();
                    embeddings.push(vec);
                }
            }
        }

        Ok(embeddings)
    }
}
