use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

/// Function-choice toggle understood by the chat-completion endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FunctionChoice {
    /// The model may or may not call registered functions.
    #[default]
    Auto,
    /// The model must call at least one registered function.
    Required,
    /// The model must not call any registered function.
    Disabled,
}

impl FunctionChoice {
    pub fn as_wire(&self) -> &'static str {
        match self {
            FunctionChoice::Auto => "auto",
            FunctionChoice::Required => "required",
            FunctionChoice::Disabled => "none",
        }
    }
}

#[derive(Debug, Clone)]
pub struct ChatRequest {
    pub messages: Vec<ChatMessage>,
    pub tools: Vec<Value>,
    pub function_choice: FunctionChoice,
    pub temperature: Option<f64>,
    pub max_tokens: Option<i32>,
}

impl ChatRequest {
    pub fn new(messages: Vec<ChatMessage>) -> Self {
        Self {
            messages,
            tools: Vec::new(),
            function_choice: FunctionChoice::default(),
            temperature: None,
            max_tokens: None,
        }
    }

    pub fn with_tools(mut self, tools: Vec<Value>, function_choice: FunctionChoice) -> Self {
        self.tools = tools;
        self.function_choice = function_choice;
        self
    }
}

/// A completed tool call assembled from streamed fragments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolCall {
    pub name: String,
    /// Serialized JSON arguments exactly as emitted by the model.
    pub arguments: String,
}

/// One unit yielded by the provider's raw completion stream.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RawStreamDelta {
    Content(String),
    ToolCalls(Vec<ToolCall>),
}

/// One unit yielded by the agent stream, after tool dispatch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StreamEvent {
    TextDelta(String),
    ToolCallRequest { name: String, arguments: String },
    ToolCallResult { name: String, result: String },
}

/// Tool activity recorded during one turn, kept for display and for the
/// follow-up system message.
#[derive(Debug, Clone, Serialize)]
pub struct ToolInvocation {
    pub name: String,
    pub arguments: String,
    pub result: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn function_choice_maps_to_wire_values() {
        assert_eq!(FunctionChoice::Auto.as_wire(), "auto");
        assert_eq!(FunctionChoice::Required.as_wire(), "required");
        assert_eq!(FunctionChoice::Disabled.as_wire(), "none");
    }

    #[test]
    fn with_tools_attaches_tools_and_choice() {
        let request = ChatRequest::new(vec![])
            .with_tools(vec![serde_json::json!({"type": "function"})], FunctionChoice::Required);

        assert_eq!(request.tools.len(), 1);
        assert_eq!(request.function_choice, FunctionChoice::Required);
    }
}
