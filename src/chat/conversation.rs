//! Conversation loop.
//!
//! One state machine per user turn, turns processed strictly sequentially.
//! Each turn augments the user query with retrieved context, streams the
//! model's response, and — when the model called tools — feeds the recorded
//! results back through one extra streamed round-trip before the turn
//! completes.

use crate::chat::agent::ChatAgent;
use crate::chat::transcript::{Role, Transcript};
use crate::core::errors::AppError;
use crate::llm::types::{StreamEvent, ToolInvocation};
use crate::rag::retriever::Retriever;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnPhase {
    AwaitingTurn,
    StreamingInitialResponse,
    AwaitingToolResults,
    StreamingFinalResponse,
    TurnComplete,
}

/// Everything the renderer needs for one completed turn.
#[derive(Debug, Clone)]
pub struct TurnReport {
    pub user_text: String,
    pub augmented_prompt: String,
    pub invocations: Vec<ToolInvocation>,
    pub assistant_text: String,
}

pub struct ConversationLoop {
    agent: ChatAgent,
    retriever: Retriever,
    transcript: Transcript,
    phase: TurnPhase,
}

impl ConversationLoop {
    pub fn new(agent: ChatAgent, retriever: Retriever) -> Self {
        Self {
            agent,
            retriever,
            transcript: Transcript::new(),
            phase: TurnPhase::AwaitingTurn,
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn phase(&self) -> TurnPhase {
        self.phase
    }

    /// Runs one full turn. Failures from the retriever or the chat stream
    /// propagate unhandled; there are no retries and no partial-turn
    /// recovery.
    pub async fn run_turn(&mut self, user_input: &str) -> Result<TurnReport, AppError> {
        self.transcript.push(Role::User, user_input);
        let augmented = self.retriever.augmented_prompt(user_input).await?;
        self.transcript.push(Role::System, augmented.clone());

        self.set_phase(TurnPhase::StreamingInitialResponse);
        let mut initial_buffer = String::new();
        let mut invocations: Vec<ToolInvocation> = Vec::new();
        // latest result per function name wins; first-seen order is kept
        let mut results: Vec<(String, String)> = Vec::new();

        let mut rx = self.agent.invoke_stream(&self.transcript).await?;
        while let Some(event) = rx.recv().await {
            match event? {
                StreamEvent::TextDelta(text) => initial_buffer.push_str(&text),
                StreamEvent::ToolCallRequest { name, arguments } => {
                    invocations.push(ToolInvocation {
                        name,
                        arguments,
                        result: None,
                    });
                }
                StreamEvent::ToolCallResult { name, result } => {
                    if let Some(entry) = invocations
                        .iter_mut()
                        .rev()
                        .find(|inv| inv.name == name && inv.result.is_none())
                    {
                        entry.result = Some(result.clone());
                    }
                    match results.iter_mut().find(|(n, _)| *n == name) {
                        Some((_, existing)) => *existing = result,
                        None => results.push((name, result)),
                    }
                }
            }
        }

        let final_text = if results.is_empty() {
            initial_buffer
        } else {
            self.set_phase(TurnPhase::AwaitingToolResults);
            self.transcript.push(Role::System, format_tool_results(&results));

            self.set_phase(TurnPhase::StreamingFinalResponse);
            let mut final_buffer = String::new();
            let mut rx = self.agent.invoke_stream(&self.transcript).await?;
            while let Some(event) = rx.recv().await {
                if let StreamEvent::TextDelta(text) = event? {
                    final_buffer.push_str(&text);
                }
            }

            // The second pass saw the tool results, so its text supersedes
            // the first unless it came back empty.
            if final_buffer.is_empty() {
                initial_buffer
            } else {
                final_buffer
            }
        };

        self.set_phase(TurnPhase::TurnComplete);
        self.transcript.push(Role::Assistant, final_text.clone());

        let report = TurnReport {
            user_text: user_input.to_string(),
            augmented_prompt: augmented,
            invocations,
            assistant_text: final_text,
        };

        self.set_phase(TurnPhase::AwaitingTurn);
        Ok(report)
    }

    fn set_phase(&mut self, phase: TurnPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "turn phase transition");
        self.phase = phase;
    }
}

fn format_tool_results(results: &[(String, String)]) -> String {
    let mut out = String::from("Tool results for this turn:\n");
    for (name, result) in results {
        out.push_str(&format!("- {}: {}\n", name, result));
    }
    out
}
