//! Prompt augmentation.
//!
//! Pure string template. The context is passed through verbatim — callers may
//! hand in the "no context" sentinel and it is embedded as-is.

pub const ANSWER_INSTRUCTION: &str = "Answer the user query using only the retrieved context \
above. If the context does not contain the information needed, state that no relevant context \
is available.";

pub fn build_augmented_prompt(query: &str, context: &str) -> String {
    format!(
        "Retrieved Context:\n{}\n\nUser Query: {}\n\n{}",
        context, query, ANSWER_INSTRUCTION
    )
}
