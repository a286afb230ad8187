//! Plain-text rendering of completed turns.

use crate::chat::conversation::TurnReport;

pub fn render_turn(report: &TurnReport, turn_index: usize) -> String {
    let mut out = String::new();
    out.push_str(&format!("=== Turn {} ===\n", turn_index));
    out.push_str(&format!("User: {}\n", report.user_text));

    out.push_str("--- retrieval context ---\n");
    for line in report.augmented_prompt.lines() {
        out.push_str("  ");
        out.push_str(line);
        out.push('\n');
    }

    if !report.invocations.is_empty() {
        out.push_str("--- tool calls ---\n");
        for invocation in &report.invocations {
            out.push_str(&format!("  -> {}({})\n", invocation.name, invocation.arguments));
            if let Some(result) = &invocation.result {
                out.push_str(&format!("  <- {}\n", result.replace('\n', "\n     ")));
            }
        }
    }

    out.push_str(&format!("Assistant: {}\n", report.assistant_text));
    out
}
