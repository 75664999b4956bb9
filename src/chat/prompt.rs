//! Fixed prompt template and system instruction.
//!
//! The template is deliberately rigid: four substitution points, rendered the
//! same way on every request. Empty retrieval results produce empty sections,
//! never omitted ones.

/// System instruction prepended to every chat prompt.
pub const SYSTEM_PROMPT: &str = "You are PregGo, a friendly, soothing pregnancy support assistant. Use the retrieved documents and the style examples to:
1) Answer clearly and accurately.
2) Be supportive, calm, and kind.
Do not give medical diagnoses; encourage user to seek medical help for emergencies.";

/// Renders the chat prompt. Pure; no conditional logic.
pub fn render_prompt(
    system_prompt: &str,
    context_docs: &str,
    style_examples: &str,
    user_input: &str,
) -> String {
    format!(
        "{system_prompt}\n\nContext from docs:\n{context_docs}\n\nStyle examples:\n{style_examples}\n\nUser asks:\n{user_input}\n\nNow reply in a calm, friendly, helpful tone. Keep it short, 2-6 sentences max.\n"
    )
}
