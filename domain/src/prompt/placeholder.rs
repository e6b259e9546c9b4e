//! Placeholder substitution for submitted prompts

/// Literal token a template may embed to mark where context goes.
pub const PLACEHOLDER: &str = "{selection}";

/// Fixed text substituted for every [`PLACEHOLDER`] occurrence.
///
/// There is no text-selection capture, so the token is replaced textually.
pub const PLACEHOLDER_SUBSTITUTION: &str = "the provided context";

/// Compose the final prompt text sent to the model.
///
/// Every literal occurrence of [`PLACEHOLDER`] is replaced; nothing else in
/// the input is touched.
pub fn compose_prompt(raw_input: &str) -> String {
    raw_input.replace(PLACEHOLDER, PLACEHOLDER_SUBSTITUTION)
}
