//! Prompt domain
//!
//! Named prompt templates and the placeholder substitution applied when a
//! prompt is submitted.

mod placeholder;
mod template;

pub use placeholder::{PLACEHOLDER, PLACEHOLDER_SUBSTITUTION, compose_prompt};
pub use template::{PromptTemplate, TemplateDraft, TemplateId, default_templates};
