//! Domain layer for opale
//!
//! This crate contains the core entities and value objects.
//! It has no dependencies on infrastructure or presentation concerns.
//!
//! # Core Concepts
//!
//! ## Prompt templates
//!
//! A [`PromptTemplate`] is a named, reusable prompt string. Its content may
//! embed the literal [`PLACEHOLDER`] token, which is replaced with
//! [`PLACEHOLDER_SUBSTITUTION`] when the prompt is submitted.
//!
//! ## Query session
//!
//! A [`QuerySession`] holds the single active query: the editable input and a
//! [`QueryStatus`] that moves through `Idle -> Pending -> Succeeded | Failed`.

pub mod core;
pub mod prompt;
pub mod query;

// Re-export commonly used types
pub use core::{error::DomainError, string::preview};
pub use prompt::{
    PLACEHOLDER, PLACEHOLDER_SUBSTITUTION, PromptTemplate, TemplateDraft, TemplateId,
    compose_prompt, default_templates,
};
pub use query::{QueryInput, QuerySession, QueryStatus, SubmitRejection};
