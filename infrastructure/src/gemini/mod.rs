//! Gemini API adapter
//!
//! Implements the [`LlmGateway`](opale_application::LlmGateway) port over the
//! `generateContent` REST endpoint.

pub mod error;
pub mod gateway;
pub mod protocol;

pub use error::GeminiError;
pub use gateway::{GeminiConfig, GeminiLlmGateway};
