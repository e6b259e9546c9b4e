//! Infrastructure layer for opale
//!
//! This crate contains adapters that implement the ports defined
//! in the application layer, including configuration file loading.

pub mod config;
pub mod gemini;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use config::{
    ConfigIssue, ConfigLoader, FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig,
    FileQueryConfig, FileReplConfig, FileStorageConfig, Severity,
};
pub use gemini::{GeminiConfig, GeminiError, GeminiLlmGateway};
pub use logging::JsonlConversationLogger;
pub use storage::{JsonFileStore, MemoryStore};
