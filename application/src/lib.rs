//! Application layer for opale
//!
//! This crate contains use cases and port definitions.
//! It depends only on the domain layer.

pub mod ports;
pub mod use_cases;

// Re-export commonly used types
pub use ports::{
    conversation_logger::{
        ConversationEvent, ConversationLogger, NoConversationLogger, QueryEvent,
    },
    key_value_store::{KeyValueStore, StorageError},
    llm_gateway::{GatewayError, LlmGateway, UNEXPECTED_ERROR_MESSAGE},
    progress::{NoProgress, QueryProgressNotifier},
};
pub use use_cases::prompt_store::{PROMPTS_KEY, PromptStore, PromptStoreError};
pub use use_cases::query_service::{PendingQuery, QueryOutcome, QueryService};
