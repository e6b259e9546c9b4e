//! Presentation layer for opale
//!
//! This crate contains CLI definitions, output formatters, the query
//! spinner and the interactive search bar.

pub mod chat;
pub mod cli;
pub mod config;
pub mod output;
pub mod progress;

// Re-export commonly used types
pub use chat::SearchRepl;
pub use cli::commands::{Cli, Command, OutputFormat, PromptsCommand};
pub use cli::prompts::{PromptCommandOutcome, resolve_template, run_prompts_command};
pub use config::{OutputConfig, ReplConfig};
pub use output::console::ConsoleFormatter;
pub use progress::spinner::QuerySpinner;
