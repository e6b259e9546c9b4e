//! Interactive search bar
//!
//! Provides a readline-based loop for sending queries and managing saved
//! prompts.

mod command;
mod repl;

pub use command::ReplCommand;
pub use repl::SearchRepl;
