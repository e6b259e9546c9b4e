//! Command-line interface definitions and prompt subcommand handling

pub mod commands;
pub mod prompts;
