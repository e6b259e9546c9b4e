//! Configuration file loading for opale
//!
//! This module handles file I/O and merging of configuration from multiple sources.
//! The priority order (highest to lowest):
//!
//! 1. `OPALE_*` environment variables (`OPALE_GEMINI__MODEL=...`)
//! 2. `--config <path>` specified file
//! 3. Project root: `./opale.toml` or `./.opale.toml`
//! 4. XDG config: `$XDG_CONFIG_HOME/opale/config.toml`
//! 5. Default values

mod file_config;
mod loader;

pub use file_config::{
    ConfigIssue, FileConfig, FileGeminiConfig, FileLoggingConfig, FileOutputConfig,
    FileQueryConfig, FileReplConfig, FileStorageConfig, Severity,
};
pub use loader::ConfigLoader;
