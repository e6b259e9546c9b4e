//! Raw TOML configuration data types
//!
//! These structs represent the exact structure of the TOML config file.

mod gemini;
mod output;
mod query;
mod repl;
mod storage;

pub use gemini::FileGeminiConfig;
pub use output::{FileLoggingConfig, FileOutputConfig};
pub use query::FileQueryConfig;
pub use repl::FileReplConfig;
pub use storage::FileStorageConfig;

use serde::{Deserialize, Serialize};

/// Severity level of a configuration issue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The setting cannot work and is replaced by a fallback.
    Error,
    /// The setting works but may not behave as expected.
    Warning,
}

/// A detected issue in the loaded configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigIssue {
    pub severity: Severity,
    /// Dotted path of the offending field, e.g. `gemini.model`
    pub field: &'static str,
    pub message: String,
}

impl ConfigIssue {
    fn warning(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Warning,
            field,
            message: message.into(),
        }
    }

    fn error(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            severity: Severity::Error,
            field,
            message: message.into(),
        }
    }
}

/// Complete file configuration (raw TOML structure)
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileConfig {
    /// Gemini API settings
    pub gemini: FileGeminiConfig,
    /// Query settings
    pub query: FileQueryConfig,
    /// Prompt storage settings
    pub storage: FileStorageConfig,
    /// REPL settings
    pub repl: FileReplConfig,
    /// Output settings
    pub output: FileOutputConfig,
    /// Conversation log settings
    pub logging: FileLoggingConfig,
}

impl FileConfig {
    /// Validate the entire configuration, returning all detected issues.
    pub fn validate(&self) -> Vec<ConfigIssue> {
        let mut issues = Vec::new();

        if self.gemini.model.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "gemini.model",
                format!(
                    "gemini.model is empty, falling back to '{}'",
                    FileGeminiConfig::default().model
                ),
            ));
        }

        if self.gemini.base_url.trim().is_empty() {
            issues.push(ConfigIssue::error(
                "gemini.base_url",
                format!(
                    "gemini.base_url is empty, falling back to '{}'",
                    FileGeminiConfig::default().base_url
                ),
            ));
        }

        if self.gemini.api_key.is_some() {
            issues.push(ConfigIssue::warning(
                "gemini.api_key",
                format!(
                    "gemini.api_key is set in a config file; prefer the {} environment variable",
                    self.gemini.api_key_env
                ),
            ));
        }

        if self.query.timeout_secs == Some(0) {
            issues.push(ConfigIssue::warning(
                "query.timeout_secs",
                "query.timeout_secs = 0 is ignored; requests run without a timeout",
            ));
        }

        issues
    }
}
