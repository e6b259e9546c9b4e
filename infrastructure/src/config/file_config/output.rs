//! Output and logging configuration from TOML (`[output]`, `[logging]` sections)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Raw output configuration from TOML
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileOutputConfig {
    /// Enable colored terminal output
    pub color: bool,
}

impl Default for FileOutputConfig {
    fn default() -> Self {
        Self { color: true }
    }
}

/// Raw conversation log configuration from TOML
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileLoggingConfig {
    /// Write submitted prompts and responses to a JSONL file
    pub conversation_log: bool,
    /// Directory for conversation logs (default: `$XDG_DATA_HOME/opale/logs`)
    pub directory: Option<String>,
}

impl FileLoggingConfig {
    pub fn resolve_directory(&self) -> Option<PathBuf> {
        match &self.directory {
            Some(dir) => Some(PathBuf::from(dir)),
            None => dirs::data_dir().map(|d| d.join("opale").join("logs")),
        }
    }
}
