//! Storage configuration from TOML (`[storage]` section)

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileStorageConfig {
    /// Path of the key-value file holding saved prompts
    pub path: Option<String>,
}

impl FileStorageConfig {
    /// Configured path, or `$XDG_DATA_HOME/opale/storage.json`
    pub fn resolve_path(&self) -> Option<PathBuf> {
        match &self.path {
            Some(path) => Some(PathBuf::from(path)),
            None => dirs::data_dir().map(|d| d.join("opale").join("storage.json")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_explicit_path_wins() {
        let config = FileStorageConfig {
            path: Some("/srv/opale.json".to_string()),
        };
        assert_eq!(config.resolve_path(), Some(PathBuf::from("/srv/opale.json")));
    }

    #[test]
    fn test_default_path_under_data_dir() {
        if let Some(path) = FileStorageConfig::default().resolve_path() {
            assert!(path.ends_with("opale/storage.json"));
        }
    }
}
