//! Query configuration from TOML (`[query]` section)

use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FileQueryConfig {
    /// Upper bound for one generation call, in seconds. Unset means none.
    pub timeout_secs: Option<u64>,
}

impl FileQueryConfig {
    /// Timeout to apply, treating `0` as unset
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}
