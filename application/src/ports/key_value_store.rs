//! Key-value store port
//!
//! An opaque mapping from string key to a serialized value that survives
//! process restarts. The prompt store keeps its whole list under one key.

use thiserror::Error;

/// Errors raised by a key-value store backend
#[derive(Error, Debug)]
pub enum StorageError {
    #[error("Storage I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Storage serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Persisted string-to-string storage
///
/// Calls are synchronous; the single-writer assumption means no
/// compare-and-swap is offered.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`, `None` if absent
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Replace the value stored under `key`
    fn set(&self, key: &str, value: &str) -> Result<(), StorageError>;
}
