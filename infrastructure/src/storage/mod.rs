//! Key-value storage adapters
//!
//! Implementations of the [`KeyValueStore`](opale_application::KeyValueStore)
//! port: a JSON file for real sessions and an in-memory map for tests and
//! `--ephemeral` runs.

mod json_file;
mod memory;

pub use json_file::JsonFileStore;
pub use memory::MemoryStore;
