//! Use cases (application services)

pub mod prompt_store;
pub mod query_service;
