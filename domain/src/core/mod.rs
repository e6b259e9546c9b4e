//! Core domain concepts shared across all subdomains.
//!
//! - [`error::DomainError`]: domain-level validation errors
//! - [`string`]: text helpers used when rendering or logging user text

pub mod error;
pub mod string;
