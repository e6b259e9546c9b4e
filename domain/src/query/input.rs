//! Query input value object

use crate::core::error::DomainError;
use crate::prompt::compose_prompt;
use std::fmt;

/// Non-blank user input accepted for submission (Value Object)
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueryInput {
    raw: String,
}

impl QueryInput {
    /// Accept `raw` unless it is empty or whitespace-only.
    ///
    /// The text is kept as typed; only the blank check trims.
    pub fn try_new(raw: impl Into<String>) -> Result<Self, DomainError> {
        let raw = raw.into();
        if raw.trim().is_empty() {
            Err(DomainError::EmptyInput)
        } else {
            Ok(Self { raw })
        }
    }

    /// The input as typed
    pub fn raw(&self) -> &str {
        &self.raw
    }

    /// The prompt text sent to the model, with placeholders substituted
    pub fn final_prompt(&self) -> String {
        compose_prompt(&self.raw)
    }
}

impl fmt::Display for QueryInput {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.raw)
    }
}
