//! Domain error types

use thiserror::Error;

/// Domain-level errors
///
/// These are validation rejections. Callers usually treat them as a silent
/// no-op rather than surfacing them to the user.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    #[error("Template name cannot be empty")]
    EmptyName,

    #[error("Template content cannot be empty")]
    EmptyContent,

    #[error("Query input cannot be empty")]
    EmptyInput,
}

impl DomainError {
    /// Check if this error came from validating a template draft
    pub fn is_template_validation(&self) -> bool {
        matches!(self, DomainError::EmptyName | DomainError::EmptyContent)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            DomainError::EmptyName.to_string(),
            "Template name cannot be empty"
        );
        assert_eq!(
            DomainError::EmptyInput.to_string(),
            "Query input cannot be empty"
        );
    }

    #[test]
    fn test_is_template_validation() {
        assert!(DomainError::EmptyName.is_template_validation());
        assert!(DomainError::EmptyContent.is_template_validation());
        assert!(!DomainError::EmptyInput.is_template_validation());
    }
}
