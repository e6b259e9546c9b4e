//! LLM Gateway port
//!
//! Defines the interface for the external text-generation call.

use async_trait::async_trait;
use std::time::Duration;
use thiserror::Error;

/// Fallback shown when a failure carries no usable message
pub const UNEXPECTED_ERROR_MESSAGE: &str = "An unexpected error occurred.";

/// Errors that can occur during LLM gateway operations
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("Connection error: {0}")]
    ConnectionError(String),

    #[error("Request failed: {0}")]
    RequestFailed(String),

    #[error("Missing API key: set {0}")]
    MissingCredential(String),

    #[error("No text in model response")]
    EmptyResponse,

    #[error("Timeout after {}s", .0.as_secs())]
    Timeout(Duration),

    #[error("Other error: {0}")]
    Other(String),
}

impl GatewayError {
    /// Human-readable message for display in place of a response.
    ///
    /// Uses the underlying error text without the variant prefix, falling
    /// back to [`UNEXPECTED_ERROR_MESSAGE`] when that text is blank.
    pub fn user_message(&self) -> String {
        let message = match self {
            GatewayError::ConnectionError(m)
            | GatewayError::RequestFailed(m)
            | GatewayError::Other(m) => m.clone(),
            GatewayError::MissingCredential(var) => {
                format!("API key not found. Set the {} environment variable.", var)
            }
            GatewayError::EmptyResponse => "The model returned an empty response.".to_string(),
            GatewayError::Timeout(after) => {
                format!("Request timed out after {}s", after.as_secs())
            }
        };

        if message.trim().is_empty() {
            UNEXPECTED_ERROR_MESSAGE.to_string()
        } else {
            message
        }
    }
}

/// Gateway for text generation
///
/// This port defines how the application layer reaches the remote model.
/// Implementations (adapters) live in the infrastructure layer. Credentials
/// are ambient to the adapter; a missing or invalid one surfaces only as a
/// failed call.
#[async_trait]
pub trait LlmGateway: Send + Sync {
    /// Name of the model answering requests (for logs and headers)
    fn model_name(&self) -> &str;

    /// Send `prompt` and return the generated text
    async fn generate(&self, prompt: &str) -> Result<String, GatewayError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_message_strips_prefix() {
        let err = GatewayError::RequestFailed("quota exceeded".to_string());
        assert_eq!(err.to_string(), "Request failed: quota exceeded");
        assert_eq!(err.user_message(), "quota exceeded");
    }

    #[test]
    fn test_user_message_fallback_for_blank_text() {
        let err = GatewayError::Other("  ".to_string());
        assert_eq!(err.user_message(), UNEXPECTED_ERROR_MESSAGE);
    }

    #[test]
    fn test_timeout_message() {
        let err = GatewayError::Timeout(Duration::from_secs(30));
        assert_eq!(err.to_string(), "Timeout after 30s");
        assert_eq!(err.user_message(), "Request timed out after 30s");
    }

    #[test]
    fn test_missing_credential_message() {
        let err = GatewayError::MissingCredential("GEMINI_API_KEY".to_string());
        assert!(err.user_message().contains("GEMINI_API_KEY"));
    }
}
