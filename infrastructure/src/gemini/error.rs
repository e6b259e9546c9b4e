//! Error types for the Gemini adapter

use opale_application::GatewayError;
use thiserror::Error;

/// Result type alias for Gemini operations
pub type Result<T> = std::result::Result<T, GeminiError>;

/// Errors that can occur when calling the Gemini API
#[derive(Error, Debug)]
pub enum GeminiError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Gemini API error ({code} {status}): {message}")]
    Api {
        code: u16,
        status: String,
        message: String,
    },

    #[error("Prompt blocked: {0}")]
    Blocked(String),

    #[error("API key not set: {0}")]
    MissingCredential(String),

    #[error("Response contained no text")]
    EmptyResponse,
}

impl From<GeminiError> for GatewayError {
    fn from(err: GeminiError) -> Self {
        match err {
            GeminiError::Http(e) if e.is_timeout() => GatewayError::ConnectionError(format!(
                "Request to Gemini timed out: {}",
                e
            )),
            GeminiError::Http(e) if e.is_connect() => GatewayError::ConnectionError(e.to_string()),
            GeminiError::Http(e) => GatewayError::RequestFailed(e.to_string()),
            GeminiError::Serialization(e) => {
                GatewayError::Other(format!("Unreadable Gemini response: {}", e))
            }
            GeminiError::Api { message, .. } => GatewayError::RequestFailed(message),
            GeminiError::Blocked(reason) => {
                GatewayError::RequestFailed(format!("Prompt blocked: {}", reason))
            }
            GeminiError::MissingCredential(var) => GatewayError::MissingCredential(var),
            GeminiError::EmptyResponse => GatewayError::EmptyResponse,
        }
    }
}
