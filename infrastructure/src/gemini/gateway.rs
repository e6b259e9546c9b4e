//! Gemini LLM Gateway implementation

use super::error::{GeminiError, Result};
use super::protocol::{GenerateContentRequest, GenerateContentResponse, api_error};
use crate::config::FileGeminiConfig;
use async_trait::async_trait;
use opale_application::{GatewayError, LlmGateway};
use tracing::{debug, info};

const USER_AGENT: &str = concat!("opale/", env!("CARGO_PKG_VERSION"));

/// Connection settings for the Gemini API
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeminiConfig {
    pub model: String,
    pub base_url: String,
    /// Environment variable holding the API key
    pub api_key_env: String,
    /// Explicit key; takes precedence over the environment
    pub api_key: Option<String>,
}

impl Default for GeminiConfig {
    fn default() -> Self {
        FileGeminiConfig::default().into()
    }
}

impl From<FileGeminiConfig> for GeminiConfig {
    fn from(file: FileGeminiConfig) -> Self {
        let defaults = FileGeminiConfig::default();
        let or_default = |value: String, fallback: String| {
            if value.trim().is_empty() {
                fallback
            } else {
                value
            }
        };

        Self {
            model: or_default(file.model, defaults.model),
            base_url: or_default(file.base_url, defaults.base_url),
            api_key_env: file.api_key_env,
            api_key: file.api_key.filter(|k| !k.trim().is_empty()),
        }
    }
}

impl GeminiConfig {
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    /// `generateContent` URL for the configured model
    pub fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }

    /// Resolve the API key at call time.
    ///
    /// The credential is ambient: its absence only surfaces as a failed call.
    fn api_key(&self) -> Result<String> {
        if let Some(key) = &self.api_key {
            return Ok(key.clone());
        }
        std::env::var(&self.api_key_env)
            .ok()
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| GeminiError::MissingCredential(self.api_key_env.clone()))
    }
}

/// LLM Gateway implementation for the Gemini REST API
pub struct GeminiLlmGateway {
    client: reqwest::Client,
    config: GeminiConfig,
}

impl GeminiLlmGateway {
    /// Create a gateway with a fresh HTTP client.
    ///
    /// No request timeout is set on the client; bounding latency is the
    /// caller's choice.
    pub fn new(config: GeminiConfig) -> std::result::Result<Self, GatewayError> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| GatewayError::ConnectionError(e.to_string()))?;

        info!(model = %config.model, "GeminiLlmGateway initialized");

        Ok(Self::with_client(client, config))
    }

    /// Create a gateway with an existing client
    pub fn with_client(client: reqwest::Client, config: GeminiConfig) -> Self {
        Self { client, config }
    }

    pub fn config(&self) -> &GeminiConfig {
        &self.config
    }

    async fn generate_content(&self, prompt: &str) -> Result<String> {
        let api_key = self.config.api_key()?;
        let request = GenerateContentRequest::from_prompt(prompt);

        debug!(endpoint = %self.config.endpoint(), "Sending generateContent request");

        let response = self
            .client
            .post(self.config.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        let body = response.text().await?;

        if !status.is_success() {
            return Err(api_error(
                status.as_u16(),
                status.canonical_reason().unwrap_or("Unknown"),
                &body,
            ));
        }

        let parsed: GenerateContentResponse = serde_json::from_str(&body)?;
        parsed.into_text()
    }
}

#[async_trait]
impl LlmGateway for GeminiLlmGateway {
    fn model_name(&self) -> &str {
        &self.config.model
    }

    async fn generate(&self, prompt: &str) -> std::result::Result<String, GatewayError> {
        self.generate_content(prompt).await.map_err(GatewayError::from)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_endpoint() {
        let config = GeminiConfig {
            base_url: "https://example.test/".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(
            config.endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-flash:generateContent"
        );
        assert_eq!(
            config.with_model("gemini-2.5-pro").endpoint(),
            "https://example.test/v1beta/models/gemini-2.5-pro:generateContent"
        );
    }

    #[test]
    fn test_from_file_config_fills_blank_fields() {
        let file = FileGeminiConfig {
            model: "".to_string(),
            base_url: " ".to_string(),
            api_key_env: "KEY_VAR".to_string(),
            api_key: Some("".to_string()),
        };
        let config = GeminiConfig::from(file);
        assert_eq!(config.model, "gemini-2.5-flash");
        assert_eq!(config.base_url, "https://generativelanguage.googleapis.com");
        assert_eq!(config.api_key_env, "KEY_VAR");
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_explicit_key_wins() {
        let config = GeminiConfig {
            api_key: Some("secret".to_string()),
            api_key_env: "OPALE_TEST_UNSET_KEY_VAR".to_string(),
            ..GeminiConfig::default()
        };
        assert_eq!(config.api_key().unwrap(), "secret");
    }

    #[tokio::test]
    async fn test_missing_credential_fails_the_call() {
        let config = GeminiConfig {
            api_key_env: "OPALE_TEST_UNSET_KEY_VAR".to_string(),
            // Never contacted: the call fails before any request is sent
            base_url: "http://127.0.0.1:9".to_string(),
            ..GeminiConfig::default()
        };
        let gateway = GeminiLlmGateway::new(config).unwrap();

        let err = gateway.generate("hello").await.unwrap_err();

        assert!(matches!(err, GatewayError::MissingCredential(ref v) if v == "OPALE_TEST_UNSET_KEY_VAR"));
        assert!(err.user_message().contains("OPALE_TEST_UNSET_KEY_VAR"));
    }
}
