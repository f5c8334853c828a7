//! Classifier provider configuration.

use serde::{Deserialize, Serialize};

/// Environment variable for the OpenRouter API key.
pub const OPENROUTER_API_KEY_ENV: &str = "OPENROUTER_API_KEY";

/// Default OpenRouter chat completions endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Default model used for log classification.
pub const DEFAULT_MODEL: &str = "deepseek/deepseek-r1-zero:free";

/// Configuration for the classification provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClassifierConfig {
    /// Chat completions endpoint URL.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,

    /// Model identifier (e.g., "deepseek/deepseek-r1-zero:free").
    #[serde(default = "default_model")]
    pub model: String,

    /// Optional API key override (if not using the environment variable).
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub api_key: Option<String>,
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

impl Default for ClassifierConfig {
    fn default() -> Self {
        Self {
            endpoint: default_endpoint(),
            model: default_model(),
            api_key: None,
        }
    }
}

impl ClassifierConfig {
    /// Create a configuration for the given model with default endpoint.
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            ..Default::default()
        }
    }

    /// Sets the endpoint URL.
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = endpoint.into();
        self
    }

    /// Sets the API key.
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = ClassifierConfig::default();
        assert_eq!(config.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_config_builder() {
        let config = ClassifierConfig::new("anthropic/claude-sonnet-4")
            .with_endpoint("https://example.test/v1/chat/completions")
            .with_api_key("sk-test");

        assert_eq!(config.model, "anthropic/claude-sonnet-4");
        assert_eq!(config.endpoint, "https://example.test/v1/chat/completions");
        assert_eq!(config.api_key.as_deref(), Some("sk-test"));
    }
}
