//! OpenRouter streaming client for security-risk classification.
//!
//! Issues one streaming chat-completions request per classification and
//! forwards each delta chunk to the caller as it arrives, while
//! accumulating the full response text for verdict derivation.

use async_trait::async_trait;
use futures::StreamExt;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::config::{ClassifierConfig, OPENROUTER_API_KEY_ENV};
use crate::error::{ClassifierError, Result};
use crate::request::ClassificationRequest;

/// Submits classification requests and streams back response chunks.
///
/// Implementations must not retry internally; a failed stream is reported
/// once and retry policy belongs to the caller.
#[async_trait]
pub trait Classifier: Send + Sync {
    /// Classify one excerpt.
    ///
    /// Every received chunk is passed to `on_chunk` in arrival order and
    /// appended to an accumulator; on success the accumulated full text is
    /// returned. Any network, auth, or provider failure terminates the
    /// stream early with a [`ClassifierError`].
    async fn classify(
        &self,
        request: &ClassificationRequest,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String>;
}

/// OpenRouter API client for streaming chat completions.
#[derive(Clone)]
pub struct OpenRouterClassifier {
    client: reqwest::Client,
    config: ClassifierConfig,
    api_key: String,
}

impl OpenRouterClassifier {
    /// Create a client from the given configuration.
    ///
    /// The API key is taken from the configuration, falling back to the
    /// `OPENROUTER_API_KEY` environment variable.
    pub fn new(config: ClassifierConfig) -> Result<Self> {
        let api_key = match config.api_key.clone() {
            Some(key) => key,
            None => std::env::var(OPENROUTER_API_KEY_ENV).map_err(|_| {
                ClassifierError::Configuration(format!(
                    "missing API key: set {} or provide one in the config",
                    OPENROUTER_API_KEY_ENV
                ))
            })?,
        };

        Ok(Self {
            client: reqwest::Client::new(),
            config,
            api_key,
        })
    }

    /// Create a client with default configuration and the key from the
    /// environment.
    pub fn from_env() -> Result<Self> {
        Self::new(ClassifierConfig::default())
    }
}

#[async_trait]
impl Classifier for OpenRouterClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
        on_chunk: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<String> {
        let body = StreamRequest {
            model: self.config.model.clone(),
            messages: vec![
                ChatMessage::system(&request.prompt_context),
                ChatMessage::user(request.user_message()),
            ],
            stream: true,
        };

        trace!(model = %body.model, "sending classification request");

        let response = self
            .client
            .post(&self.config.endpoint)
            .header("Authorization", format!("Bearer {}", self.api_key))
            .header("Content-Type", "application/json")
            .header("X-Title", "Deepeye")
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ClassifierError::Api {
                status: status.as_u16(),
                body,
            });
        }

        let mut stream = response.bytes_stream();
        let mut accumulated = String::new();
        // Carry buffer for SSE lines split across byte chunks.
        let mut buffer = String::new();

        while let Some(bytes) = stream.next().await {
            let bytes =
                bytes.map_err(|e| ClassifierError::Stream(format!("stream read failed: {}", e)))?;
            buffer.push_str(&String::from_utf8_lossy(&bytes));

            while let Some(newline) = buffer.find('\n') {
                let line: String = buffer.drain(..=newline).collect();
                if let Some(content) = parse_sse_line(line.trim_end())? {
                    if content.is_empty() {
                        continue;
                    }
                    accumulated.push_str(&content);
                    on_chunk(&content);
                }
            }
        }

        debug!(
            response_len = accumulated.len(),
            "classification stream complete"
        );

        Ok(accumulated)
    }
}

/// Extract delta content from one SSE line, if it carries any.
///
/// Comment lines, blank keep-alives, and the `[DONE]` terminator yield
/// `None`; a `data:` payload that is not valid JSON is a stream error.
fn parse_sse_line(line: &str) -> Result<Option<String>> {
    let Some(data) = line.strip_prefix("data:") else {
        return Ok(None);
    };
    let data = data.trim();

    if data.is_empty() || data == "[DONE]" {
        return Ok(None);
    }

    let chunk: StreamChunk = serde_json::from_str(data)
        .map_err(|e| ClassifierError::Stream(format!("malformed stream chunk: {}", e)))?;

    Ok(chunk
        .choices
        .into_iter()
        .next()
        .and_then(|choice| choice.delta.content))
}

/// Streaming chat completion request.
#[derive(Debug, Clone, Serialize)]
struct StreamRequest {
    /// Model identifier.
    model: String,
    /// Conversation messages.
    messages: Vec<ChatMessage>,
    /// Always true; chunks are consumed as they arrive.
    stream: bool,
}

/// A message in the chat conversation.
#[derive(Debug, Clone, Serialize)]
struct ChatMessage {
    role: String,
    content: String,
}

impl ChatMessage {
    fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_string(),
            content: content.into(),
        }
    }

    fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }
}

/// One server-sent chunk of a streaming completion.
#[derive(Debug, Deserialize)]
struct StreamChunk {
    #[serde(default)]
    choices: Vec<StreamChoice>,
}

/// A choice in a streaming chunk.
#[derive(Debug, Deserialize)]
struct StreamChoice {
    #[serde(default)]
    delta: StreamDelta,
}

/// Incremental content delta.
#[derive(Debug, Default, Deserialize)]
struct StreamDelta {
    #[serde(default)]
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = StreamRequest {
            model: "deepseek/deepseek-r1-zero:free".to_string(),
            messages: vec![
                ChatMessage::system("You are monitoring a system log for security risks."),
                ChatMessage::user("admin:password123"),
            ],
            stream: true,
        };

        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains("deepseek-r1-zero"));
        assert!(json.contains("\"stream\":true"));
        assert!(json.contains("admin:password123"));
    }

    #[test]
    fn test_parse_sse_data_line() {
        let line = r#"data: {"choices":[{"delta":{"content":"Yes"}}]}"#;
        let content = parse_sse_line(line).unwrap();
        assert_eq!(content.as_deref(), Some("Yes"));
    }

    #[test]
    fn test_parse_sse_done_and_noise() {
        assert!(parse_sse_line("data: [DONE]").unwrap().is_none());
        assert!(parse_sse_line("").unwrap().is_none());
        assert!(parse_sse_line(": keep-alive").unwrap().is_none());
        assert!(parse_sse_line("event: ping").unwrap().is_none());
    }

    #[test]
    fn test_parse_sse_empty_delta() {
        let line = r#"data: {"choices":[{"delta":{}}]}"#;
        assert!(parse_sse_line(line).unwrap().is_none());

        let line = r#"data: {"choices":[]}"#;
        assert!(parse_sse_line(line).unwrap().is_none());
    }

    #[test]
    fn test_parse_sse_malformed_payload() {
        let result = parse_sse_line("data: {not json");
        assert!(matches!(result, Err(ClassifierError::Stream(_))));
    }

    #[test]
    fn test_missing_api_key() {
        // Guard against a key leaking in from the environment.
        if std::env::var(OPENROUTER_API_KEY_ENV).is_ok() {
            return;
        }

        let result = OpenRouterClassifier::new(ClassifierConfig::default());
        assert!(matches!(result, Err(ClassifierError::Configuration(_))));
    }

    #[test]
    fn test_config_api_key_override() {
        let config = ClassifierConfig::default().with_api_key("sk-test");
        let classifier = OpenRouterClassifier::new(config).unwrap();
        assert_eq!(classifier.api_key, "sk-test");
    }
}
