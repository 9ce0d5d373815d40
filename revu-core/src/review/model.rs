//! Language model backends used to generate review feedback

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::config::ModelConfig;
use crate::{Error, Result};

/// Anthropic API version header value
const ANTHROPIC_VERSION: &str = "2023-06-01";

/// Trait for language models that can answer a review prompt
#[async_trait]
pub trait ReviewModel: Send + Sync {
    /// Get the name of this backend
    fn name(&self) -> &'static str;

    /// Send a system prompt and a user message, returning the text reply
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    system: &'a str,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    text: Option<String>,
}

impl MessagesResponse {
    /// Text blocks joined by newlines; non-text blocks are dropped
    fn into_text(self) -> String {
        self.content
            .into_iter()
            .filter(|block| block.kind == "text")
            .filter_map(|block| block.text)
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Anthropic Messages API backend
#[derive(Debug, Clone)]
pub struct AnthropicModel {
    client: reqwest::Client,
    api_key: String,
    config: ModelConfig,
}

impl AnthropicModel {
    /// Create a backend from model configuration and an API key
    pub fn new(config: ModelConfig, api_key: impl Into<String>) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| Error::Model(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            api_key: api_key.into(),
            config,
        })
    }

    /// Get the model configuration
    pub fn config(&self) -> &ModelConfig {
        &self.config
    }
}

#[async_trait]
impl ReviewModel for AnthropicModel {
    fn name(&self) -> &'static str {
        "anthropic"
    }

    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let request = MessagesRequest {
            model: &self.config.name,
            max_tokens: self.config.max_tokens,
            temperature: self.config.temperature,
            system,
            messages: vec![Message {
                role: "user",
                content: user,
            }],
        };

        debug!(model = %self.config.name, prompt_len = user.len(), "Sending model request");

        let response = self
            .client
            .post(&self.config.api_url)
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    Error::Model(format!(
                        "Model request timed out after {:?}",
                        self.config.timeout
                    ))
                } else {
                    Error::Model(format!("Model request failed: {}", e))
                }
            })?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let text = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read response".to_string());
            return Err(status_error(status, &text));
        }

        let body: MessagesResponse = response
            .json()
            .await
            .map_err(|e| Error::Model(format!("Failed to parse model response: {}", e)))?;

        Ok(body.into_text())
    }
}

fn status_error(status: u16, body: &str) -> Error {
    match status {
        401 => Error::Model("Invalid Anthropic API key".to_string()),
        429 => Error::Model("Rate limited by the model API, try again later".to_string()),
        _ => Error::Model(format!("Model API error {}: {}", status, body)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_serialization() {
        let request = MessagesRequest {
            model: "claude-3-5-sonnet-latest",
            max_tokens: 100,
            temperature: 0.5,
            system: "be brief",
            messages: vec![Message {
                role: "user",
                content: "hi",
            }],
        };

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "claude-3-5-sonnet-latest");
        assert_eq!(value["max_tokens"], 100);
        assert_eq!(value["system"], "be brief");
        assert_eq!(value["messages"][0]["role"], "user");
        assert_eq!(value["messages"][0]["content"], "hi");
    }

    #[test]
    fn test_response_text_blocks_joined() {
        let json = r#"{
            "id": "msg_1",
            "content": [
                {"type": "text", "text": "first"},
                {"type": "tool_use", "id": "t", "name": "x", "input": {}},
                {"type": "text", "text": "second"}
            ]
        }"#;

        let response: MessagesResponse = serde_json::from_str(json).unwrap();
        assert_eq!(response.into_text(), "first\nsecond");
    }

    #[test]
    fn test_response_without_content() {
        let response: MessagesResponse = serde_json::from_str("{}").unwrap();
        assert_eq!(response.into_text(), "");
    }

    #[test]
    fn test_status_errors() {
        assert!(status_error(401, "").to_string().contains("Invalid Anthropic API key"));
        assert!(status_error(429, "").to_string().contains("Rate limited"));
        assert!(status_error(500, "boom").to_string().contains("500: boom"));
    }

    #[test]
    fn test_anthropic_model_name() {
        let model = AnthropicModel::new(ModelConfig::default(), "key").unwrap();
        assert_eq!(model.name(), "anthropic");
        assert_eq!(model.config().max_tokens, 4096);
    }
}
