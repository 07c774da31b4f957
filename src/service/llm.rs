//! Shared LLM client and interaction utilities
//!
//! Provides a common interface for chat-completion calls used across services.

use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;
use serde_json::Value;
use url::Url;

use crate::model::ProviderConfig;
use crate::service::json_extract::{JsonObject, extract_json_object};

/// Fixed per-call timeout
pub const COMPLETION_TIMEOUT: Duration = Duration::from_secs(45);

/// Low sampling temperature for reproducible output
pub const COMPLETION_TEMPERATURE: f32 = 0.2;

#[derive(Debug, thiserror::Error)]
pub enum CompletionError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("Provider returned status {0}")]
    Status(reqwest::StatusCode),

    #[error("Provider response has no message content")]
    MissingContent,

    #[error("Invalid provider configuration: {0}")]
    InvalidConfig(String),
}

/// Source of JSON completions
///
/// Implementations never surface failures: any problem is reported as `None`
/// and callers degrade to their deterministic fallback.
#[async_trait]
pub trait CompletionProvider: Send + Sync {
    /// Whether a credential is configured at all
    fn is_enabled(&self) -> bool;

    /// Run one completion and recover a JSON object from its text
    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> Option<JsonObject>;
}

#[derive(Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: [ChatMessage<'a>; 2],
    response_format: ResponseFormat,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Serialize)]
struct ResponseFormat {
    #[serde(rename = "type")]
    kind: &'static str,
}

/// Chat-completions client for the OpenRouter API
#[derive(Clone)]
pub struct OpenRouterClient {
    client: Client,
    endpoint: Url,
    api_key: Option<String>,
    model: String,
}

impl OpenRouterClient {
    /// Create a client from provider settings
    ///
    /// A missing API key is valid: the client then reports itself disabled.
    pub fn new(config: &ProviderConfig) -> Result<Self, CompletionError> {
        let endpoint = Url::parse(&config.endpoint)
            .map_err(|e| CompletionError::InvalidConfig(format!("{}: {}", config.endpoint, e)))?;

        let client = Client::builder().timeout(COMPLETION_TIMEOUT).build()?;

        tracing::info!(
            model = %config.model,
            endpoint = %endpoint,
            enabled = config.api_key.is_some(),
            "Completion client initialized"
        );

        Ok(Self {
            client,
            endpoint,
            api_key: config.api_key.clone(),
            model: config.model.clone(),
        })
    }

    async fn request_completion(
        &self,
        api_key: &str,
        system_prompt: &str,
        user_prompt: &str,
    ) -> Result<String, CompletionError> {
        let payload = ChatCompletionRequest {
            model: &self.model,
            messages: [
                ChatMessage {
                    role: "system",
                    content: system_prompt,
                },
                ChatMessage {
                    role: "user",
                    content: user_prompt,
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: COMPLETION_TEMPERATURE,
        };

        let response = self
            .client
            .post(self.endpoint.clone())
            .bearer_auth(api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(CompletionError::Status(response.status()));
        }

        let body: Value = response.json().await?;
        message_content(&body).ok_or(CompletionError::MissingContent)
    }
}

#[async_trait]
impl CompletionProvider for OpenRouterClient {
    fn is_enabled(&self) -> bool {
        self.api_key.is_some()
    }

    async fn complete_json(&self, system_prompt: &str, user_prompt: &str) -> Option<JsonObject> {
        let api_key = self.api_key.as_deref()?;
        let start_time = Instant::now();
        let prompt_length = system_prompt.len() + user_prompt.len();

        tracing::debug!(
            model = %self.model,
            prompt_length = prompt_length,
            "Initiating chat completion call"
        );

        match self.request_completion(api_key, system_prompt, user_prompt).await {
            Ok(content) => {
                let parsed = extract_json_object(&content);
                tracing::info!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    content_length = content.len(),
                    parsed = parsed.is_some(),
                    "Chat completion call completed"
                );
                parsed
            }
            Err(e) => {
                tracing::warn!(
                    model = %self.model,
                    elapsed_ms = start_time.elapsed().as_millis(),
                    prompt_length = prompt_length,
                    error = %e,
                    "Chat completion call failed"
                );
                None
            }
        }
    }
}

/// Pull the text content of `choices[0].message.content`
///
/// Multi-part content is concatenated: object chunks contribute their `text`
/// field, other chunks their string form. Non-text content is stringified.
pub fn message_content(body: &Value) -> Option<String> {
    let content = body
        .get("choices")?
        .as_array()?
        .first()?
        .get("message")?
        .get("content")?;

    match content {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        Value::Array(chunks) => Some(
            chunks
                .iter()
                .map(|chunk| match chunk {
                    Value::Object(part) => part
                        .get("text")
                        .map(|text| match text {
                            Value::String(s) => s.clone(),
                            other => other.to_string(),
                        })
                        .unwrap_or_default(),
                    Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .collect(),
        ),
        other => Some(other.to_string()),
    }
}

/// Trim text for inclusion in a prompt, marking how much was cut
pub fn truncate_for_prompt(text: Option<&str>, limit: usize) -> String {
    let trimmed = text.map(str::trim).unwrap_or_default();
    if trimmed.is_empty() {
        return "(none)".to_string();
    }

    let total = trimmed.chars().count();
    if total <= limit {
        return trimmed.to_string();
    }

    let kept: String = trimmed.chars().take(limit).collect();
    format!("{}\n...[truncated {} chars]", kept, total - limit)
}


#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_content_plain_string() {
        let body = json!({"choices": [{"message": {"role": "assistant", "content": "{\"a\": 1}"}}]});
        assert_eq!(message_content(&body).as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_message_content_chunks_are_joined() {
        let body = json!({"choices": [{"message": {"content": [
            {"type": "text", "text": "{\"a\":"},
            {"type": "image"},
            " 1}"
        ]}}]});
        assert_eq!(message_content(&body).as_deref(), Some("{\"a\": 1}"));
    }

    #[test]
    fn test_message_content_missing_shapes() {
        assert!(message_content(&json!({})).is_none());
        assert!(message_content(&json!({"choices": []})).is_none());
        assert!(message_content(&json!({"choices": [{}]})).is_none());
        assert!(message_content(&json!({"choices": [{"message": {"content": null}}]})).is_none());
    }

    #[test]
    fn test_message_content_non_text_is_stringified() {
        let body = json!({"choices": [{"message": {"content": {"a": 1}}}]});
        let content = message_content(&body).unwrap();
        assert_eq!(extract_json_object(&content).unwrap()["a"], 1);
    }

    #[test]
    fn test_request_body_shape() {
        let payload = ChatCompletionRequest {
            model: "openrouter/openai/gpt-4.1-mini",
            messages: [
                ChatMessage {
                    role: "system",
                    content: "sys",
                },
                ChatMessage {
                    role: "user",
                    content: "usr",
                },
            ],
            response_format: ResponseFormat {
                kind: "json_object",
            },
            temperature: COMPLETION_TEMPERATURE,
        };
        let value = serde_json::to_value(&payload).unwrap();
        assert_eq!(value["response_format"]["type"], "json_object");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1]["content"], "usr");
        assert!((value["temperature"].as_f64().unwrap() - 0.2).abs() < 1e-6);
    }

    #[test]
    fn test_truncate_for_prompt() {
        assert_eq!(truncate_for_prompt(None, 10), "(none)");
        assert_eq!(truncate_for_prompt(Some("   "), 10), "(none)");
        assert_eq!(truncate_for_prompt(Some(" short "), 10), "short");
        assert_eq!(
            truncate_for_prompt(Some("abcdefghij-extra"), 10),
            "abcdefghij\n...[truncated 6 chars]"
        );
    }

    #[test]
    fn test_invalid_endpoint_is_rejected() {
        let config = ProviderConfig {
            endpoint: "not a url".to_string(),
            ..ProviderConfig::default()
        };
        assert!(matches!(
            OpenRouterClient::new(&config),
            Err(CompletionError::InvalidConfig(_))
        ));
    }

    #[tokio::test]
    async fn test_disabled_client_returns_nothing_without_calling_out() {
        let client = OpenRouterClient::new(&ProviderConfig::default()).unwrap();
        assert!(!client.is_enabled());
        assert!(client.complete_json("sys", "usr").await.is_none());
    }
}
