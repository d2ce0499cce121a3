//! Upstream completion API types
//!
//! These match the OpenAI-compatible chat completion format and are used for
//! serialization when talking to the upstream service. Only the fields the
//! relay reads are modelled on the response side; everything else is ignored.

use serde::{Deserialize, Serialize};

/// Role of a message in the upstream conversation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MessageRole {
    /// System instructions that guide the model's behavior
    System,
    /// User input message
    User,
    /// Assistant (model) response
    Assistant,
}

/// A message in the upstream conversation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub role: MessageRole,
    pub content: String,
}

impl Message {
    /// Create a system message
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::System,
            content: content.into(),
        }
    }

    /// Create a user message
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: MessageRole::User,
            content: content.into(),
        }
    }
}

/// Chat completion request sent upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionRequest {
    /// Model identifier to use
    pub model: String,

    /// Messages in the conversation
    pub messages: Vec<Message>,

    /// Maximum tokens to generate
    pub max_tokens: u32,

    /// Sampling temperature
    pub temperature: f32,

    /// Nucleus sampling parameter
    pub top_p: f32,
}

impl CompletionRequest {
    /// Create a new request with model and messages and neutral sampling
    pub fn new(model: impl Into<String>, messages: Vec<Message>) -> Self {
        Self {
            model: model.into(),
            messages,
            max_tokens: 256,
            temperature: 1.0,
            top_p: 1.0,
        }
    }

    /// Set temperature
    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// Set max tokens
    pub fn with_max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    /// Set top_p for nucleus sampling
    pub fn with_top_p(mut self, top_p: f32) -> Self {
        self.top_p = top_p;
        self
    }
}

/// Chat completion response received from upstream
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub choices: Vec<CompletionChoice>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<CompletionUsage>,
}

/// A single completion choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CompletionChoice {
    pub message: ChoiceMessage,
}

/// Message carried by a completion choice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceMessage {
    #[serde(default)]
    pub content: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompletionUsage {
    #[serde(default)]
    pub total_tokens: u32,
}

impl CompletionResponse {
    /// Text of the first choice, if the upstream produced one
    pub fn first_content(&self) -> Option<&str> {
        self.choices
            .first()
            .and_then(|choice| choice.message.content.as_deref())
    }

    /// Total tokens reported by upstream; zero when usage is absent
    pub fn total_tokens(&self) -> u32 {
        self.usage.map(|u| u.total_tokens).unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_request_serialization() {
        let request = CompletionRequest::new(
            "llama3-8b-8192",
            vec![Message::system("be brief"), Message::user("Hello")],
        )
        .with_max_tokens(500)
        .with_temperature(0.7)
        .with_top_p(0.9);

        let value = serde_json::to_value(&request).unwrap();
        assert_eq!(value["model"], "llama3-8b-8192");
        assert_eq!(value["messages"][0]["role"], "system");
        assert_eq!(value["messages"][1], json!({"role": "user", "content": "Hello"}));
        assert_eq!(value["max_tokens"], 500);
        assert!((value["temperature"].as_f64().unwrap() - 0.7).abs() < 1e-6);
        assert!((value["top_p"].as_f64().unwrap() - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_response_with_extra_fields() {
        let body = json!({
            "id": "chatcmpl-1",
            "object": "chat.completion",
            "choices": [{"index": 0, "message": {"role": "assistant", "content": "Hi there"}, "finish_reason": "stop"}],
            "usage": {"prompt_tokens": 8, "completion_tokens": 4, "total_tokens": 12}
        });
        let response: CompletionResponse = serde_json::from_value(body).unwrap();
        assert_eq!(response.first_content(), Some("Hi there"));
        assert_eq!(response.total_tokens(), 12);
    }

    #[test]
    fn test_missing_usage_counts_zero() {
        let response: CompletionResponse =
            serde_json::from_value(json!({"choices": [{"message": {"content": "ok"}}]})).unwrap();
        assert_eq!(response.total_tokens(), 0);
    }

    #[test]
    fn test_empty_choices_has_no_content() {
        let response: CompletionResponse = serde_json::from_value(json!({"choices": []})).unwrap();
        assert_eq!(response.first_content(), None);
    }
}
