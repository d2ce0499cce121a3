//! reqwest-backed client for the relay's `POST /chat` endpoint

use crate::client::error::ClientError;
use crate::client::session::RelayApi;
use crate::protocol::{ChatRequest, ChatResponse, ErrorBody};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, StatusCode};
use std::time::Duration;
use tracing::debug;

/// Default relay location, matching the server's default bind port
pub const DEFAULT_RELAY_URL: &str = "http://localhost:8000";

/// Client-side bound on one relay call; above the relay's own upstream timeout
pub const DEFAULT_CLIENT_TIMEOUT: Duration = Duration::from_secs(60);

#[derive(Clone)]
pub struct RelayHttpClient {
    client: Client,
    chat_url: String,
}

impl RelayHttpClient {
    pub fn new(base_url: &str) -> Result<Self, ClientError> {
        Self::with_timeout(base_url, DEFAULT_CLIENT_TIMEOUT)
    }

    pub fn with_timeout(base_url: &str, timeout: Duration) -> Result<Self, ClientError> {
        let client = ClientBuilder::new()
            .timeout(timeout)
            .user_agent(concat!("chatrelay-client/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| ClientError::Transport {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            chat_url: format!("{}/chat", base_url.trim_end_matches('/')),
        })
    }

    pub fn chat_url(&self) -> &str {
        &self.chat_url
    }
}

/// Pull `detail` out of a relay error body, falling back to the raw text
fn error_detail(status: StatusCode, body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(parsed) => parsed.detail,
        Err(_) if !body.trim().is_empty() => body.trim().to_string(),
        Err(_) => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
    }
}

#[async_trait]
impl RelayApi for RelayHttpClient {
    async fn chat(&self, message: &str) -> Result<ChatResponse, ClientError> {
        debug!("POST {}", self.chat_url);

        let response = self
            .client
            .post(&self.chat_url)
            .json(&ChatRequest::new(message))
            .send()
            .await
            .map_err(|e| ClientError::Transport {
                message: e.to_string(),
            })?;

        let status = response.status();
        let body = response.text().await.map_err(|e| ClientError::Transport {
            message: e.to_string(),
        })?;

        if !status.is_success() {
            return Err(ClientError::Relay {
                status: status.as_u16(),
                detail: error_detail(status, &body),
            });
        }

        serde_json::from_str(&body).map_err(|e| ClientError::InvalidResponse {
            message: e.to_string(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chat_url_joins_base() {
        let client = RelayHttpClient::new("http://localhost:8000/").unwrap();
        assert_eq!(client.chat_url(), "http://localhost:8000/chat");
    }

    #[test]
    fn test_error_detail_fallbacks() {
        assert_eq!(
            error_detail(StatusCode::BAD_REQUEST, r#"{"detail":"message must not be empty"}"#),
            "message must not be empty"
        );
        assert_eq!(error_detail(StatusCode::BAD_GATEWAY, "upstream down"), "upstream down");
        assert_eq!(error_detail(StatusCode::BAD_GATEWAY, ""), "Bad Gateway");
    }
}
