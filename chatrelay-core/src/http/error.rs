//! Upstream error type and HTTP error mapping utilities

use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;
use uuid::Uuid;

/// Errors that can occur while talking to the upstream completion API
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum UpstreamError {
    /// The request did not complete within the configured timeout
    #[error("Upstream request timed out")]
    Timeout,

    /// Upstream answered with a non-success status
    #[error("Upstream returned HTTP {status}: {message}")]
    Status { status: u16, message: String },

    /// Connection or transport failure
    #[error("Network error: {message}")]
    Network { message: String },

    /// Upstream answered 2xx but the body was not a usable completion
    #[error("Invalid upstream response: {message}")]
    InvalidResponse { message: String },

    /// The HTTP client itself could not be built
    #[error("HTTP client configuration error: {message}")]
    Configuration { message: String },
}

impl UpstreamError {
    /// Classify a reqwest transport error.
    ///
    /// Failures while reading a body are transport failures too; malformed
    /// JSON is detected separately once the body has been read in full.
    pub fn from_transport(err: &reqwest::Error, request_id: Uuid) -> Self {
        if err.is_timeout() {
            UpstreamError::Timeout
        } else if err.is_connect() {
            UpstreamError::Network {
                message: format!("Connection failed: {} [request_id: {}]", err, request_id),
            }
        } else {
            UpstreamError::Network {
                message: format!("{} [request_id: {}]", err, request_id),
            }
        }
    }
}

/// Map HTTP status code and response body to an `UpstreamError`
pub fn map_http_error(status: StatusCode, body: Option<String>, request_id: Uuid) -> UpstreamError {
    let error_message = body
        .as_deref()
        .and_then(|b| serde_json::from_str::<Value>(b).ok())
        .and_then(|v| extract_error_message(&v))
        .or_else(|| body.filter(|b| !b.trim().is_empty()))
        .unwrap_or_else(|| format!("HTTP error {}", status.as_u16()));

    UpstreamError::Status {
        status: status.as_u16(),
        message: format!("{} [request_id: {}]", error_message, request_id),
    }
}

/// Extract an error message from common JSON error shapes
fn extract_error_message(json: &Value) -> Option<String> {
    // OpenAI-compatible format: { "error": { "message": "...", "type": "..." } }
    if let Some(message) = json
        .get("error")
        .and_then(|error| error.get("message"))
        .and_then(|v| v.as_str())
    {
        return Some(message.to_string());
    }

    // Generic formats: { "message": "..." } or { "error": "..." }
    if let Some(message) = json.get("message").and_then(|v| v.as_str()) {
        return Some(message.to_string());
    }

    json.get("error")
        .and_then(|v| v.as_str())
        .map(|s| s.to_string())
}
