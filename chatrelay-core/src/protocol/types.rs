//! Relay wire types
//!
//! These are the bodies exchanged between the chat client and the relay's
//! `POST /chat` endpoint.

use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};

/// Maximum accepted message length, in characters, after trimming
pub const MAX_MESSAGE_CHARS: usize = 4096;

/// Inbound chat request
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatRequest {
    /// The user's message; trimmed and length-checked by the relay
    pub message: String,
}

impl ChatRequest {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Successful relay reply
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatResponse {
    /// The model's reply text
    pub response: String,

    /// Total tokens reported by the upstream API
    pub tokens_used: u32,

    /// RFC 3339 timestamp of when the reply was produced
    pub timestamp: String,
}

impl ChatResponse {
    /// Build a response stamped with the current UTC time
    pub fn new(response: impl Into<String>, tokens_used: u32) -> Self {
        Self::at(response, tokens_used, Utc::now())
    }

    /// Build a response stamped with an explicit time
    pub fn at(response: impl Into<String>, tokens_used: u32, at: DateTime<Utc>) -> Self {
        Self {
            response: response.into(),
            tokens_used,
            timestamp: at.to_rfc3339_opts(SecondsFormat::Millis, true),
        }
    }
}

/// Error body returned with every non-200 relay status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorBody {
    pub detail: String,
}

impl ErrorBody {
    pub fn new(detail: impl Into<String>) -> Self {
        Self {
            detail: detail.into(),
        }
    }
}
