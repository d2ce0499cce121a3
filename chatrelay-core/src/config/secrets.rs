//! Secret handling for configuration values
//!
//! API keys are wrapped so they never show up in `Debug`/`Display` output
//! or in tracing fields by accident.

use serde::{Deserialize, Serialize};
use std::fmt;

/// A wrapper type for sensitive strings like API keys
#[derive(Clone, Deserialize, Serialize)]
#[serde(transparent)]
pub struct SecretString {
    value: String,
}

impl SecretString {
    /// Create a new secret string
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
        }
    }

    /// Get the actual value (use with caution)
    pub fn expose_secret(&self) -> &str {
        &self.value
    }

    /// Check if the secret is empty or whitespace
    pub fn is_blank(&self) -> bool {
        self.value.trim().is_empty()
    }

    /// Get a partially redacted version for debugging
    pub fn partial_redact(&self) -> String {
        if self.value.is_empty() {
            return "[EMPTY]".to_string();
        }

        let chars: Vec<char> = self.value.chars().collect();
        let len = chars.len();
        if len <= 8 {
            "[REDACTED]".to_string()
        } else if self.value.starts_with("sk-") || self.value.starts_with("gsk_") {
            let prefix_len = if self.value.starts_with("sk-") { 3 } else { 4 };
            let prefix: String = chars[..prefix_len].iter().collect();
            let suffix: String = chars[len - 4..].iter().collect();
            format!("{}...{}", prefix, suffix)
        } else {
            let prefix: String = chars[..2].iter().collect();
            let suffix: String = chars[len - 2..].iter().collect();
            format!("{}...{}", prefix, suffix)
        }
    }
}

impl fmt::Debug for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl fmt::Display for SecretString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[REDACTED]")
    }
}

impl PartialEq for SecretString {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl From<String> for SecretString {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

impl From<&str> for SecretString {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
