//! Errors surfaced to chat client users

use crate::error::ValidationError;
use thiserror::Error;

/// Failure of a single client interaction
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ClientError {
    /// Input rejected locally before anything was sent
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// The relay answered with a non-success status
    #[error("Relay returned status {status}: {detail}")]
    Relay { status: u16, detail: String },

    /// The relay could not be reached or did not answer in time
    #[error("Could not reach the relay: {message}")]
    Transport { message: String },

    /// The relay answered 200 with a body that is not a chat response
    #[error("Invalid response from the relay: {message}")]
    InvalidResponse { message: String },
}

impl ClientError {
    /// Text shown inline to the user in place of a bot reply
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Relay { detail, .. } => detail.clone(),
            other => other.to_string(),
        }
    }
}
