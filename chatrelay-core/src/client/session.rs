//! One interactive chat session: transcript plus relay calls

use crate::client::error::ClientError;
use crate::client::render::format_elapsed;
use crate::client::transcript::{Transcript, Turn};
use crate::error::ValidationError;
use crate::protocol::ChatResponse;
use async_trait::async_trait;
use std::time::Instant;
use tracing::{debug, warn};

/// Anything that can relay a chat message
#[async_trait]
pub trait RelayApi: Send + Sync {
    async fn chat(&self, message: &str) -> Result<ChatResponse, ClientError>;
}

/// Drives a transcript against a relay, one message at a time.
///
/// Every user turn is followed by exactly one bot turn when the relay call
/// succeeds and by none when it fails.
pub struct ChatSession<A> {
    api: A,
    transcript: Transcript,
}

impl<A: RelayApi> ChatSession<A> {
    pub fn new(api: A) -> Self {
        Self {
            api,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    pub fn api(&self) -> &A {
        &self.api
    }

    /// Send one message and record the outcome.
    ///
    /// Blank input is rejected without touching the transcript. Otherwise the
    /// user turn is appended before the relay is called, and the returned
    /// reference is the new bot turn.
    pub async fn send(&mut self, input: &str) -> Result<&Turn, ClientError> {
        let message = input.trim();
        if message.is_empty() {
            return Err(ValidationError::empty("message").into());
        }

        self.transcript.push_user(message);
        let started = Instant::now();

        match self.api.chat(message).await {
            Ok(reply) => {
                let elapsed = format_elapsed(started.elapsed());
                debug!("Relay answered in {}s with {} tokens", elapsed, reply.tokens_used);
                Ok(self
                    .transcript
                    .push_bot(reply.response, reply.tokens_used, elapsed))
            }
            Err(err) => {
                warn!("Relay call failed: {}", err);
                Err(err)
            }
        }
    }
}
