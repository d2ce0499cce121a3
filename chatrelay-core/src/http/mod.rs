//! HTTP module for calling the upstream completion API
//!
//! This module implements the HTTP layer of the relay, handling:
//! - Connection pooling and client management
//! - Bearer authentication and per-request timeouts
//! - Error mapping from transport and status failures
//! - Request ID generation and correlation

pub mod client;
pub mod error;

pub use client::UpstreamClient;
pub use error::{map_http_error, UpstreamError};

use crate::protocol::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use std::time::Duration;
use uuid::Uuid;

/// Default bound on a single upstream call
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Options for an HTTP request
#[derive(Debug, Clone)]
pub struct RequestOptions {
    /// Unique request ID for correlation
    pub request_id: Uuid,

    /// Request timeout
    pub timeout: Duration,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            request_id: Uuid::new_v4(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl RequestOptions {
    /// Create new request options with a generated request ID
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the timeout for this request
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Use a caller-supplied request ID
    pub fn with_request_id(mut self, request_id: Uuid) -> Self {
        self.request_id = request_id;
        self
    }
}

/// Something that can answer chat completion requests
#[async_trait]
pub trait CompletionBackend: Send + Sync {
    /// Execute a single non-streaming completion
    async fn complete(
        &self,
        request: CompletionRequest,
        options: RequestOptions,
    ) -> Result<CompletionResponse, UpstreamError>;

    /// Check that the upstream endpoint is reachable.
    ///
    /// Any HTTP answer counts as reachable; only transport failures and
    /// timeouts are errors.
    async fn probe(&self, options: RequestOptions) -> Result<(), UpstreamError>;
}
