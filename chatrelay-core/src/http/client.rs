//! Upstream HTTP client implementation using reqwest

use crate::config::{SecretString, UpstreamConfig};
use crate::http::error::{map_http_error, UpstreamError};
use crate::http::{CompletionBackend, RequestOptions, DEFAULT_TIMEOUT};
use crate::protocol::{CompletionRequest, CompletionResponse};
use async_trait::async_trait;
use reqwest::{Client, ClientBuilder, Response};
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Maximum response size (10MB)
const MAX_RESPONSE_SIZE: usize = 10 * 1024 * 1024;

/// Default connect timeout
const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default user agent
const USER_AGENT: &str = concat!("chatrelay/", env!("CARGO_PKG_VERSION"));

/// Shared HTTP client for the upstream completion endpoint, with connection pooling
#[derive(Clone)]
pub struct UpstreamClient {
    /// The underlying reqwest client
    client: Client,

    /// Full completion endpoint URL
    url: String,

    /// Bearer token
    api_key: SecretString,

    /// Maximum response size to prevent OOM
    max_response_size: usize,
}

impl UpstreamClient {
    /// Create a new client with default timeouts
    pub fn new(url: impl Into<String>, api_key: SecretString) -> Result<Self, UpstreamError> {
        Self::with_config(url, api_key, CONNECT_TIMEOUT, DEFAULT_TIMEOUT)
    }

    /// Create a new client with custom timeouts
    pub fn with_config(
        url: impl Into<String>,
        api_key: SecretString,
        connect_timeout: Duration,
        request_timeout: Duration,
    ) -> Result<Self, UpstreamError> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(10)
            .pool_idle_timeout(Duration::from_secs(90))
            .connect_timeout(connect_timeout)
            .timeout(request_timeout)
            .user_agent(USER_AGENT)
            .gzip(true)
            .build()
            .map_err(|e| UpstreamError::Configuration {
                message: format!("Failed to create HTTP client: {}", e),
            })?;

        Ok(Self {
            client,
            url: url.into(),
            api_key,
            max_response_size: MAX_RESPONSE_SIZE,
        })
    }

    /// Create a client from the upstream section of the configuration
    pub fn from_config(config: &UpstreamConfig) -> Result<Self, UpstreamError> {
        Self::with_config(
            config.url.clone(),
            config.api_key.clone(),
            CONNECT_TIMEOUT.min(config.timeout()),
            config.timeout(),
        )
    }

    /// The completion endpoint this client posts to
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Validate response content type
    fn validate_content_type(response: &Response) -> Result<(), UpstreamError> {
        if let Some(content_type) = response.headers().get("content-type") {
            let content_type_str = content_type.to_str().unwrap_or("").to_lowercase();

            if !content_type_str.contains("application/json") {
                return Err(UpstreamError::InvalidResponse {
                    message: format!("Expected application/json, got: {}", content_type_str),
                });
            }
        }

        Ok(())
    }

    /// Check response size to prevent OOM
    fn check_content_length(&self, response: &Response) -> Result<(), UpstreamError> {
        if let Some(content_length) = response.content_length() {
            if content_length as usize > self.max_response_size {
                return Err(UpstreamError::InvalidResponse {
                    message: format!(
                        "Response size {} exceeds maximum {}",
                        content_length, self.max_response_size
                    ),
                });
            }
        }

        Ok(())
    }
}

#[async_trait]
impl CompletionBackend for UpstreamClient {
    async fn complete(
        &self,
        request: CompletionRequest,
        options: RequestOptions,
    ) -> Result<CompletionResponse, UpstreamError> {
        let request_id = options.request_id;

        info!(
            "Executing upstream completion with model {} [request_id: {}]",
            request.model, request_id
        );
        debug!("Request URL: {}", self.url);

        let response = self
            .client
            .post(&self.url)
            .timeout(options.timeout)
            .bearer_auth(self.api_key.expose_secret())
            .header("X-Request-ID", request_id.to_string())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                let mapped = UpstreamError::from_transport(&e, request_id);
                match mapped {
                    UpstreamError::Timeout => {
                        warn!("Upstream request timeout [request_id: {}]", request_id)
                    }
                    _ => error!("Upstream request error [request_id: {}]: {}", request_id, e),
                }
                mapped
            })?;

        let status = response.status();
        debug!("Response status: {} [request_id: {}]", status, request_id);

        if !status.is_success() {
            let body = response.text().await.ok();

            warn!(
                "Upstream request failed with status {} [request_id: {}]",
                status, request_id
            );

            return Err(map_http_error(status, body, request_id));
        }

        Self::validate_content_type(&response)?;
        self.check_content_length(&response)?;

        let response_text = response
            .text()
            .await
            .map_err(|e| UpstreamError::from_transport(&e, request_id))?;

        if response_text.len() > self.max_response_size {
            return Err(UpstreamError::InvalidResponse {
                message: format!(
                    "Response size {} exceeds maximum {} [request_id: {}]",
                    response_text.len(),
                    self.max_response_size,
                    request_id
                ),
            });
        }

        let completion: CompletionResponse = serde_json::from_str(&response_text).map_err(|e| {
            error!(
                "Failed to parse upstream response [request_id: {}]: {}",
                request_id, e
            );
            UpstreamError::InvalidResponse {
                message: format!("Invalid response format: {} [request_id: {}]", e, request_id),
            }
        })?;

        info!(
            "Upstream completion succeeded [request_id: {}]",
            request_id
        );

        Ok(completion)
    }

    async fn probe(&self, options: RequestOptions) -> Result<(), UpstreamError> {
        let request_id = options.request_id;

        let response = self
            .client
            .get(&self.url)
            .timeout(options.timeout)
            .bearer_auth(self.api_key.expose_secret())
            .header("X-Request-ID", request_id.to_string())
            .send()
            .await
            .map_err(|e| UpstreamError::from_transport(&e, request_id))?;

        debug!(
            "Upstream probe answered with status {} [request_id: {}]",
            response.status(),
            request_id
        );
        Ok(())
    }
}
