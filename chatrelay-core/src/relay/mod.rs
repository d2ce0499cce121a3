//! The relay: one message in, one completion out
//!
//! `RelayService::chat` validates the inbound message, wraps it with the
//! fixed system instruction, forwards it upstream once (no retries) and
//! shapes the reply. Every outcome is logged and audited.

pub mod audit;
pub mod error;

pub use audit::AuditLog;
pub use error::{RelayError, RelayResult};

use crate::config::{GenerationConfig, RelayConfig};
use crate::error::ValidationError;
use crate::http::{CompletionBackend, RequestOptions, UpstreamClient, UpstreamError, DEFAULT_TIMEOUT};
use crate::protocol::{ChatRequest, ChatResponse, CompletionRequest, Message, MAX_MESSAGE_CHARS};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Trim a raw message and check its length bounds
pub fn validate_message(raw: &str) -> Result<String, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::empty("message"));
    }

    let length = trimmed.chars().count();
    if length > MAX_MESSAGE_CHARS {
        return Err(ValidationError::too_long("message", length, MAX_MESSAGE_CHARS));
    }

    Ok(trimmed.to_string())
}

/// Stateless relay between chat clients and the upstream completion API
pub struct RelayService {
    backend: Arc<dyn CompletionBackend>,
    generation: GenerationConfig,
    audit: AuditLog,
    timeout: Duration,
}

impl RelayService {
    pub fn new(
        backend: Arc<dyn CompletionBackend>,
        generation: GenerationConfig,
        audit: AuditLog,
    ) -> Self {
        Self {
            backend,
            generation,
            audit,
            timeout: DEFAULT_TIMEOUT,
        }
    }

    /// Wire up an upstream client, generation parameters and audit log from configuration
    pub fn from_config(config: &RelayConfig) -> Result<Self, UpstreamError> {
        let client = UpstreamClient::from_config(&config.upstream)?;
        Ok(Self::new(
            Arc::new(client),
            config.generation.clone(),
            AuditLog::from_config(&config.audit),
        )
        .with_timeout(config.upstream.timeout()))
    }

    /// Set the bound on each upstream call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn generation(&self) -> &GenerationConfig {
        &self.generation
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Build the single-turn upstream payload for an already validated message
    pub fn build_payload(&self, message: &str) -> CompletionRequest {
        CompletionRequest::new(
            self.generation.model.clone(),
            vec![
                Message::system(self.generation.system_prompt.clone()),
                Message::user(message),
            ],
        )
        .with_max_tokens(self.generation.max_tokens)
        .with_temperature(self.generation.temperature)
        .with_top_p(self.generation.top_p)
    }

    /// Relay one chat message upstream and shape the reply
    pub async fn chat(&self, request: ChatRequest) -> RelayResult<ChatResponse> {
        let options = RequestOptions::new().with_timeout(self.timeout);
        let request_id = options.request_id;

        let message = match validate_message(&request.message) {
            Ok(message) => message,
            Err(err) => {
                warn!("Rejected chat request [request_id: {}]: {}", request_id, err);
                return Err(err.into());
            }
        };

        debug!(
            "Relaying message of {} characters [request_id: {}]",
            message.chars().count(),
            request_id
        );

        let payload = self.build_payload(&message);
        let result = match self.backend.complete(payload, options).await {
            Ok(completion) => match completion.first_content() {
                Some(content) => Ok(ChatResponse::new(content, completion.total_tokens())),
                None => Err(RelayError::Internal(format!(
                    "upstream response has no completion content [request_id: {}]",
                    request_id
                ))),
            },
            Err(err) => Err(RelayError::from(err)),
        };

        match &result {
            Ok(response) => {
                info!(
                    "Chat request completed with {} tokens [request_id: {}]",
                    response.tokens_used, request_id
                );
                self.audit.record_exchange(request_id, &message, response);
            }
            Err(err) => {
                error!(
                    "Chat request failed ({}) [request_id: {}]: {}",
                    err.kind(),
                    request_id,
                    err
                );
                self.audit.record_failure(request_id, &message, err);
            }
        }

        result
    }

    /// Best-effort reachability check of the upstream endpoint.
    ///
    /// Returns whether the probe succeeded. A failure is only logged; the
    /// service keeps answering requests either way.
    pub async fn probe(&self) -> bool {
        let options = RequestOptions::new().with_timeout(self.timeout);
        let request_id = options.request_id;

        match self.backend.probe(options).await {
            Ok(()) => {
                info!("Upstream API is reachable [request_id: {}]", request_id);
                true
            }
            Err(err) => {
                warn!(
                    "Upstream API probe failed, continuing anyway [request_id: {}]: {}",
                    request_id, err
                );
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ValidationErrorKind;
    use crate::protocol::{CompletionResponse, MessageRole};
    use async_trait::async_trait;
    use proptest::prelude::*;
    use serde_json::json;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use test_case::test_case;

    /// Backend returning a canned outcome and counting calls
    struct StaticBackend {
        outcome: Result<CompletionResponse, UpstreamError>,
        calls: AtomicUsize,
    }

    impl StaticBackend {
        fn replying(body: serde_json::Value) -> Self {
            Self {
                outcome: Ok(serde_json::from_value(body).unwrap()),
                calls: AtomicUsize::new(0),
            }
        }

        fn failing(err: UpstreamError) -> Self {
            Self {
                outcome: Err(err),
                calls: AtomicUsize::new(0),
            }
        }
    }

    #[async_trait]
    impl CompletionBackend for StaticBackend {
        async fn complete(
            &self,
            _request: CompletionRequest,
            _options: RequestOptions,
        ) -> Result<CompletionResponse, UpstreamError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            self.outcome.clone()
        }

        async fn probe(&self, _options: RequestOptions) -> Result<(), UpstreamError> {
            self.outcome.clone().map(|_| ())
        }
    }

    fn service(backend: Arc<StaticBackend>) -> RelayService {
        RelayService::new(backend, GenerationConfig::default(), AuditLog::disabled())
    }

    fn hi_there() -> serde_json::Value {
        json!({"choices":[{"message":{"content":"Hi there"}}],"usage":{"total_tokens":12}})
    }

    #[test_case("", ValidationErrorKind::Empty ; "empty")]
    #[test_case("   \t\n ", ValidationErrorKind::Empty ; "whitespace only")]
    #[test_case(&"a".repeat(4097), ValidationErrorKind::TooLong { length: 4097, max: 4096 } ; "one over the limit")]
    fn test_validate_message_rejects(raw: &str, expected: ValidationErrorKind) {
        let err = validate_message(raw).unwrap_err();
        assert_eq!(err.field_path, "message");
        assert_eq!(err.kind, expected);
    }

    #[test]
    fn test_validate_message_boundaries() {
        assert_eq!(validate_message("a").unwrap(), "a");
        assert_eq!(validate_message(&"a".repeat(4096)).unwrap().len(), 4096);
        assert_eq!(validate_message("  Hello  ").unwrap(), "Hello");
        // Surrounding whitespace does not count towards the limit.
        let padded = format!("   {}   ", "a".repeat(4096));
        assert!(validate_message(&padded).is_ok());
    }

    #[test]
    fn test_length_counts_characters_not_bytes() {
        let arabic = "س".repeat(4096);
        assert!(arabic.len() > 4096);
        assert!(validate_message(&arabic).is_ok());
    }

    proptest! {
        #[test]
        fn prop_trimmed_non_empty_within_limit_is_accepted(s in "[a-zA-Z0-9][a-zA-Z0-9 ]{0,200}") {
            let validated = validate_message(&s).unwrap();
            prop_assert_eq!(validated.as_str(), s.trim());
        }

        #[test]
        fn prop_whitespace_only_is_rejected(s in "[ \t\r\n]{0,64}") {
            prop_assert!(validate_message(&s).is_err());
        }
    }

    #[test]
    fn test_build_payload_shape() {
        let service = service(Arc::new(StaticBackend::replying(hi_there())));
        let payload = service.build_payload("Hello");

        assert_eq!(payload.model, "llama3-8b-8192");
        assert_eq!(payload.messages.len(), 2);
        assert_eq!(payload.messages[0].role, MessageRole::System);
        assert_eq!(payload.messages[0].content, service.generation().system_prompt);
        assert_eq!(payload.messages[1].role, MessageRole::User);
        assert_eq!(payload.messages[1].content, "Hello");
        assert_eq!(payload.max_tokens, 500);
    }

    #[tokio::test]
    async fn test_chat_success() {
        let backend = Arc::new(StaticBackend::replying(hi_there()));
        let response = service(backend.clone())
            .chat(ChatRequest::new("Hello"))
            .await
            .unwrap();

        assert_eq!(response.response, "Hi there");
        assert_eq!(response.tokens_used, 12);
        assert!(!response.timestamp.is_empty());
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_whitespace_never_reaches_upstream() {
        let backend = Arc::new(StaticBackend::replying(hi_there()));
        let err = service(backend.clone())
            .chat(ChatRequest::new("   "))
            .await
            .unwrap_err();

        assert_eq!(err.status_code(), 400);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_missing_content_is_internal_error() {
        let backend = Arc::new(StaticBackend::replying(json!({"choices": []})));
        let err = service(backend).chat(ChatRequest::new("Hello")).await.unwrap_err();
        assert!(matches!(err, RelayError::Internal(_)));
    }

    #[tokio::test]
    async fn test_upstream_errors_are_not_retried() {
        let backend = Arc::new(StaticBackend::failing(UpstreamError::Timeout));
        let err = service(backend.clone())
            .chat(ChatRequest::new("Hello"))
            .await
            .unwrap_err();

        assert_eq!(err, RelayError::UpstreamTimeout);
        assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_probe_failure_is_reported_not_raised() {
        let backend = Arc::new(StaticBackend::failing(UpstreamError::Network {
            message: "refused".into(),
        }));
        let service = service(backend);
        assert!(!service.probe().await);
    }
}
