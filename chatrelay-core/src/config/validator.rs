//! Configuration validation utilities

use super::schema::{GenerationConfig, RelayConfig, UpstreamConfig};
use crate::error::ValidationError;
use url::Url;

/// Configuration validator applied after parsing and interpolation
#[derive(Debug, Default)]
pub struct ConfigValidator;

impl ConfigValidator {
    /// Create a new validator
    pub fn new() -> Self {
        Self
    }

    /// Validate a complete relay configuration
    pub fn validate(&self, config: &RelayConfig) -> Result<(), ValidationError> {
        self.validate_upstream(&config.upstream)?;
        self.validate_generation(&config.generation)?;

        if config.server.host.trim().is_empty() {
            return Err(ValidationError::empty("server.host"));
        }

        Ok(())
    }

    fn validate_upstream(&self, upstream: &UpstreamConfig) -> Result<(), ValidationError> {
        if upstream.url.trim().is_empty() {
            return Err(ValidationError::required("upstream.url"));
        }

        let url = Url::parse(&upstream.url)
            .map_err(|e| ValidationError::invalid_url("upstream.url", e.to_string()))?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(ValidationError::invalid_url(
                "upstream.url",
                format!("unsupported scheme '{}'", url.scheme()),
            ));
        }

        if upstream.api_key.is_blank() {
            return Err(ValidationError::required("upstream.api_key"));
        }

        if upstream.timeout_secs == 0 {
            return Err(ValidationError::out_of_range(
                "upstream.timeout_secs",
                "timeout must be greater than zero",
            ));
        }

        Ok(())
    }

    fn validate_generation(&self, generation: &GenerationConfig) -> Result<(), ValidationError> {
        if generation.model.trim().is_empty() {
            return Err(ValidationError::empty("generation.model"));
        }

        if generation.system_prompt.trim().is_empty() {
            return Err(ValidationError::empty("generation.system_prompt"));
        }

        if generation.max_tokens == 0 {
            return Err(ValidationError::out_of_range(
                "generation.max_tokens",
                "max_tokens must be greater than zero",
            ));
        }

        if !(0.0..=2.0).contains(&generation.temperature) {
            return Err(ValidationError::out_of_range(
                "generation.temperature",
                format!("{} is outside [0.0, 2.0]", generation.temperature),
            ));
        }

        if !(generation.top_p > 0.0 && generation.top_p <= 1.0) {
            return Err(ValidationError::out_of_range(
                "generation.top_p",
                format!("{} is outside (0.0, 1.0]", generation.top_p),
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::schema::{AuditConfig, ServerConfig};
    use crate::config::SecretString;
    use crate::error::ValidationErrorKind;

    fn valid_config() -> RelayConfig {
        RelayConfig {
            upstream: UpstreamConfig {
                url: "https://api.groq.com/openai/v1/chat/completions".to_string(),
                api_key: SecretString::new("gsk_test_key"),
                timeout_secs: 30,
            },
            generation: GenerationConfig::default(),
            server: ServerConfig::default(),
            audit: AuditConfig::default(),
        }
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(ConfigValidator::new().validate(&valid_config()).is_ok());
    }

    #[test]
    fn test_blank_api_key_rejected() {
        let mut config = valid_config();
        config.upstream.api_key = SecretString::new("  ");
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert_eq!(err.field_path, "upstream.api_key");
        assert_eq!(err.kind, ValidationErrorKind::RequiredFieldMissing);
    }

    #[test]
    fn test_non_http_url_rejected() {
        let mut config = valid_config();
        config.upstream.url = "ftp://example.com/chat".to_string();
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert!(matches!(err.kind, ValidationErrorKind::InvalidUrl { .. }));
    }

    #[test]
    fn test_generation_ranges() {
        let mut config = valid_config();
        config.generation.top_p = 0.0;
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert_eq!(err.field_path, "generation.top_p");

        let mut config = valid_config();
        config.generation.temperature = 2.5;
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert_eq!(err.field_path, "generation.temperature");

        let mut config = valid_config();
        config.generation.max_tokens = 0;
        let err = ConfigValidator::new().validate(&config).unwrap_err();
        assert_eq!(err.field_path, "generation.max_tokens");
    }
}
