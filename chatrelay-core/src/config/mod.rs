//! Configuration module for the relay
//!
//! Configuration comes either from a YAML file with `${VAR}` placeholders or
//! directly from the process environment. Both paths end in the same
//! validation and fail fast when the upstream URL or API key is absent.

mod env;
mod error;
mod schema;
mod secrets;
mod validator;

pub use env::{interpolate_env_vars, interpolate_with};
pub use error::{ConfigError, ConfigResult};
pub use schema::{
    AuditConfig, GenerationConfig, RelayConfig, ServerConfig, UpstreamConfig, DEFAULT_MODEL,
    DEFAULT_SYSTEM_PROMPT,
};
pub use secrets::SecretString;
pub use validator::ConfigValidator;

use crate::error::ValidationError;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Environment variable holding the upstream completion endpoint URL
pub const ENV_API_URL: &str = "GROQ_API_URL";
/// Environment variable holding the upstream bearer token
pub const ENV_API_KEY: &str = "GROQ_API_KEY";
/// Optional model override
pub const ENV_MODEL: &str = "CHATRELAY_MODEL";
/// Optional listener host override
pub const ENV_HOST: &str = "CHATRELAY_HOST";
/// Optional listener port override
pub const ENV_PORT: &str = "CHATRELAY_PORT";
/// Optional audit log path override; an empty value disables the audit log
pub const ENV_AUDIT_LOG: &str = "CHATRELAY_AUDIT_LOG";
/// Optional upstream timeout override in seconds
pub const ENV_TIMEOUT_SECS: &str = "CHATRELAY_TIMEOUT_SECS";

/// Load a configuration from a YAML file
pub fn load_from_yaml<P: AsRef<Path>>(path: P) -> ConfigResult<RelayConfig> {
    let path = path.as_ref();
    let content = fs::read_to_string(path).map_err(|e| ConfigError::IoError {
        path: path.to_string_lossy().to_string(),
        source: e,
    })?;

    let interpolated = interpolate_env_vars(&content)?;

    let config: RelayConfig =
        serde_yaml::from_str(&interpolated).map_err(|e| ConfigError::ParseError {
            path: path.to_string_lossy().to_string(),
            line: e.location().map(|l| l.line()),
            column: e.location().map(|l| l.column()),
            message: e.to_string(),
        })?;

    ConfigValidator::new().validate(&config)?;
    Ok(config)
}

impl RelayConfig {
    /// Build the configuration from the process environment.
    ///
    /// A `.env` file in the working directory is loaded first when present.
    pub fn from_env() -> ConfigResult<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build the configuration from an arbitrary variable lookup
    pub fn from_lookup<F>(lookup: F) -> ConfigResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let required = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| ConfigError::Missing {
                    var: name.to_string(),
                })
        };

        let mut upstream = UpstreamConfig {
            url: required(ENV_API_URL)?,
            api_key: SecretString::new(required(ENV_API_KEY)?),
            timeout_secs: 30,
        };
        if let Some(raw) = lookup(ENV_TIMEOUT_SECS) {
            upstream.timeout_secs = parse_setting(ENV_TIMEOUT_SECS, &raw)?;
        }

        let mut generation = GenerationConfig::default();
        if let Some(model) = lookup(ENV_MODEL).filter(|m| !m.trim().is_empty()) {
            generation.model = model;
        }

        let mut server = ServerConfig::default();
        if let Some(host) = lookup(ENV_HOST).filter(|h| !h.trim().is_empty()) {
            server.host = host;
        }
        if let Some(raw) = lookup(ENV_PORT) {
            server.port = parse_setting(ENV_PORT, &raw)?;
        }

        let mut audit = AuditConfig::default();
        if let Some(raw) = lookup(ENV_AUDIT_LOG) {
            audit.path = if raw.trim().is_empty() {
                None
            } else {
                Some(PathBuf::from(raw.trim()))
            };
        }

        let config = RelayConfig {
            upstream,
            generation,
            server,
            audit,
        };
        ConfigValidator::new().validate(&config)?;
        Ok(config)
    }
}

fn parse_setting<T: FromStr>(name: &str, raw: &str) -> ConfigResult<T> {
    raw.trim().parse::<T>().map_err(|_| {
        ConfigError::Validation(ValidationError::invalid_format(
            name,
            format!("cannot parse '{}'", raw),
        ))
    })
}
