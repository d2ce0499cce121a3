//! Configuration schema structures with serde support

use super::secrets::SecretString;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

/// Instruction sent as the system turn of every upstream request.
///
/// Asks the model to always answer in the language of the question,
/// Arabic or English.
pub const DEFAULT_SYSTEM_PROMPT: &str =
    "يرجى دائمًا الرد بنفس لغة السؤال سواء كانت بالعربية أو الإنجليزية.";

/// Default upstream model identifier
pub const DEFAULT_MODEL: &str = "llama3-8b-8192";

/// Root configuration structure for the relay
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RelayConfig {
    /// Upstream completion API connection
    pub upstream: UpstreamConfig,

    /// Fixed generation parameters
    #[serde(default)]
    pub generation: GenerationConfig,

    /// HTTP listener settings
    #[serde(default)]
    pub server: ServerConfig,

    /// Audit log settings
    #[serde(default)]
    pub audit: AuditConfig,
}

/// Upstream completion API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct UpstreamConfig {
    /// Full URL of the chat completion endpoint
    pub url: String,

    /// Bearer token (supports environment variable interpolation)
    pub api_key: SecretString,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl UpstreamConfig {
    /// Request timeout as a `Duration`
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Generation parameters and system instruction.
///
/// These are constants of a deployment, not per-request inputs.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,

    #[serde(default = "default_top_p")]
    pub top_p: f32,

    #[serde(default = "default_system_prompt")]
    pub system_prompt: String,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            system_prompt: default_system_prompt(),
        }
    }
}

/// HTTP listener configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
        }
    }
}

impl ServerConfig {
    /// `host:port` string suitable for binding
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

/// Audit log configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct AuditConfig {
    /// JSON-lines file receiving one record per request; `None` disables it
    #[serde(default = "default_audit_path")]
    pub path: Option<PathBuf>,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            path: default_audit_path(),
        }
    }
}

fn default_timeout_secs() -> u64 {
    30
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_max_tokens() -> u32 {
    500
}

fn default_temperature() -> f32 {
    0.7
}

fn default_top_p() -> f32 {
    0.9
}

fn default_system_prompt() -> String {
    DEFAULT_SYSTEM_PROMPT.to_string()
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_audit_path() -> Option<PathBuf> {
    Some(PathBuf::from("api.log"))
}
