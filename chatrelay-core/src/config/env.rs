//! Environment variable interpolation for configuration

use super::error::ConfigError;
use regex::Regex;
use std::env;
use std::sync::OnceLock;

fn env_var_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"\$\{([A-Z_][A-Z0-9_]*)\}").expect("env var pattern is a valid regex")
    })
}

/// Interpolate environment variables in a configuration string
pub fn interpolate_env_vars(content: &str) -> Result<String, ConfigError> {
    interpolate_with(content, |name| env::var(name).ok())
}

/// Interpolate `${VAR}` references using an arbitrary lookup
///
/// The first unresolved reference is reported as `EnvVarNotFound`.
pub fn interpolate_with<F>(content: &str, lookup: F) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let mut result = content.to_string();
    let mut missing_vars = Vec::new();

    for cap in env_var_pattern().captures_iter(content) {
        let full_match = &cap[0];
        let var_name = &cap[1];

        match lookup(var_name) {
            Some(value) => {
                result = result.replace(full_match, &value);
            }
            None => {
                missing_vars.push(var_name.to_string());
            }
        }
    }

    if let Some(var) = missing_vars.into_iter().next() {
        return Err(ConfigError::EnvVarNotFound { var });
    }

    Ok(result)
}
