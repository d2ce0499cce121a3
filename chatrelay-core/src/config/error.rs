//! Configuration error types with detailed error reporting

use crate::error::ValidationError;
use thiserror::Error;

/// Main configuration error type with detailed context
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error reading config from '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in '{path}' at line {}, column {}: {message}",
            .line.unwrap_or(0), .column.unwrap_or(0))]
    ParseError {
        path: String,
        line: Option<usize>,
        column: Option<usize>,
        message: String,
    },

    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),

    #[error("Environment variable '{var}' not found")]
    EnvVarNotFound { var: String },

    #[error("Required setting '{var}' is not set")]
    Missing { var: String },
}

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, ConfigError>;
