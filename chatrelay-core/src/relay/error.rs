//! Relay error taxonomy and its mapping onto HTTP statuses

use crate::error::ValidationError;
use crate::http::UpstreamError;
use thiserror::Error;

/// Result type for relay operations
pub type RelayResult<T> = Result<T, RelayError>;

/// Everything `RelayService::chat` can fail with
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RelayError {
    /// Malformed, empty or oversized input; no upstream call was made
    #[error("{0}")]
    Validation(#[from] ValidationError),

    /// Upstream did not answer within the timeout
    #[error("Upstream timed out")]
    UpstreamTimeout,

    /// Upstream answered with an error status or could not be reached
    #[error("Upstream unavailable: {0}")]
    UpstreamUnavailable(String),

    /// Anything unanticipated, such as a malformed upstream body
    #[error("Internal error: {0}")]
    Internal(String),
}

impl RelayError {
    /// HTTP status the relay answers with for this error
    pub fn status_code(&self) -> u16 {
        match self {
            RelayError::Validation(_) => 400,
            RelayError::UpstreamTimeout => 504,
            RelayError::UpstreamUnavailable(_) => 503,
            RelayError::Internal(_) => 500,
        }
    }

    /// Message safe to show to callers.
    ///
    /// Upstream and internal details stay in the logs.
    pub fn public_detail(&self) -> String {
        match self {
            RelayError::Validation(err) => err.to_string(),
            RelayError::UpstreamTimeout => {
                "The language model service did not respond in time. Please try again later."
                    .to_string()
            }
            RelayError::UpstreamUnavailable(_) => {
                "The language model service is temporarily unavailable.".to_string()
            }
            RelayError::Internal(_) => "Internal server error.".to_string(),
        }
    }

    /// Short machine-readable name used in logs
    pub fn kind(&self) -> &'static str {
        match self {
            RelayError::Validation(_) => "validation_error",
            RelayError::UpstreamTimeout => "upstream_timeout",
            RelayError::UpstreamUnavailable(_) => "upstream_unavailable",
            RelayError::Internal(_) => "internal_error",
        }
    }
}

impl From<UpstreamError> for RelayError {
    fn from(err: UpstreamError) -> Self {
        match err {
            UpstreamError::Timeout => RelayError::UpstreamTimeout,
            UpstreamError::Status { .. } | UpstreamError::Network { .. } => {
                RelayError::UpstreamUnavailable(err.to_string())
            }
            UpstreamError::InvalidResponse { .. } | UpstreamError::Configuration { .. } => {
                RelayError::Internal(err.to_string())
            }
        }
    }
}
