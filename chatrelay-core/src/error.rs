//! Field-level validation errors shared by input and configuration checks

use std::fmt;
use thiserror::Error;

/// Validation error with field path for precise error reporting
#[derive(Debug, Clone, PartialEq, Error)]
pub struct ValidationError {
    /// Path to the field that failed validation (e.g., "upstream.api_key")
    pub field_path: String,
    /// The validation error kind
    pub kind: ValidationErrorKind,
    /// Optional additional context
    pub context: Option<String>,
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Validation failed at '{}': {}", self.field_path, self.kind)?;
        if let Some(ctx) = &self.context {
            write!(f, " ({})", ctx)?;
        }
        Ok(())
    }
}

/// Specific validation error types
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationErrorKind {
    #[error("required field is missing")]
    RequiredFieldMissing,

    #[error("value must not be empty")]
    Empty,

    #[error("value too long: {length} characters, maximum is {max}")]
    TooLong { length: usize, max: usize },

    #[error("value out of range: {message}")]
    OutOfRange { message: String },

    #[error("invalid format: {message}")]
    InvalidFormat { message: String },

    #[error("invalid URL: {message}")]
    InvalidUrl { message: String },
}

impl ValidationError {
    /// Create a new validation error
    pub fn new(field_path: impl Into<String>, kind: ValidationErrorKind) -> Self {
        Self {
            field_path: field_path.into(),
            kind,
            context: None,
        }
    }

    /// Add context to the validation error
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    /// Helper to create a required field error
    pub fn required(field_path: impl Into<String>) -> Self {
        Self::new(field_path, ValidationErrorKind::RequiredFieldMissing)
    }

    /// Helper to create an empty value error
    pub fn empty(field_path: impl Into<String>) -> Self {
        Self::new(field_path, ValidationErrorKind::Empty)
    }

    /// Helper to create a too-long error
    pub fn too_long(field_path: impl Into<String>, length: usize, max: usize) -> Self {
        Self::new(field_path, ValidationErrorKind::TooLong { length, max })
    }

    /// Helper to create an out of range error
    pub fn out_of_range(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::OutOfRange {
                message: message.into(),
            },
        )
    }

    /// Helper to create an invalid format error
    pub fn invalid_format(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::InvalidFormat {
                message: message.into(),
            },
        )
    }

    /// Helper to create an invalid URL error
    pub fn invalid_url(field_path: impl Into<String>, message: impl Into<String>) -> Self {
        Self::new(
            field_path,
            ValidationErrorKind::InvalidUrl {
                message: message.into(),
            },
        )
    }
}
