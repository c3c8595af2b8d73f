//! Validation utilities for CLI and configuration values
//!
//! Provides the shared validation error type and the value checks used when
//! resolving the pipeline configuration.

use crate::core::error_handling::ContextualError;

/// Validation failure for a user-supplied value
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    message: String,
}

impl ValidationError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }
}

impl ContextualError for ValidationError {
    fn is_user_actionable(&self) -> bool {
        true
    }

    fn user_message(&self) -> Option<&str> {
        Some(&self.message)
    }
}

/// Validate positive integer value
pub fn validate_positive_int(value: &str) -> Result<usize, String> {
    match value.parse::<usize>() {
        Ok(0) => Err("Value must be greater than 0".to_string()),
        Ok(n) => Ok(n),
        Err(_) => Err(format!("'{}' is not a valid positive integer", value)),
    }
}

/// Validate a consumer pool size
pub fn validate_consumer_count(count: usize) -> Result<usize, ValidationError> {
    if count == 0 {
        return Err(ValidationError::new(
            "Consumer count must be at least 1 (use --consumers N)",
        ));
    }
    Ok(count)
}

/// Validate a pacing delay in milliseconds
///
/// Delays above one minute are almost certainly a unit mistake (seconds vs ms).
pub fn validate_delay_ms(name: &str, value: u64) -> Result<u64, ValidationError> {
    const MAX_DELAY_MS: u64 = 60_000;
    if value > MAX_DELAY_MS {
        return Err(ValidationError::new(format!(
            "{} of {}ms exceeds the maximum of {}ms",
            name, value, MAX_DELAY_MS
        )));
    }
    Ok(value)
}
