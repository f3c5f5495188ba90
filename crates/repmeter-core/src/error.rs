//! Error types for the repmeter repetition engine.
//!
//! The engine itself has no runtime failure mode: missing input is a normal
//! "skip update" case and rep invalidity is a normal output. The only
//! fallible operations are construction-time ones — validating a
//! configuration or a constrained value such as [`Confidence`].
//!
//! [`Confidence`]: crate::types::Confidence
//!
//! # Example
//!
//! ```rust
//! use repmeter_core::error::EngineError;
//!
//! fn check_threshold(deg: f64) -> Result<(), EngineError> {
//!     if !(0.0..=180.0).contains(&deg) {
//!         return Err(EngineError::validation(format!(
//!             "angle threshold must be in [0, 180], got {deg}"
//!         )));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// A specialized `Result` type for engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Error type for the repetition engine.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum EngineError {
    /// Configuration error (invalid threshold ordering, window sizes, ...)
    #[error("Configuration error: {message}")]
    Configuration {
        /// Description of the configuration error
        message: String,
    },

    /// Validation error for input data
    #[error("Validation error: {message}")]
    Validation {
        /// Description of what validation failed
        message: String,
    },
}

impl EngineError {
    /// Creates a new configuration error.
    #[must_use]
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// Creates a new validation error.
    #[must_use]
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation {
            message: message.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_configuration_error_display() {
        let err = EngineError::configuration("up threshold above down threshold");
        assert!(err.to_string().contains("Configuration error"));
        assert!(err.to_string().contains("up threshold"));
    }

    #[test]
    fn test_validation_error_display() {
        let err = EngineError::validation("confidence out of range");
        assert!(err.to_string().contains("Validation error"));
        assert!(err.to_string().contains("confidence"));
    }
}
