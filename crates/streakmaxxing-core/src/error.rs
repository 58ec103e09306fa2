//! Core error types for streakmaxxing-core.
//!
//! Streak operations fail in exactly two ways: the caller passed something
//! malformed, or the id did not resolve. Configuration loading has its own
//! error type so it never leaks into the streak operation signatures.

use std::path::PathBuf;
use thiserror::Error;

/// Error type for streak and registry operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StreakError {
    /// Malformed input, rejected before any state changed
    #[error("Invalid argument '{field}': {message}")]
    InvalidArgument {
        field: &'static str,
        message: String,
    },

    /// The id does not resolve to a stored streak
    #[error("Streak not found: {0}")]
    NotFound(String),
}

impl StreakError {
    pub(crate) fn invalid(field: &'static str, message: impl Into<String>) -> Self {
        StreakError::InvalidArgument {
            field,
            message: message.into(),
        }
    }

    /// True for [`StreakError::InvalidArgument`].
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, StreakError::InvalidArgument { .. })
    }

    /// True for [`StreakError::NotFound`].
    pub fn is_not_found(&self) -> bool {
        matches!(self, StreakError::NotFound(_))
    }
}

/// Configuration-specific errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read or write the configuration file
    #[error("Failed to access configuration at {path}: {source}")]
    FileAccess {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseFailed(#[from] toml::de::Error),

    /// Failed to serialize configuration
    #[error("Failed to serialize configuration: {0}")]
    SerializeFailed(#[from] toml::ser::Error),

    /// Invalid configuration value
    #[error("Invalid configuration value for '{key}': {message}")]
    InvalidValue { key: String, message: String },
}

/// Result type alias for StreakError
pub type Result<T, E = StreakError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = StreakError::invalid("name", "name is required");
        assert_eq!(err.to_string(), "Invalid argument 'name': name is required");
        assert!(err.is_invalid_argument());
        assert!(!err.is_not_found());

        let err = StreakError::NotFound("abc".into());
        assert_eq!(err.to_string(), "Streak not found: abc");
        assert!(err.is_not_found());
    }
}
