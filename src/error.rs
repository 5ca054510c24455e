//! Error types for phantom-keys.
//!
//! Cancellation and pausing are never errors; they only change control flow
//! inside the run loop. Everything that can actually go wrong lives here.

use std::io;
use thiserror::Error;

/// Main error type for typing runs and their configuration.
#[derive(Error, Debug)]
pub enum EngineError {
    /// The text to type is empty or contains only whitespace.
    #[error("nothing to type: text is empty")]
    EmptyText,

    /// A run parameter is out of range.
    #[error("configuration error: {0}")]
    InvalidConfig(String),

    /// Error parsing a duration string.
    #[error("invalid duration '{value}': {reason}")]
    InvalidDuration { value: String, reason: String },

    /// Error reading or parsing a JSON profile.
    #[error("failed to load config from '{path}': {reason}")]
    ConfigLoad { path: String, reason: String },

    /// The key-injection collaborator could not deliver a keystroke.
    #[error("failed to inject {keystroke}: {reason}")]
    Injection { keystroke: String, reason: String },

    /// The requested output target is not available in this build.
    #[error("output not supported: {0}")]
    UnsupportedOutput(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

/// Result type alias for phantom-keys operations.
pub type Result<T> = std::result::Result<T, EngineError>;

impl EngineError {
    /// Create a new InvalidConfig error.
    pub fn invalid_config(message: impl Into<String>) -> Self {
        Self::InvalidConfig(message.into())
    }

    /// Create a new InvalidDuration error.
    pub fn invalid_duration(value: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidDuration {
            value: value.into(),
            reason: reason.into(),
        }
    }

    /// Create a new ConfigLoad error.
    pub fn config_load(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::ConfigLoad {
            path: path.into(),
            reason: reason.into(),
        }
    }

    /// Create a new Injection error.
    pub fn injection(keystroke: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Injection {
            keystroke: keystroke.into(),
            reason: reason.into(),
        }
    }

    /// Create a new UnsupportedOutput error.
    pub fn unsupported_output(message: impl Into<String>) -> Self {
        Self::UnsupportedOutput(message.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = EngineError::EmptyText;
        assert_eq!(err.to_string(), "nothing to type: text is empty");

        let err = EngineError::injection("'a'", "display closed");
        assert_eq!(err.to_string(), "failed to inject 'a': display closed");

        let err = EngineError::invalid_config("wpm must be positive");
        assert_eq!(err.to_string(), "configuration error: wpm must be positive");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = io::Error::new(io::ErrorKind::BrokenPipe, "pipe closed");
        let err: EngineError = io_err.into();
        assert!(matches!(err, EngineError::Io(_)));
    }
}
