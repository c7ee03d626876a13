//! Custom error types for UpScale
//!
//! This module defines the error hierarchy for the application using thiserror
//! for ergonomic error definitions.

use thiserror::Error;

/// The main error type for UpScale operations
#[derive(Error, Debug)]
pub enum UpscaleError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// File I/O errors
    #[error("I/O error: {0}")]
    Io(String),

    /// JSON/YAML serialization errors
    #[error("JSON error: {0}")]
    Json(String),

    /// Validation errors for user input and configuration data
    #[error("Validation error: {0}")]
    Validation(String),

    /// Entity not found errors
    #[error("{entity_type} not found: {identifier}")]
    NotFound {
        entity_type: &'static str,
        identifier: String,
    },

    /// The backend answered with a non-success status
    #[error("HTTP {status} from {endpoint}")]
    Http { status: u16, endpoint: String },

    /// The request never produced a response (connect, timeout, body read)
    #[error("Network error: {0}")]
    Network(String),

    /// The identity provider rejected a sign-in or sign-up
    #[error("Identity provider error: {0}")]
    Identity(String),

    /// A unit or the final quiz is not unlocked yet
    #[error("Locked: {0}")]
    Locked(String),

    /// Quiz state machine misuse (answer out of range, advance without an answer)
    #[error("Quiz error: {0}")]
    Quiz(String),

    /// Export errors
    #[error("Export error: {0}")]
    Export(String),

    /// TUI errors
    #[error("TUI error: {0}")]
    Tui(String),
}

impl UpscaleError {
    /// Create a "not found" error for lessons
    pub fn lesson_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Lesson",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for course units
    pub fn unit_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Unit",
            identifier: identifier.into(),
        }
    }

    /// Create a "not found" error for budget categories
    pub fn category_not_found(identifier: impl Into<String>) -> Self {
        Self::NotFound {
            entity_type: "Category",
            identifier: identifier.into(),
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(self, Self::NotFound { .. })
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_))
    }

    /// Check if the failure came from talking to the backend.
    ///
    /// These are the errors the interface offers to re-issue ("Try Again").
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Http { .. } | Self::Network(_))
    }
}

// Implement From traits for common error types

impl From<std::io::Error> for UpscaleError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err.to_string())
    }
}

impl From<serde_json::Error> for UpscaleError {
    fn from(err: serde_json::Error) -> Self {
        Self::Json(err.to_string())
    }
}

impl From<serde_yaml::Error> for UpscaleError {
    fn from(err: serde_yaml::Error) -> Self {
        Self::Json(err.to_string())
    }
}

/// Result type alias for UpScale operations
pub type UpscaleResult<T> = Result<T, UpscaleError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = UpscaleError::Config("test error".into());
        assert_eq!(err.to_string(), "Configuration error: test error");
    }

    #[test]
    fn test_not_found_error() {
        let err = UpscaleError::lesson_not_found("bull-bear");
        assert_eq!(err.to_string(), "Lesson not found: bull-bear");
        assert!(err.is_not_found());
    }

    #[test]
    fn test_http_error() {
        let err = UpscaleError::Http {
            status: 502,
            endpoint: "news".into(),
        };
        assert_eq!(err.to_string(), "HTTP 502 from news");
        assert!(err.is_network());
        assert!(!UpscaleError::Quiz("x".into()).is_network());
    }

    #[test]
    fn test_from_io_error() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: UpscaleError = io_err.into();
        assert!(matches!(err, UpscaleError::Io(_)));
    }
}
