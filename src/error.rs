//! Error types for Toolserve
//!
//! This module defines all error types used throughout the crate.
//! Uses `thiserror` for ergonomic error handling with automatic `Display` and
//! `Error` trait implementations.

use thiserror::Error;

/// The primary error type for Toolserve operations.
#[derive(Error, Debug)]
pub enum ToolserveError {
    /// Configuration-related errors (invalid config, missing required fields, etc.)
    #[error("Configuration error: {0}")]
    Config(String),

    /// Tool execution errors (invalid parameters, execution failures, etc.)
    #[error("Tool error: {0}")]
    Tool(String),

    /// Search index errors (archive download/extraction failures, bad entries, etc.)
    #[error("Index error: {0}")]
    Index(String),

    /// Resource not found (unknown tool names, missing files, etc.)
    #[error("Not found: {0}")]
    NotFound(String),

    /// Standard I/O errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// HTTP request errors
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),
}

/// A specialized `Result` type for Toolserve operations.
pub type Result<T> = std::result::Result<T, ToolserveError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ToolserveError::Config("missing archive URL".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing archive URL");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ToolserveError = io_err.into();
        assert!(matches!(err, ToolserveError::Io(_)));
    }

    #[test]
    fn test_not_found_display() {
        let err = ToolserveError::NotFound("tool 'multiply'".to_string());
        assert_eq!(err.to_string(), "Not found: tool 'multiply'");
    }

    #[test]
    fn test_result_type() {
        fn returns_result() -> Result<i32> {
            Ok(42)
        }
        assert_eq!(returns_result().unwrap(), 42);
    }
}
