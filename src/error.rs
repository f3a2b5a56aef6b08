//! Error types for data-pages
//!
//! This module defines the error hierarchy for the entire crate.
//! All public APIs return `Result<T, Error>` where Error is defined here.

use thiserror::Error;

/// The main error type for data-pages
#[derive(Error, Debug)]
pub enum Error {
    // ============================================================================
    // Precondition Errors
    // ============================================================================
    #[error("Invalid page request ({field}): {message}")]
    InvalidPageRequest { field: String, message: String },

    #[error("Invalid page: {message}")]
    InvalidPage { message: String },

    #[error("Invalid sort: {message}")]
    InvalidSort { message: String },

    #[error("Invalid limit: {message}")]
    InvalidLimit { message: String },

    #[error("Invalid cursor token: {message}")]
    CursorDecode { message: String },

    // ============================================================================
    // Navigation Errors
    // ============================================================================
    #[error("No such element: {message}")]
    NoSuchElement { message: String },

    #[error("Illegal state: {message}")]
    IllegalState { message: String },

    // ============================================================================
    // Configuration Errors
    // ============================================================================
    #[error("Configuration error: {message}")]
    Config { message: String },

    #[error("Failed to parse YAML: {0}")]
    YamlParse(#[from] serde_yaml::Error),

    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    // ============================================================================
    // I/O Errors
    // ============================================================================
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ============================================================================
    // Generic Errors
    // ============================================================================
    #[error("{0}")]
    Other(String),

    #[error(transparent)]
    Anyhow(#[from] anyhow::Error),
}

impl Error {
    /// Create an invalid page request error for the given field
    pub fn invalid_request(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidPageRequest {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create an invalid page error
    pub fn invalid_page(message: impl Into<String>) -> Self {
        Self::InvalidPage {
            message: message.into(),
        }
    }

    /// Create an invalid sort error
    pub fn invalid_sort(message: impl Into<String>) -> Self {
        Self::InvalidSort {
            message: message.into(),
        }
    }

    /// Create an invalid limit error
    pub fn invalid_limit(message: impl Into<String>) -> Self {
        Self::InvalidLimit {
            message: message.into(),
        }
    }

    /// Create a cursor decode error
    pub fn cursor_decode(message: impl Into<String>) -> Self {
        Self::CursorDecode {
            message: message.into(),
        }
    }

    /// Create a no-such-element error
    pub fn no_such_element(message: impl Into<String>) -> Self {
        Self::NoSuchElement {
            message: message.into(),
        }
    }

    /// Create an illegal state error
    pub fn illegal_state(message: impl Into<String>) -> Self {
        Self::IllegalState {
            message: message.into(),
        }
    }

    /// Create a config error
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Check if this error is a no-such-element condition
    pub fn is_no_such_element(&self) -> bool {
        matches!(self, Error::NoSuchElement { .. })
    }

    /// Check if this error is an illegal-state condition
    pub fn is_illegal_state(&self) -> bool {
        matches!(self, Error::IllegalState { .. })
    }

    /// Check if this error was caused by the caller misusing the model.
    ///
    /// None of these are retryable: the same call fails the same way again.
    pub fn is_caller_error(&self) -> bool {
        matches!(
            self,
            Error::InvalidPageRequest { .. }
                | Error::InvalidPage { .. }
                | Error::InvalidSort { .. }
                | Error::InvalidLimit { .. }
                | Error::CursorDecode { .. }
                | Error::NoSuchElement { .. }
                | Error::IllegalState { .. }
        )
    }
}

/// Result type alias for data-pages
pub type Result<T> = std::result::Result<T, Error>;

/// Extension trait for adding context to errors
pub trait ResultExt<T> {
    /// Add context to an error
    fn context(self, message: impl Into<String>) -> Result<T>;

    /// Add context with a closure (lazy evaluation)
    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T>;
}

impl<T, E: Into<Error>> ResultExt<T> for std::result::Result<T, E> {
    fn context(self, message: impl Into<String>) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", message.into(), inner))
        })
    }

    fn with_context<F: FnOnce() -> String>(self, f: F) -> Result<T> {
        self.map_err(|e| {
            let inner = e.into();
            Error::Other(format!("{}: {}", f(), inner))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = Error::invalid_request("size", "must be at least 1");
        assert_eq!(
            err.to_string(),
            "Invalid page request (size): must be at least 1"
        );

        let err = Error::no_such_element("no next page");
        assert_eq!(err.to_string(), "No such element: no next page");

        let err = Error::illegal_state("total elements are not available");
        assert_eq!(
            err.to_string(),
            "Illegal state: total elements are not available"
        );
    }

    #[test]
    fn test_error_kind_checks() {
        assert!(Error::no_such_element("x").is_no_such_element());
        assert!(!Error::no_such_element("x").is_illegal_state());
        assert!(Error::illegal_state("x").is_illegal_state());

        assert!(Error::invalid_request("page", "x").is_caller_error());
        assert!(Error::cursor_decode("x").is_caller_error());
        assert!(!Error::config("x").is_caller_error());
        assert!(!Error::Other("x".into()).is_caller_error());
    }

    #[test]
    fn test_result_context() {
        let result: Result<()> = Err(Error::config("inner"));
        let with_context = result.context("outer");
        assert!(with_context
            .unwrap_err()
            .to_string()
            .contains("outer: Configuration error: inner"));
    }

    #[test]
    fn test_from_json_error() {
        let parsed: std::result::Result<serde_json::Value, _> = serde_json::from_str("{");
        let err: Error = parsed.unwrap_err().into();
        assert!(matches!(err, Error::JsonParse(_)));
    }

    #[test]
    fn test_from_anyhow_error() {
        let err: Error = anyhow::anyhow!("provider failed").into();
        assert!(matches!(err, Error::Anyhow(_)));
        assert!(!err.is_caller_error());
    }
}
