//! Error types for Protolex operations.
//!
//! This module provides the common `Error` type and `Result<T>` alias used
//! across all Protolex crates. Uses `thiserror` for derive macros.
//!
//! Validation findings are *not* errors: the schema and reference passes
//! accumulate them into a [`ValidationReport`](crate::ValidationReport).
//! `Error` is reserved for failures of a call itself (unreadable input,
//! malformed query parameters, a corpus that may not be published).

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Errors that can occur in Protolex operations.
#[derive(Error, Debug)]
pub enum Error {
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// I/O error tied to a specific file.
    #[error("I/O error at {path}: {source}")]
    IoWithPath {
        /// Underlying error.
        source: std::io::Error,
        /// File or directory that failed.
        path: PathBuf,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Record or resource not found.
    #[error("Not found: {0}")]
    NotFound(String),

    /// Invalid data, e.g. a corpus whose report carries fatal violations.
    #[error("Invalid data: {0}")]
    InvalidData(String),

    /// Malformed search query parameters.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Input could not be parsed.
    #[error("Parse error: {0}")]
    Parse(String),

    /// Serialization error.
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// A higher-level operation failed.
    #[error("Operation failed: {0}")]
    Operation(String),
}

impl Error {
    /// Wrap an I/O error without path context.
    pub fn io(err: std::io::Error) -> Self {
        Self::Io(err)
    }

    /// Wrap an I/O error together with the path that caused it.
    pub fn io_with_path(err: std::io::Error, path: impl AsRef<Path>) -> Self {
        Self::IoWithPath {
            source: err,
            path: path.as_ref().to_path_buf(),
        }
    }

    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a not found error.
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self::NotFound(msg.into())
    }

    /// Create an invalid data error.
    pub fn invalid_data(msg: impl Into<String>) -> Self {
        Self::InvalidData(msg.into())
    }

    /// Create an invalid query error.
    pub fn invalid_query(msg: impl Into<String>) -> Self {
        Self::InvalidQuery(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::Parse(msg.into())
    }

    /// Create a serialization error.
    pub fn serialization(msg: impl Into<String>) -> Self {
        Self::Serialization(msg.into())
    }

    /// Create an operation error.
    pub fn operation(msg: impl Into<String>) -> Self {
        Self::Operation(msg.into())
    }

    /// True if this error was caused by the caller's query parameters.
    pub fn is_invalid_query(&self) -> bool {
        matches!(self, Self::InvalidQuery(_))
    }
}

/// Result type alias using Protolex's Error type.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        assert_eq!(
            Error::config("bad key").to_string(),
            "Configuration error: bad key"
        );
        assert_eq!(
            Error::invalid_query("limit must be at least 1").to_string(),
            "Invalid query: limit must be at least 1"
        );
    }

    #[test]
    fn test_io_with_path_mentions_path() {
        let err = Error::io_with_path(
            std::io::Error::new(std::io::ErrorKind::NotFound, "missing"),
            "/data/protocols",
        );
        let msg = err.to_string();
        assert!(msg.contains("/data/protocols"));
        assert!(msg.contains("missing"));
    }

    #[test]
    fn test_from_io_error() {
        let err: Error = std::io::Error::other("boom").into();
        assert!(matches!(err, Error::Io(_)));
    }

    #[test]
    fn test_is_invalid_query() {
        assert!(Error::invalid_query("x").is_invalid_query());
        assert!(!Error::parse("x").is_invalid_query());
    }
}
