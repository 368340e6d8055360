//! Search index error types.
//!
//! This module defines the error type returned by index administration
//! backends. The builder itself never raises these; it hands back whatever
//! the backend produced.

use thiserror::Error;

/// Errors from index administration operations.
///
/// Used by the `IndexAdmin` trait and its implementations. Every variant
/// carries a human readable message, usually including the HTTP status and
/// the response body returned by the search engine.
#[derive(Debug, Clone, Error)]
pub enum SearchIndexError {
    /// Invalid client configuration (e.g., an unparsable URL).
    #[error("Configuration error: {0}")]
    ConfigError(String),

    /// Failed to establish connection to the search index backend.
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The index existence check failed.
    #[error("Index exists error: {0}")]
    IndexExistsError(String),

    /// Failed to create the search index.
    #[error("Index creation error: {0}")]
    IndexCreationError(String),

    /// Failed to delete the search index.
    #[error("Index deletion error: {0}")]
    IndexDeletionError(String),

    /// Failed to parse response from search index backend.
    #[error("Parse error: {0}")]
    ParseError(String),
}

impl SearchIndexError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::ConfigError(msg.into())
    }

    /// Create a connection error.
    pub fn connection(msg: impl Into<String>) -> Self {
        Self::ConnectionError(msg.into())
    }

    /// Create an index exists error.
    pub fn index_exists(msg: impl Into<String>) -> Self {
        Self::IndexExistsError(msg.into())
    }

    /// Create an index creation error.
    pub fn index_creation(msg: impl Into<String>) -> Self {
        Self::IndexCreationError(msg.into())
    }

    /// Create an index deletion error.
    pub fn index_deletion(msg: impl Into<String>) -> Self {
        Self::IndexDeletionError(msg.into())
    }

    /// Create a parse error.
    pub fn parse(msg: impl Into<String>) -> Self {
        Self::ParseError(msg.into())
    }
}
