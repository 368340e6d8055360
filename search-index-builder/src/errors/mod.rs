//! Error types for the index builder.
//!
//! This module provides a unified error type for all index administration operations.

mod search_index_error;

pub use search_index_error::SearchIndexError;
