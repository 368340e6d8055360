//! OpenSearch implementation of the index admin.
//!
//! This module provides a concrete implementation of `IndexAdmin`
//! using OpenSearch as the backend.

mod admin;

pub use admin::OpenSearchIndexAdmin;
