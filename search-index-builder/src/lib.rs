//! # Search Index Builder
//!
//! This crate provides a fluent builder for configuring a single search
//! index and creating, checking, or dropping it through an index
//! administration backend. It includes definitions for errors, the backend
//! interface, and a concrete implementation for OpenSearch.

pub mod config;
pub mod errors;
pub mod index;
pub mod interfaces;
pub mod opensearch;
pub mod types;

pub use config::OpenSearchConfig;
pub use errors::SearchIndexError;
pub use index::{Index, Initializer};
pub use interfaces::IndexAdmin;
pub use opensearch::OpenSearchIndexAdmin;
pub use types::{
    CreateIndexBody, CreateIndexRequest, DeleteIndexRequest, ExistsIndexRequest, IgnoreSet,
    IndexResponse,
};
