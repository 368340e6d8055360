//! Index administration trait definition.
//!
//! This module defines the abstract interface for index level operations,
//! allowing for different backend implementations (OpenSearch, test doubles, etc.).

use async_trait::async_trait;

use crate::errors::SearchIndexError;
use crate::types::{CreateIndexRequest, DeleteIndexRequest, ExistsIndexRequest, IndexResponse};

/// Abstracts the index administration API of the underlying search client.
///
/// `Index` hands its assembled requests to an implementation of this trait and
/// returns the result untouched, so implementations own transport, error
/// reporting, and the handling of the request's ignore set.
///
/// All implementations must be `Send + Sync` so that one connection can be
/// shared across tasks.
#[async_trait]
pub trait IndexAdmin: Send + Sync {
    /// Check whether the index named in `request` exists.
    ///
    /// # Returns
    ///
    /// * `Ok(true)` - If the index exists
    /// * `Ok(false)` - If the backend reports it missing
    /// * `Err(SearchIndexError)` - If the check itself fails
    async fn exists(&self, request: &ExistsIndexRequest) -> Result<bool, SearchIndexError>;

    /// Create the index with the settings and mappings in `request.body`.
    ///
    /// A failure status listed in `request.ignore` must be returned as
    /// `Ok(IndexResponse)` rather than as an error.
    async fn create(&self, request: &CreateIndexRequest)
        -> Result<IndexResponse, SearchIndexError>;

    /// Delete the index.
    ///
    /// A failure status listed in `request.ignore` must be returned as
    /// `Ok(IndexResponse)` rather than as an error.
    async fn delete(&self, request: &DeleteIndexRequest)
        -> Result<IndexResponse, SearchIndexError>;
}
