//! OpenSearch index admin implementation.
//!
//! This module provides the concrete implementation of `IndexAdmin`
//! using the OpenSearch Rust crate.

use async_trait::async_trait;
use opensearch::{
    http::{
        response::Response,
        transport::{SingleNodeConnectionPool, TransportBuilder},
    },
    indices::{IndicesCreateParts, IndicesDeleteParts, IndicesExistsParts},
    OpenSearch,
};
use serde_json::Value;
use tracing::{debug, error, info};
use url::Url;

use crate::config::OpenSearchConfig;
use crate::errors::SearchIndexError;
use crate::interfaces::IndexAdmin;
use crate::types::{
    CreateIndexRequest, DeleteIndexRequest, ExistsIndexRequest, IgnoreSet, IndexResponse,
};

/// OpenSearch index admin.
///
/// Sends the requests assembled by `Index` through the indices API of an
/// `OpenSearch` client. Statuses listed in a request's ignore set are returned
/// as regular responses instead of errors.
///
/// # Example
///
/// ```ignore
/// use search_index_builder::{Index, OpenSearchConfig, OpenSearchIndexAdmin};
///
/// let admin = OpenSearchIndexAdmin::new(&OpenSearchConfig::from_env())?;
/// let mut index = Index::new("logs");
/// index.shards(3).replicas(1).ignore([400]);
/// index.create(&admin).await?;
/// ```
pub struct OpenSearchIndexAdmin {
    client: OpenSearch,
}

impl OpenSearchIndexAdmin {
    /// Create a new admin connected to the configured URL.
    ///
    /// # Returns
    ///
    /// * `Ok(OpenSearchIndexAdmin)` - A new admin instance
    /// * `Err(SearchIndexError)` - If the URL is invalid or the transport cannot be built
    pub fn new(config: &OpenSearchConfig) -> Result<Self, SearchIndexError> {
        let parsed_url =
            Url::parse(&config.url).map_err(|e| SearchIndexError::config(e.to_string()))?;

        let conn_pool = SingleNodeConnectionPool::new(parsed_url);
        let mut builder = TransportBuilder::new(conn_pool);
        if config.disable_proxy {
            builder = builder.disable_proxy();
        }
        let transport = builder
            .build()
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        info!(url = %config.url, "Created OpenSearch index admin");

        Ok(Self::from_client(OpenSearch::new(transport)))
    }

    /// Wrap an already configured client.
    pub fn from_client(client: OpenSearch) -> Self {
        Self { client }
    }

    /// Read the status and body of a create or delete response.
    ///
    /// A status that is neither 2xx nor ignored is handed to `on_failure`
    /// together with whatever body text could be read. On accepted statuses
    /// the body must be read in full; a broken read is a connection error.
    async fn read_response<F>(
        response: Response,
        ignore: &IgnoreSet,
        on_failure: F,
    ) -> Result<IndexResponse, SearchIndexError>
    where
        F: FnOnce(u16, String) -> SearchIndexError,
    {
        let status = response.status_code().as_u16();
        if !accepts_status(status, ignore) {
            let error_body = response.text().await.unwrap_or_default();
            return Err(on_failure(status, error_body));
        }

        let text = response.text().await.map_err(|e| {
            SearchIndexError::connection(format!(
                "Failed to read response body (status {}): {}",
                status, e
            ))
        })?;

        Ok(IndexResponse {
            status,
            body: parse_body(&text),
        })
    }
}

/// Whether `status` is a success or listed in the ignore set.
fn accepts_status(status: u16, ignore: &IgnoreSet) -> bool {
    (200..300).contains(&status) || ignore.contains(status)
}

/// Parse a response body, keeping non-JSON text as a string value.
fn parse_body(text: &str) -> Value {
    if text.trim().is_empty() {
        return Value::Null;
    }
    serde_json::from_str(text).unwrap_or_else(|_| Value::String(text.to_string()))
}

/// Map the status of an exists (HEAD) request to a boolean.
fn exists_from_status(status: u16) -> Result<bool, SearchIndexError> {
    match status {
        200..=299 => Ok(true),
        404 => Ok(false),
        other => Err(SearchIndexError::index_exists(format!(
            "Exists check failed with status {}",
            other
        ))),
    }
}

#[async_trait]
impl IndexAdmin for OpenSearchIndexAdmin {
    async fn exists(&self, request: &ExistsIndexRequest) -> Result<bool, SearchIndexError> {
        let response = self
            .client
            .indices()
            .exists(IndicesExistsParts::Index(&[request.index.as_str()]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let status = response.status_code().as_u16();
        let exists = exists_from_status(status).inspect_err(|_| {
            error!(index = %request.index, status = status, "Exists request failed");
        })?;

        debug!(index = %request.index, exists = exists, "Checked index existence");
        Ok(exists)
    }

    async fn create(
        &self,
        request: &CreateIndexRequest,
    ) -> Result<IndexResponse, SearchIndexError> {
        let response = self
            .client
            .indices()
            .create(IndicesCreateParts::Index(&request.index))
            .body(request.body.clone())
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let response = Self::read_response(response, &request.ignore, |status, body| {
            error!(index = %request.index, status = status, body = %body, "Create index request failed");
            SearchIndexError::index_creation(format!(
                "Create index '{}' failed with status {}: {}",
                request.index, status, body
            ))
        })
        .await?;

        info!(
            index = %request.index,
            status = response.status,
            ignored = !response.is_success(),
            "Create index request completed"
        );
        Ok(response)
    }

    async fn delete(
        &self,
        request: &DeleteIndexRequest,
    ) -> Result<IndexResponse, SearchIndexError> {
        let response = self
            .client
            .indices()
            .delete(IndicesDeleteParts::Index(&[request.index.as_str()]))
            .send()
            .await
            .map_err(|e| SearchIndexError::connection(e.to_string()))?;

        let response = Self::read_response(response, &request.ignore, |status, body| {
            error!(index = %request.index, status = status, body = %body, "Delete index request failed");
            SearchIndexError::index_deletion(format!(
                "Delete index '{}' failed with status {}: {}",
                request.index, status, body
            ))
        })
        .await?;

        info!(
            index = %request.index,
            status = response.status,
            ignored = !response.is_success(),
            "Delete index request completed"
        );
        Ok(response)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::index::Index;
    use serde_json::json;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;

    /// Whether `request` holds the full headers and the declared body.
    fn request_complete(request: &[u8]) -> bool {
        let text = String::from_utf8_lossy(request);
        let Some(header_end) = text.find("\r\n\r\n") else {
            return false;
        };
        let content_length = text[..header_end]
            .lines()
            .find_map(|line| {
                let (name, value) = line.split_once(':')?;
                if name.eq_ignore_ascii_case("content-length") {
                    value.trim().parse::<usize>().ok()
                } else {
                    None
                }
            })
            .unwrap_or(0);
        request.len() >= header_end + 4 + content_length
    }

    /// Accept one connection, answer with `status_line` and a body shorter
    /// than its declared length, then close the socket.
    async fn serve_truncated_body(listener: TcpListener, status_line: &'static str) {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request_complete(&request) {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }

        let response = format!(
            "HTTP/1.1 {}\r\ncontent-type: application/json\r\ncontent-length: 500\r\n\r\n{{\"acknowledged\":",
            status_line
        );
        socket.write_all(response.as_bytes()).await.unwrap();
        socket.shutdown().await.unwrap();
    }

    async fn admin_for(listener: &TcpListener) -> OpenSearchIndexAdmin {
        let url = format!("http://{}", listener.local_addr().unwrap());
        OpenSearchIndexAdmin::new(&OpenSearchConfig::new(url)).unwrap()
    }

    #[test]
    fn test_new_rejects_invalid_url() {
        let result = OpenSearchIndexAdmin::new(&OpenSearchConfig::new("not a url"));
        assert!(matches!(result, Err(SearchIndexError::ConfigError(_))));
    }

    #[test]
    fn test_new_accepts_valid_url() {
        let result = OpenSearchIndexAdmin::new(&OpenSearchConfig::new("http://localhost:9200"));
        assert!(result.is_ok());
    }

    #[test]
    fn test_accepts_status() {
        let ignore: IgnoreSet = [400, 404].into_iter().collect();

        assert!(accepts_status(200, &IgnoreSet::new()));
        assert!(accepts_status(201, &ignore));
        assert!(accepts_status(404, &ignore));
        assert!(!accepts_status(404, &IgnoreSet::new()));
        assert!(!accepts_status(500, &ignore));
    }

    #[test]
    fn test_parse_body() {
        assert_eq!(parse_body(""), Value::Null);
        assert_eq!(parse_body("  "), Value::Null);
        assert_eq!(parse_body("plain"), json!("plain"));
        assert_eq!(parse_body(r#"{"a":1}"#), json!({"a": 1}));
    }

    #[test]
    fn test_exists_from_status() {
        assert!(exists_from_status(200).unwrap());
        assert!(!exists_from_status(404).unwrap());
        assert!(matches!(
            exists_from_status(500),
            Err(SearchIndexError::IndexExistsError(_))
        ));
    }

    #[tokio::test]
    async fn test_create_fails_when_success_body_is_truncated() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let admin = admin_for(&listener).await;
        let server = tokio::spawn(serve_truncated_body(listener, "200 OK"));

        let result = Index::new("logs").create(&admin).await;
        server.await.unwrap();

        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_delete_fails_when_ignored_body_is_truncated() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let admin = admin_for(&listener).await;
        let server = tokio::spawn(serve_truncated_body(listener, "404 Not Found"));

        let mut index = Index::new("logs");
        index.ignore([404]);
        let result = index.drop_index(&admin).await;
        server.await.unwrap();

        assert!(matches!(result, Err(SearchIndexError::ConnectionError(_))));
    }

    #[tokio::test]
    async fn test_failure_status_keeps_its_error_when_body_is_truncated() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let admin = admin_for(&listener).await;
        let server = tokio::spawn(serve_truncated_body(listener, "500 Internal Server Error"));

        let result = Index::new("logs").create(&admin).await;
        server.await.unwrap();

        assert!(matches!(result, Err(SearchIndexError::IndexCreationError(_))));
    }
}
