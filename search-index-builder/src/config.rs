//! Connection configuration for the OpenSearch index admin.

use std::env;

use tracing::warn;

/// Default OpenSearch URL.
pub const DEFAULT_OPENSEARCH_URL: &str = "http://localhost:9200";

/// Configuration for `OpenSearchIndexAdmin`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OpenSearchConfig {
    /// The OpenSearch server URL (e.g., "http://localhost:9200").
    pub url: String,
    /// Bypass any system HTTP proxy when talking to the cluster.
    pub disable_proxy: bool,
}

impl Default for OpenSearchConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_OPENSEARCH_URL.to_string(),
            disable_proxy: true,
        }
    }
}

impl OpenSearchConfig {
    /// Create a config pointing at `url` with the default proxy behavior.
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Self::default()
        }
    }

    /// Load the configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `OPENSEARCH_URL`: OpenSearch server URL (default: http://localhost:9200)
    /// - `OPENSEARCH_DISABLE_PROXY`: "true" or "false" (default: true)
    pub fn from_env() -> Self {
        let url = env::var("OPENSEARCH_URL").unwrap_or_else(|_| DEFAULT_OPENSEARCH_URL.to_string());
        let disable_proxy = match env::var("OPENSEARCH_DISABLE_PROXY") {
            Ok(value) => parse_bool(&value).unwrap_or_else(|| {
                warn!(value = %value, "Invalid OPENSEARCH_DISABLE_PROXY, defaulting to 'true'");
                true
            }),
            Err(_) => true,
        };

        Self { url, disable_proxy }
    }
}

fn parse_bool(value: &str) -> Option<bool> {
    match value.trim().to_lowercase().as_str() {
        "true" | "1" | "yes" => Some(true),
        "false" | "0" | "no" => Some(false),
        _ => None,
    }
}
