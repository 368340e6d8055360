//! Request and response types for index administration operations.

use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Set of HTTP status codes the backend should treat as non-error outcomes.
///
/// Codes are deduplicated and kept sorted, so the order in which they were
/// added never matters.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct IgnoreSet(BTreeSet<u16>);

impl IgnoreSet {
    /// Create an empty ignore set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge `codes` into the set. Codes already present are kept once.
    pub fn merge<I>(&mut self, codes: I)
    where
        I: IntoIterator<Item = u16>,
    {
        self.0.extend(codes);
    }

    /// Whether `status` should be suppressed.
    pub fn contains(&self, status: u16) -> bool {
        self.0.contains(&status)
    }

    /// Whether no codes have been added.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of distinct codes.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Iterate the codes in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = u16> + '_ {
        self.0.iter().copied()
    }
}

impl FromIterator<u16> for IgnoreSet {
    fn from_iter<I: IntoIterator<Item = u16>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

/// Request to check whether an index exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExistsIndexRequest {
    /// The index name.
    pub index: String,
}

/// Body of an index creation request.
///
/// Serializes to the shape expected by the index creation API:
/// `{"settings": {...}, "mappings": {...}}`, where `mappings` is omitted
/// when no mappings were configured.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexBody {
    /// Index settings, always containing `number_of_shards` and `number_of_replicas`.
    pub settings: Map<String, Value>,
    /// Field mapping definitions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mappings: Option<Map<String, Value>>,
}

/// Request to create an index.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreateIndexRequest {
    /// The index name.
    pub index: String,
    /// Settings and mappings of the new index.
    pub body: CreateIndexBody,
    /// Status codes the backend must not report as failures.
    pub ignore: IgnoreSet,
}

/// Request to delete an index.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteIndexRequest {
    /// The index name.
    pub index: String,
    /// Status codes the backend must not report as failures.
    pub ignore: IgnoreSet,
}

/// Raw outcome of a create or delete call as reported by the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IndexResponse {
    /// HTTP status code of the response.
    pub status: u16,
    /// Parsed JSON response body (`Value::Null` when the body was empty).
    pub body: Value,
}

impl IndexResponse {
    /// Whether the status code is in the 2xx range.
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }

    /// The `acknowledged` flag of the response body, `false` when absent.
    pub fn acknowledged(&self) -> bool {
        self.body
            .get("acknowledged")
            .and_then(Value::as_bool)
            .unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_ignore_set_dedups_and_sorts() {
        let mut ignores = IgnoreSet::new();
        ignores.merge([404, 400]);
        ignores.merge([400]);
        ignores.merge(vec![409, 404]);

        assert_eq!(ignores.len(), 3);
        assert_eq!(ignores.iter().collect::<Vec<_>>(), vec![400, 404, 409]);
        assert!(ignores.contains(409));
        assert!(!ignores.contains(500));
    }

    #[test]
    fn test_ignore_set_serializes_as_array() {
        let ignores: IgnoreSet = [404, 400].into_iter().collect();
        assert_eq!(serde_json::to_value(&ignores).unwrap(), json!([400, 404]));
    }

    #[test]
    fn test_body_without_mappings_omits_key() {
        let mut settings = Map::new();
        settings.insert("number_of_shards".to_string(), json!(1));
        let body = CreateIndexBody {
            settings,
            mappings: None,
        };

        let rendered = serde_json::to_value(&body).unwrap();
        assert!(rendered.get("mappings").is_none());
        assert_eq!(rendered, json!({"settings": {"number_of_shards": 1}}));
    }

    #[test]
    fn test_body_with_mappings() {
        let mut mappings = Map::new();
        mappings.insert("properties".to_string(), json!({"name": {"type": "text"}}));
        let body = CreateIndexBody {
            settings: Map::new(),
            mappings: Some(mappings),
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "settings": {},
                "mappings": {"properties": {"name": {"type": "text"}}}
            })
        );
    }

    #[test]
    fn test_body_keeps_settings_insertion_order() {
        let mut settings = Map::new();
        settings.insert("refresh_interval".to_string(), json!("5s"));
        settings.insert("number_of_shards".to_string(), json!(3));
        settings.insert("number_of_replicas".to_string(), json!(1));
        let body = CreateIndexBody {
            settings,
            mappings: None,
        };

        assert_eq!(
            serde_json::to_string(&body).unwrap(),
            r#"{"settings":{"refresh_interval":"5s","number_of_shards":3,"number_of_replicas":1}}"#
        );
    }

    #[test]
    fn test_index_response_helpers() {
        let response = IndexResponse {
            status: 200,
            body: json!({"acknowledged": true, "index": "logs"}),
        };
        assert!(response.is_success());
        assert!(response.acknowledged());

        let ignored = IndexResponse {
            status: 404,
            body: json!({"error": {"type": "index_not_found_exception"}}),
        };
        assert!(!ignored.is_success());
        assert!(!ignored.acknowledged());
    }
}
