//! Fluent index configuration builder.
//!
//! `Index` collects the shard count, replica count, mappings, settings and
//! ignored status codes of a single index, and turns them into requests for an
//! [`IndexAdmin`] when one of its actions is called.

use std::fmt;

use serde_json::{Map, Value};
use tracing::{debug, info};

use crate::errors::SearchIndexError;
use crate::interfaces::IndexAdmin;
use crate::types::{
    CreateIndexBody, CreateIndexRequest, DeleteIndexRequest, ExistsIndexRequest, IgnoreSet,
    IndexResponse,
};

/// Shard count used when `shards` is never called.
pub const DEFAULT_SHARDS: u32 = 5;

/// Replica count used when `replicas` is never called.
pub const DEFAULT_REPLICAS: u32 = 0;

/// Settings key holding the shard count.
pub const NUMBER_OF_SHARDS: &str = "number_of_shards";

/// Settings key holding the replica count.
pub const NUMBER_OF_REPLICAS: &str = "number_of_replicas";

/// Callback run against the configuration right before a create request is assembled.
pub type Initializer = Box<dyn Fn(&mut Index) + Send + Sync>;

/// Configuration of a single search index.
///
/// Setters return `&mut Self` so calls can be chained. The terminal actions
/// (`exists`, `create`, `drop_index`) build a request from the current state
/// and return the admin's result without interpreting it.
///
/// # Example
///
/// ```no_run
/// use search_index_builder::{Index, OpenSearchConfig, OpenSearchIndexAdmin};
/// use serde_json::{json, Map};
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let admin = OpenSearchIndexAdmin::new(&OpenSearchConfig::default())?;
///
/// let mut settings = Map::new();
/// settings.insert("refresh_interval".to_string(), json!("5s"));
///
/// let mut index = Index::new("logs");
/// index.shards(3).replicas(1).setting(settings).ignore([400]);
///
/// if !index.exists(&admin).await? {
///     index.create(&admin).await?;
/// }
/// # Ok(())
/// # }
/// ```
pub struct Index {
    name: String,
    shards: u32,
    replicas: u32,
    mappings: Map<String, Value>,
    settings: Map<String, Value>,
    ignores: IgnoreSet,
    initializer: Option<Initializer>,
}

impl Index {
    /// Create a configuration for the index `name` with default values.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            shards: DEFAULT_SHARDS,
            replicas: DEFAULT_REPLICAS,
            mappings: Map::new(),
            settings: Map::new(),
            ignores: IgnoreSet::new(),
            initializer: None,
        }
    }

    /// Create a configuration whose `initializer` runs before every create request.
    ///
    /// The initializer receives the configuration itself and may call any
    /// setter; its changes are part of the request that follows.
    pub fn with_initializer<F>(name: impl Into<String>, initializer: F) -> Self
    where
        F: Fn(&mut Index) + Send + Sync + 'static,
    {
        Self {
            initializer: Some(Box::new(initializer)),
            ..Self::new(name)
        }
    }

    /// Set the number of primary shards.
    pub fn shards(&mut self, shards: u32) -> &mut Self {
        self.shards = shards;
        self
    }

    /// Set the number of replicas per shard.
    pub fn replicas(&mut self, replicas: u32) -> &mut Self {
        self.replicas = replicas;
        self
    }

    /// Add status codes the backend should not report as failures.
    ///
    /// Codes accumulate across calls and duplicates collapse, so
    /// `ignore([400]).ignore([400, 404])` leaves `{400, 404}`.
    pub fn ignore<I>(&mut self, codes: I) -> &mut Self
    where
        I: IntoIterator<Item = u16>,
    {
        self.ignores.merge(codes);
        self
    }

    /// Replace the field mappings.
    pub fn mapping(&mut self, mappings: Map<String, Value>) -> &mut Self {
        self.mappings = mappings;
        self
    }

    /// Replace the index settings.
    ///
    /// `number_of_shards` and `number_of_replicas` entries are overwritten by
    /// the values of `shards` and `replicas` when the request is built.
    pub fn setting(&mut self, settings: Map<String, Value>) -> &mut Self {
        self.settings = settings;
        self
    }

    /// The index name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Configured number of primary shards.
    pub fn shard_count(&self) -> u32 {
        self.shards
    }

    /// Configured number of replicas.
    pub fn replica_count(&self) -> u32 {
        self.replicas
    }

    /// Field mappings as last set by `mapping`.
    pub fn mappings(&self) -> &Map<String, Value> {
        &self.mappings
    }

    /// Settings as last set by `setting`, without the shard and replica counts.
    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// Status codes collected by `ignore`.
    pub fn ignores(&self) -> &IgnoreSet {
        &self.ignores
    }

    /// Request used by `exists`.
    pub fn exists_request(&self) -> ExistsIndexRequest {
        ExistsIndexRequest {
            index: self.name.clone(),
        }
    }

    /// Run the initializer, if any, and assemble the create request.
    pub fn create_request(&mut self) -> CreateIndexRequest {
        self.run_initializer();

        let mut settings = self.settings.clone();
        settings.insert(NUMBER_OF_SHARDS.to_string(), Value::from(self.shards));
        settings.insert(NUMBER_OF_REPLICAS.to_string(), Value::from(self.replicas));

        let mappings = if self.mappings.is_empty() {
            None
        } else {
            Some(self.mappings.clone())
        };

        CreateIndexRequest {
            index: self.name.clone(),
            body: CreateIndexBody { settings, mappings },
            ignore: self.ignores.clone(),
        }
    }

    /// Request used by `drop_index`.
    pub fn delete_request(&self) -> DeleteIndexRequest {
        DeleteIndexRequest {
            index: self.name.clone(),
            ignore: self.ignores.clone(),
        }
    }

    /// Check whether the index exists.
    pub async fn exists<A>(&self, admin: &A) -> Result<bool, SearchIndexError>
    where
        A: IndexAdmin + ?Sized,
    {
        admin.exists(&self.exists_request()).await
    }

    /// Create the index.
    pub async fn create<A>(&mut self, admin: &A) -> Result<IndexResponse, SearchIndexError>
    where
        A: IndexAdmin + ?Sized,
    {
        let request = self.create_request();
        debug!(
            index = %request.index,
            shards = self.shards,
            replicas = self.replicas,
            has_mappings = request.body.mappings.is_some(),
            "Creating index"
        );
        admin.create(&request).await
    }

    /// Delete the index.
    pub async fn drop_index<A>(&self, admin: &A) -> Result<IndexResponse, SearchIndexError>
    where
        A: IndexAdmin + ?Sized,
    {
        debug!(index = %self.name, "Dropping index");
        admin.delete(&self.delete_request()).await
    }

    /// Create the index unless it already exists.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(IndexResponse))` - The index was missing and the create call returned this
    /// * `Ok(None)` - The index already existed and nothing was sent
    /// * `Err(SearchIndexError)` - If either call fails
    pub async fn ensure_exists<A>(
        &mut self,
        admin: &A,
    ) -> Result<Option<IndexResponse>, SearchIndexError>
    where
        A: IndexAdmin + ?Sized,
    {
        if self.exists(admin).await? {
            info!(index = %self.name, "Index already exists");
            return Ok(None);
        }

        let response = self.create(admin).await?;
        info!(index = %self.name, status = response.status, "Index created");
        Ok(Some(response))
    }

    fn run_initializer(&mut self) {
        // Taken out for the call so the callback can borrow `self` mutably.
        if let Some(initializer) = self.initializer.take() {
            initializer(self);
            self.initializer = Some(initializer);
        }
    }
}

impl fmt::Debug for Index {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Index")
            .field("name", &self.name)
            .field("shards", &self.shards)
            .field("replicas", &self.replicas)
            .field("mappings", &self.mappings)
            .field("settings", &self.settings)
            .field("ignores", &self.ignores)
            .field("has_initializer", &self.initializer.is_some())
            .finish()
    }
}
