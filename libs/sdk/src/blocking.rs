//! Synchronous facade for callers without a runtime. Each [`BlockingClient`]
//! owns a current-thread runtime and drives the async client on it.

use std::sync::Arc;

use tokio::runtime::{Builder, Runtime};

use crate::cache::SchemaCache;
use crate::client::Client;
use crate::column::Column;
use crate::connection::ConnectOptions;
use crate::error::{Error, Result};
use crate::executor::RetryPolicy;
use crate::request::{CreateIndexOptions, QueryOptions, SearchOptions};
use crate::response::{DmlResult, IndexInfo, QueryResult, SearchResult};
use crate::schema::{CollectionSchema, ConsistencyLevel};

/// Blocking wrapper around [`Client`].
///
/// Must not be used from inside an async context; entering the runtime from
/// another runtime panics in tokio.
pub struct BlockingClient {
    runtime: Runtime,
    inner: Client,
}

impl BlockingClient {
    pub fn connect(options: ConnectOptions) -> Result<Self> {
        let runtime = Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| Error::Connect {
                reason: format!("failed to build runtime: {e}"),
            })?;
        let inner = runtime.block_on(Client::connect(options))?;
        Ok(Self { runtime, inner })
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.inner = self.inner.with_retry_policy(policy);
        self
    }

    pub fn with_schema_cache(mut self, cache: Arc<dyn SchemaCache>) -> Self {
        self.inner = self.inner.with_schema_cache(cache);
        self
    }

    pub fn with_default_consistency(mut self, level: ConsistencyLevel) -> Self {
        self.inner = self.inner.with_default_consistency(level);
        self
    }

    pub fn create_collection(&self, schema: &CollectionSchema) -> Result<()> {
        self.runtime.block_on(self.inner.create_collection(schema))
    }

    pub fn drop_collection(&self, collection_name: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.drop_collection(collection_name))
    }

    pub fn has_collection(&self, collection_name: &str) -> Result<bool> {
        self.runtime
            .block_on(self.inner.has_collection(collection_name))
    }

    pub fn list_collections(&self) -> Result<Vec<String>> {
        self.runtime.block_on(self.inner.list_collections())
    }

    pub fn describe_collection(&self, collection_name: &str) -> Result<CollectionSchema> {
        self.runtime
            .block_on(self.inner.describe_collection(collection_name))
    }

    pub fn drop_cached_schema(&self, collection_name: &str) {
        self.inner.drop_cached_schema(collection_name);
    }

    pub fn create_partition(&self, collection_name: &str, partition_name: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.create_partition(collection_name, partition_name))
    }

    pub fn drop_partition(&self, collection_name: &str, partition_name: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.drop_partition(collection_name, partition_name))
    }

    pub fn load_collection(&self, collection_name: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.load_collection(collection_name))
    }

    pub fn release_collection(&self, collection_name: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.release_collection(collection_name))
    }

    pub fn create_index(&self, options: &CreateIndexOptions) -> Result<()> {
        self.runtime.block_on(self.inner.create_index(options))
    }

    pub fn drop_index(&self, collection_name: &str, field_name: &str) -> Result<()> {
        self.runtime
            .block_on(self.inner.drop_index(collection_name, field_name))
    }

    pub fn describe_index(
        &self,
        collection_name: &str,
        field_name: &str,
    ) -> Result<Vec<IndexInfo>> {
        self.runtime
            .block_on(self.inner.describe_index(collection_name, field_name))
    }

    pub fn insert(
        &self,
        collection_name: &str,
        partition_name: Option<&str>,
        columns: &[Column],
    ) -> Result<DmlResult> {
        self.runtime
            .block_on(self.inner.insert(collection_name, partition_name, columns))
    }

    pub fn upsert(
        &self,
        collection_name: &str,
        partition_name: Option<&str>,
        columns: &[Column],
    ) -> Result<DmlResult> {
        self.runtime
            .block_on(self.inner.upsert(collection_name, partition_name, columns))
    }

    pub fn delete(
        &self,
        collection_name: &str,
        partition_name: Option<&str>,
        expr: &str,
    ) -> Result<DmlResult> {
        self.runtime
            .block_on(self.inner.delete(collection_name, partition_name, expr))
    }

    pub fn search(&self, options: &SearchOptions) -> Result<SearchResult> {
        self.runtime.block_on(self.inner.search(options))
    }

    pub fn query(&self, options: &QueryOptions) -> Result<QueryResult> {
        self.runtime.block_on(self.inner.query(options))
    }

    pub fn flush(&self, collection_names: &[String]) -> Result<()> {
        self.runtime.block_on(self.inner.flush(collection_names))
    }

    pub fn health_check(&self) -> Result<bool> {
        self.runtime.block_on(self.inner.health_check())
    }

    pub fn close(&self) {
        self.runtime.block_on(self.inner.close());
    }
}
