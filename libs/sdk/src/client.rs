//! Async client facade. One [`Client`] owns one connection; clones share it
//! along with the schema cache and retry policy.

use std::future::Future;
use std::sync::Arc;

use protos::vector::v1 as pb;
use tracing::{debug, instrument};

use crate::cache::{MemorySchemaCache, SchemaCache};
use crate::codec::encode_columns;
use crate::column::Column;
use crate::connection::{ConnectOptions, Connection, SvcClient};
use crate::error::{Error, Result};
use crate::executor::{execute, CallFailure, RetryPolicy};
use crate::request::{CreateIndexOptions, QueryOptions, SearchOptions};
use crate::response::{
    decode_mutation, decode_query, decode_search, ensure_ok, DmlResult, IndexInfo, QueryResult,
    SearchResult,
};
use crate::schema::{CollectionSchema, ConsistencyLevel};

/// Handle to one server. Cheap to clone; clones multiplex over the same
/// channel and share the schema cache.
#[derive(Clone)]
pub struct Client {
    connection: Connection,
    cache: Arc<dyn SchemaCache>,
    policy: RetryPolicy,
    consistency: ConsistencyLevel,
}

impl Client {
    /// Dial the server, probe it, and return a ready client.
    pub async fn connect(options: ConnectOptions) -> Result<Self> {
        let connection = Connection::open(options).await?;
        Ok(Self {
            connection,
            cache: Arc::new(MemorySchemaCache::new()),
            policy: RetryPolicy::default(),
            consistency: ConsistencyLevel::default(),
        })
    }

    pub fn with_retry_policy(mut self, policy: RetryPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn with_schema_cache(mut self, cache: Arc<dyn SchemaCache>) -> Self {
        self.cache = cache;
        self
    }

    /// Consistency applied to reads that do not set their own level.
    pub fn with_default_consistency(mut self, level: ConsistencyLevel) -> Self {
        self.consistency = level;
        self
    }

    /// Run one unary call under the retry policy. Re-acquires the channel
    /// each attempt so a broken connection heals between retries.
    async fn invoke<Req, Resp, F, Fut>(&self, op: &'static str, request: Req, call: F) -> Result<Resp>
    where
        Req: Clone,
        F: Fn(SvcClient, Req) -> Fut,
        Fut: Future<Output = std::result::Result<Resp, CallFailure>>,
    {
        let call = &call;
        execute(op, &self.policy, move || {
            let connection = self.connection.clone();
            let request = request.clone();
            async move {
                let client = connection.client().await.map_err(CallFailure::Connect)?;
                let result = call(client, request).await;
                if let Err(CallFailure::Rpc(status)) = &result {
                    if status.code() == tonic::Code::Unavailable {
                        connection.mark_broken().await;
                    }
                }
                result
            }
        })
        .await
    }

    /// Create a collection from a validated schema and cache it.
    #[instrument(skip(self, schema), fields(collection = %schema.name))]
    pub async fn create_collection(&self, schema: &CollectionSchema) -> Result<()> {
        schema.validate()?;
        let request = pb::CreateCollectionRequest {
            schema: Some(schema.to_proto()),
            consistency_level: schema.consistency_level.to_proto() as i32,
            num_shards: 0,
        };
        self.invoke("create_collection", request, |mut client, request| async move {
            let status = client
                .create_collection(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await?;
        self.cache.put(schema.clone());
        Ok(())
    }

    #[instrument(skip(self))]
    pub async fn drop_collection(&self, collection_name: &str) -> Result<()> {
        let request = pb::DropCollectionRequest {
            collection_name: collection_name.to_string(),
        };
        self.invoke("drop_collection", request, |mut client, request| async move {
            let status = client
                .drop_collection(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await?;
        self.cache.invalidate(collection_name);
        Ok(())
    }

    pub async fn has_collection(&self, collection_name: &str) -> Result<bool> {
        let request = pb::HasCollectionRequest {
            collection_name: collection_name.to_string(),
        };
        let response = self
            .invoke("has_collection", request, |mut client, request| async move {
                let response = client
                    .has_collection(request)
                    .await
                    .map_err(CallFailure::Rpc)?
                    .into_inner();
                ensure_ok(response.status.as_ref())?;
                Ok(response)
            })
            .await?;
        Ok(response.value)
    }

    pub async fn list_collections(&self) -> Result<Vec<String>> {
        let response = self
            .invoke(
                "list_collections",
                pb::ListCollectionsRequest {},
                |mut client, request| async move {
                    let response = client
                        .list_collections(request)
                        .await
                        .map_err(CallFailure::Rpc)?
                        .into_inner();
                    ensure_ok(response.status.as_ref())?;
                    Ok(response)
                },
            )
            .await?;
        Ok(response.collection_names)
    }

    /// Fetch a collection schema, served from the cache when possible.
    pub async fn describe_collection(&self, collection_name: &str) -> Result<CollectionSchema> {
        if let Some(schema) = self.cache.get(collection_name) {
            debug!(target: "vector_sdk", collection = collection_name, "schema served from cache");
            return Ok(schema);
        }
        let request = pb::DescribeCollectionRequest {
            collection_name: collection_name.to_string(),
        };
        let response = self
            .invoke("describe_collection", request, |mut client, request| async move {
                let response = client
                    .describe_collection(request)
                    .await
                    .map_err(CallFailure::Rpc)?
                    .into_inner();
                ensure_ok(response.status.as_ref())?;
                Ok(response)
            })
            .await?;
        let proto = response
            .schema
            .ok_or_else(|| Error::decode("describe response carries no schema"))?;
        let schema = CollectionSchema::from_proto(proto, response.consistency_level)?;
        self.cache.put(schema.clone());
        Ok(schema)
    }

    /// Drop the cached schema for one collection; the next describe or
    /// insert refetches it from the server.
    pub fn drop_cached_schema(&self, collection_name: &str) {
        self.cache.invalidate(collection_name);
    }

    pub async fn create_partition(
        &self,
        collection_name: &str,
        partition_name: &str,
    ) -> Result<()> {
        let request = pb::CreatePartitionRequest {
            collection_name: collection_name.to_string(),
            partition_name: partition_name.to_string(),
        };
        self.invoke("create_partition", request, |mut client, request| async move {
            let status = client
                .create_partition(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await
    }

    pub async fn drop_partition(
        &self,
        collection_name: &str,
        partition_name: &str,
    ) -> Result<()> {
        let request = pb::DropPartitionRequest {
            collection_name: collection_name.to_string(),
            partition_name: partition_name.to_string(),
        };
        self.invoke("drop_partition", request, |mut client, request| async move {
            let status = client
                .drop_partition(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await
    }

    /// Load a collection into memory so it can be searched.
    #[instrument(skip(self))]
    pub async fn load_collection(&self, collection_name: &str) -> Result<()> {
        let request = pb::LoadCollectionRequest {
            collection_name: collection_name.to_string(),
            replica_number: 1,
        };
        self.invoke("load_collection", request, |mut client, request| async move {
            let status = client
                .load_collection(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await
    }

    pub async fn release_collection(&self, collection_name: &str) -> Result<()> {
        let request = pb::ReleaseCollectionRequest {
            collection_name: collection_name.to_string(),
        };
        self.invoke("release_collection", request, |mut client, request| async move {
            let status = client
                .release_collection(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await
    }

    pub async fn create_index(&self, options: &CreateIndexOptions) -> Result<()> {
        let request = options.build()?;
        self.invoke("create_index", request, |mut client, request| async move {
            let status = client
                .create_index(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await
    }

    pub async fn drop_index(&self, collection_name: &str, field_name: &str) -> Result<()> {
        let request = pb::DropIndexRequest {
            collection_name: collection_name.to_string(),
            field_name: field_name.to_string(),
            index_name: String::new(),
        };
        self.invoke("drop_index", request, |mut client, request| async move {
            let status = client
                .drop_index(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await
    }

    pub async fn describe_index(
        &self,
        collection_name: &str,
        field_name: &str,
    ) -> Result<Vec<IndexInfo>> {
        let request = pb::DescribeIndexRequest {
            collection_name: collection_name.to_string(),
            field_name: field_name.to_string(),
            index_name: String::new(),
        };
        let response = self
            .invoke("describe_index", request, |mut client, request| async move {
                let response = client
                    .describe_index(request)
                    .await
                    .map_err(CallFailure::Rpc)?
                    .into_inner();
                ensure_ok(response.status.as_ref())?;
                Ok(response)
            })
            .await?;
        response
            .index_descriptions
            .into_iter()
            .map(IndexInfo::from_proto)
            .collect()
    }

    /// Insert rows. Columns are validated against the collection schema and
    /// encoded before anything touches the network.
    ///
    /// Retried on transient failures, so delivery is at-least-once; a retry
    /// after an ambiguous outcome can duplicate rows.
    #[instrument(skip(self, columns))]
    pub async fn insert(
        &self,
        collection_name: &str,
        partition_name: Option<&str>,
        columns: &[Column],
    ) -> Result<DmlResult> {
        let request = self
            .build_mutation(collection_name, partition_name, columns)
            .await?;
        let num_rows = request.num_rows;
        let result = self
            .invoke("insert", request, |mut client, request| async move {
                let result = client
                    .insert(request)
                    .await
                    .map_err(CallFailure::Rpc)?
                    .into_inner();
                ensure_ok(result.status.as_ref())?;
                Ok(result)
            })
            .await;
        self.settle_mutation(collection_name, num_rows, result)
    }

    /// Insert-or-replace by primary key. Same validation, encoding and
    /// delivery caveats as [`Client::insert`].
    #[instrument(skip(self, columns))]
    pub async fn upsert(
        &self,
        collection_name: &str,
        partition_name: Option<&str>,
        columns: &[Column],
    ) -> Result<DmlResult> {
        let insert = self
            .build_mutation(collection_name, partition_name, columns)
            .await?;
        let num_rows = insert.num_rows;
        let request = pb::UpsertRequest {
            collection_name: insert.collection_name,
            partition_name: insert.partition_name,
            fields_data: insert.fields_data,
            num_rows: insert.num_rows,
        };
        let result = self
            .invoke("upsert", request, |mut client, request| async move {
                let result = client
                    .upsert(request)
                    .await
                    .map_err(CallFailure::Rpc)?
                    .into_inner();
                ensure_ok(result.status.as_ref())?;
                Ok(result)
            })
            .await;
        self.settle_mutation(collection_name, num_rows, result)
    }

    async fn build_mutation(
        &self,
        collection_name: &str,
        partition_name: Option<&str>,
        columns: &[Column],
    ) -> Result<pb::InsertRequest> {
        let schema = self.describe_collection(collection_name).await?;
        let num_rows = schema.validate_columns(columns)?;
        let fields_data = encode_columns(&schema, columns)?;
        Ok(pb::InsertRequest {
            collection_name: collection_name.to_string(),
            partition_name: partition_name.unwrap_or("").to_string(),
            fields_data,
            num_rows: num_rows as u32,
        })
    }

    /// A mutation rejected by the server may mean the cached schema went
    /// stale; drop it so the next attempt refetches.
    fn settle_mutation(
        &self,
        collection_name: &str,
        num_rows: u32,
        result: Result<pb::MutationResult>,
    ) -> Result<DmlResult> {
        match result {
            Ok(mutation) => {
                debug!(
                    target: "vector_sdk",
                    collection = collection_name,
                    rows = num_rows,
                    "mutation applied"
                );
                decode_mutation(mutation)
            }
            Err(error) => {
                if matches!(error, Error::Terminal { .. }) {
                    self.cache.invalidate(collection_name);
                }
                Err(error)
            }
        }
    }

    /// Delete rows matched by an opaque filter expression.
    #[instrument(skip(self))]
    pub async fn delete(
        &self,
        collection_name: &str,
        partition_name: Option<&str>,
        expr: &str,
    ) -> Result<DmlResult> {
        if expr.is_empty() {
            return Err(Error::validation("expr", "must not be empty"));
        }
        let request = pb::DeleteRequest {
            collection_name: collection_name.to_string(),
            partition_name: partition_name.unwrap_or("").to_string(),
            expr: expr.to_string(),
        };
        let result = self
            .invoke("delete", request, |mut client, request| async move {
                let result = client
                    .delete(request)
                    .await
                    .map_err(CallFailure::Rpc)?
                    .into_inner();
                ensure_ok(result.status.as_ref())?;
                Ok(result)
            })
            .await?;
        decode_mutation(result)
    }

    /// Approximate-nearest-neighbor search.
    #[instrument(skip(self, options), fields(collection = %options.collection_name))]
    pub async fn search(&self, options: &SearchOptions) -> Result<SearchResult> {
        let request = options.build(self.consistency)?;
        let response = self
            .invoke("search", request, |mut client, request| async move {
                let response = client
                    .search(request)
                    .await
                    .map_err(CallFailure::Rpc)?
                    .into_inner();
                ensure_ok(response.status.as_ref())?;
                Ok(response)
            })
            .await?;
        decode_search(response.results)
    }

    /// Scalar query by filter expression.
    #[instrument(skip(self, options), fields(collection = %options.collection_name))]
    pub async fn query(&self, options: &QueryOptions) -> Result<QueryResult> {
        let request = options.build(self.consistency)?;
        let response = self
            .invoke("query", request, |mut client, request| async move {
                let response = client
                    .query(request)
                    .await
                    .map_err(CallFailure::Rpc)?
                    .into_inner();
                ensure_ok(response.status.as_ref())?;
                Ok(response)
            })
            .await?;
        decode_query(response.fields_data)
    }

    /// Persist buffered mutations for the named collections.
    pub async fn flush(&self, collection_names: &[String]) -> Result<()> {
        let request = pb::FlushRequest {
            collection_names: collection_names.to_vec(),
        };
        self.invoke("flush", request, |mut client, request| async move {
            let status = client
                .flush(request)
                .await
                .map_err(CallFailure::Rpc)?
                .into_inner();
            ensure_ok(Some(&status))
        })
        .await
    }

    pub async fn health_check(&self) -> Result<bool> {
        let response = self
            .invoke(
                "health_check",
                pb::HealthCheckRequest {},
                |mut client, request| async move {
                    let response = client
                        .health_check(request)
                        .await
                        .map_err(CallFailure::Rpc)?
                        .into_inner();
                    ensure_ok(response.status.as_ref())?;
                    Ok(response)
                },
            )
            .await?;
        Ok(response.is_healthy)
    }

    /// Close the underlying connection. Idempotent; all clones observe it.
    pub async fn close(&self) {
        self.connection.close().await;
    }

    pub fn uri(&self) -> &str {
        self.connection.uri()
    }
}
