//! Client SDK for a vector database speaking gRPC.
//!
//! The [`Client`] owns one multiplexed HTTP/2 channel, caches collection
//! schemas, validates and encodes columnar payloads locally, and retries
//! transient failures with exponential backoff.
//!
//! ```no_run
//! use vector_sdk::{
//!     Client, CollectionSchema, Column, ConnectOptions, DataType, FieldSchema, SearchOptions,
//!     SearchVectors,
//! };
//!
//! # async fn run() -> vector_sdk::Result<()> {
//! let client = Client::connect(ConnectOptions::new("http://localhost:19530")).await?;
//!
//! let schema = CollectionSchema::new("films")
//!     .with_field(FieldSchema::new("id", DataType::Int64).primary_key())
//!     .with_field(FieldSchema::new("embedding", DataType::FloatVector).with_dim(4));
//! client.create_collection(&schema).await?;
//!
//! client
//!     .insert(
//!         "films",
//!         None,
//!         &[
//!             Column::int64("id", vec![1, 2]),
//!             Column::float_vector(
//!                 "embedding",
//!                 4,
//!                 vec![vec![0.1, 0.2, 0.3, 0.4], vec![0.5, 0.6, 0.7, 0.8]],
//!             ),
//!         ],
//!     )
//!     .await?;
//!
//! let hits = client
//!     .search(&SearchOptions::new(
//!         "films",
//!         "embedding",
//!         SearchVectors::float(vec![vec![0.1, 0.2, 0.3, 0.4]]),
//!         1,
//!     ))
//!     .await?;
//! # let _ = hits;
//! # Ok(())
//! # }
//! ```

pub mod blocking;
pub mod cache;
pub mod client;
pub mod codec;
pub mod column;
pub mod connection;
pub mod error;
mod executor;
pub mod request;
pub mod response;
pub mod schema;

pub use blocking::BlockingClient;
pub use cache::{MemorySchemaCache, NoopSchemaCache, SchemaCache};
pub use client::Client;
pub use codec::{decode_field_data, encode_column, encode_columns};
pub use column::{Column, ColumnData, SparseRow, Value};
pub use connection::{ConnectOptions, Connection};
pub use error::{Error, Result, TimeoutScope};
pub use executor::{cancellable, CancelHandle, RetryPolicy};
pub use request::{
    CreateIndexOptions, IndexType, MetricType, QueryOptions, SearchOptions, SearchVectors,
};
pub use response::{DmlResult, Hit, Id, IndexInfo, IndexState, QueryResult, SearchResult};
pub use schema::{CollectionSchema, ConsistencyLevel, DataType, FieldSchema};
