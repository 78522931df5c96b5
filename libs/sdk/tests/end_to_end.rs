mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use support::MockVectorService;
use vector_sdk::{
    Client, CollectionSchema, Column, ConnectOptions, DataType, Error, FieldSchema, Id,
    IndexState, QueryOptions, SearchOptions, SearchVectors,
};

async fn connected() -> (Arc<MockVectorService>, Client) {
    support::init_tracing();
    let service = Arc::new(MockVectorService::default());
    let uri = service.clone().spawn().await;
    let client = Client::connect(ConnectOptions::new(uri))
        .await
        .expect("connect to in-process server");
    (service, client)
}

fn films_schema() -> CollectionSchema {
    CollectionSchema::new("films")
        .with_field(FieldSchema::new("id", DataType::Int64).primary_key())
        .with_field(FieldSchema::new("vector", DataType::FloatVector).with_dim(4))
}

#[tokio::test]
async fn test_insert_flush_search_returns_nearest_row() {
    let (_service, client) = connected().await;
    client.create_collection(&films_schema()).await.unwrap();

    let inserted = client
        .insert(
            "films",
            None,
            &[
                Column::int64("id", vec![1, 2]),
                Column::float_vector(
                    "vector",
                    4,
                    vec![vec![0.1, 0.2, 0.3, 0.4], vec![0.5, 0.6, 0.7, 0.8]],
                ),
            ],
        )
        .await
        .unwrap();
    assert_eq!(inserted.insert_count, 2);
    assert_eq!(inserted.ids, vec![Id::Int(1), Id::Int(2)]);

    client.flush(&["films".to_string()]).await.unwrap();
    client.load_collection("films").await.unwrap();

    let result = client
        .search(&SearchOptions::new(
            "films",
            "vector",
            SearchVectors::float(vec![vec![0.1, 0.2, 0.3, 0.4]]),
            1,
        ))
        .await
        .unwrap();

    assert_eq!(result.num_queries(), 1);
    assert_eq!(result.queries[0].len(), 1);
    let hit = &result.queries[0][0];
    assert_eq!(hit.id, Id::Int(1));
    assert!(hit.score < 1e-6, "exact match should score ~0, got {}", hit.score);
}

#[tokio::test]
async fn test_multi_query_search_groups_hits() {
    let (_service, client) = connected().await;
    client.create_collection(&films_schema()).await.unwrap();
    client
        .insert(
            "films",
            None,
            &[
                Column::int64("id", vec![1, 2]),
                Column::float_vector(
                    "vector",
                    4,
                    vec![vec![0.0, 0.0, 0.0, 0.0], vec![1.0, 1.0, 1.0, 1.0]],
                ),
            ],
        )
        .await
        .unwrap();

    let result = client
        .search(&SearchOptions::new(
            "films",
            "vector",
            SearchVectors::float(vec![vec![0.9, 0.9, 0.9, 0.9], vec![0.1, 0.0, 0.0, 0.0]]),
            1,
        ))
        .await
        .unwrap();

    assert_eq!(result.num_queries(), 2);
    assert_eq!(result.queries[0][0].id, Id::Int(2));
    assert_eq!(result.queries[1][0].id, Id::Int(1));
}

#[tokio::test]
async fn test_collection_lifecycle() {
    let (_service, client) = connected().await;

    assert!(!client.has_collection("films").await.unwrap());
    client.create_collection(&films_schema()).await.unwrap();
    assert!(client.has_collection("films").await.unwrap());
    assert_eq!(
        client.list_collections().await.unwrap(),
        vec!["films".to_string()]
    );

    let schema = client.describe_collection("films").await.unwrap();
    assert_eq!(schema.name, "films");
    assert_eq!(schema.fields.len(), 2);
    assert_eq!(schema.field("vector").unwrap().dim, Some(4));

    client.drop_collection("films").await.unwrap();
    assert!(!client.has_collection("films").await.unwrap());
}

#[tokio::test]
async fn test_create_existing_collection_is_terminal() {
    let (_service, client) = connected().await;
    client.create_collection(&films_schema()).await.unwrap();
    let result = client.create_collection(&films_schema()).await;
    assert!(matches!(result, Err(Error::Terminal { .. })));
}

#[tokio::test]
async fn test_schema_cache_avoids_repeat_describes() {
    let (service, client) = connected().await;
    client.create_collection(&films_schema()).await.unwrap();

    // create_collection primes the cache, so these are all local.
    client.describe_collection("films").await.unwrap();
    client.describe_collection("films").await.unwrap();
    assert_eq!(service.describe_calls.load(Ordering::SeqCst), 0);

    // After invalidation the next describe goes to the server once.
    client.drop_cached_schema("films");
    client.describe_collection("films").await.unwrap();
    client.describe_collection("films").await.unwrap();
    assert_eq!(service.describe_calls.load(Ordering::SeqCst), 1);
}

#[tokio::test]
async fn test_stale_columns_rejected_against_refetched_schema() {
    let (service, client) = connected().await;
    client.create_collection(&films_schema()).await.unwrap();

    // Simulate the server-side schema changing under the client.
    client.drop_collection("films").await.unwrap();
    let recreated = CollectionSchema::new("films")
        .with_field(FieldSchema::new("id", DataType::Int64).primary_key())
        .with_field(FieldSchema::new("vector", DataType::FloatVector).with_dim(8));
    client.create_collection(&recreated).await.unwrap();
    client.drop_cached_schema("films");
    client.describe_collection("films").await.unwrap();
    let before = service.describe_calls.load(Ordering::SeqCst);

    // Columns built against the stale dim-4 layout are rejected locally
    // against the refetched schema.
    let result = client
        .insert(
            "films",
            None,
            &[
                Column::int64("id", vec![1]),
                Column::float_vector("vector", 4, vec![vec![0.0; 4]]),
            ],
        )
        .await;
    assert!(matches!(result, Err(Error::SchemaMismatch { .. })));
    assert_eq!(service.describe_calls.load(Ordering::SeqCst), before);
}

#[tokio::test]
async fn test_upsert_replaces_rows() {
    let (_service, client) = connected().await;
    client.create_collection(&films_schema()).await.unwrap();
    client
        .insert(
            "films",
            None,
            &[
                Column::int64("id", vec![1]),
                Column::float_vector("vector", 4, vec![vec![0.0; 4]]),
            ],
        )
        .await
        .unwrap();
    client
        .upsert(
            "films",
            None,
            &[
                Column::int64("id", vec![1]),
                Column::float_vector("vector", 4, vec![vec![1.0; 4]]),
            ],
        )
        .await
        .unwrap();

    let result = client
        .search(&SearchOptions::new(
            "films",
            "vector",
            SearchVectors::float(vec![vec![1.0; 4]]),
            1,
        ))
        .await
        .unwrap();
    assert_eq!(result.queries[0][0].id, Id::Int(1));
    assert!(result.queries[0][0].score < 1e-6);
}

#[tokio::test]
async fn test_delete_by_expression() {
    let (_service, client) = connected().await;
    client.create_collection(&films_schema()).await.unwrap();
    client
        .insert(
            "films",
            None,
            &[
                Column::int64("id", vec![1, 2, 3]),
                Column::float_vector("vector", 4, vec![vec![0.0; 4]; 3]),
            ],
        )
        .await
        .unwrap();

    let deleted = client.delete("films", None, "id in [1, 3]").await.unwrap();
    assert_eq!(deleted.delete_count, 2);

    let remaining = client
        .query(&QueryOptions::new("films", "id in [1, 2, 3]"))
        .await
        .unwrap();
    assert_eq!(remaining.num_rows, 1);
    let ids = remaining.column("id").unwrap();
    assert_eq!(ids.value(0), Some(vector_sdk::Value::Int64(2)));
}

#[tokio::test]
async fn test_empty_delete_expr_rejected_locally() {
    let (_service, client) = connected().await;
    let result = client.delete("films", None, "").await;
    assert!(matches!(result, Err(Error::Validation { .. })));
}

#[tokio::test]
async fn test_index_lifecycle() {
    let (_service, client) = connected().await;
    client.create_collection(&films_schema()).await.unwrap();

    client
        .create_index(
            &vector_sdk::CreateIndexOptions::new("films", "vector")
                .with_index_name("vector_idx"),
        )
        .await
        .unwrap();

    let indexes = client.describe_index("films", "vector").await.unwrap();
    assert_eq!(indexes.len(), 1);
    assert_eq!(indexes[0].index_name, "vector_idx");
    assert_eq!(indexes[0].state, IndexState::Finished);

    client.drop_index("films", "vector").await.unwrap();
    let indexes = client.describe_index("films", "vector").await.unwrap();
    assert!(indexes.is_empty());
}

#[tokio::test]
async fn test_health_check() {
    let (_service, client) = connected().await;
    assert!(client.health_check().await.unwrap());
}

#[tokio::test]
async fn test_idle_probe_does_not_serialize_concurrent_calls() {
    support::init_tracing();
    let service = Arc::new(MockVectorService::default());
    let uri = service.clone().spawn().await;
    // Zero threshold forces a health probe in front of every call.
    let client = Client::connect(ConnectOptions::new(uri).with_idle_probe_threshold(Duration::ZERO))
        .await
        .expect("connect to in-process server");
    service.health_delay_ms.store(300, Ordering::SeqCst);

    let a = client.clone();
    let b = client.clone();
    let both = async move {
        let (left, right) = tokio::join!(a.list_collections(), b.list_collections());
        left.unwrap();
        right.unwrap();
    };
    // Two serialized 300ms probes would exceed the deadline; concurrent
    // probes finish well inside it.
    tokio::time::timeout(Duration::from_millis(550), both)
        .await
        .expect("calls must not queue behind another call's probe");
}

#[tokio::test]
async fn test_calls_after_close_fail() {
    let (_service, client) = connected().await;
    client.close().await;
    client.close().await; // idempotent
    let result = client.list_collections().await;
    assert!(matches!(result, Err(Error::Connect { .. })));
}
