//! Retry, backoff and cancellation behavior over a live channel.

mod support;

use std::sync::atomic::Ordering;
use std::sync::Arc;
use std::time::Duration;

use support::MockVectorService;
use vector_sdk::{
    cancellable, Client, CollectionSchema, ConnectOptions, DataType, Error, FieldSchema,
    RetryPolicy,
};

async fn connected(policy: RetryPolicy) -> (Arc<MockVectorService>, Client) {
    support::init_tracing();
    let service = Arc::new(MockVectorService::default());
    let uri = service.clone().spawn().await;
    let client = Client::connect(ConnectOptions::new(uri))
        .await
        .expect("connect to in-process server")
        .with_retry_policy(policy);
    (service, client)
}

fn fast_policy() -> RetryPolicy {
    RetryPolicy::new()
        .with_initial_backoff(Duration::from_millis(1))
        .with_max_backoff(Duration::from_millis(5))
        .with_jitter(false)
}

#[tokio::test]
async fn test_transient_outage_is_retried_through() {
    let (service, client) = connected(fast_policy().with_max_attempts(3)).await;
    service.unavailable_has_collection.store(2, Ordering::SeqCst);

    // Two failures, third attempt lands.
    assert!(!client.has_collection("films").await.unwrap());
    assert_eq!(service.unavailable_has_collection.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_outage_beyond_budget_surfaces_last_error() {
    let (service, client) = connected(fast_policy().with_max_attempts(2)).await;
    service.unavailable_has_collection.store(5, Ordering::SeqCst);

    let result = client.has_collection("films").await;
    assert!(matches!(
        result,
        Err(Error::Transient { rpc_code: tonic::Code::Unavailable, .. })
    ));
    // Exactly two attempts were spent.
    assert_eq!(service.unavailable_has_collection.load(Ordering::SeqCst), 3);
}

#[tokio::test]
async fn test_rate_limited_flush_is_retried() {
    let (service, client) = connected(fast_policy().with_max_attempts(3)).await;
    service.rate_limited_flushes.store(2, Ordering::SeqCst);

    client.flush(&["films".to_string()]).await.unwrap();
    assert_eq!(service.rate_limited_flushes.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn test_rate_limit_retry_can_be_disabled() {
    let policy = fast_policy()
        .with_max_attempts(3)
        .with_retry_on_rate_limit(false);
    let (service, client) = connected(policy).await;
    service.rate_limited_flushes.store(1, Ordering::SeqCst);

    let result = client.flush(&["films".to_string()]).await;
    assert!(matches!(result, Err(Error::Terminal { .. })));
}

#[tokio::test]
async fn test_terminal_status_is_not_retried() {
    let (_service, client) = connected(fast_policy().with_max_attempts(5)).await;
    // Dropping a collection that does not exist answers not-found every time;
    // a single round trip must settle it.
    let result = client.drop_collection("missing").await;
    assert!(matches!(result, Err(Error::Terminal { .. })));
}

#[tokio::test]
async fn test_validation_never_reaches_network() {
    let (service, client) = connected(fast_policy()).await;
    service.unavailable_has_collection.store(100, Ordering::SeqCst);

    let bad_schema = CollectionSchema::new("c")
        .with_field(FieldSchema::new("a", DataType::Int64))
        .with_field(FieldSchema::new("b", DataType::Int64));
    let result = client.create_collection(&bad_schema).await;
    assert!(matches!(result, Err(Error::Validation { .. })));
    // The injected failure budget is untouched.
    assert_eq!(
        service.unavailable_has_collection.load(Ordering::SeqCst),
        100
    );
}

#[tokio::test]
async fn test_per_attempt_timeout_surfaces() {
    let policy = fast_policy()
        .with_max_attempts(1)
        .with_per_attempt_timeout(Duration::from_millis(50));
    let (service, client) = connected(policy).await;
    service.list_delay_ms.store(5_000, Ordering::SeqCst);

    let result = client.list_collections().await;
    assert!(matches!(result, Err(Error::Timeout { .. })));
}

#[tokio::test]
async fn test_cancellation_resolves_within_bound() {
    let (service, client) = connected(fast_policy()).await;
    service.list_delay_ms.store(10_000, Ordering::SeqCst);

    let in_flight = client.clone();
    let (handle, fut) = cancellable(async move { in_flight.list_collections().await });
    let task = tokio::spawn(fut);
    tokio::time::sleep(Duration::from_millis(20)).await;

    let started = std::time::Instant::now();
    handle.cancel();
    let result = task.await.unwrap();
    assert!(matches!(result, Err(Error::Cancelled)));
    assert!(started.elapsed() < Duration::from_millis(500));

    // The channel stays usable after a cancelled call.
    service.list_delay_ms.store(0, Ordering::SeqCst);
    assert!(client.list_collections().await.unwrap().is_empty());
}
