//! Integration tests against a real server container.
//!
//! Ignored by default; they require a container runtime. Run with
//! `cargo test -p vector-sdk --test live_server -- --ignored`.

use test_utils::{TestDataBuilder, TestVectorDb};
use vector_sdk::{
    Client, CollectionSchema, Column, ConnectOptions, DataType, FieldSchema, Id, SearchOptions,
    SearchVectors,
};

#[tokio::test]
#[ignore]
async fn test_live_insert_and_search() {
    let db = TestVectorDb::new().await;
    let client = Client::connect(ConnectOptions::new(db.uri()))
        .await
        .expect("connect to live server");

    let builder = TestDataBuilder::from_test_name("test_live_insert_and_search");
    let collection = builder.collection_name("films");
    let vectors = builder.float_vectors(8, 16);
    let ids = builder.int_ids(8);

    let schema = CollectionSchema::new(&collection)
        .with_field(FieldSchema::new("id", DataType::Int64).primary_key())
        .with_field(FieldSchema::new("vector", DataType::FloatVector).with_dim(16));
    client.create_collection(&schema).await.unwrap();

    client
        .insert(
            &collection,
            None,
            &[
                Column::int64("id", ids.clone()),
                Column::float_vector("vector", 16, vectors.clone()),
            ],
        )
        .await
        .unwrap();
    client.flush(&[collection.clone()]).await.unwrap();

    client
        .create_index(&vector_sdk::CreateIndexOptions::new(&collection, "vector"))
        .await
        .unwrap();
    client.load_collection(&collection).await.unwrap();

    let result = client
        .search(&SearchOptions::new(
            &collection,
            "vector",
            SearchVectors::float(vec![vectors[0].clone()]),
            1,
        ))
        .await
        .unwrap();
    assert_eq!(result.queries[0][0].id, Id::Int(ids[0]));

    client.drop_collection(&collection).await.unwrap();
}
