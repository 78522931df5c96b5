//! In-process server used by the integration tests: an exact-scan store
//! behind the real wire service, with switches for injecting failures.

use std::collections::HashMap;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use protos::vector::v1 as pb;
use protos::vector::v1::vector_service_server::{VectorService, VectorServiceServer};
use protos::vector::v1::{field_data, ids, scalar_field, vector_field, StatusCode};
use tonic::{Request, Response, Status};

/// Install the test log subscriber once; respects `RUST_LOG`.
pub fn init_tracing() {
    use std::sync::Once;
    static INIT: Once = Once::new();
    INIT.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
            .with_test_writer()
            .try_init();
    });
}

fn ok_status() -> pb::Status {
    pb::Status {
        code: StatusCode::Ok as i32,
        reason: String::new(),
    }
}

fn err_status(code: StatusCode, reason: &str) -> pb::Status {
    pb::Status {
        code: code as i32,
        reason: reason.to_string(),
    }
}

#[derive(Clone)]
struct StoredCollection {
    schema: pb::CollectionSchema,
    consistency_level: i32,
    pk_field: String,
    vector_field: String,
    dim: usize,
    rows: Vec<(i64, Vec<f32>)>,
    indexes: Vec<pb::IndexDescription>,
}

/// Mock service covering the scenarios the tests exercise: int64 primary
/// keys and one float-vector field per collection, exact L2 scan on search.
#[derive(Default)]
pub struct MockVectorService {
    collections: Mutex<HashMap<String, StoredCollection>>,
    /// Fail the next N `has_collection` calls with `Unavailable`.
    pub unavailable_has_collection: AtomicU32,
    /// Answer the next N `flush` calls with a rate-limited status.
    pub rate_limited_flushes: AtomicU32,
    /// Delay applied to `list_collections`, for cancellation tests.
    pub list_delay_ms: AtomicU64,
    /// Delay applied to `health_check`, for idle-probe concurrency tests.
    pub health_delay_ms: AtomicU64,
    /// Number of `describe_collection` calls that reached the server.
    pub describe_calls: AtomicU32,
}

impl MockVectorService {
    pub async fn spawn(self: Arc<Self>) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind test listener");
        let addr = listener.local_addr().expect("listener addr");
        let incoming = tokio_stream::wrappers::TcpListenerStream::new(listener);
        tokio::spawn(async move {
            let _ = tonic::transport::Server::builder()
                .add_service(VectorServiceServer::from_arc(self))
                .serve_with_incoming(incoming)
                .await;
        });
        format!("http://{addr}")
    }

    fn take(&self, counter: &AtomicU32) -> bool {
        counter
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }
}

/// Extract int64 literals from a filter expression like `id in [1, 2]`.
fn ids_in_expr(expr: &str) -> Vec<i64> {
    expr.split(|c: char| !c.is_ascii_digit() && c != '-')
        .filter(|s| !s.is_empty())
        .filter_map(|s| s.parse().ok())
        .collect()
}

fn decode_insert(
    fields_data: &[pb::FieldData],
    pk_field: &str,
    vector_field_name: &str,
    dim: usize,
) -> Result<Vec<(i64, Vec<f32>)>, Status> {
    let mut ids = None;
    let mut vectors = None;
    for field in fields_data {
        match &field.field {
            Some(field_data::Field::Scalars(pb::ScalarField {
                data: Some(scalar_field::Data::LongData(arr)),
            })) if field.field_name == pk_field => {
                ids = Some(arr.data.clone());
            }
            Some(field_data::Field::Vectors(pb::VectorField {
                data: Some(vector_field::Data::FloatVector(arr)),
                ..
            })) if field.field_name == vector_field_name => {
                vectors = Some(arr.data.chunks(dim).map(<[f32]>::to_vec).collect::<Vec<_>>());
            }
            _ => {}
        }
    }
    match (ids, vectors) {
        (Some(ids), Some(vectors)) if ids.len() == vectors.len() => {
            Ok(ids.into_iter().zip(vectors).collect())
        }
        _ => Err(Status::invalid_argument("unsupported insert payload")),
    }
}

fn l2_squared(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b).map(|(x, y)| (x - y) * (x - y)).sum()
}

#[tonic::async_trait]
impl VectorService for MockVectorService {
    async fn create_collection(
        &self,
        request: Request<pb::CreateCollectionRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        let request = request.into_inner();
        let schema = match request.schema {
            Some(schema) => schema,
            None => {
                return Ok(Response::new(err_status(
                    StatusCode::IllegalArgument,
                    "missing schema",
                )));
            }
        };
        let pk_field = schema
            .fields
            .iter()
            .find(|f| f.is_primary_key)
            .map(|f| f.name.clone())
            .unwrap_or_default();
        let vector = schema
            .fields
            .iter()
            .find(|f| f.data_type == pb::DataType::FloatVector as i32);
        let (vector_field, dim) = match vector {
            Some(f) => (
                f.name.clone(),
                f.type_params
                    .get("dim")
                    .and_then(|d| d.parse().ok())
                    .unwrap_or(0),
            ),
            None => (String::new(), 0),
        };

        let mut collections = self.collections.lock().unwrap();
        if collections.contains_key(&schema.name) {
            return Ok(Response::new(err_status(
                StatusCode::AlreadyExists,
                "collection already exists",
            )));
        }
        collections.insert(
            schema.name.clone(),
            StoredCollection {
                schema,
                consistency_level: request.consistency_level,
                pk_field,
                vector_field,
                dim,
                rows: Vec::new(),
                indexes: Vec::new(),
            },
        );
        Ok(Response::new(ok_status()))
    }

    async fn drop_collection(
        &self,
        request: Request<pb::DropCollectionRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        let name = request.into_inner().collection_name;
        let removed = self.collections.lock().unwrap().remove(&name).is_some();
        if removed {
            Ok(Response::new(ok_status()))
        } else {
            Ok(Response::new(err_status(
                StatusCode::CollectionNotFound,
                "no such collection",
            )))
        }
    }

    async fn has_collection(
        &self,
        request: Request<pb::HasCollectionRequest>,
    ) -> Result<Response<pb::BoolResponse>, Status> {
        if self.take(&self.unavailable_has_collection) {
            return Err(Status::unavailable("injected outage"));
        }
        let name = request.into_inner().collection_name;
        let value = self.collections.lock().unwrap().contains_key(&name);
        Ok(Response::new(pb::BoolResponse {
            status: Some(ok_status()),
            value,
        }))
    }

    async fn list_collections(
        &self,
        _request: Request<pb::ListCollectionsRequest>,
    ) -> Result<Response<pb::ListCollectionsResponse>, Status> {
        let delay = self.list_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        let mut collection_names: Vec<String> =
            self.collections.lock().unwrap().keys().cloned().collect();
        collection_names.sort();
        Ok(Response::new(pb::ListCollectionsResponse {
            status: Some(ok_status()),
            collection_names,
        }))
    }

    async fn describe_collection(
        &self,
        request: Request<pb::DescribeCollectionRequest>,
    ) -> Result<Response<pb::DescribeCollectionResponse>, Status> {
        self.describe_calls.fetch_add(1, Ordering::SeqCst);
        let name = request.into_inner().collection_name;
        let collections = self.collections.lock().unwrap();
        match collections.get(&name) {
            Some(stored) => Ok(Response::new(pb::DescribeCollectionResponse {
                status: Some(ok_status()),
                schema: Some(stored.schema.clone()),
                collection_id: 1,
                consistency_level: stored.consistency_level,
            })),
            None => Ok(Response::new(pb::DescribeCollectionResponse {
                status: Some(err_status(
                    StatusCode::CollectionNotFound,
                    "no such collection",
                )),
                schema: None,
                collection_id: 0,
                consistency_level: 0,
            })),
        }
    }

    async fn create_partition(
        &self,
        _request: Request<pb::CreatePartitionRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        Ok(Response::new(ok_status()))
    }

    async fn drop_partition(
        &self,
        _request: Request<pb::DropPartitionRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        Ok(Response::new(ok_status()))
    }

    async fn load_collection(
        &self,
        _request: Request<pb::LoadCollectionRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        Ok(Response::new(ok_status()))
    }

    async fn release_collection(
        &self,
        _request: Request<pb::ReleaseCollectionRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        Ok(Response::new(ok_status()))
    }

    async fn create_index(
        &self,
        request: Request<pb::CreateIndexRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        let request = request.into_inner();
        let mut collections = self.collections.lock().unwrap();
        match collections.get_mut(&request.collection_name) {
            Some(stored) => {
                stored.indexes.push(pb::IndexDescription {
                    index_name: request.index_name,
                    field_name: request.field_name,
                    params: request.extra_params,
                    indexed_rows: stored.rows.len() as i64,
                    pending_rows: 0,
                    state: pb::IndexState::Finished as i32,
                });
                Ok(Response::new(ok_status()))
            }
            None => Ok(Response::new(err_status(
                StatusCode::CollectionNotFound,
                "no such collection",
            ))),
        }
    }

    async fn drop_index(
        &self,
        request: Request<pb::DropIndexRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        let request = request.into_inner();
        let mut collections = self.collections.lock().unwrap();
        if let Some(stored) = collections.get_mut(&request.collection_name) {
            stored.indexes.retain(|i| i.field_name != request.field_name);
        }
        Ok(Response::new(ok_status()))
    }

    async fn describe_index(
        &self,
        request: Request<pb::DescribeIndexRequest>,
    ) -> Result<Response<pb::DescribeIndexResponse>, Status> {
        let request = request.into_inner();
        let collections = self.collections.lock().unwrap();
        let index_descriptions = collections
            .get(&request.collection_name)
            .map(|stored| {
                stored
                    .indexes
                    .iter()
                    .filter(|i| i.field_name == request.field_name)
                    .cloned()
                    .collect()
            })
            .unwrap_or_default();
        Ok(Response::new(pb::DescribeIndexResponse {
            status: Some(ok_status()),
            index_descriptions,
        }))
    }

    async fn insert(
        &self,
        request: Request<pb::InsertRequest>,
    ) -> Result<Response<pb::MutationResult>, Status> {
        let request = request.into_inner();
        let mut collections = self.collections.lock().unwrap();
        let stored = match collections.get_mut(&request.collection_name) {
            Some(stored) => stored,
            None => {
                return Ok(Response::new(pb::MutationResult {
                    status: Some(err_status(
                        StatusCode::CollectionNotFound,
                        "no such collection",
                    )),
                    ..Default::default()
                }));
            }
        };
        let rows = decode_insert(
            &request.fields_data,
            &stored.pk_field,
            &stored.vector_field,
            stored.dim,
        )?;
        let inserted: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        stored.rows.extend(rows);
        Ok(Response::new(pb::MutationResult {
            status: Some(ok_status()),
            ids: Some(pb::Ids {
                id_field: Some(ids::IdField::IntId(pb::LongArray {
                    data: inserted.clone(),
                })),
            }),
            insert_count: inserted.len() as i64,
            delete_count: 0,
            timestamp: 1,
        }))
    }

    async fn upsert(
        &self,
        request: Request<pb::UpsertRequest>,
    ) -> Result<Response<pb::MutationResult>, Status> {
        let request = request.into_inner();
        let mut collections = self.collections.lock().unwrap();
        let stored = match collections.get_mut(&request.collection_name) {
            Some(stored) => stored,
            None => {
                return Ok(Response::new(pb::MutationResult {
                    status: Some(err_status(
                        StatusCode::CollectionNotFound,
                        "no such collection",
                    )),
                    ..Default::default()
                }));
            }
        };
        let rows = decode_insert(
            &request.fields_data,
            &stored.pk_field,
            &stored.vector_field,
            stored.dim,
        )?;
        let upserted: Vec<i64> = rows.iter().map(|(id, _)| *id).collect();
        stored.rows.retain(|(id, _)| !upserted.contains(id));
        stored.rows.extend(rows);
        Ok(Response::new(pb::MutationResult {
            status: Some(ok_status()),
            ids: Some(pb::Ids {
                id_field: Some(ids::IdField::IntId(pb::LongArray {
                    data: upserted.clone(),
                })),
            }),
            insert_count: upserted.len() as i64,
            delete_count: 0,
            timestamp: 2,
        }))
    }

    async fn delete(
        &self,
        request: Request<pb::DeleteRequest>,
    ) -> Result<Response<pb::MutationResult>, Status> {
        let request = request.into_inner();
        let targets = ids_in_expr(&request.expr);
        let mut collections = self.collections.lock().unwrap();
        let deleted = match collections.get_mut(&request.collection_name) {
            Some(stored) => {
                let before = stored.rows.len();
                stored.rows.retain(|(id, _)| !targets.contains(id));
                (before - stored.rows.len()) as i64
            }
            None => 0,
        };
        Ok(Response::new(pb::MutationResult {
            status: Some(ok_status()),
            ids: None,
            insert_count: 0,
            delete_count: deleted,
            timestamp: 3,
        }))
    }

    async fn search(
        &self,
        request: Request<pb::SearchRequest>,
    ) -> Result<Response<pb::SearchResults>, Status> {
        let request = request.into_inner();
        let collections = self.collections.lock().unwrap();
        let stored = match collections.get(&request.collection_name) {
            Some(stored) => stored,
            None => {
                return Ok(Response::new(pb::SearchResults {
                    status: Some(err_status(
                        StatusCode::CollectionNotFound,
                        "no such collection",
                    )),
                    results: None,
                }));
            }
        };
        let vectors = match request.vectors.and_then(|v| v.data) {
            Some(vector_field::Data::FloatVector(arr)) if stored.dim > 0 => arr
                .data
                .chunks(stored.dim)
                .map(<[f32]>::to_vec)
                .collect::<Vec<_>>(),
            _ => return Err(Status::invalid_argument("only float queries supported")),
        };

        let mut topks = Vec::new();
        let mut hit_ids = Vec::new();
        let mut scores = Vec::new();
        for query in &vectors {
            let mut ranked: Vec<(i64, f32)> = stored
                .rows
                .iter()
                .map(|(id, row)| (*id, l2_squared(query, row)))
                .collect();
            ranked.sort_by(|a, b| a.1.total_cmp(&b.1));
            ranked.truncate(request.top_k as usize);
            topks.push(ranked.len() as i64);
            for (id, score) in ranked {
                hit_ids.push(id);
                scores.push(score);
            }
        }

        Ok(Response::new(pb::SearchResults {
            status: Some(ok_status()),
            results: Some(pb::SearchResultData {
                num_queries: vectors.len() as i64,
                top_k: request.top_k as i64,
                topks,
                ids: Some(pb::Ids {
                    id_field: Some(ids::IdField::IntId(pb::LongArray { data: hit_ids })),
                }),
                scores,
                fields_data: vec![],
            }),
        }))
    }

    async fn query(
        &self,
        request: Request<pb::QueryRequest>,
    ) -> Result<Response<pb::QueryResults>, Status> {
        let request = request.into_inner();
        let targets = ids_in_expr(&request.expr);
        let collections = self.collections.lock().unwrap();
        let stored = match collections.get(&request.collection_name) {
            Some(stored) => stored,
            None => {
                return Ok(Response::new(pb::QueryResults {
                    status: Some(err_status(
                        StatusCode::CollectionNotFound,
                        "no such collection",
                    )),
                    fields_data: vec![],
                }));
            }
        };
        let matched: Vec<i64> = stored
            .rows
            .iter()
            .map(|(id, _)| *id)
            .filter(|id| targets.contains(id))
            .collect();
        Ok(Response::new(pb::QueryResults {
            status: Some(ok_status()),
            fields_data: vec![pb::FieldData {
                r#type: pb::DataType::Int64 as i32,
                field_name: stored.pk_field.clone(),
                valid_data: vec![],
                field: Some(field_data::Field::Scalars(pb::ScalarField {
                    data: Some(scalar_field::Data::LongData(pb::LongArray {
                        data: matched,
                    })),
                })),
            }],
        }))
    }

    async fn flush(
        &self,
        _request: Request<pb::FlushRequest>,
    ) -> Result<Response<pb::Status>, Status> {
        if self.take(&self.rate_limited_flushes) {
            return Ok(Response::new(err_status(
                StatusCode::RateLimited,
                "quota exceeded",
            )));
        }
        Ok(Response::new(ok_status()))
    }

    async fn health_check(
        &self,
        _request: Request<pb::HealthCheckRequest>,
    ) -> Result<Response<pb::HealthCheckResponse>, Status> {
        let delay = self.health_delay_ms.load(Ordering::SeqCst);
        if delay > 0 {
            tokio::time::sleep(Duration::from_millis(delay)).await;
        }
        Ok(Response::new(pb::HealthCheckResponse {
            status: Some(ok_status()),
            is_healthy: true,
        }))
    }
}
