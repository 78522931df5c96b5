//! Request builders: typed options that validate locally and produce wire
//! requests without touching the network.

use std::collections::HashMap;

use protos::vector::v1 as pb;
use protos::vector::v1::vector_field;

use crate::error::{Error, Result};
use crate::schema::ConsistencyLevel;

/// Distance metric for vector search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MetricType {
    #[default]
    L2,
    Ip,
    Cosine,
    Hamming,
    Jaccard,
}

impl MetricType {
    fn to_proto(self) -> pb::MetricType {
        match self {
            MetricType::L2 => pb::MetricType::L2,
            MetricType::Ip => pb::MetricType::Ip,
            MetricType::Cosine => pb::MetricType::Cosine,
            MetricType::Hamming => pb::MetricType::Hamming,
            MetricType::Jaccard => pb::MetricType::Jaccard,
        }
    }
}

/// Query vectors for one search call, all of one type and dimension.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchVectors {
    Float { dim: u32, rows: Vec<Vec<f32>> },
    Binary { dim: u32, rows: Vec<Vec<u8>> },
    Sparse(Vec<Vec<(u32, f32)>>),
}

impl SearchVectors {
    pub fn float(rows: Vec<Vec<f32>>) -> Self {
        let dim = rows.first().map(|r| r.len() as u32).unwrap_or(0);
        SearchVectors::Float { dim, rows }
    }

    pub fn binary(dim: u32, rows: Vec<Vec<u8>>) -> Self {
        SearchVectors::Binary { dim, rows }
    }

    pub fn sparse(rows: Vec<Vec<(u32, f32)>>) -> Self {
        SearchVectors::Sparse(rows)
    }

    fn len(&self) -> usize {
        match self {
            SearchVectors::Float { rows, .. } => rows.len(),
            SearchVectors::Binary { rows, .. } => rows.len(),
            SearchVectors::Sparse(rows) => rows.len(),
        }
    }

    fn validate(&self) -> Result<()> {
        if self.len() == 0 {
            return Err(Error::validation("vectors", "at least one query vector required"));
        }
        match self {
            SearchVectors::Float { dim, rows } => {
                if *dim == 0 {
                    return Err(Error::validation("vectors", "query vectors must be non-empty"));
                }
                for (i, row) in rows.iter().enumerate() {
                    if row.len() != *dim as usize {
                        return Err(Error::validation(
                            "vectors",
                            format!("query vector {i} has {} elements, expected {dim}", row.len()),
                        ));
                    }
                }
            }
            SearchVectors::Binary { dim, rows } => {
                if *dim == 0 || dim % 8 != 0 {
                    return Err(Error::validation(
                        "vectors",
                        "binary query dimension must be a positive multiple of 8",
                    ));
                }
                let bytes = (*dim / 8) as usize;
                for (i, row) in rows.iter().enumerate() {
                    if row.len() != bytes {
                        return Err(Error::validation(
                            "vectors",
                            format!("query vector {i} has {} bytes, expected {bytes}", row.len()),
                        ));
                    }
                }
            }
            SearchVectors::Sparse(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    for pair in row.windows(2) {
                        if pair[1].0 <= pair[0].0 {
                            return Err(Error::validation(
                                "vectors",
                                format!("sparse query {i} indices must be strictly increasing"),
                            ));
                        }
                    }
                }
            }
        }
        Ok(())
    }

    fn to_proto(&self) -> pb::VectorField {
        match self {
            SearchVectors::Float { dim, rows } => pb::VectorField {
                dim: *dim as i64,
                data: Some(vector_field::Data::FloatVector(pb::FloatArray {
                    data: rows.iter().flatten().copied().collect(),
                })),
            },
            SearchVectors::Binary { dim, rows } => pb::VectorField {
                dim: *dim as i64,
                data: Some(vector_field::Data::BinaryVector(
                    rows.iter().flatten().copied().collect(),
                )),
            },
            SearchVectors::Sparse(rows) => {
                let dim = rows
                    .iter()
                    .flat_map(|row| row.iter().map(|(idx, _)| *idx as i64 + 1))
                    .max()
                    .unwrap_or(0);
                pb::VectorField {
                    dim,
                    data: Some(vector_field::Data::SparseFloatVector(pb::SparseFloatArray {
                        contents: rows
                            .iter()
                            .map(|row| {
                                let mut blob = Vec::with_capacity(row.len() * 8);
                                for (index, value) in row {
                                    blob.extend_from_slice(&index.to_le_bytes());
                                    blob.extend_from_slice(&value.to_le_bytes());
                                }
                                blob
                            })
                            .collect(),
                        dim,
                    })),
                }
            }
        }
    }
}

/// One approximate-nearest-neighbor search over a loaded collection.
#[derive(Debug, Clone)]
pub struct SearchOptions {
    pub collection_name: String,
    pub anns_field: String,
    pub vectors: SearchVectors,
    pub top_k: i32,
    pub metric_type: MetricType,
    pub expr: String,
    pub partition_names: Vec<String>,
    pub output_fields: Vec<String>,
    pub params: HashMap<String, String>,
    pub consistency_level: Option<ConsistencyLevel>,
}

impl SearchOptions {
    pub fn new(
        collection_name: impl Into<String>,
        anns_field: impl Into<String>,
        vectors: SearchVectors,
        top_k: i32,
    ) -> Self {
        Self {
            collection_name: collection_name.into(),
            anns_field: anns_field.into(),
            vectors,
            top_k,
            metric_type: MetricType::default(),
            expr: String::new(),
            partition_names: Vec::new(),
            output_fields: Vec::new(),
            params: HashMap::new(),
            consistency_level: None,
        }
    }

    pub fn with_metric_type(mut self, metric_type: MetricType) -> Self {
        self.metric_type = metric_type;
        self
    }

    /// Opaque filter expression, passed through untouched.
    pub fn with_expr(mut self, expr: impl Into<String>) -> Self {
        self.expr = expr.into();
        self
    }

    pub fn with_partitions(mut self, partitions: Vec<String>) -> Self {
        self.partition_names = partitions;
        self
    }

    pub fn with_output_fields(mut self, fields: Vec<String>) -> Self {
        self.output_fields = fields;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn with_consistency_level(mut self, level: ConsistencyLevel) -> Self {
        self.consistency_level = Some(level);
        self
    }

    /// Validate and produce the wire request. Pure; no network involved.
    pub fn build(&self, default_consistency: ConsistencyLevel) -> Result<pb::SearchRequest> {
        if self.collection_name.is_empty() {
            return Err(Error::validation("collection_name", "must not be empty"));
        }
        if self.anns_field.is_empty() {
            return Err(Error::validation("anns_field", "must not be empty"));
        }
        if self.top_k <= 0 {
            return Err(Error::validation("top_k", "must be positive"));
        }
        self.vectors.validate()?;

        Ok(pb::SearchRequest {
            collection_name: self.collection_name.clone(),
            partition_names: self.partition_names.clone(),
            anns_field: self.anns_field.clone(),
            vectors: Some(self.vectors.to_proto()),
            top_k: self.top_k,
            metric_type: self.metric_type.to_proto() as i32,
            expr: self.expr.clone(),
            output_fields: self.output_fields.clone(),
            params: self.params.clone(),
            consistency_level: self
                .consistency_level
                .unwrap_or(default_consistency)
                .to_proto() as i32,
        })
    }
}

/// A scalar query by filter expression.
#[derive(Debug, Clone)]
pub struct QueryOptions {
    pub collection_name: String,
    pub expr: String,
    pub output_fields: Vec<String>,
    pub partition_names: Vec<String>,
    pub limit: i64,
    pub offset: i64,
    pub consistency_level: Option<ConsistencyLevel>,
}

impl QueryOptions {
    pub fn new(collection_name: impl Into<String>, expr: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            expr: expr.into(),
            output_fields: Vec::new(),
            partition_names: Vec::new(),
            limit: 0,
            offset: 0,
            consistency_level: None,
        }
    }

    pub fn with_output_fields(mut self, fields: Vec<String>) -> Self {
        self.output_fields = fields;
        self
    }

    pub fn with_partitions(mut self, partitions: Vec<String>) -> Self {
        self.partition_names = partitions;
        self
    }

    pub fn with_limit(mut self, limit: i64) -> Self {
        self.limit = limit;
        self
    }

    pub fn with_offset(mut self, offset: i64) -> Self {
        self.offset = offset;
        self
    }

    pub fn with_consistency_level(mut self, level: ConsistencyLevel) -> Self {
        self.consistency_level = Some(level);
        self
    }

    pub fn build(&self, default_consistency: ConsistencyLevel) -> Result<pb::QueryRequest> {
        if self.collection_name.is_empty() {
            return Err(Error::validation("collection_name", "must not be empty"));
        }
        if self.expr.is_empty() {
            return Err(Error::validation("expr", "must not be empty"));
        }
        if self.limit < 0 || self.offset < 0 {
            return Err(Error::validation("limit", "limit and offset must be non-negative"));
        }

        Ok(pb::QueryRequest {
            collection_name: self.collection_name.clone(),
            expr: self.expr.clone(),
            output_fields: self.output_fields.clone(),
            partition_names: self.partition_names.clone(),
            limit: self.limit,
            offset: self.offset,
            consistency_level: self
                .consistency_level
                .unwrap_or(default_consistency)
                .to_proto() as i32,
        })
    }
}

/// Index algorithm selector.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum IndexType {
    Flat,
    IvfFlat,
    IvfSq8,
    IvfPq,
    #[default]
    Hnsw,
    DiskAnn,
    AutoIndex,
    SparseInvertedIndex,
}

impl IndexType {
    fn as_param(&self) -> &'static str {
        match self {
            IndexType::Flat => "FLAT",
            IndexType::IvfFlat => "IVF_FLAT",
            IndexType::IvfSq8 => "IVF_SQ8",
            IndexType::IvfPq => "IVF_PQ",
            IndexType::Hnsw => "HNSW",
            IndexType::DiskAnn => "DISKANN",
            IndexType::AutoIndex => "AUTOINDEX",
            IndexType::SparseInvertedIndex => "SPARSE_INVERTED_INDEX",
        }
    }
}

/// Build an index on one vector field.
#[derive(Debug, Clone)]
pub struct CreateIndexOptions {
    pub collection_name: String,
    pub field_name: String,
    pub index_name: String,
    pub index_type: IndexType,
    pub metric_type: MetricType,
    pub params: HashMap<String, String>,
}

impl CreateIndexOptions {
    pub fn new(collection_name: impl Into<String>, field_name: impl Into<String>) -> Self {
        Self {
            collection_name: collection_name.into(),
            field_name: field_name.into(),
            index_name: String::new(),
            index_type: IndexType::default(),
            metric_type: MetricType::default(),
            params: HashMap::new(),
        }
    }

    pub fn with_index_name(mut self, name: impl Into<String>) -> Self {
        self.index_name = name.into();
        self
    }

    pub fn with_index_type(mut self, index_type: IndexType) -> Self {
        self.index_type = index_type;
        self
    }

    pub fn with_metric_type(mut self, metric_type: MetricType) -> Self {
        self.metric_type = metric_type;
        self
    }

    pub fn with_param(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.params.insert(key.into(), value.into());
        self
    }

    pub fn build(&self) -> Result<pb::CreateIndexRequest> {
        if self.collection_name.is_empty() {
            return Err(Error::validation("collection_name", "must not be empty"));
        }
        if self.field_name.is_empty() {
            return Err(Error::validation("field_name", "must not be empty"));
        }

        let mut extra_params = self.params.clone();
        extra_params.insert("index_type".into(), self.index_type.as_param().into());
        extra_params.insert(
            "metric_type".into(),
            format!("{:?}", self.metric_type).to_uppercase(),
        );

        Ok(pb::CreateIndexRequest {
            collection_name: self.collection_name.clone(),
            field_name: self.field_name.clone(),
            index_name: self.index_name.clone(),
            extra_params,
        })
    }
}
