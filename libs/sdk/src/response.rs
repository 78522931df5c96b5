//! Response decoding: wire payloads back into typed results. Malformed or
//! partially missing data is a decode error, never a silently shortened
//! result.

use protos::vector::v1 as pb;
use protos::vector::v1::{ids, StatusCode};

use crate::codec::decode_field_data;
use crate::column::Column;
use crate::error::{Error, Result};
use crate::executor::CallFailure;

/// A primary key returned by the server.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Id {
    Int(i64),
    Str(String),
}

/// One ranked search hit.
#[derive(Debug, Clone, PartialEq)]
pub struct Hit {
    pub id: Id,
    pub score: f32,
    /// Requested output columns, sliced to this hit's row.
    pub fields: Vec<(String, crate::column::Value)>,
}

/// Ranked hits grouped per query vector, in request order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct SearchResult {
    pub queries: Vec<Vec<Hit>>,
}

impl SearchResult {
    pub fn num_queries(&self) -> usize {
        self.queries.len()
    }
}

/// Typed columns of a scalar query.
#[derive(Debug, Clone, PartialEq)]
pub struct QueryResult {
    pub columns: Vec<Column>,
    pub num_rows: usize,
}

impl QueryResult {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name() == name)
    }
}

/// Outcome of an insert, upsert or delete.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DmlResult {
    pub ids: Vec<Id>,
    pub insert_count: i64,
    pub delete_count: i64,
    pub timestamp: u64,
}

/// State of one index as reported by the server.
#[derive(Debug, Clone, PartialEq)]
pub struct IndexInfo {
    pub index_name: String,
    pub field_name: String,
    pub params: std::collections::HashMap<String, String>,
    pub indexed_rows: i64,
    pub pending_rows: i64,
    pub state: IndexState,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IndexState {
    None,
    InProgress,
    Finished,
    Failed,
}

impl IndexState {
    fn from_proto(value: i32) -> Result<Self> {
        match pb::IndexState::try_from(value) {
            Ok(pb::IndexState::None) => Ok(IndexState::None),
            Ok(pb::IndexState::InProgress) => Ok(IndexState::InProgress),
            Ok(pb::IndexState::Finished) => Ok(IndexState::Finished),
            Ok(pb::IndexState::Failed) => Ok(IndexState::Failed),
            Err(_) => Err(Error::decode(format!("unknown index state {value}"))),
        }
    }
}

impl IndexInfo {
    pub(crate) fn from_proto(proto: pb::IndexDescription) -> Result<Self> {
        Ok(Self {
            index_name: proto.index_name,
            field_name: proto.field_name,
            params: proto.params,
            indexed_rows: proto.indexed_rows,
            pending_rows: proto.pending_rows,
            state: IndexState::from_proto(proto.state)?,
        })
    }
}

/// Turn a non-OK application status into a call failure for the executor.
pub(crate) fn ensure_ok(status: Option<&pb::Status>) -> std::result::Result<(), CallFailure> {
    match status {
        Some(status) if status.code == StatusCode::Ok as i32 => Ok(()),
        Some(status) => Err(CallFailure::Service {
            code: status.code,
            reason: status.reason.clone(),
        }),
        None => Err(CallFailure::Service {
            code: StatusCode::UnexpectedError as i32,
            reason: "response carries no status".into(),
        }),
    }
}

fn decode_ids(ids: Option<pb::Ids>, expected: usize) -> Result<Vec<Id>> {
    let decoded = match ids.and_then(|ids| ids.id_field) {
        Some(ids::IdField::IntId(arr)) => arr.data.into_iter().map(Id::Int).collect::<Vec<_>>(),
        Some(ids::IdField::StrId(arr)) => arr.data.into_iter().map(Id::Str).collect(),
        None if expected == 0 => Vec::new(),
        None => return Err(Error::decode("result carries no ids")),
    };
    if decoded.len() != expected {
        return Err(Error::decode(format!(
            "expected {expected} ids, got {}",
            decoded.len()
        )));
    }
    Ok(decoded)
}

/// Decode flat ranked search data into per-query hit lists.
///
/// `topks[q]` rows belong to query `q`; ids, scores and output columns are
/// all indexed by the same flat row offset.
pub(crate) fn decode_search(results: Option<pb::SearchResultData>) -> Result<SearchResult> {
    let data = match results {
        Some(data) => data,
        None => return Ok(SearchResult::default()),
    };

    // Every group size is validated up front; a single negative entry must
    // not be masked by a positive sum elsewhere.
    let mut total = 0usize;
    for topk in &data.topks {
        let topk = usize::try_from(*topk)
            .map_err(|_| Error::decode(format!("negative group size {topk} in search result")))?;
        total = total
            .checked_add(topk)
            .ok_or_else(|| Error::decode("search result group sizes overflow"))?;
    }
    if data.topks.len() != data.num_queries as usize {
        return Err(Error::decode(format!(
            "search result declares {} queries but carries {} group sizes",
            data.num_queries,
            data.topks.len()
        )));
    }
    if data.scores.len() != total {
        return Err(Error::decode(format!(
            "expected {total} scores, got {}",
            data.scores.len()
        )));
    }
    let ids = decode_ids(data.ids, total)?;

    let columns = data
        .fields_data
        .into_iter()
        .map(decode_field_data)
        .collect::<Result<Vec<_>>>()?;
    for column in &columns {
        if column.len() != total {
            return Err(Error::decode(format!(
                "output column '{}' has {} rows, expected {total}",
                column.name(),
                column.len()
            )));
        }
    }

    let mut queries = Vec::with_capacity(data.topks.len());
    let mut offset = 0usize;
    for topk in &data.topks {
        // Validated up front; cannot fail here.
        let topk = usize::try_from(*topk)
            .map_err(|_| Error::decode(format!("negative group size {topk} in search result")))?;
        let mut hits = Vec::with_capacity(topk);
        for row in offset..offset + topk {
            let fields = columns
                .iter()
                .map(|column| {
                    column
                        .value(row)
                        .map(|value| (column.name().to_string(), value))
                        .ok_or_else(|| {
                            Error::decode(format!(
                                "output column '{}' is shorter than the hit list",
                                column.name()
                            ))
                        })
                })
                .collect::<Result<Vec<_>>>()?;
            hits.push(Hit {
                id: ids[row].clone(),
                score: data.scores[row],
                fields,
            });
        }
        offset += topk;
        queries.push(hits);
    }

    Ok(SearchResult { queries })
}

/// Decode query output columns, enforcing the shared row count.
pub(crate) fn decode_query(fields_data: Vec<pb::FieldData>) -> Result<QueryResult> {
    let columns = fields_data
        .into_iter()
        .map(decode_field_data)
        .collect::<Result<Vec<_>>>()?;
    let num_rows = columns.first().map(|c| c.len()).unwrap_or(0);
    for column in &columns {
        if column.len() != num_rows {
            return Err(Error::decode(format!(
                "column '{}' has {} rows where others have {num_rows}",
                column.name(),
                column.len()
            )));
        }
    }
    Ok(QueryResult { columns, num_rows })
}

pub(crate) fn decode_mutation(result: pb::MutationResult) -> Result<DmlResult> {
    let expected = usize::try_from(result.insert_count).unwrap_or(0);
    let ids = match result.ids {
        Some(ids) => decode_ids(Some(ids), expected)?,
        None => Vec::new(),
    };
    Ok(DmlResult {
        ids,
        insert_count: result.insert_count,
        delete_count: result.delete_count,
        timestamp: result.timestamp,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::column::Value;
    use protos::vector::v1::{field_data, scalar_field};

    fn string_column(name: &str, values: Vec<&str>) -> pb::FieldData {
        pb::FieldData {
            r#type: pb::DataType::Varchar as i32,
            field_name: name.into(),
            valid_data: vec![],
            field: Some(field_data::Field::Scalars(pb::ScalarField {
                data: Some(scalar_field::Data::StringData(pb::StringArray {
                    data: values.into_iter().map(String::from).collect(),
                })),
            })),
        }
    }

    fn int_ids(values: Vec<i64>) -> pb::Ids {
        pb::Ids {
            id_field: Some(ids::IdField::IntId(pb::LongArray { data: values })),
        }
    }

    #[test]
    fn test_search_groups_rows_per_query() {
        let data = pb::SearchResultData {
            num_queries: 2,
            top_k: 2,
            topks: vec![2, 1],
            ids: Some(int_ids(vec![10, 11, 20])),
            scores: vec![0.1, 0.4, 0.2],
            fields_data: vec![string_column("title", vec!["a", "b", "c"])],
        };
        let result = decode_search(Some(data)).unwrap();
        assert_eq!(result.num_queries(), 2);
        assert_eq!(result.queries[0].len(), 2);
        assert_eq!(result.queries[1].len(), 1);
        assert_eq!(result.queries[0][0].id, Id::Int(10));
        assert_eq!(result.queries[1][0].id, Id::Int(20));
        assert_eq!(
            result.queries[1][0].fields,
            vec![("title".to_string(), Value::VarChar("c".into()))]
        );
    }

    #[test]
    fn test_search_rejects_short_scores() {
        let data = pb::SearchResultData {
            num_queries: 1,
            top_k: 2,
            topks: vec![2],
            ids: Some(int_ids(vec![1, 2])),
            scores: vec![0.1],
            fields_data: vec![],
        };
        assert!(matches!(decode_search(Some(data)), Err(Error::Decode(_))));
    }

    #[test]
    fn test_search_rejects_short_output_column() {
        let data = pb::SearchResultData {
            num_queries: 1,
            top_k: 2,
            topks: vec![2],
            ids: Some(int_ids(vec![1, 2])),
            scores: vec![0.1, 0.2],
            fields_data: vec![string_column("title", vec!["only one"])],
        };
        assert!(matches!(decode_search(Some(data)), Err(Error::Decode(_))));
    }

    #[test]
    fn test_search_rejects_negative_group_size() {
        // A negative entry must not be cancelled out by positive ones: the
        // sum here is 2, which matches the payload lengths.
        let data = pb::SearchResultData {
            num_queries: 2,
            top_k: 3,
            topks: vec![3, -1],
            ids: Some(int_ids(vec![1, 2])),
            scores: vec![0.1, 0.2],
            fields_data: vec![],
        };
        assert!(matches!(decode_search(Some(data)), Err(Error::Decode(_))));
    }

    #[test]
    fn test_search_rejects_missing_ids() {
        let data = pb::SearchResultData {
            num_queries: 1,
            top_k: 1,
            topks: vec![1],
            ids: None,
            scores: vec![0.5],
            fields_data: vec![],
        };
        assert!(matches!(decode_search(Some(data)), Err(Error::Decode(_))));
    }

    #[test]
    fn test_empty_search_result() {
        let result = decode_search(None).unwrap();
        assert_eq!(result.num_queries(), 0);
    }

    #[test]
    fn test_query_rejects_uneven_columns() {
        let fields = vec![
            string_column("a", vec!["x", "y"]),
            string_column("b", vec!["z"]),
        ];
        assert!(matches!(decode_query(fields), Err(Error::Decode(_))));
    }

    #[test]
    fn test_query_column_lookup() {
        let result = decode_query(vec![string_column("title", vec!["a", "b"])]).unwrap();
        assert_eq!(result.num_rows, 2);
        assert_eq!(result.column("title").unwrap().len(), 2);
        assert!(result.column("missing").is_none());
    }

    #[test]
    fn test_mutation_decodes_ids() {
        let result = decode_mutation(pb::MutationResult {
            status: None,
            ids: Some(int_ids(vec![5, 6])),
            insert_count: 2,
            delete_count: 0,
            timestamp: 99,
        })
        .unwrap();
        assert_eq!(result.ids, vec![Id::Int(5), Id::Int(6)]);
        assert_eq!(result.insert_count, 2);
        assert_eq!(result.timestamp, 99);
    }

    #[test]
    fn test_ensure_ok() {
        assert!(ensure_ok(Some(&pb::Status {
            code: StatusCode::Ok as i32,
            reason: String::new(),
        }))
        .is_ok());
        assert!(ensure_ok(Some(&pb::Status {
            code: StatusCode::CollectionNotFound as i32,
            reason: "no such collection".into(),
        }))
        .is_err());
        assert!(ensure_ok(None).is_err());
    }
}
