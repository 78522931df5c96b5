//! Typed columnar payloads. A [`Column`] pairs a field name with same-typed
//! values for every row of a batch, plus an optional validity bitmap for
//! nullable fields.

use serde_json::Value as JsonValue;

use crate::error::{Error, Result};
use crate::schema::{DataType, FieldSchema};

/// One sparse vector row: (index, value) pairs sorted by index.
pub type SparseRow = Vec<(u32, f32)>;

/// The values of a column, one variant per supported field type.
#[derive(Debug, Clone, PartialEq)]
pub enum ColumnData {
    Bool(Vec<bool>),
    Int8(Vec<i8>),
    Int16(Vec<i16>),
    Int32(Vec<i32>),
    Int64(Vec<i64>),
    Float(Vec<f32>),
    Double(Vec<f64>),
    VarChar(Vec<String>),
    Json(Vec<JsonValue>),
    FloatVector { dim: u32, rows: Vec<Vec<f32>> },
    /// Each row is a packed bit blob of `dim / 8` bytes.
    BinaryVector { dim: u32, rows: Vec<Vec<u8>> },
    SparseFloatVector(Vec<SparseRow>),
    Array { element_type: DataType, rows: Vec<ColumnData> },
}

impl ColumnData {
    pub fn len(&self) -> usize {
        match self {
            ColumnData::Bool(v) => v.len(),
            ColumnData::Int8(v) => v.len(),
            ColumnData::Int16(v) => v.len(),
            ColumnData::Int32(v) => v.len(),
            ColumnData::Int64(v) => v.len(),
            ColumnData::Float(v) => v.len(),
            ColumnData::Double(v) => v.len(),
            ColumnData::VarChar(v) => v.len(),
            ColumnData::Json(v) => v.len(),
            ColumnData::FloatVector { rows, .. } => rows.len(),
            ColumnData::BinaryVector { rows, .. } => rows.len(),
            ColumnData::SparseFloatVector(rows) => rows.len(),
            ColumnData::Array { rows, .. } => rows.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn data_type(&self) -> DataType {
        match self {
            ColumnData::Bool(_) => DataType::Bool,
            ColumnData::Int8(_) => DataType::Int8,
            ColumnData::Int16(_) => DataType::Int16,
            ColumnData::Int32(_) => DataType::Int32,
            ColumnData::Int64(_) => DataType::Int64,
            ColumnData::Float(_) => DataType::Float,
            ColumnData::Double(_) => DataType::Double,
            ColumnData::VarChar(_) => DataType::VarChar,
            ColumnData::Json(_) => DataType::Json,
            ColumnData::FloatVector { .. } => DataType::FloatVector,
            ColumnData::BinaryVector { .. } => DataType::BinaryVector,
            ColumnData::SparseFloatVector(_) => DataType::SparseFloatVector,
            ColumnData::Array { .. } => DataType::Array,
        }
    }
}

/// A single decoded value, as returned by [`Column::value`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Null,
    Bool(bool),
    Int8(i8),
    Int16(i16),
    Int32(i32),
    Int64(i64),
    Float(f32),
    Double(f64),
    VarChar(String),
    Json(JsonValue),
    FloatVector(Vec<f32>),
    BinaryVector(Vec<u8>),
    SparseFloatVector(SparseRow),
    Array(Vec<Value>),
}

/// A named column of a payload batch or result set.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    data: ColumnData,
    /// Per-row validity for nullable fields; `None` means all rows valid.
    validity: Option<Vec<bool>>,
}

impl Column {
    pub fn new(name: impl Into<String>, data: ColumnData) -> Self {
        Self {
            name: name.into(),
            data,
            validity: None,
        }
    }

    pub fn bool(name: impl Into<String>, values: Vec<bool>) -> Self {
        Self::new(name, ColumnData::Bool(values))
    }

    pub fn int8(name: impl Into<String>, values: Vec<i8>) -> Self {
        Self::new(name, ColumnData::Int8(values))
    }

    pub fn int16(name: impl Into<String>, values: Vec<i16>) -> Self {
        Self::new(name, ColumnData::Int16(values))
    }

    pub fn int32(name: impl Into<String>, values: Vec<i32>) -> Self {
        Self::new(name, ColumnData::Int32(values))
    }

    pub fn int64(name: impl Into<String>, values: Vec<i64>) -> Self {
        Self::new(name, ColumnData::Int64(values))
    }

    pub fn float(name: impl Into<String>, values: Vec<f32>) -> Self {
        Self::new(name, ColumnData::Float(values))
    }

    pub fn double(name: impl Into<String>, values: Vec<f64>) -> Self {
        Self::new(name, ColumnData::Double(values))
    }

    pub fn varchar(name: impl Into<String>, values: Vec<String>) -> Self {
        Self::new(name, ColumnData::VarChar(values))
    }

    pub fn json(name: impl Into<String>, values: Vec<JsonValue>) -> Self {
        Self::new(name, ColumnData::Json(values))
    }

    pub fn float_vector(name: impl Into<String>, dim: u32, rows: Vec<Vec<f32>>) -> Self {
        Self::new(name, ColumnData::FloatVector { dim, rows })
    }

    pub fn binary_vector(name: impl Into<String>, dim: u32, rows: Vec<Vec<u8>>) -> Self {
        Self::new(name, ColumnData::BinaryVector { dim, rows })
    }

    pub fn sparse_float_vector(name: impl Into<String>, rows: Vec<SparseRow>) -> Self {
        Self::new(name, ColumnData::SparseFloatVector(rows))
    }

    /// Attach a validity bitmap. Row `i` is null when `validity[i]` is false;
    /// the corresponding slot in the data still carries a placeholder value.
    pub fn with_validity(mut self, validity: Vec<bool>) -> Self {
        self.validity = Some(validity);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data(&self) -> &ColumnData {
        &self.data
    }

    pub fn validity(&self) -> Option<&[bool]> {
        self.validity.as_deref()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    pub fn is_null(&self, row: usize) -> bool {
        match &self.validity {
            Some(v) => v.get(row).map(|ok| !ok).unwrap_or(false),
            None => false,
        }
    }

    /// Value at `row`, or `None` when out of range.
    pub fn value(&self, row: usize) -> Option<Value> {
        if row >= self.len() {
            return None;
        }
        if self.is_null(row) {
            return Some(Value::Null);
        }
        Some(match &self.data {
            ColumnData::Bool(v) => Value::Bool(v[row]),
            ColumnData::Int8(v) => Value::Int8(v[row]),
            ColumnData::Int16(v) => Value::Int16(v[row]),
            ColumnData::Int32(v) => Value::Int32(v[row]),
            ColumnData::Int64(v) => Value::Int64(v[row]),
            ColumnData::Float(v) => Value::Float(v[row]),
            ColumnData::Double(v) => Value::Double(v[row]),
            ColumnData::VarChar(v) => Value::VarChar(v[row].clone()),
            ColumnData::Json(v) => Value::Json(v[row].clone()),
            ColumnData::FloatVector { rows, .. } => Value::FloatVector(rows[row].clone()),
            ColumnData::BinaryVector { rows, .. } => Value::BinaryVector(rows[row].clone()),
            ColumnData::SparseFloatVector(rows) => Value::SparseFloatVector(rows[row].clone()),
            ColumnData::Array { rows, .. } => {
                let element = &rows[row];
                let values = (0..element.len())
                    .map(|i| {
                        Column::new("", element.clone())
                            .value(i)
                            .unwrap_or(Value::Null)
                    })
                    .collect();
                Value::Array(values)
            }
        })
    }

    /// Check this column against its field descriptor: exact type match,
    /// per-row dimension equality for vectors, validity only where nullable,
    /// sparse rows sorted by index with no duplicates.
    pub(crate) fn check_against(&self, field: &FieldSchema) -> Result<()> {
        if self.data_type() != field.data_type {
            return Err(Error::mismatch(
                self.name.clone(),
                format!(
                    "field declares {:?} but column carries {:?}",
                    field.data_type,
                    self.data_type()
                ),
            ));
        }

        if let Some(validity) = &self.validity {
            if !field.nullable {
                return Err(Error::mismatch(
                    self.name.clone(),
                    "validity bitmap supplied for a non-nullable field",
                ));
            }
            if validity.len() != self.len() {
                return Err(Error::validation(
                    self.name.clone(),
                    format!(
                        "validity length {} does not match row count {}",
                        validity.len(),
                        self.len()
                    ),
                ));
            }
        }

        match &self.data {
            ColumnData::FloatVector { dim, rows } => {
                let expected = field.dim.unwrap_or(0);
                if *dim != expected {
                    return Err(Error::mismatch(
                        self.name.clone(),
                        format!("field declares dim {expected} but column carries dim {dim}"),
                    ));
                }
                for (i, row) in rows.iter().enumerate() {
                    if row.len() != expected as usize {
                        return Err(Error::validation(
                            self.name.clone(),
                            format!("row {i} has {} elements, expected {expected}", row.len()),
                        ));
                    }
                }
            }
            ColumnData::BinaryVector { dim, rows } => {
                let expected = field.dim.unwrap_or(0);
                if *dim != expected {
                    return Err(Error::mismatch(
                        self.name.clone(),
                        format!("field declares dim {expected} but column carries dim {dim}"),
                    ));
                }
                let bytes = (expected / 8) as usize;
                for (i, row) in rows.iter().enumerate() {
                    if row.len() != bytes {
                        return Err(Error::validation(
                            self.name.clone(),
                            format!("row {i} has {} bytes, expected {bytes}", row.len()),
                        ));
                    }
                }
            }
            ColumnData::SparseFloatVector(rows) => {
                for (i, row) in rows.iter().enumerate() {
                    for pair in row.windows(2) {
                        if pair[1].0 <= pair[0].0 {
                            return Err(Error::validation(
                                self.name.clone(),
                                format!("sparse row {i} indices must be strictly increasing"),
                            ));
                        }
                    }
                }
            }
            ColumnData::Array { element_type, rows } => {
                let expected = field.element_type.ok_or_else(|| {
                    Error::mismatch(self.name.clone(), "field declares no element type")
                })?;
                if *element_type != expected {
                    return Err(Error::mismatch(
                        self.name.clone(),
                        format!(
                            "field declares element type {expected:?} but column carries {element_type:?}"
                        ),
                    ));
                }
                for row in rows {
                    if row.data_type() != expected {
                        return Err(Error::mismatch(
                            self.name.clone(),
                            "array row element type differs from declaration",
                        ));
                    }
                }
            }
            _ => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_value_access_and_nulls() {
        let column = Column::int64("age", vec![10, 0, 30]).with_validity(vec![true, false, true]);
        assert_eq!(column.value(0), Some(Value::Int64(10)));
        assert_eq!(column.value(1), Some(Value::Null));
        assert_eq!(column.value(2), Some(Value::Int64(30)));
        assert_eq!(column.value(3), None);
    }

    #[test]
    fn test_dim_mismatch_detected() {
        let field = FieldSchema::new("v", DataType::FloatVector).with_dim(4);
        let column = Column::float_vector("v", 4, vec![vec![0.0; 4], vec![0.0; 3]]);
        assert!(column.check_against(&field).is_err());
    }

    #[test]
    fn test_validity_on_non_nullable_rejected() {
        let field = FieldSchema::new("a", DataType::Int64);
        let column = Column::int64("a", vec![1]).with_validity(vec![true]);
        assert!(column.check_against(&field).is_err());
    }

    #[test]
    fn test_sparse_rows_must_be_sorted() {
        let field = FieldSchema::new("s", DataType::SparseFloatVector);
        let sorted = Column::sparse_float_vector("s", vec![vec![(1, 0.5), (7, 0.2)]]);
        assert!(sorted.check_against(&field).is_ok());

        let unsorted = Column::sparse_float_vector("s", vec![vec![(7, 0.2), (1, 0.5)]]);
        assert!(unsorted.check_against(&field).is_err());

        let duplicate = Column::sparse_float_vector("s", vec![vec![(3, 0.2), (3, 0.5)]]);
        assert!(duplicate.check_against(&field).is_err());
    }
}
