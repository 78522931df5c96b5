//! Columnar wire codec: typed [`Column`] values to and from the protobuf
//! [`FieldData`] layout.
//!
//! Dense float vectors travel as one flat row-major array, binary vectors as
//! one packed byte blob, sparse vectors as one little-endian
//! `(u32 index, f32 value)` blob per row. Scalars travel as plain arrays;
//! nullable columns keep full-length value arrays with a parallel validity
//! bitmap.

use protos::vector::v1 as pb;
use protos::vector::v1::{field_data, scalar_field, vector_field};

use crate::column::{Column, ColumnData, SparseRow};
use crate::error::{Error, Result};
use crate::schema::{DataType, FieldSchema};

/// Encode one validated column into its wire form.
///
/// The column is assumed to have passed
/// [`CollectionSchema::validate_columns`](crate::schema::CollectionSchema::validate_columns);
/// this function is purely mechanical.
pub fn encode_column(field: &FieldSchema, column: &Column) -> Result<pb::FieldData> {
    let payload = match column.data() {
        ColumnData::Bool(values) => scalars(scalar_field::Data::BoolData(pb::BoolArray {
            data: values.clone(),
        })),
        ColumnData::Int8(values) => scalars(scalar_field::Data::IntData(pb::IntArray {
            data: values.iter().map(|v| *v as i32).collect(),
        })),
        ColumnData::Int16(values) => scalars(scalar_field::Data::IntData(pb::IntArray {
            data: values.iter().map(|v| *v as i32).collect(),
        })),
        ColumnData::Int32(values) => scalars(scalar_field::Data::IntData(pb::IntArray {
            data: values.clone(),
        })),
        ColumnData::Int64(values) => scalars(scalar_field::Data::LongData(pb::LongArray {
            data: values.clone(),
        })),
        ColumnData::Float(values) => scalars(scalar_field::Data::FloatData(pb::FloatArray {
            data: values.clone(),
        })),
        ColumnData::Double(values) => scalars(scalar_field::Data::DoubleData(pb::DoubleArray {
            data: values.clone(),
        })),
        ColumnData::VarChar(values) => scalars(scalar_field::Data::StringData(pb::StringArray {
            data: values.clone(),
        })),
        ColumnData::Json(values) => {
            let mut data = Vec::with_capacity(values.len());
            for value in values {
                data.push(serde_json::to_vec(value).map_err(|e| {
                    Error::validation(column.name().to_string(), format!("bad json value: {e}"))
                })?);
            }
            scalars(scalar_field::Data::JsonData(pb::JsonArray { data }))
        }
        ColumnData::FloatVector { dim, rows } => field_data::Field::Vectors(pb::VectorField {
            dim: *dim as i64,
            data: Some(vector_field::Data::FloatVector(pb::FloatArray {
                data: rows.iter().flatten().copied().collect(),
            })),
        }),
        ColumnData::BinaryVector { dim, rows } => field_data::Field::Vectors(pb::VectorField {
            dim: *dim as i64,
            data: Some(vector_field::Data::BinaryVector(
                rows.iter().flatten().copied().collect(),
            )),
        }),
        ColumnData::SparseFloatVector(rows) => {
            let dim = rows
                .iter()
                .flat_map(|row| row.iter().map(|(idx, _)| *idx as i64 + 1))
                .max()
                .unwrap_or(0);
            field_data::Field::Vectors(pb::VectorField {
                dim,
                data: Some(vector_field::Data::SparseFloatVector(pb::SparseFloatArray {
                    contents: rows.iter().map(|row| encode_sparse_row(row)).collect(),
                    dim,
                })),
            })
        }
        ColumnData::Array { element_type, rows } => {
            let mut data = Vec::with_capacity(rows.len());
            for row in rows {
                let encoded = encode_column(
                    &FieldSchema::new(column.name(), *element_type),
                    &Column::new(column.name(), row.clone()),
                )?;
                match encoded.field {
                    Some(field_data::Field::Scalars(scalar)) => data.push(scalar),
                    _ => {
                        return Err(Error::validation(
                            column.name().to_string(),
                            "array rows must hold scalar data",
                        ));
                    }
                }
            }
            scalars(scalar_field::Data::ArrayData(pb::ArrayArray {
                data,
                element_type: element_type.to_proto() as i32,
            }))
        }
    };

    Ok(pb::FieldData {
        r#type: field.data_type.to_proto() as i32,
        field_name: column.name().to_string(),
        valid_data: column.validity().map(<[bool]>::to_vec).unwrap_or_default(),
        field: Some(payload),
    })
}

/// Encode a full column set in field order.
pub fn encode_columns(
    schema: &crate::schema::CollectionSchema,
    columns: &[Column],
) -> Result<Vec<pb::FieldData>> {
    let mut out = Vec::with_capacity(columns.len());
    for column in columns {
        let field = schema.field(column.name()).ok_or_else(|| {
            Error::mismatch(column.name().to_string(), "no such field in schema")
        })?;
        out.push(encode_column(field, column)?);
    }
    Ok(out)
}

fn scalars(data: scalar_field::Data) -> field_data::Field {
    field_data::Field::Scalars(pb::ScalarField { data: Some(data) })
}

fn encode_sparse_row(row: &SparseRow) -> Vec<u8> {
    let mut blob = Vec::with_capacity(row.len() * 8);
    for (index, value) in row {
        blob.extend_from_slice(&index.to_le_bytes());
        blob.extend_from_slice(&value.to_le_bytes());
    }
    blob
}

fn decode_sparse_row(blob: &[u8]) -> Result<SparseRow> {
    if blob.len() % 8 != 0 {
        return Err(Error::decode(format!(
            "sparse row blob of {} bytes is not a whole number of pairs",
            blob.len()
        )));
    }
    let mut row = Vec::with_capacity(blob.len() / 8);
    for pair in blob.chunks_exact(8) {
        let index = u32::from_le_bytes([pair[0], pair[1], pair[2], pair[3]]);
        let value = f32::from_le_bytes([pair[4], pair[5], pair[6], pair[7]]);
        row.push((index, value));
    }
    Ok(row)
}

/// Decode one wire column back into a typed [`Column`].
pub fn decode_field_data(data: pb::FieldData) -> Result<Column> {
    let name = data.field_name;
    let declared = DataType::from_proto(data.r#type)?;
    let field = data
        .field
        .ok_or_else(|| Error::decode(format!("column '{name}' carries no payload")))?;

    let column_data = match field {
        field_data::Field::Scalars(scalar) => decode_scalars(&name, declared, scalar)?,
        field_data::Field::Vectors(vectors) => decode_vectors(&name, declared, vectors)?,
    };

    let mut column = Column::new(name.clone(), column_data);
    if !data.valid_data.is_empty() {
        if data.valid_data.len() != column.len() {
            return Err(Error::decode(format!(
                "column '{name}': validity length {} does not match {} rows",
                data.valid_data.len(),
                column.len()
            )));
        }
        column = column.with_validity(data.valid_data);
    }
    Ok(column)
}

/// Narrow the shared i32 wire carrier, rejecting out-of-range values.
fn narrow_ints<T>(
    name: &str,
    kind: &str,
    values: Vec<i32>,
    convert: impl Fn(i32) -> std::result::Result<T, std::num::TryFromIntError>,
) -> Result<Vec<T>> {
    values
        .into_iter()
        .map(|v| {
            convert(v).map_err(|_| {
                Error::decode(format!("column '{name}': value {v} out of range for {kind}"))
            })
        })
        .collect()
}

fn decode_scalars(name: &str, declared: DataType, scalar: pb::ScalarField) -> Result<ColumnData> {
    let data = scalar
        .data
        .ok_or_else(|| Error::decode(format!("column '{name}' carries no scalar data")))?;
    let decoded = match (declared, data) {
        (DataType::Bool, scalar_field::Data::BoolData(arr)) => ColumnData::Bool(arr.data),
        (DataType::Int8, scalar_field::Data::IntData(arr)) => {
            ColumnData::Int8(narrow_ints(name, "Int8", arr.data, i8::try_from)?)
        }
        (DataType::Int16, scalar_field::Data::IntData(arr)) => {
            ColumnData::Int16(narrow_ints(name, "Int16", arr.data, i16::try_from)?)
        }
        (DataType::Int32, scalar_field::Data::IntData(arr)) => ColumnData::Int32(arr.data),
        (DataType::Int64, scalar_field::Data::LongData(arr)) => ColumnData::Int64(arr.data),
        (DataType::Float, scalar_field::Data::FloatData(arr)) => ColumnData::Float(arr.data),
        (DataType::Double, scalar_field::Data::DoubleData(arr)) => ColumnData::Double(arr.data),
        (DataType::VarChar, scalar_field::Data::StringData(arr)) => ColumnData::VarChar(arr.data),
        (DataType::Json, scalar_field::Data::JsonData(arr)) => {
            let mut values = Vec::with_capacity(arr.data.len());
            for blob in arr.data {
                values.push(serde_json::from_slice(&blob).map_err(|e| {
                    Error::decode(format!("column '{name}': malformed json payload: {e}"))
                })?);
            }
            ColumnData::Json(values)
        }
        (DataType::Array, scalar_field::Data::ArrayData(arr)) => {
            let element_type = DataType::from_proto(arr.element_type)?;
            let mut rows = Vec::with_capacity(arr.data.len());
            for row in arr.data {
                rows.push(decode_scalars(name, element_type, row)?);
            }
            ColumnData::Array { element_type, rows }
        }
        (declared, _) => {
            return Err(Error::decode(format!(
                "column '{name}': payload does not match declared type {declared:?}"
            )));
        }
    };
    Ok(decoded)
}

fn decode_vectors(name: &str, declared: DataType, vectors: pb::VectorField) -> Result<ColumnData> {
    let dim = vectors.dim;
    let data = vectors
        .data
        .ok_or_else(|| Error::decode(format!("column '{name}' carries no vector data")))?;
    let decoded = match (declared, data) {
        (DataType::FloatVector, vector_field::Data::FloatVector(arr)) => {
            if dim <= 0 {
                return Err(Error::decode(format!(
                    "column '{name}': non-positive dimension {dim}"
                )));
            }
            let dim = dim as usize;
            if arr.data.len() % dim != 0 {
                return Err(Error::decode(format!(
                    "column '{name}': {} floats is not a whole number of dim-{dim} rows",
                    arr.data.len()
                )));
            }
            ColumnData::FloatVector {
                dim: dim as u32,
                rows: arr.data.chunks_exact(dim).map(<[f32]>::to_vec).collect(),
            }
        }
        (DataType::BinaryVector, vector_field::Data::BinaryVector(blob)) => {
            if dim <= 0 || dim % 8 != 0 {
                return Err(Error::decode(format!(
                    "column '{name}': binary vector dimension {dim} is not a positive multiple of 8"
                )));
            }
            let bytes = (dim / 8) as usize;
            if blob.len() % bytes != 0 {
                return Err(Error::decode(format!(
                    "column '{name}': {} bytes is not a whole number of dim-{dim} rows",
                    blob.len()
                )));
            }
            ColumnData::BinaryVector {
                dim: dim as u32,
                rows: blob.chunks_exact(bytes).map(<[u8]>::to_vec).collect(),
            }
        }
        (DataType::SparseFloatVector, vector_field::Data::SparseFloatVector(arr)) => {
            let mut rows = Vec::with_capacity(arr.contents.len());
            for blob in &arr.contents {
                rows.push(decode_sparse_row(blob)?);
            }
            ColumnData::SparseFloatVector(rows)
        }
        (declared, _) => {
            return Err(Error::decode(format!(
                "column '{name}': payload does not match declared type {declared:?}"
            )));
        }
    };
    Ok(decoded)
}
