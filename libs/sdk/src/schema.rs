//! In-memory schema model: field descriptors, collection schemas and the
//! validation that every payload column must pass before it is encoded.

use std::collections::HashSet;

use protos::vector::v1 as pb;
use serde::{Deserialize, Serialize};

use crate::column::Column;
use crate::error::{Error, Result};

/// Logical data type of a field.
///
/// There is no implicit conversion between widths; a column must carry
/// exactly the type its field descriptor declares.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DataType {
    Bool,
    Int8,
    Int16,
    Int32,
    Int64,
    Float,
    Double,
    VarChar,
    Json,
    Array,
    FloatVector,
    BinaryVector,
    SparseFloatVector,
}

impl DataType {
    pub fn is_vector(&self) -> bool {
        matches!(
            self,
            DataType::FloatVector | DataType::BinaryVector | DataType::SparseFloatVector
        )
    }

    pub(crate) fn to_proto(self) -> pb::DataType {
        match self {
            DataType::Bool => pb::DataType::Bool,
            DataType::Int8 => pb::DataType::Int8,
            DataType::Int16 => pb::DataType::Int16,
            DataType::Int32 => pb::DataType::Int32,
            DataType::Int64 => pb::DataType::Int64,
            DataType::Float => pb::DataType::Float,
            DataType::Double => pb::DataType::Double,
            DataType::VarChar => pb::DataType::Varchar,
            DataType::Json => pb::DataType::Json,
            DataType::Array => pb::DataType::Array,
            DataType::FloatVector => pb::DataType::FloatVector,
            DataType::BinaryVector => pb::DataType::BinaryVector,
            DataType::SparseFloatVector => pb::DataType::SparseFloatVector,
        }
    }

    pub(crate) fn from_proto(value: i32) -> Result<Self> {
        match pb::DataType::try_from(value) {
            Ok(pb::DataType::Bool) => Ok(DataType::Bool),
            Ok(pb::DataType::Int8) => Ok(DataType::Int8),
            Ok(pb::DataType::Int16) => Ok(DataType::Int16),
            Ok(pb::DataType::Int32) => Ok(DataType::Int32),
            Ok(pb::DataType::Int64) => Ok(DataType::Int64),
            Ok(pb::DataType::Float) => Ok(DataType::Float),
            Ok(pb::DataType::Double) => Ok(DataType::Double),
            Ok(pb::DataType::Varchar) => Ok(DataType::VarChar),
            Ok(pb::DataType::Json) => Ok(DataType::Json),
            Ok(pb::DataType::Array) => Ok(DataType::Array),
            Ok(pb::DataType::FloatVector) => Ok(DataType::FloatVector),
            Ok(pb::DataType::BinaryVector) => Ok(DataType::BinaryVector),
            Ok(pb::DataType::SparseFloatVector) => Ok(DataType::SparseFloatVector),
            Ok(pb::DataType::Unspecified) | Err(_) => {
                Err(Error::decode(format!("unknown data type {value}")))
            }
        }
    }
}

/// Caller-selectable staleness bound for read operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ConsistencyLevel {
    Strong,
    Session,
    #[default]
    Bounded,
    Eventually,
}

impl ConsistencyLevel {
    pub(crate) fn to_proto(self) -> pb::ConsistencyLevel {
        match self {
            ConsistencyLevel::Strong => pb::ConsistencyLevel::Strong,
            ConsistencyLevel::Session => pb::ConsistencyLevel::Session,
            ConsistencyLevel::Bounded => pb::ConsistencyLevel::Bounded,
            ConsistencyLevel::Eventually => pb::ConsistencyLevel::Eventually,
        }
    }

    pub(crate) fn from_proto(value: i32) -> Result<Self> {
        match pb::ConsistencyLevel::try_from(value) {
            Ok(pb::ConsistencyLevel::Strong) => Ok(ConsistencyLevel::Strong),
            Ok(pb::ConsistencyLevel::Session) => Ok(ConsistencyLevel::Session),
            Ok(pb::ConsistencyLevel::Bounded) => Ok(ConsistencyLevel::Bounded),
            Ok(pb::ConsistencyLevel::Eventually) => Ok(ConsistencyLevel::Eventually),
            Err(_) => Err(Error::decode(format!("unknown consistency level {value}"))),
        }
    }
}

/// One field descriptor within a collection schema.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FieldSchema {
    pub name: String,
    pub description: String,
    pub data_type: DataType,
    pub is_primary_key: bool,
    pub auto_id: bool,
    pub nullable: bool,
    /// Dimension; required for dense vector fields, absent otherwise.
    pub dim: Option<u32>,
    /// Maximum length for VarChar fields.
    pub max_length: Option<u32>,
    /// Element type for Array fields.
    pub element_type: Option<DataType>,
}

impl FieldSchema {
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            data_type,
            is_primary_key: false,
            auto_id: false,
            nullable: false,
            dim: None,
            max_length: None,
            element_type: None,
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn primary_key(mut self) -> Self {
        self.is_primary_key = true;
        self
    }

    /// Let the server assign primary keys; such a field must not be supplied
    /// in insert payloads.
    pub fn auto_id(mut self) -> Self {
        self.auto_id = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.nullable = true;
        self
    }

    pub fn with_dim(mut self, dim: u32) -> Self {
        self.dim = Some(dim);
        self
    }

    pub fn with_max_length(mut self, max_length: u32) -> Self {
        self.max_length = Some(max_length);
        self
    }

    pub fn with_element_type(mut self, element_type: DataType) -> Self {
        self.element_type = Some(element_type);
        self
    }

    pub fn is_vector(&self) -> bool {
        self.data_type.is_vector()
    }

    fn to_proto(&self) -> pb::FieldSchema {
        let mut type_params = std::collections::HashMap::new();
        if let Some(dim) = self.dim {
            type_params.insert("dim".to_string(), dim.to_string());
        }
        if let Some(max_length) = self.max_length {
            type_params.insert("max_length".to_string(), max_length.to_string());
        }
        pb::FieldSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            data_type: self.data_type.to_proto() as i32,
            is_primary_key: self.is_primary_key,
            auto_id: self.auto_id,
            nullable: self.nullable,
            type_params,
            element_type: self
                .element_type
                .map(|t| t.to_proto() as i32)
                .unwrap_or(pb::DataType::Unspecified as i32),
        }
    }

    fn from_proto(proto: pb::FieldSchema) -> Result<Self> {
        let dim = match proto.type_params.get("dim") {
            Some(raw) => Some(
                raw.parse::<u32>()
                    .map_err(|_| Error::decode(format!("field '{}': bad dim '{raw}'", proto.name)))?,
            ),
            None => None,
        };
        let max_length = match proto.type_params.get("max_length") {
            Some(raw) => Some(raw.parse::<u32>().map_err(|_| {
                Error::decode(format!("field '{}': bad max_length '{raw}'", proto.name))
            })?),
            None => None,
        };
        let element_type = if proto.element_type == pb::DataType::Unspecified as i32 {
            None
        } else {
            Some(DataType::from_proto(proto.element_type)?)
        };
        Ok(Self {
            data_type: DataType::from_proto(proto.data_type)?,
            name: proto.name,
            description: proto.description,
            is_primary_key: proto.is_primary_key,
            auto_id: proto.auto_id,
            nullable: proto.nullable,
            dim,
            max_length,
            element_type,
        })
    }
}

/// Ordered field descriptors plus collection-level metadata.
///
/// Immutable once declared or fetched; a mismatch between this and the
/// server-reported schema is a hard error, never silently coerced.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionSchema {
    pub name: String,
    pub description: String,
    pub consistency_level: ConsistencyLevel,
    pub fields: Vec<FieldSchema>,
}

impl CollectionSchema {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            description: String::new(),
            consistency_level: ConsistencyLevel::default(),
            fields: Vec::new(),
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_consistency_level(mut self, level: ConsistencyLevel) -> Self {
        self.consistency_level = level;
        self
    }

    pub fn with_field(mut self, field: FieldSchema) -> Self {
        self.fields.push(field);
        self
    }

    pub fn field(&self, name: &str) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.name == name)
    }

    pub fn primary_key(&self) -> Option<&FieldSchema> {
        self.fields.iter().find(|f| f.is_primary_key)
    }

    /// Structural validation of the schema itself.
    pub fn validate(&self) -> Result<()> {
        if self.name.is_empty() {
            return Err(Error::validation("collection_name", "must not be empty"));
        }
        if self.fields.is_empty() {
            return Err(Error::validation("fields", "schema declares no fields"));
        }

        let mut names = HashSet::new();
        for field in &self.fields {
            if field.name.is_empty() {
                return Err(Error::validation("field.name", "must not be empty"));
            }
            if !names.insert(field.name.as_str()) {
                return Err(Error::validation(
                    field.name.clone(),
                    "duplicate field name",
                ));
            }
        }

        let pk_count = self.fields.iter().filter(|f| f.is_primary_key).count();
        if pk_count != 1 {
            return Err(Error::validation(
                "primary_key",
                format!("exactly one primary-key field required, found {pk_count}"),
            ));
        }

        for field in &self.fields {
            if field.is_primary_key {
                if !matches!(field.data_type, DataType::Int64 | DataType::VarChar) {
                    return Err(Error::validation(
                        field.name.clone(),
                        "primary key must be Int64 or VarChar",
                    ));
                }
                if field.nullable {
                    return Err(Error::validation(
                        field.name.clone(),
                        "primary key cannot be nullable",
                    ));
                }
            }
            if field.auto_id && !field.is_primary_key {
                return Err(Error::validation(
                    field.name.clone(),
                    "auto_id is only valid on the primary key",
                ));
            }
            match field.data_type {
                DataType::FloatVector | DataType::BinaryVector => match field.dim {
                    None | Some(0) => {
                        return Err(Error::validation(
                            field.name.clone(),
                            "vector field requires a positive dimension",
                        ));
                    }
                    Some(dim) => {
                        if field.data_type == DataType::BinaryVector && dim % 8 != 0 {
                            return Err(Error::validation(
                                field.name.clone(),
                                "binary vector dimension must be a multiple of 8",
                            ));
                        }
                    }
                },
                DataType::SparseFloatVector => {
                    // Dimension is implied by the largest index per row.
                }
                DataType::Array => {
                    match field.element_type {
                        Some(t) if !t.is_vector() && t != DataType::Array && t != DataType::Json => {}
                        Some(_) => {
                            return Err(Error::validation(
                                field.name.clone(),
                                "array element type must be a scalar",
                            ));
                        }
                        None => {
                            return Err(Error::validation(
                                field.name.clone(),
                                "array field requires an element type",
                            ));
                        }
                    }
                }
                _ => {
                    if field.dim.is_some() {
                        return Err(Error::validation(
                            field.name.clone(),
                            "dimension is only valid on vector fields",
                        ));
                    }
                }
            }
            if field.is_vector() && field.nullable {
                return Err(Error::validation(
                    field.name.clone(),
                    "vector fields cannot be nullable",
                ));
            }
        }
        Ok(())
    }

    /// Validate a payload column set against this schema.
    ///
    /// Checks the row-count invariant across all columns, exact type and
    /// dimension correspondence per field, nullability, and presence: every
    /// non-auto-id field must be supplied, auto-id fields must not be.
    /// Returns the common row count.
    pub fn validate_columns(&self, columns: &[Column]) -> Result<usize> {
        if columns.is_empty() {
            return Err(Error::validation("columns", "no columns supplied"));
        }

        let num_rows = columns[0].len();
        for column in columns {
            if column.len() != num_rows {
                return Err(Error::validation(
                    column.name().to_string(),
                    format!(
                        "row count {} does not match {} of column '{}'",
                        column.len(),
                        num_rows,
                        columns[0].name()
                    ),
                ));
            }
        }

        let mut seen = HashSet::new();
        for column in columns {
            let field = self.field(column.name()).ok_or_else(|| {
                Error::mismatch(column.name().to_string(), "no such field in schema")
            })?;
            if !seen.insert(column.name().to_string()) {
                return Err(Error::validation(
                    column.name().to_string(),
                    "column supplied twice",
                ));
            }
            if field.auto_id {
                return Err(Error::mismatch(
                    column.name().to_string(),
                    "field is auto-id; the server assigns its values",
                ));
            }
            column.check_against(field)?;
        }

        for field in &self.fields {
            if !field.auto_id && !seen.contains(&field.name) {
                return Err(Error::mismatch(field.name.clone(), "column missing"));
            }
        }

        Ok(num_rows)
    }

    pub(crate) fn to_proto(&self) -> pb::CollectionSchema {
        pb::CollectionSchema {
            name: self.name.clone(),
            description: self.description.clone(),
            fields: self.fields.iter().map(|f| f.to_proto()).collect(),
        }
    }

    pub(crate) fn from_proto(
        proto: pb::CollectionSchema,
        consistency_level: i32,
    ) -> Result<Self> {
        Ok(Self {
            name: proto.name,
            description: proto.description,
            consistency_level: ConsistencyLevel::from_proto(consistency_level)?,
            fields: proto
                .fields
                .into_iter()
                .map(FieldSchema::from_proto)
                .collect::<Result<Vec<_>>>()?,
        })
    }
}
