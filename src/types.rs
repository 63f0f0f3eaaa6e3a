//! Core data model types.
//!
//! Every request parses its source file into an in-memory [`Table`] whose column
//! types are inferred from the file contents. Nothing here outlives a request.

use chrono::NaiveDateTime;
use serde_json::{Map, Number};

use crate::error::{ServiceError, ServiceResult};

/// Inferred logical type of a column.
///
/// These are the five classification buckets reported by the column-info
/// endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataType {
    /// 64-bit floating point number.
    Float64,
    /// 64-bit signed integer.
    Int64,
    /// Boolean.
    Bool,
    /// Naive (timezone-less) date or datetime.
    DateTime,
    /// UTF-8 string; the fallback bucket.
    Utf8,
}

/// A single typed cell value in a [`Table`].
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    /// Missing/empty value.
    Null,
    /// 64-bit signed integer.
    Int64(i64),
    /// 64-bit float.
    Float64(f64),
    /// Boolean.
    Bool(bool),
    /// Naive datetime.
    DateTime(NaiveDateTime),
    /// UTF-8 string.
    Utf8(String),
}

impl Value {
    /// Numeric view of a value, if it has one. Used by statistics.
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int64(v) => Some(*v as f64),
            Value::Float64(v) => Some(*v),
            _ => None,
        }
    }

    /// Convert into a JSON value. Non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::Null => serde_json::Value::Null,
            Value::Int64(v) => serde_json::Value::Number((*v).into()),
            Value::Float64(v) => match Number::from_f64(*v) {
                Some(n) => serde_json::Value::Number(n),
                None => serde_json::Value::Null,
            },
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::DateTime(dt) => {
                serde_json::Value::String(dt.format("%Y-%m-%dT%H:%M:%S").to_string())
            }
            Value::Utf8(s) => serde_json::Value::String(s.clone()),
        }
    }
}

/// A named column with its inferred type.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    /// Column name from the source header row.
    pub name: String,
    /// Type inferred from the column's values.
    pub data_type: DataType,
}

impl Column {
    /// Create a new column.
    pub fn new(name: impl Into<String>, data_type: DataType) -> Self {
        Self {
            name: name.into(),
            data_type,
        }
    }
}

/// In-memory rectangular dataset built fresh from file bytes on every request.
///
/// Columns keep source order; rows keep source order. Rows are stored row-major
/// as `Vec<Vec<Value>>` with one value per column.
#[derive(Debug, Clone, PartialEq)]
pub struct Table {
    /// Ordered column descriptors.
    pub columns: Vec<Column>,
    /// Row-major value storage.
    pub rows: Vec<Vec<Value>>,
}

impl Table {
    /// Create a table from columns and rows.
    pub fn new(columns: Vec<Column>, rows: Vec<Vec<Value>>) -> Self {
        Self { columns, rows }
    }

    /// The `(row count, column count)` pair.
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    /// Column names in source order.
    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|c| c.name.clone()).collect()
    }

    /// Rows `[offset, offset + len)`, clipped to table bounds.
    ///
    /// Out-of-range requests yield fewer or zero rows, never an error.
    pub fn slice_rows(&self, offset: usize, len: usize) -> Vec<Vec<Value>> {
        let start = offset.min(self.rows.len());
        let end = offset.saturating_add(len).min(self.rows.len());
        self.rows[start..end].to_vec()
    }

    /// The trailing `len` rows (all rows if the table is shorter).
    pub fn tail_rows(&self, len: usize) -> Vec<Vec<Value>> {
        let start = self.rows.len().saturating_sub(len);
        self.rows[start..].to_vec()
    }

    /// A new table containing the given column ordinals, in the order given.
    ///
    /// Duplicates and reorderings are allowed. An out-of-range ordinal is a
    /// hard [`ServiceError::ColumnOutOfRange`].
    pub fn select_columns(&self, indexes: &[usize]) -> ServiceResult<Table> {
        let width = self.columns.len();
        let mut columns = Vec::with_capacity(indexes.len());
        for &idx in indexes {
            match self.columns.get(idx) {
                Some(col) => columns.push(col.clone()),
                None => {
                    return Err(ServiceError::ColumnOutOfRange {
                        index: idx,
                        columns: width,
                    });
                }
            }
        }

        let rows = self
            .rows
            .iter()
            .map(|row| indexes.iter().map(|&idx| row[idx].clone()).collect())
            .collect();

        Ok(Table::new(columns, rows))
    }

    /// Serialize rows as JSON objects keyed by column name.
    ///
    /// When the table holds duplicate column names (possible after
    /// [`Self::select_columns`] with repeated ordinals), later duplicates
    /// overwrite earlier keys inside each object; callers that care expose the
    /// column-name list alongside.
    pub fn rows_to_objects(rows: &[Vec<Value>], columns: &[Column]) -> Vec<serde_json::Value> {
        rows.iter()
            .map(|row| {
                let mut obj = Map::with_capacity(columns.len());
                for (col, value) in columns.iter().zip(row.iter()) {
                    obj.insert(col.name.clone(), value.to_json());
                }
                serde_json::Value::Object(obj)
            })
            .collect()
    }
}
