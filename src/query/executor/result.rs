// Query Result Implementation
//
// This module defines values, rows, result sets and the error type shared by
// every executor.

use std::fmt;

use linked_hash_map::LinkedHashMap;
use rusqlite::types::{FromSql, FromSqlResult, ToSql, ToSqlOutput, Value, ValueRef};
use thiserror::Error;

use crate::catalog::ValidationError;
use crate::storage::ConnectionError;

/// A single value as stored by the engine
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub enum DataValue {
    Null,
    Integer(i64),
    Float(f64),
    Text(String),
    Blob(Vec<u8>),
}

impl fmt::Display for DataValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataValue::Null => write!(f, "NULL"),
            DataValue::Integer(i) => write!(f, "{}", i),
            DataValue::Float(fl) => write!(f, "{}", fl),
            DataValue::Text(s) => write!(f, "{}", s),
            DataValue::Blob(b) => write!(f, "X'{}'", hex::encode(b)),
        }
    }
}

impl From<&str> for DataValue {
    fn from(value: &str) -> Self {
        DataValue::Text(value.to_string())
    }
}

impl From<String> for DataValue {
    fn from(value: String) -> Self {
        DataValue::Text(value)
    }
}

impl From<i64> for DataValue {
    fn from(value: i64) -> Self {
        DataValue::Integer(value)
    }
}

impl From<f64> for DataValue {
    fn from(value: f64) -> Self {
        DataValue::Float(value)
    }
}

impl ToSql for DataValue {
    fn to_sql(&self) -> rusqlite::Result<ToSqlOutput<'_>> {
        Ok(match self {
            DataValue::Null => ToSqlOutput::Owned(Value::Null),
            DataValue::Integer(i) => ToSqlOutput::Borrowed(ValueRef::Integer(*i)),
            DataValue::Float(f) => ToSqlOutput::Borrowed(ValueRef::Real(*f)),
            DataValue::Text(s) => ToSqlOutput::Borrowed(ValueRef::Text(s.as_bytes())),
            DataValue::Blob(b) => ToSqlOutput::Borrowed(ValueRef::Blob(b)),
        })
    }
}

impl FromSql for DataValue {
    fn column_result(value: ValueRef<'_>) -> FromSqlResult<Self> {
        Ok(match value {
            ValueRef::Null => DataValue::Null,
            ValueRef::Integer(i) => DataValue::Integer(i),
            ValueRef::Real(f) => DataValue::Float(f),
            ValueRef::Text(t) => DataValue::Text(String::from_utf8_lossy(t).into_owned()),
            ValueRef::Blob(b) => DataValue::Blob(b.to_vec()),
        })
    }
}

impl DataValue {
    pub fn is_null(&self) -> bool {
        matches!(self, DataValue::Null)
    }
}

/// A row: column name to value, in column order.
///
/// Also serves as the column-to-value mapping handed to the row inserter.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    values: LinkedHashMap<String, DataValue>,
}

impl Row {
    /// Create a new empty row
    pub fn new() -> Self {
        Row {
            values: LinkedHashMap::new(),
        }
    }

    /// Create a row from column values
    pub fn from_values(columns: Vec<String>, values: Vec<DataValue>) -> Self {
        let mut row = Row::new();
        for (col, val) in columns.into_iter().zip(values) {
            row.set(col, val);
        }
        row
    }

    /// Get a value by column name
    pub fn get(&self, column: &str) -> Option<&DataValue> {
        self.values.get(column)
    }

    /// Set a value for a column. A column set twice keeps its first position.
    pub fn set(&mut self, column: impl Into<String>, value: impl Into<DataValue>) {
        let column = column.into();
        let value = value.into();
        match self.values.get_mut(&column) {
            Some(existing) => *existing = value,
            None => {
                self.values.insert(column, value);
            }
        }
    }

    /// Get all columns in the row
    pub fn columns(&self) -> Vec<&str> {
        self.values.keys().map(String::as_str).collect()
    }

    /// Get all values in column order
    pub fn values(&self) -> Vec<&DataValue> {
        self.values.values().collect()
    }

    /// Number of columns
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

/// Represents query execution error
#[derive(Error, Debug)]
pub enum QueryError {
    /// Target or catalog could not be opened or read
    #[error("Connection error: {0}")]
    Connection(#[from] ConnectionError),
    /// Refused before any mutation; the message names the missing entity
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
    /// Raised by the engine itself (NOT NULL, type, constraint violations...)
    #[error("Engine error: {0}")]
    Engine(#[from] rusqlite::Error),
}

impl QueryError {
    /// True if the caller can fix the input and retry
    pub fn is_validation(&self) -> bool {
        matches!(self, QueryError::Validation(_))
    }
}

/// Result type for query operations
pub type QueryResult<T> = Result<T, QueryError>;

/// Query resultset representation
#[derive(Debug)]
pub struct QueryResultSet {
    /// Column names in the resultset
    columns: Vec<String>,
    /// Rows of data
    rows: Vec<Row>,
}

impl QueryResultSet {
    /// Create a new empty resultset with column names
    pub fn new(columns: Vec<String>) -> Self {
        QueryResultSet {
            columns,
            rows: Vec::new(),
        }
    }

    /// Add a row to the resultset
    pub fn add_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    /// Get the columns in the resultset
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Get the rows in the resultset
    pub fn rows(&self) -> &[Row] {
        &self.rows
    }

    /// Get the number of rows
    pub fn row_count(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    fn cell(&self, row: &Row, column: &str) -> String {
        row.get(column)
            .map(|v| v.to_string())
            .unwrap_or_else(|| "NULL".to_string())
    }

    /// Format the resultset as a text table: header, dash separator, then one
    /// line per row, columns padded to their widest value and joined by " | ".
    pub fn to_string_table(&self) -> String {
        if self.columns.is_empty() {
            return "Empty result".to_string();
        }

        let mut widths: Vec<usize> = self.columns.iter().map(|c| c.chars().count()).collect();
        for row in &self.rows {
            for (i, col) in self.columns.iter().enumerate() {
                widths[i] = widths[i].max(self.cell(row, col).chars().count());
            }
        }

        let render = |cells: Vec<String>| -> String {
            cells
                .iter()
                .zip(&widths)
                .map(|(cell, &width)| format!("{:<width$}", cell, width = width))
                .collect::<Vec<_>>()
                .join(" | ")
                .trim_end()
                .to_string()
        };

        let mut result = String::new();
        result.push_str(&render(self.columns.clone()));
        result.push('\n');

        let separator = widths.iter().sum::<usize>() + 3 * (widths.len() - 1);
        result.push_str(&"-".repeat(separator));
        result.push('\n');

        for row in &self.rows {
            let cells = self.columns.iter().map(|col| self.cell(row, col)).collect();
            result.push_str(&render(cells));
            result.push('\n');
        }

        result
    }
}
