//! Table Metadata
//!
//! This module defines the introspected shape of a table: its ordered columns
//! and the foreign keys it declares.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::column::ColumnInfo;

/// A (column, referenced table, referenced column) triple.
///
/// Used both for foreign keys discovered by introspection and for the foreign
/// keys a caller asks the schema builder to declare.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ForeignKey {
    /// Local column holding the reference
    pub column: String,
    /// Table being referenced
    #[serde(rename = "table")]
    pub referenced_table: String,
    /// Column of the referenced table
    pub referenced_column: String,
}

impl ForeignKey {
    pub fn new(
        column: impl Into<String>,
        referenced_table: impl Into<String>,
        referenced_column: impl Into<String>,
    ) -> Self {
        ForeignKey {
            column: column.into(),
            referenced_table: referenced_table.into(),
            referenced_column: referenced_column.into(),
        }
    }

    /// Render as a table constraint clause
    pub fn to_clause(&self) -> String {
        format!(
            "FOREIGN KEY ({}) REFERENCES {}({})",
            self.column, self.referenced_table, self.referenced_column
        )
    }
}

impl fmt::Display for ForeignKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} references {}({})", self.column, self.referenced_table, self.referenced_column)
    }
}

/// Represents an introspected table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableInfo {
    /// Table name
    name: String,
    /// Columns in declaration order
    columns: Vec<ColumnInfo>,
    /// Foreign keys declared on the table
    foreign_keys: Vec<ForeignKey>,
}

impl TableInfo {
    /// Create a new table description
    pub fn new(name: String, columns: Vec<ColumnInfo>, foreign_keys: Vec<ForeignKey>) -> Self {
        TableInfo {
            name,
            columns,
            foreign_keys,
        }
    }

    /// Get the table name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all columns
    pub fn columns(&self) -> &[ColumnInfo] {
        &self.columns
    }

    /// Get a column by name
    pub fn get_column(&self, name: &str) -> Option<&ColumnInfo> {
        self.columns.iter().find(|col| col.name() == name)
    }

    /// Get the foreign keys
    pub fn foreign_keys(&self) -> &[ForeignKey] {
        &self.foreign_keys
    }

    /// Get primary key columns
    pub fn primary_key_columns(&self) -> Vec<&ColumnInfo> {
        self.columns.iter().filter(|col| col.is_primary_key()).collect()
    }

    /// Get the columns flagged unique
    pub fn unique_columns(&self) -> Vec<&ColumnInfo> {
        self.columns.iter().filter(|col| col.is_unique()).collect()
    }
}
