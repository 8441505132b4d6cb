// Catalog Records
//
// Rows of the four catalog tables, as read back from the catalog database.

use serde::{Deserialize, Serialize};

/// One mirrored database
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct DatabaseRecord {
    pub name: String,
}

/// One mirrored table. Table names are unique across the whole catalog.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TableRecord {
    pub name: String,
    pub database: String,
}

/// One mirrored column, keyed by (name, table_name)
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ColumnRecord {
    pub name: String,
    pub table_name: String,
    pub column_type: String,
    pub is_pk: bool,
    pub not_null: bool,
    pub is_unique: bool,
    pub default_value: Option<String>,
}

/// One mirrored foreign key.
///
/// Keyed by column name alone across the whole catalog, so a second foreign
/// key on an identically named column in any table is dropped.
/// `referenced_column` is `None` when the reference names no column and the
/// referenced table has no primary key.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ForeignKeyRecord {
    pub column: String,
    pub referenced_table: String,
    pub referenced_column: Option<String>,
}

/// Full contents of the catalog
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSnapshot {
    pub databases: Vec<DatabaseRecord>,
    pub tables: Vec<TableRecord>,
    pub columns: Vec<ColumnRecord>,
    pub foreign_keys: Vec<ForeignKeyRecord>,
}

impl CatalogSnapshot {
    /// Total number of rows across the four tables
    pub fn row_count(&self) -> usize {
        self.databases.len() + self.tables.len() + self.columns.len() + self.foreign_keys.len()
    }
}
