// Database Schema
//
// The full result of introspecting one target database, plus the plain-text
// metadata report the shell prints for it.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::table::TableInfo;

/// Every table of one target database, in creation order
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatabaseSchema {
    /// Name the database is recorded under in the catalog
    name: String,
    /// Introspected tables
    tables: Vec<TableInfo>,
}

impl DatabaseSchema {
    pub fn new(name: String, tables: Vec<TableInfo>) -> Self {
        DatabaseSchema { name, tables }
    }

    /// Get the database name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get all tables
    pub fn tables(&self) -> &[TableInfo] {
        &self.tables
    }

    /// Get a table by name
    pub fn get_table(&self, name: &str) -> Option<&TableInfo> {
        self.tables.iter().find(|t| t.name() == name)
    }

    /// Check if the schema has a table with the given name
    pub fn has_table(&self, name: &str) -> bool {
        self.get_table(name).is_some()
    }
}

fn flag(value: bool) -> &'static str {
    if value { "1" } else { "0" }
}

impl fmt::Display for TableInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Table: {}", self.name())?;
        writeln!(
            f,
            "{:<15} {:<15} {:<8} {:<15} {:<3} {:<6}",
            "name", "type", "notnull", "dflt_value", "pk", "unique"
        )?;
        writeln!(f, "{}", "-".repeat(70))?;

        for col in self.columns() {
            writeln!(
                f,
                "{:<15} {:<15} {:<8} {:<15} {:<3} {:<6}",
                col.name(),
                col.declared_type(),
                flag(col.is_not_null()),
                col.default_value().unwrap_or("none"),
                flag(col.is_primary_key()),
                flag(col.is_unique()),
            )?;
        }

        if !self.foreign_keys().is_empty() {
            writeln!(f)?;
            writeln!(f, "Foreign Keys:")?;
            for fk in self.foreign_keys() {
                writeln!(f, "  {}", fk)?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for DatabaseSchema {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Database: {}", self.name)?;
        if self.tables.is_empty() {
            return writeln!(f, "(no tables)");
        }
        for table in &self.tables {
            writeln!(f)?;
            write!(f, "{}", table)?;
        }
        Ok(())
    }
}
