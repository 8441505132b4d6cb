// Column Metadata
//
// What introspection learns about a single column of a target table.

use serde::{Deserialize, Serialize};

/// Represents a column of an introspected table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnInfo {
    /// Column name
    name: String,
    /// Declared type exactly as written, e.g. `VARCHAR(10)`; empty when untyped
    declared_type: String,
    /// Whether the column carries a NOT NULL constraint
    not_null: bool,
    /// Default value expression text, if any
    default_value: Option<String>,
    /// Whether the column participates in the primary key
    primary_key: bool,
    /// Whether the column is a member of any index on the table
    unique: bool,
}

impl ColumnInfo {
    /// Create a new column description
    pub fn new(
        name: String,
        declared_type: String,
        not_null: bool,
        default_value: Option<String>,
        primary_key: bool,
        unique: bool,
    ) -> Self {
        ColumnInfo {
            name,
            declared_type,
            not_null,
            default_value,
            primary_key,
            unique,
        }
    }

    /// Get the column name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Get the declared type
    pub fn declared_type(&self) -> &str {
        &self.declared_type
    }

    /// Check if the column rejects NULL
    pub fn is_not_null(&self) -> bool {
        self.not_null
    }

    /// Get the default value expression (if any)
    pub fn default_value(&self) -> Option<&str> {
        self.default_value.as_deref()
    }

    /// Check if the column is part of the primary key
    pub fn is_primary_key(&self) -> bool {
        self.primary_key
    }

    /// Check if the column belongs to any index.
    ///
    /// Membership in a composite index counts, so this over-approximates real
    /// uniqueness: in `UNIQUE (a, b)` both `a` and `b` report true.
    pub fn is_unique(&self) -> bool {
        self.unique
    }
}
