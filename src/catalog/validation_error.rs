use thiserror::Error;

/// Reasons an operation is refused before anything is written
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Table {0} does not exist")]
    TableNotFound(String),
    #[error("Referenced table {table} does not exist")]
    ReferencedTableNotFound {
        table: String,
    },
    #[error("Referenced column {column} in table {table} does not exist")]
    ReferencedColumnNotFound {
        table: String,
        column: String,
    },
    #[error("Invalid identifier: {0:?}")]
    InvalidIdentifier(String),
    #[error("Invalid column definition: {0:?}")]
    InvalidColumnDefinition(String),
    #[error("Table {0} needs at least one column definition")]
    EmptyColumnList(String),
}

/// Validation result
pub type ValidationResult<T> = Result<T, ValidationError>;
