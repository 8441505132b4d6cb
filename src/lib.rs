// Metashell: a small relational database shell over an embedded SQL engine.
//
// Target databases are introspected and mirrored into a separate catalog
// database; tables are created only after their foreign-key references are
// confirmed to exist.

pub mod common;
pub mod config;
pub mod storage;
pub mod catalog;
pub mod query;
pub mod shell;

// Re-export key items for convenient access
pub use config::{SessionOptions, ShellConfig};
pub use storage::{ConnectionError, Session};
pub use catalog::{CatalogMirror, DatabaseSchema, ForeignKey, MirrorStats, SchemaIntrospector, ValidationError};
pub use query::executor::{CreateTableOutcome, DataValue, DdlExecutor, DmlExecutor, QueryError, QueryResult, Row};
pub use shell::Shell;
