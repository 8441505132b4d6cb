use std::path::PathBuf;
use thiserror::Error;

/// Failures reaching or reading a database file
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("Database file not found: {0}")]
    NotFound(PathBuf),
    #[error("Cannot open database {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: rusqlite::Error,
    },
    #[error("Cannot read schema of database {database}: {source}")]
    Unreadable {
        database: String,
        #[source]
        source: rusqlite::Error,
    },
}
