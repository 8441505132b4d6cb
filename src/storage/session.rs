// Database Session
//
// A session is the only way the core touches a target database. It wraps a
// single rusqlite connection together with the name the catalog knows the
// database by (its file name).

use std::path::{Path, PathBuf};

use log::debug;
use rusqlite::{params, Connection, OpenFlags, OptionalExtension};

use crate::config::SessionOptions;
use crate::storage::error::ConnectionError;

/// An open handle on one target database
#[derive(Debug)]
pub struct Session {
    /// Name recorded in the catalog for this database
    name: String,
    /// Location of the database file
    path: PathBuf,
    connection: Connection,
}

impl Session {
    /// Open a target database, creating the file if it does not exist yet
    pub fn open(path: impl AsRef<Path>, options: SessionOptions) -> Result<Self, ConnectionError> {
        let path = path.as_ref();
        let connection = Connection::open(path).map_err(|source| ConnectionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(name_of(path), path.to_path_buf(), connection, options)
    }

    /// Open a target database that must already exist
    pub fn open_existing(path: impl AsRef<Path>, options: SessionOptions) -> Result<Self, ConnectionError> {
        let path = path.as_ref();
        if !path.is_file() {
            return Err(ConnectionError::NotFound(path.to_path_buf()));
        }
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_URI
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;
        let connection = Connection::open_with_flags(path, flags).map_err(|source| ConnectionError::Open {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_connection(name_of(path), path.to_path_buf(), connection, options)
    }

    /// Open a private in-memory database registered under `name`
    pub fn open_in_memory(name: &str, options: SessionOptions) -> Result<Self, ConnectionError> {
        let connection = Connection::open_in_memory().map_err(|source| ConnectionError::Open {
            path: PathBuf::from(":memory:"),
            source,
        })?;
        Self::from_connection(name.to_string(), PathBuf::from(":memory:"), connection, options)
    }

    fn from_connection(
        name: String,
        path: PathBuf,
        connection: Connection,
        options: SessionOptions,
    ) -> Result<Self, ConnectionError> {
        let open_error = |source| ConnectionError::Open { path: path.clone(), source };

        // SQLite opens lazily; touch the schema so a file that is not a
        // database fails here rather than halfway through an operation.
        connection
            .query_row("SELECT count(*) FROM sqlite_master", [], |row| row.get::<_, i64>(0))
            .map_err(open_error)?;

        // Set either way: the bundled engine is built with enforcement on
        connection
            .pragma_update(None, "foreign_keys", options.enforce_foreign_keys)
            .map_err(open_error)?;

        debug!("Opened session '{}' at {}", name, path.display());
        Ok(Session { name, path, connection })
    }

    /// Name this database is recorded under in the catalog
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Location of the database file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The underlying engine connection
    pub fn connection(&self) -> &Connection {
        &self.connection
    }

    /// Names of every object of kind "table", in creation order
    pub fn table_names(&self) -> Result<Vec<String>, ConnectionError> {
        let mut stmt = self
            .connection
            .prepare("SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY rowid")
            .map_err(|e| self.unreadable(e))?;
        let names = stmt
            .query_map([], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| self.unreadable(e))?;
        Ok(names)
    }

    /// Check whether a table with this name exists. Names match without
    /// regard to ASCII case, as the engine resolves them.
    pub fn table_exists(&self, table_name: &str) -> Result<bool, ConnectionError> {
        self.connection
            .query_row(
                "SELECT name FROM sqlite_master WHERE type = 'table' AND name = ?1 COLLATE NOCASE",
                params![table_name],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(|e| self.unreadable(e))
    }

    /// Check whether `column_name` is one of the columns of `table_name`.
    /// A missing table simply has no columns.
    pub fn column_exists(&self, table_name: &str, column_name: &str) -> Result<bool, ConnectionError> {
        self.connection
            .query_row(
                "SELECT name FROM pragma_table_info(?1) WHERE name = ?2 COLLATE NOCASE",
                params![table_name, column_name],
                |row| row.get::<_, String>(0),
            )
            .optional()
            .map(|found| found.is_some())
            .map_err(|e| self.unreadable(e))
    }

    /// Run a trusted multi-statement script (used for seeding)
    pub fn execute_batch(&self, sql: &str) -> rusqlite::Result<()> {
        self.connection.execute_batch(sql)
    }

    pub(crate) fn unreadable(&self, source: rusqlite::Error) -> ConnectionError {
        ConnectionError::Unreadable {
            database: self.name.clone(),
            source,
        }
    }
}

fn name_of(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
