// Catalog Mirror
//
// Owns the permanent catalog database and copies introspected schemas into it.
// Rows are only ever added: every insert ignores primary-key conflicts, which
// makes mirroring the same unchanged database twice a no-op.

use std::path::{Path, PathBuf};

use log::{debug, info};
use rusqlite::{params, Connection};

use crate::catalog::introspect::SchemaIntrospector;
use crate::catalog::records::{CatalogSnapshot, ColumnRecord, DatabaseRecord, ForeignKeyRecord, TableRecord};
use crate::catalog::schema::DatabaseSchema;
use crate::query::executor::result::QueryResult;
use crate::storage::{ConnectionError, Session};

// COLUMNS(name) is not a key on its own, so the reference from
// FOREIGN_KEY.referenced_col is recorded in the schema but never enforced.
const CATALOG_SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS DATABASES (
    name TEXT PRIMARY KEY
);

CREATE TABLE IF NOT EXISTS TABLES (
    name TEXT PRIMARY KEY,
    database TEXT,
    FOREIGN KEY (database) REFERENCES DATABASES(name)
);

CREATE TABLE IF NOT EXISTS COLUMNS (
    name TEXT,
    table_name TEXT,
    type TEXT,
    pk INTEGER,
    not_null INTEGER,
    unique_col INTEGER,
    dflt_val TEXT,
    PRIMARY KEY (name, table_name),
    FOREIGN KEY (table_name) REFERENCES TABLES(name)
);

CREATE TABLE IF NOT EXISTS FOREIGN_KEY (
    col TEXT PRIMARY KEY,
    referenced_table TEXT,
    referenced_col TEXT,
    FOREIGN KEY (referenced_table) REFERENCES TABLES(name),
    FOREIGN KEY (referenced_col) REFERENCES COLUMNS(name)
);
";

/// Number of catalog rows a mirror pass actually added
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct MirrorStats {
    pub databases: usize,
    pub tables: usize,
    pub columns: usize,
    pub foreign_keys: usize,
}

impl MirrorStats {
    /// Total rows added
    pub fn total(&self) -> usize {
        self.databases + self.tables + self.columns + self.foreign_keys
    }

    /// True when the pass added nothing
    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// Handle on the catalog database
#[derive(Debug)]
pub struct CatalogMirror {
    path: PathBuf,
    connection: Connection,
}

impl CatalogMirror {
    /// Open the catalog file, creating it and its four tables when missing
    pub fn open(path: impl AsRef<Path>) -> Result<Self, ConnectionError> {
        let path = path.as_ref().to_path_buf();
        let connection = Connection::open(&path).map_err(|source| ConnectionError::Open {
            path: path.clone(),
            source,
        })?;
        Self::bootstrap(path, connection)
    }

    /// Open a throwaway in-memory catalog
    pub fn open_in_memory() -> Result<Self, ConnectionError> {
        let path = PathBuf::from(":memory:");
        let connection = Connection::open_in_memory().map_err(|source| ConnectionError::Open {
            path: path.clone(),
            source,
        })?;
        Self::bootstrap(path, connection)
    }

    fn bootstrap(path: PathBuf, connection: Connection) -> Result<Self, ConnectionError> {
        // A foreign key record may name a table that is mirrored later in the
        // same pass, so the declared references are never enforced.
        let ready = connection
            .pragma_update(None, "foreign_keys", false)
            .and_then(|_| connection.execute_batch(CATALOG_SCHEMA));
        if let Err(source) = ready {
            return Err(ConnectionError::Open { path, source });
        }
        debug!("Catalog ready at {}", path.display());
        Ok(CatalogMirror { path, connection })
    }

    /// Location of the catalog file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Introspect `session` and mirror what was found
    pub fn mirror_session(&mut self, session: &Session) -> QueryResult<MirrorStats> {
        let schema = SchemaIntrospector::new(session).introspect()?;
        self.mirror(&schema)
    }

    /// Mirror an introspected schema into the catalog.
    ///
    /// Rows go in parent-first order (database, then per table: the table, its
    /// columns, its foreign keys) so no row ever points at a missing parent
    /// row of its own database. The whole pass is one transaction.
    pub fn mirror(&mut self, schema: &DatabaseSchema) -> QueryResult<MirrorStats> {
        let mut stats = MirrorStats::default();
        let tx = self.connection.transaction()?;
        {
            let mut insert_database = tx.prepare_cached("INSERT OR IGNORE INTO DATABASES (name) VALUES (?1)")?;
            let mut insert_table =
                tx.prepare_cached("INSERT OR IGNORE INTO TABLES (name, database) VALUES (?1, ?2)")?;
            let mut insert_column = tx.prepare_cached(
                "INSERT OR IGNORE INTO COLUMNS (name, table_name, type, pk, not_null, unique_col, dflt_val)
                 VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
            )?;
            let mut insert_foreign_key = tx.prepare_cached(
                "INSERT OR IGNORE INTO FOREIGN_KEY (col, referenced_table, referenced_col) VALUES (?1, ?2, ?3)",
            )?;

            stats.databases += insert_database.execute(params![schema.name()])?;

            for table in schema.tables() {
                stats.tables += insert_table.execute(params![table.name(), schema.name()])?;

                for col in table.columns() {
                    stats.columns += insert_column.execute(params![
                        col.name(),
                        table.name(),
                        col.declared_type(),
                        col.is_primary_key(),
                        col.is_not_null(),
                        col.is_unique(),
                        col.default_value(),
                    ])?;
                }

                for fk in table.foreign_keys() {
                    // An unresolvable implicit reference is stored as NULL
                    let referenced_column = Some(fk.referenced_column.as_str()).filter(|c| !c.is_empty());
                    stats.foreign_keys += insert_foreign_key.execute(params![
                        fk.column,
                        fk.referenced_table,
                        referenced_column,
                    ])?;
                }
            }
        }
        tx.commit()?;

        info!(
            "Mirrored '{}' into catalog: {} new row(s) ({} database, {} table, {} column, {} foreign key)",
            schema.name(),
            stats.total(),
            stats.databases,
            stats.tables,
            stats.columns,
            stats.foreign_keys
        );
        Ok(stats)
    }

    /// All mirrored databases, in the order they were first mirrored
    pub fn databases(&self) -> QueryResult<Vec<DatabaseRecord>> {
        let mut stmt = self.connection.prepare("SELECT name FROM DATABASES ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| Ok(DatabaseRecord { name: row.get(0)? }))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All mirrored tables
    pub fn tables(&self) -> QueryResult<Vec<TableRecord>> {
        let mut stmt = self.connection.prepare("SELECT name, database FROM TABLES ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(TableRecord {
                    name: row.get(0)?,
                    database: row.get(1)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All mirrored columns
    pub fn columns(&self) -> QueryResult<Vec<ColumnRecord>> {
        let mut stmt = self.connection.prepare(
            "SELECT name, table_name, type, pk, not_null, unique_col, dflt_val FROM COLUMNS ORDER BY rowid",
        )?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ColumnRecord {
                    name: row.get(0)?,
                    table_name: row.get(1)?,
                    column_type: row.get::<_, Option<String>>(2)?.unwrap_or_default(),
                    is_pk: row.get::<_, i64>(3)? != 0,
                    not_null: row.get::<_, i64>(4)? != 0,
                    is_unique: row.get::<_, i64>(5)? != 0,
                    default_value: row.get(6)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// All mirrored foreign keys
    pub fn foreign_keys(&self) -> QueryResult<Vec<ForeignKeyRecord>> {
        let mut stmt = self
            .connection
            .prepare("SELECT col, referenced_table, referenced_col FROM FOREIGN_KEY ORDER BY rowid")?;
        let rows = stmt
            .query_map([], |row| {
                Ok(ForeignKeyRecord {
                    column: row.get(0)?,
                    referenced_table: row.get(1)?,
                    referenced_column: row.get(2)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    /// Everything in the catalog
    pub fn snapshot(&self) -> QueryResult<CatalogSnapshot> {
        Ok(CatalogSnapshot {
            databases: self.databases()?,
            tables: self.tables()?,
            columns: self.columns()?,
            foreign_keys: self.foreign_keys()?,
        })
    }
}
