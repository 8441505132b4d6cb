// Schema Introspector
//
// Reads a target database's own catalog: tables, columns, indexes and foreign
// keys. Table and index names are bound as parameters to the engine's
// table-valued pragma functions, so nothing read here is spliced into SQL.

use std::collections::BTreeSet;

use log::debug;
use rusqlite::params;
use rusqlite::types::Value;

use crate::catalog::column::ColumnInfo;
use crate::catalog::schema::DatabaseSchema;
use crate::catalog::table::{ForeignKey, TableInfo};
use crate::storage::{ConnectionError, Session};

/// One row of `pragma_table_info`
#[derive(Debug, Clone, PartialEq, Eq)]
struct RawColumn {
    name: String,
    declared_type: String,
    not_null: bool,
    default_value: Option<String>,
    primary_key: bool,
}

fn value_text(value: Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::Integer(i) => Some(i.to_string()),
        Value::Real(f) => Some(f.to_string()),
        Value::Text(s) => Some(s),
        Value::Blob(b) => Some(format!("X'{}'", hex::encode(b))),
    }
}

/// Read-only view over the catalog of a target database
pub struct SchemaIntrospector<'a> {
    session: &'a Session,
}

impl<'a> SchemaIntrospector<'a> {
    pub fn new(session: &'a Session) -> Self {
        SchemaIntrospector { session }
    }

    /// Introspect every table of the target
    pub fn introspect(&self) -> Result<DatabaseSchema, ConnectionError> {
        let mut tables = Vec::new();
        for table_name in self.list_tables()? {
            tables.push(self.describe_table(&table_name)?);
        }
        debug!("Introspected {} table(s) in '{}'", tables.len(), self.session.name());
        Ok(DatabaseSchema::new(self.session.name().to_string(), tables))
    }

    /// Introspect a single table. An absent table yields no columns and no keys.
    pub fn describe_table(&self, table_name: &str) -> Result<TableInfo, ConnectionError> {
        let unique = self.unique_columns(table_name)?;
        let columns = self
            .raw_columns(table_name)?
            .into_iter()
            .map(|raw| {
                let is_unique = unique.contains(&raw.name);
                ColumnInfo::new(
                    raw.name,
                    raw.declared_type,
                    raw.not_null,
                    raw.default_value,
                    raw.primary_key,
                    is_unique,
                )
            })
            .collect();
        let foreign_keys = self.foreign_keys(table_name)?;
        Ok(TableInfo::new(table_name.to_string(), columns, foreign_keys))
    }

    /// List every object of kind "table"
    pub fn list_tables(&self) -> Result<Vec<String>, ConnectionError> {
        self.session.table_names()
    }

    fn raw_columns(&self, table_name: &str) -> Result<Vec<RawColumn>, ConnectionError> {
        let conn = self.session.connection();
        let mut stmt = conn
            .prepare(
                "SELECT name, type, \"notnull\", dflt_value, pk FROM pragma_table_info(?1) ORDER BY cid",
            )
            .map_err(|e| self.session.unreadable(e))?;
        let columns = stmt
            .query_map(params![table_name], |row| {
                Ok(RawColumn {
                    name: row.get(0)?,
                    declared_type: row.get::<_, Option<String>>(1)?.unwrap_or_default(),
                    not_null: row.get::<_, i64>(2)? != 0,
                    default_value: value_text(row.get(3)?),
                    // pk holds the 1-based position inside the key, 0 when not part of it
                    primary_key: row.get::<_, i64>(4)? > 0,
                })
            })
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| self.session.unreadable(e))?;
        Ok(columns)
    }

    /// Names of every index defined on the table, including the automatic
    /// indexes behind PRIMARY KEY and UNIQUE constraints
    pub fn index_names(&self, table_name: &str) -> Result<Vec<String>, ConnectionError> {
        let conn = self.session.connection();
        let mut stmt = conn
            .prepare("SELECT name FROM pragma_index_list(?1) ORDER BY seq")
            .map_err(|e| self.session.unreadable(e))?;
        let names = stmt
            .query_map(params![table_name], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| self.session.unreadable(e))?;
        Ok(names)
    }

    /// Member columns of one index, in key order. Expression members have no
    /// column name and are skipped.
    pub fn index_columns(&self, index_name: &str) -> Result<Vec<String>, ConnectionError> {
        let conn = self.session.connection();
        let mut stmt = conn
            .prepare("SELECT name FROM pragma_index_info(?1) ORDER BY seqno")
            .map_err(|e| self.session.unreadable(e))?;
        let names = stmt
            .query_map(params![index_name], |row| row.get::<_, Option<String>>(0))
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| self.session.unreadable(e))?;
        Ok(names.into_iter().flatten().collect())
    }

    /// Union of the members of every index on the table.
    ///
    /// Any index counts, composite or not, so a column of `UNIQUE (a, b)` is
    /// reported even though it may repeat on its own.
    pub fn unique_columns(&self, table_name: &str) -> Result<BTreeSet<String>, ConnectionError> {
        let mut unique = BTreeSet::new();
        for index_name in self.index_names(table_name)? {
            unique.extend(self.index_columns(&index_name)?);
        }
        Ok(unique)
    }

    /// Foreign keys declared on the table, in the engine's listing order
    /// (the last declared constraint comes first)
    pub fn foreign_keys(&self, table_name: &str) -> Result<Vec<ForeignKey>, ConnectionError> {
        let conn = self.session.connection();
        let mut stmt = conn
            .prepare(
                "SELECT \"from\", \"table\", \"to\", seq FROM pragma_foreign_key_list(?1) ORDER BY id, seq",
            )
            .map_err(|e| self.session.unreadable(e))?;
        let rows = stmt
            .query_map(params![table_name], |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, Option<String>>(2)?,
                    row.get::<_, i64>(3)?,
                ))
            })
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| self.session.unreadable(e))?;

        let mut foreign_keys = Vec::with_capacity(rows.len());
        for (column, referenced_table, referenced_column, seq) in rows {
            // `REFERENCES parent` without a column list points at the parent's
            // primary key; with no primary key there either, the column stays empty
            let referenced_column = match referenced_column {
                Some(column) => column,
                None => self
                    .primary_key_member(&referenced_table, seq + 1)?
                    .unwrap_or_default(),
            };
            foreign_keys.push(ForeignKey::new(column, referenced_table, referenced_column));
        }
        Ok(foreign_keys)
    }

    fn primary_key_member(&self, table_name: &str, position: i64) -> Result<Option<String>, ConnectionError> {
        let conn = self.session.connection();
        let mut stmt = conn
            .prepare("SELECT name FROM pragma_table_info(?1) WHERE pk = ?2")
            .map_err(|e| self.session.unreadable(e))?;
        let mut names = stmt
            .query_map(params![table_name, position], |row| row.get::<_, String>(0))
            .and_then(|rows| rows.collect::<Result<Vec<_>, _>>())
            .map_err(|e| self.session.unreadable(e))?;
        Ok(names.pop())
    }
}
