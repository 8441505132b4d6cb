// Data Manipulation Language Executor
//
// Row insertion and full-table reads. Values are bound as parameters; only
// checked identifiers reach the statement text. Type, nullability and
// referential checks on inserted values are left entirely to the engine.

use log::{debug, info};
use rusqlite::params_from_iter;

use crate::catalog::{ReferenceValidator, SchemaIntrospector};
use crate::common::identifier::{quote_identifier, validate_identifier};
use crate::query::executor::result::{DataValue, QueryResult, QueryResultSet, Row};
use crate::storage::Session;

/// Handles execution of DML operations
pub struct DmlExecutor<'a> {
    session: &'a Session,
}

impl<'a> DmlExecutor<'a> {
    pub fn new(session: &'a Session) -> Self {
        DmlExecutor { session }
    }

    /// Insert one row naming exactly the columns present in `values`.
    ///
    /// The table must exist, otherwise `TableNotFound` is returned and nothing
    /// is written. Columns left out get whatever the engine gives absent
    /// columns; an empty mapping inserts a row of defaults. Returns the number
    /// of rows inserted.
    pub fn insert_row(&self, table_name: &str, values: &Row) -> QueryResult<usize> {
        ReferenceValidator::new(self.session).require_table(table_name)?;

        let columns = values
            .columns()
            .into_iter()
            .map(|c| validate_identifier(c).map(quote_identifier))
            .collect::<Result<Vec<_>, _>>()?;

        let sql = build_insert_sql(table_name, &columns);
        debug!("Executing: {}", sql);
        let inserted = self
            .session
            .connection()
            .execute(&sql, params_from_iter(values.values()))?;

        info!("Inserted {} row(s) into {} in '{}'", inserted, table_name, self.session.name());
        Ok(inserted)
    }

    /// Read every row of `table_name`, columns in declaration order
    pub fn select_all(&self, table_name: &str) -> QueryResult<QueryResultSet> {
        ReferenceValidator::new(self.session).require_table(table_name)?;

        let sql = format!("SELECT * FROM {}", quote_identifier(table_name));
        let mut stmt = self.session.connection().prepare(&sql)?;
        let columns: Vec<String> = stmt.column_names().into_iter().map(String::from).collect();

        let mut result_set = QueryResultSet::new(columns.clone());
        let mut rows = stmt.query([])?;
        while let Some(row) = rows.next()? {
            let mut values = Vec::with_capacity(columns.len());
            for i in 0..columns.len() {
                values.push(row.get::<_, DataValue>(i)?);
            }
            result_set.add_row(Row::from_values(columns.clone(), values));
        }
        Ok(result_set)
    }

    /// Column names of an existing table, in declaration order
    pub fn column_names(&self, table_name: &str) -> QueryResult<Vec<String>> {
        ReferenceValidator::new(self.session).require_table(table_name)?;
        let table = SchemaIntrospector::new(self.session).describe_table(table_name)?;
        Ok(table.columns().iter().map(|c| c.name().to_string()).collect())
    }
}

/// Render the INSERT statement with one positional parameter per column
pub fn build_insert_sql(table_name: &str, quoted_columns: &[String]) -> String {
    let table = quote_identifier(table_name);
    if quoted_columns.is_empty() {
        return format!("INSERT INTO {} DEFAULT VALUES", table);
    }
    let placeholders = (1..=quoted_columns.len())
        .map(|i| format!("?{}", i))
        .collect::<Vec<_>>()
        .join(", ");
    format!("INSERT INTO {} ({}) VALUES ({})", table, quoted_columns.join(", "), placeholders)
}
