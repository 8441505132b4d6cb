// Data Definition Language Executor
//
// Creates tables in a target database, refusing any foreign key whose
// referenced table or column is not already there.

use log::{info, warn};

use crate::catalog::{ForeignKey, ReferenceValidator, ValidationError};
use crate::common::identifier::{validate_column_definition, validate_identifier};
use crate::query::executor::result::QueryResult;
use crate::storage::Session;

/// What `create_table` did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CreateTableOutcome {
    /// The table was created and committed
    Created,
    /// A table with that name was already there; nothing was changed
    AlreadyExists,
}

/// Handles execution of DDL operations
pub struct DdlExecutor<'a> {
    session: &'a Session,
}

impl<'a> DdlExecutor<'a> {
    pub fn new(session: &'a Session) -> Self {
        DdlExecutor { session }
    }

    /// Create `table_name` from free-form column definitions plus foreign keys.
    ///
    /// Checked in order before anything is written: the table must not exist
    /// (if it does this is a no-op reporting `AlreadyExists`), then every
    /// foreign key's referenced table, then its referenced column. Any failure
    /// aborts with nothing changed. On success a single CREATE TABLE statement
    /// runs and commits.
    pub fn create_table<S: AsRef<str>>(
        &self,
        table_name: &str,
        columns: &[S],
        foreign_keys: &[ForeignKey],
    ) -> QueryResult<CreateTableOutcome> {
        validate_identifier(table_name)?;

        if self.session.table_exists(table_name)? {
            info!("Table {} already exists in '{}'", table_name, self.session.name());
            return Ok(CreateTableOutcome::AlreadyExists);
        }

        let column_defs = columns
            .iter()
            .map(|c| validate_column_definition(c.as_ref()))
            .collect::<Result<Vec<_>, _>>()?;
        if column_defs.is_empty() {
            warn!("Refusing to create table {} without columns", table_name);
            return Err(ValidationError::EmptyColumnList(table_name.to_string()).into());
        }

        ReferenceValidator::new(self.session).check_foreign_keys(foreign_keys)?;

        let sql = build_create_table_sql(table_name, &column_defs, foreign_keys);
        self.session.connection().execute(&sql, [])?;

        info!(
            "Table {} created in '{}' ({} column definition(s), {} foreign key(s))",
            table_name,
            self.session.name(),
            column_defs.len(),
            foreign_keys.len()
        );
        Ok(CreateTableOutcome::Created)
    }
}

/// Render the CREATE TABLE statement: column definitions first, then one
/// FOREIGN KEY clause per entry.
pub fn build_create_table_sql(table_name: &str, column_defs: &[&str], foreign_keys: &[ForeignKey]) -> String {
    let mut parts: Vec<String> = column_defs.iter().map(|c| c.to_string()).collect();
    parts.extend(foreign_keys.iter().map(ForeignKey::to_clause));
    format!("CREATE TABLE {} ({})", table_name, parts.join(", "))
}
