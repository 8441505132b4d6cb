// Reference Validation
//
// Existence checks run against a target database before the schema builder or
// the row inserter is allowed to mutate it.

use log::warn;

use crate::catalog::table::ForeignKey;
use crate::catalog::ValidationError;
use crate::common::identifier::validate_identifier;
use crate::query::executor::result::QueryResult;
use crate::storage::Session;

/// Checks that names a caller refers to actually exist in the target
pub struct ReferenceValidator<'a> {
    session: &'a Session,
}

impl<'a> ReferenceValidator<'a> {
    pub fn new(session: &'a Session) -> Self {
        ReferenceValidator { session }
    }

    /// Fail with `TableNotFound` unless `table_name` exists
    pub fn require_table(&self, table_name: &str) -> QueryResult<()> {
        if self.session.table_exists(table_name)? {
            Ok(())
        } else {
            warn!("Table {} not found in '{}'", table_name, self.session.name());
            Err(ValidationError::TableNotFound(table_name.to_string()).into())
        }
    }

    /// Check one foreign key: its referenced table must exist, then its
    /// referenced column must exist in that table.
    ///
    /// Whether the referenced column is a primary key or unique is not checked.
    pub fn check_foreign_key(&self, fk: &ForeignKey) -> QueryResult<()> {
        validate_identifier(&fk.column)?;
        validate_identifier(&fk.referenced_table)?;
        validate_identifier(&fk.referenced_column)?;

        if !self.session.table_exists(&fk.referenced_table)? {
            warn!("Referenced table {} does not exist", fk.referenced_table);
            return Err(ValidationError::ReferencedTableNotFound {
                table: fk.referenced_table.clone(),
            }
            .into());
        }
        if !self.session.column_exists(&fk.referenced_table, &fk.referenced_column)? {
            warn!(
                "Referenced column {} in table {} does not exist",
                fk.referenced_column, fk.referenced_table
            );
            return Err(ValidationError::ReferencedColumnNotFound {
                table: fk.referenced_table.clone(),
                column: fk.referenced_column.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Check every foreign key in order, stopping at the first failure
    pub fn check_foreign_keys(&self, foreign_keys: &[ForeignKey]) -> QueryResult<()> {
        foreign_keys.iter().try_for_each(|fk| self.check_foreign_key(fk))
    }
}
