// Query Executor Module
//
// Executors borrow a Session for the duration of one logical operation and
// never hold anything open once it returns.

pub mod result;
pub mod ddl_executor;
pub mod dml_executor;

// Export key types
pub use self::result::{DataValue, QueryError, QueryResult, QueryResultSet, Row};
pub use self::ddl_executor::{CreateTableOutcome, DdlExecutor};
pub use self::dml_executor::DmlExecutor;
