// Query Module
//
// Statement execution against target databases: constrained table creation,
// row insertion and full-table reads.

pub mod executor;

pub use executor::result::{QueryError, QueryResult};
