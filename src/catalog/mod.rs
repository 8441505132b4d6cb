//! Catalog Module
//!
//! Everything about schema metadata: introspecting a target database, the
//! shapes that introspection produces, the permanent catalog database those
//! shapes are mirrored into, and the existence checks that guard mutations.

pub mod column;
pub mod table;
pub mod schema;
pub mod introspect;
pub mod records;
pub mod mirror;
pub mod validation;
pub mod validation_error;

// Re-export key types
pub use self::column::ColumnInfo;
pub use self::table::{ForeignKey, TableInfo};
pub use self::schema::DatabaseSchema;
pub use self::introspect::SchemaIntrospector;
pub use self::records::{CatalogSnapshot, ColumnRecord, DatabaseRecord, ForeignKeyRecord, TableRecord};
pub use self::mirror::{CatalogMirror, MirrorStats};
pub use self::validation::ReferenceValidator;
pub use self::validation_error::{ValidationError, ValidationResult};
