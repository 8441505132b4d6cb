// Schema Builder Integration Tests

#[path = "../common/mod.rs"]
mod common;

use anyhow::Result;
use common::{session_with, Workspace};
use metashell::{CreateTableOutcome, DdlExecutor, ForeignKey, QueryError, SchemaIntrospector, ValidationError};

#[test]
fn test_missing_referenced_table_leaves_nothing_behind() -> Result<()> {
    let ws = Workspace::new()?;
    let session = ws.session("shop.db")?;
    let ddl = DdlExecutor::new(&session);

    let err = ddl
        .create_table("T", &["a INT"], &[ForeignKey::new("a", "Ghost", "id")])
        .unwrap_err();
    match err {
        QueryError::Validation(ValidationError::ReferencedTableNotFound { ref table }) => assert_eq!(table, "Ghost"),
        other => panic!("unexpected error: {other}"),
    }
    assert!(err.to_string().contains("Referenced table Ghost does not exist"));
    assert!(!session.table_exists("T")?);
    Ok(())
}

#[test]
fn test_missing_referenced_column_is_rejected() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "shop.db", "CREATE TABLE customer (id INTEGER PRIMARY KEY);")?;
    let ddl = DdlExecutor::new(&session);

    let err = ddl
        .create_table(
            "orders",
            &["id INTEGER PRIMARY KEY", "cust INTEGER"],
            &[ForeignKey::new("cust", "customer", "code")],
        )
        .unwrap_err();
    assert!(matches!(
        err,
        QueryError::Validation(ValidationError::ReferencedColumnNotFound { .. })
    ));
    assert_eq!(session.table_names()?, vec!["customer"]);
    Ok(())
}

#[test]
fn test_existing_table_is_left_alone() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "shop.db", "CREATE TABLE customer (id INTEGER PRIMARY KEY, name TEXT);")?;
    let ddl = DdlExecutor::new(&session);

    let outcome = ddl.create_table("customer", &["other TEXT"], &[])?;
    assert_eq!(outcome, CreateTableOutcome::AlreadyExists);

    let table = SchemaIntrospector::new(&session).describe_table("customer")?;
    let names: Vec<_> = table.columns().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["id", "name"]);
    Ok(())
}

#[test]
fn test_created_foreign_key_is_visible_to_introspection() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "shop.db", "CREATE TABLE customer (id INTEGER PRIMARY KEY);")?;
    let ddl = DdlExecutor::new(&session);

    let fk = ForeignKey::new("cust", "customer", "id");
    let outcome = ddl.create_table(
        "orders",
        &["id INTEGER PRIMARY KEY", "cust INTEGER NOT NULL", "total DECIMAL(10,2) DEFAULT 0"],
        &[fk.clone()],
    )?;
    assert_eq!(outcome, CreateTableOutcome::Created);

    let table = SchemaIntrospector::new(&session).describe_table("orders")?;
    assert_eq!(table.foreign_keys(), &[fk]);
    let total = table.get_column("total").unwrap();
    assert_eq!(total.declared_type(), "DECIMAL(10,2)");
    assert_eq!(total.default_value(), Some("0"));
    Ok(())
}

#[test]
fn test_unsafe_definitions_are_refused() -> Result<()> {
    let ws = Workspace::new()?;
    let session = ws.session("shop.db")?;
    let ddl = DdlExecutor::new(&session);

    let err = ddl.create_table("t", &["a INT); DROP TABLE x; --"], &[]).unwrap_err();
    assert!(err.is_validation());

    let err = ddl.create_table("bad name", &["a INT"], &[]).unwrap_err();
    assert!(matches!(err, QueryError::Validation(ValidationError::InvalidIdentifier(_))));

    let err = ddl.create_table("t", &[] as &[&str], &[]).unwrap_err();
    assert!(matches!(err, QueryError::Validation(ValidationError::EmptyColumnList(_))));

    assert!(session.table_names()?.is_empty());
    Ok(())
}
