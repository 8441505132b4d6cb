// Row Insertion Integration Tests

#[path = "../common/mod.rs"]
mod common;

use anyhow::Result;
use common::{session_with, Workspace};
use metashell::{DataValue, DmlExecutor, QueryError, Row, ValidationError};

const SCHEMA: &str = "
CREATE TABLE item (
    id INTEGER PRIMARY KEY,
    label TEXT NOT NULL,
    price REAL DEFAULT 1.5,
    note TEXT
);";

#[test]
fn test_insert_into_missing_table() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "store.db", SCHEMA)?;
    let dml = DmlExecutor::new(&session);

    let mut row = Row::new();
    row.set("x", 1i64);
    let err = dml.insert_row("Nope", &row).unwrap_err();
    assert!(matches!(
        err,
        QueryError::Validation(ValidationError::TableNotFound(ref name)) if name == "Nope"
    ));
    assert_eq!(session.table_names()?, vec!["item"]);
    Ok(())
}

#[test]
fn test_insert_named_columns_only() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "store.db", SCHEMA)?;
    let dml = DmlExecutor::new(&session);

    let mut row = Row::new();
    row.set("label", "widget");
    row.set("id", 7i64);
    assert_eq!(dml.insert_row("item", &row)?, 1);

    let result = dml.select_all("item")?;
    assert_eq!(result.row_count(), 1);
    let stored = &result.rows()[0];
    assert_eq!(stored.get("id"), Some(&DataValue::Integer(7)));
    assert_eq!(stored.get("label"), Some(&DataValue::Text("widget".into())));
    assert_eq!(stored.get("price"), Some(&DataValue::Float(1.5)));
    assert_eq!(stored.get("note"), Some(&DataValue::Null));
    Ok(())
}

#[test]
fn test_engine_constraint_violation_is_reported() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "store.db", SCHEMA)?;
    let dml = DmlExecutor::new(&session);

    let mut row = Row::new();
    row.set("note", "no label");
    let err = dml.insert_row("item", &row).unwrap_err();
    assert!(matches!(err, QueryError::Engine(_)));
    assert!(err.to_string().contains("NOT NULL"));
    assert!(dml.select_all("item")?.is_empty());
    Ok(())
}

#[test]
fn test_empty_row_inserts_defaults() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "store.db", "CREATE TABLE tick (n INTEGER DEFAULT 3);")?;
    let dml = DmlExecutor::new(&session);

    assert_eq!(dml.insert_row("tick", &Row::new())?, 1);
    let result = dml.select_all("tick")?;
    assert_eq!(result.rows()[0].get("n"), Some(&DataValue::Integer(3)));
    Ok(())
}

#[test]
fn test_foreign_keys_enforced_only_when_asked() -> Result<()> {
    let ws = Workspace::new()?;
    let schema = "CREATE TABLE parent (id INTEGER PRIMARY KEY);
                  CREATE TABLE child (pid INTEGER REFERENCES parent(id));";

    let relaxed = session_with(&ws, "relaxed.db", schema)?;
    let mut orphan = Row::new();
    orphan.set("pid", 99i64);
    assert_eq!(DmlExecutor::new(&relaxed).insert_row("child", &orphan)?, 1);

    let strict = metashell::Session::open(
        ws.dir.path().join("strict.db"),
        metashell::SessionOptions { enforce_foreign_keys: true },
    )?;
    strict.execute_batch(schema)?;
    let err = DmlExecutor::new(&strict).insert_row("child", &orphan).unwrap_err();
    assert!(matches!(err, QueryError::Engine(_)));
    Ok(())
}
