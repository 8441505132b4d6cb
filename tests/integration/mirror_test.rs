// Catalog Mirror Integration Tests

#[path = "../common/mod.rs"]
mod common;

use std::collections::HashSet;

use anyhow::Result;
use common::{session_with, Workspace};
use metashell::catalog::{ColumnRecord, ForeignKeyRecord, TableRecord};

const LIBRARY: &str = "
CREATE TABLE author (id INTEGER PRIMARY KEY, name TEXT NOT NULL);
CREATE TABLE book (
    isbn TEXT PRIMARY KEY,
    title TEXT NOT NULL DEFAULT 'untitled',
    author_id INTEGER,
    FOREIGN KEY (author_id) REFERENCES author(id)
);";

#[test]
fn test_mirroring_twice_adds_nothing_the_second_time() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "library.db", LIBRARY)?;
    let mut catalog = ws.catalog()?;

    let first = catalog.mirror_session(&session)?;
    assert_eq!(first.databases, 1);
    assert_eq!(first.tables, 2);
    assert_eq!(first.columns, 5);
    assert_eq!(first.foreign_keys, 1);
    let before = catalog.snapshot()?;

    let second = catalog.mirror_session(&session)?;
    assert!(second.is_empty());
    assert_eq!(catalog.snapshot()?, before);
    Ok(())
}

#[test]
fn test_catalog_survives_reopen() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "library.db", LIBRARY)?;
    {
        let mut catalog = ws.catalog()?;
        catalog.mirror_session(&session)?;
    }

    let catalog = ws.catalog()?;
    assert_eq!(catalog.databases()?.len(), 1);
    assert_eq!(
        catalog.tables()?,
        vec![
            TableRecord { name: "author".into(), database: "library.db".into() },
            TableRecord { name: "book".into(), database: "library.db".into() },
        ]
    );
    Ok(())
}

#[test]
fn test_column_records_carry_flags_and_defaults() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "library.db", LIBRARY)?;
    let mut catalog = ws.catalog()?;
    catalog.mirror_session(&session)?;

    let columns = catalog.columns()?;
    let title = columns
        .iter()
        .find(|c| c.table_name == "book" && c.name == "title")
        .expect("title mirrored");
    assert_eq!(
        title,
        &ColumnRecord {
            name: "title".into(),
            table_name: "book".into(),
            column_type: "TEXT".into(),
            is_pk: false,
            not_null: true,
            is_unique: false,
            default_value: Some("'untitled'".into()),
        }
    );

    let isbn = columns.iter().find(|c| c.name == "isbn").unwrap();
    assert!(isbn.is_pk);
    assert!(isbn.is_unique);
    Ok(())
}

#[test]
fn test_every_record_has_its_parent() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "library.db", LIBRARY)?;
    let mut catalog = ws.catalog()?;
    catalog.mirror_session(&session)?;
    let snapshot = catalog.snapshot()?;

    let databases: HashSet<_> = snapshot.databases.iter().map(|d| d.name.as_str()).collect();
    let tables: HashSet<_> = snapshot.tables.iter().map(|t| t.name.as_str()).collect();

    assert!(snapshot.tables.iter().all(|t| databases.contains(t.database.as_str())));
    assert!(snapshot.columns.iter().all(|c| tables.contains(c.table_name.as_str())));
    assert!(snapshot
        .foreign_keys
        .iter()
        .all(|fk| tables.contains(fk.referenced_table.as_str())));
    Ok(())
}

#[test]
fn test_one_foreign_key_per_column_name() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(
        &ws,
        "shop.db",
        "CREATE TABLE customer (id INTEGER PRIMARY KEY);
         CREATE TABLE supplier (id INTEGER PRIMARY KEY);
         CREATE TABLE orders (id INTEGER PRIMARY KEY, party INTEGER REFERENCES customer(id));
         CREATE TABLE deliveries (id INTEGER PRIMARY KEY, party INTEGER REFERENCES supplier(id));",
    )?;
    let mut catalog = ws.catalog()?;

    let stats = catalog.mirror_session(&session)?;
    assert_eq!(stats.foreign_keys, 1);
    assert_eq!(
        catalog.foreign_keys()?,
        vec![ForeignKeyRecord {
            column: "party".into(),
            referenced_table: "customer".into(),
            referenced_column: Some("id".into()),
        }]
    );
    Ok(())
}

#[test]
fn test_new_table_is_picked_up_on_refresh() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "library.db", LIBRARY)?;
    let mut catalog = ws.catalog()?;
    catalog.mirror_session(&session)?;

    session.execute_batch("CREATE TABLE shelf (code TEXT PRIMARY KEY);")?;
    let stats = catalog.mirror_session(&session)?;
    assert_eq!(stats.databases, 0);
    assert_eq!(stats.tables, 1);
    assert_eq!(stats.columns, 1);
    assert_eq!(catalog.tables()?.len(), 3);
    Ok(())
}

#[test]
fn test_refresh_never_updates_or_removes_rows() -> Result<()> {
    let ws = Workspace::new()?;
    let session = session_with(&ws, "library.db", LIBRARY)?;
    let mut catalog = ws.catalog()?;
    catalog.mirror_session(&session)?;

    session.execute_batch(
        "DROP TABLE book;
         DROP TABLE author;
         CREATE TABLE author (id INTEGER PRIMARY KEY, name BLOB);",
    )?;
    let stats = catalog.mirror_session(&session)?;
    assert!(stats.is_empty());

    // The dropped table is still recorded
    let tables = catalog.tables()?;
    assert!(tables.contains(&TableRecord { name: "book".into(), database: "library.db".into() }));
    let columns = catalog.columns()?;
    let book_columns: Vec<_> = columns.iter().filter(|c| c.table_name == "book").map(|c| c.name.as_str()).collect();
    assert_eq!(book_columns, vec!["isbn", "title", "author_id"]);

    // The recreated column keeps its first recorded type
    let name = columns
        .iter()
        .find(|c| c.table_name == "author" && c.name == "name")
        .expect("author.name mirrored");
    assert_eq!(name.column_type, "TEXT");
    assert!(name.not_null);
    assert_eq!(catalog.foreign_keys()?.len(), 1);
    Ok(())
}
