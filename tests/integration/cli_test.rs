// Command Line Integration Tests

use std::io::Write;
use std::path::Path;
use std::process::{Command, Output, Stdio};

use anyhow::Result;

fn metashell(data_dir: &Path, args: &[&str]) -> Result<Output> {
    Ok(Command::new(env!("CARGO_BIN_EXE_metashell"))
        .current_dir(data_dir)
        .arg("--data-dir")
        .arg(data_dir)
        .args(args)
        .output()?)
}

#[test]
fn test_seed_then_show() -> Result<()> {
    let dir = tempfile::tempdir()?;

    let seeded = metashell(dir.path(), &["seed"])?;
    assert!(seeded.status.success());
    assert!(dir.path().join("COMPANY.db").is_file());
    assert!(dir.path().join("metadata.db").is_file());

    let shown = metashell(dir.path(), &["show", "COMPANY"])?;
    assert!(shown.status.success());
    let stdout = String::from_utf8(shown.stdout)?;
    assert!(stdout.contains("Table: EMPLOYEE"));
    assert!(stdout.contains("Table: WORKS_ON"));

    let again = metashell(dir.path(), &["seed"])?;
    let stdout = String::from_utf8(again.stdout)?;
    assert!(stdout.contains("already seeded"));
    assert!(stdout.contains("Catalog already up to date."));
    Ok(())
}

#[test]
fn test_dump_is_json() -> Result<()> {
    let dir = tempfile::tempdir()?;
    metashell(dir.path(), &["seed"])?;

    let dumped = metashell(dir.path(), &["dump"])?;
    assert!(dumped.status.success());
    let json: serde_json::Value = serde_json::from_slice(&dumped.stdout)?;
    assert_eq!(json["databases"][0]["name"], "COMPANY.db");
    assert_eq!(json["tables"].as_array().map(Vec::len), Some(6));
    Ok(())
}

#[test]
fn test_mirror_missing_database_fails() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let output = metashell(dir.path(), &["mirror", "Nowhere"])?;
    assert!(!output.status.success());
    assert!(!dir.path().join("Nowhere.db").exists());
    Ok(())
}

#[test]
fn test_menu_exit() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let mut child = Command::new(env!("CARGO_BIN_EXE_metashell"))
        .current_dir(dir.path())
        .arg("--data-dir")
        .arg(dir.path())
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .spawn()?;
    if let Some(mut stdin) = child.stdin.take() {
        stdin.write_all(b"9\n5\n")?;
    }
    let output = child.wait_with_output()?;
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout)?;
    assert!(stdout.contains("Database Management Menu:"));
    assert!(stdout.contains("Invalid choice."));
    assert!(stdout.contains("Bye."));
    assert!(dir.path().join("metadata.db").is_file());
    Ok(())
}
