#![allow(dead_code)]

use anyhow::Result;
use metashell::{CatalogMirror, Session, SessionOptions};
use tempfile::TempDir;

/// A scratch directory holding target databases and a catalog
pub struct Workspace {
    pub dir: TempDir,
}

impl Workspace {
    pub fn new() -> Result<Self> {
        Ok(Workspace { dir: tempfile::tempdir()? })
    }

    /// Open (creating) a target database inside the workspace
    pub fn session(&self, file_name: &str) -> Result<Session> {
        Ok(Session::open(self.dir.path().join(file_name), SessionOptions::default())?)
    }

    /// Open the workspace catalog
    pub fn catalog(&self) -> Result<CatalogMirror> {
        Ok(CatalogMirror::open(self.dir.path().join("metadata.db"))?)
    }
}

/// Create a target database from a SQL script
pub fn session_with(workspace: &Workspace, file_name: &str, sql: &str) -> Result<Session> {
    let session = workspace.session(file_name)?;
    session.execute_batch(sql)?;
    Ok(session)
}
