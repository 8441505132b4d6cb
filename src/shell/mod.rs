//! Shell Support
//!
//! The pieces the interactive menu is built from: locating database files,
//! opening sessions and the catalog from a [`ShellConfig`], parsing prompt
//! input, and seeding the demo database.

pub mod input;
pub mod demo;

use std::io;
use std::path::Path;

use log::debug;

use crate::catalog::{CatalogMirror, MirrorStats};
use crate::common::types::DB_EXTENSION;
use crate::config::ShellConfig;
use crate::query::executor::result::QueryResult;
use crate::storage::{ConnectionError, Session};

/// Append the `.db` extension unless the name already carries it
pub fn normalize_db_name(name: &str) -> String {
    let name = name.trim();
    let suffix = format!(".{}", DB_EXTENSION);
    if name.ends_with(&suffix) {
        name.to_string()
    } else {
        format!("{}{}", name, suffix)
    }
}

/// File names in `dir` ending in `.db`, sorted
pub fn list_databases(dir: &Path) -> io::Result<Vec<String>> {
    let mut names = Vec::new();
    for entry in std::fs::read_dir(dir)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        let path = entry.path();
        if path.extension().and_then(|e| e.to_str()) == Some(DB_EXTENSION) {
            if let Some(name) = path.file_name().and_then(|n| n.to_str()) {
                names.push(name.to_string());
            }
        }
    }
    names.sort();
    Ok(names)
}

/// Opens sessions and the catalog according to a configuration
#[derive(Debug, Clone, Default)]
pub struct Shell {
    config: ShellConfig,
}

impl Shell {
    pub fn new(config: ShellConfig) -> Self {
        Shell { config }
    }

    pub fn config(&self) -> &ShellConfig {
        &self.config
    }

    /// Database files available in the data directory
    pub fn databases(&self) -> io::Result<Vec<String>> {
        list_databases(&self.config.data_dir)
    }

    /// Open (creating if needed) the database called `name`
    pub fn open_new(&self, name: &str) -> Result<Session, ConnectionError> {
        let path = self.config.database_path(normalize_db_name(name));
        Session::open(path, self.config.session_options())
    }

    /// Open the existing database called `name`
    pub fn open_existing(&self, name: &str) -> Result<Session, ConnectionError> {
        let path = self.config.database_path(normalize_db_name(name));
        Session::open_existing(path, self.config.session_options())
    }

    /// Open the catalog database
    pub fn open_catalog(&self) -> Result<CatalogMirror, ConnectionError> {
        CatalogMirror::open(self.config.catalog_path())
    }

    /// Mirror `session` into the catalog. The catalog connection is opened
    /// for this call only.
    pub fn refresh_catalog(&self, session: &Session) -> QueryResult<MirrorStats> {
        let mut catalog = self.open_catalog()?;
        debug!("Refreshing catalog {} from '{}'", catalog.path().display(), session.name());
        catalog.mirror_session(session)
    }
}
