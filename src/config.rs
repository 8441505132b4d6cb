// Shell Configuration
//
// Plain configuration structs with defaults. The binary fills these from its
// command line; the library never reads the environment.

use std::path::{Path, PathBuf};

use crate::common::types::{DEFAULT_CATALOG_FILE, DEFAULT_HISTORY_FILE};

/// Options applied every time a target database session is opened
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionOptions {
    /// Ask the engine to enforce foreign keys on inserts (`PRAGMA foreign_keys = ON`)
    pub enforce_foreign_keys: bool,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            enforce_foreign_keys: false,
        }
    }
}

/// Configuration for the interactive shell
#[derive(Debug, Clone)]
pub struct ShellConfig {
    /// Directory holding the target database files
    pub data_dir: PathBuf,

    /// File name (or path) of the catalog database
    pub catalog_file: PathBuf,

    /// Whether target sessions enforce foreign keys
    pub enforce_foreign_keys: bool,

    /// File used to persist prompt history
    pub history_file: PathBuf,
}

impl Default for ShellConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            catalog_file: PathBuf::from(DEFAULT_CATALOG_FILE),
            enforce_foreign_keys: false,
            history_file: PathBuf::from(DEFAULT_HISTORY_FILE),
        }
    }
}

impl ShellConfig {
    /// Resolve the catalog location. A relative catalog file lives in the data directory.
    pub fn catalog_path(&self) -> PathBuf {
        self.resolve(&self.catalog_file)
    }

    /// Resolve a database file name against the data directory
    pub fn database_path(&self, file_name: impl AsRef<Path>) -> PathBuf {
        self.resolve(file_name.as_ref())
    }

    /// Session options derived from this configuration
    pub fn session_options(&self) -> SessionOptions {
        SessionOptions {
            enforce_foreign_keys: self.enforce_foreign_keys,
        }
    }

    fn resolve(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.data_dir.join(path)
        }
    }
}
