/// File extension used for every database file the shell manages
pub const DB_EXTENSION: &str = "db";

/// Default file name of the catalog database
pub const DEFAULT_CATALOG_FILE: &str = "metadata.db";

/// Default file name for the interactive prompt history
pub const DEFAULT_HISTORY_FILE: &str = ".metashell_history";
