// Common definitions shared across the shell, catalog and executor layers.

pub mod types;
pub mod identifier;
