// Prompt Input Parsing
//
// Turns the raw lines typed at the menu into column definitions, foreign keys
// and values.

use thiserror::Error;

use crate::catalog::ForeignKey;
use crate::query::executor::result::DataValue;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    #[error("Invalid foreign key {0:?}: expected column,table,referenced_column")]
    MalformedForeignKey(String),
}

/// Split a comma-separated list of column definitions.
///
/// Commas inside parentheses do not split, so `Hours DECIMAL(3,1)` and
/// `PRIMARY KEY (Essn, Pno)` stay whole. Pieces are trimmed; empty ones dropped.
pub fn split_column_definitions(line: &str) -> Vec<String> {
    let mut defs = Vec::new();
    let mut current = String::new();
    let mut depth = 0usize;

    for c in line.chars() {
        match c {
            '(' => {
                depth += 1;
                current.push(c);
            }
            ')' => {
                depth = depth.saturating_sub(1);
                current.push(c);
            }
            ',' if depth == 0 => {
                defs.push(std::mem::take(&mut current));
            }
            _ => current.push(c),
        }
    }
    defs.push(current);

    defs.into_iter()
        .map(|d| d.trim().to_string())
        .filter(|d| !d.is_empty())
        .collect()
}

/// Parse `column,table,referenced_column`
pub fn parse_foreign_key(line: &str) -> Result<ForeignKey, InputError> {
    let parts: Vec<&str> = line.split(',').map(str::trim).collect();
    match parts.as_slice() {
        [column, table, referenced_column]
            if !column.is_empty() && !table.is_empty() && !referenced_column.is_empty() =>
        {
            Ok(ForeignKey::new(*column, *table, *referenced_column))
        }
        _ => Err(InputError::MalformedForeignKey(line.to_string())),
    }
}

/// Interpret a typed value: `NULL` in any case is SQL NULL, anything else is
/// passed through as text for the engine's type affinity to convert.
pub fn parse_value(raw: &str) -> DataValue {
    if raw.trim().eq_ignore_ascii_case("null") {
        DataValue::Null
    } else {
        DataValue::Text(raw.to_string())
    }
}
