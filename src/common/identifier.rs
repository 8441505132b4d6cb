// Identifier Checks
//
// Table and column names end up spliced into statement text (parameter binding
// cannot stand in for identifiers), so anything coming from a caller is checked
// against a strict allow-list first.

use crate::catalog::{ValidationError, ValidationResult};

/// Returns true if `name` is a plain SQL identifier: an ASCII letter or
/// underscore followed by ASCII letters, digits or underscores.
pub fn is_valid_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) if first.is_ascii_alphabetic() || first == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Validate an identifier, returning it unchanged on success
pub fn validate_identifier(name: &str) -> ValidationResult<&str> {
    if is_valid_identifier(name) {
        Ok(name)
    } else {
        Err(ValidationError::InvalidIdentifier(name.to_string()))
    }
}

/// Quote a name that is already known to the engine (read from its catalog or
/// confirmed to exist) so it can be spliced into statement text verbatim.
pub fn quote_identifier(name: &str) -> String {
    format!("\"{}\"", name.replace('"', "\"\""))
}

/// Validate a free-form column definition such as `Dname VARCHAR(15) NOT NULL`
/// or a table constraint such as `PRIMARY KEY (Essn, Pno)`.
///
/// The definition must open with an identifier, must not contain a statement
/// terminator or comment marker, and its parentheses must balance. Everything
/// else (types, constraints) is left for the engine to accept or reject.
pub fn validate_column_definition(definition: &str) -> ValidationResult<&str> {
    let trimmed = definition.trim();
    let invalid = || ValidationError::InvalidColumnDefinition(definition.to_string());

    let leading = trimmed
        .split(|c: char| c.is_whitespace() || c == '(')
        .next()
        .unwrap_or("");
    if !is_valid_identifier(leading) {
        return Err(invalid());
    }
    if trimmed.contains(';') || trimmed.contains("--") || trimmed.contains("/*") {
        return Err(invalid());
    }

    let mut depth: i32 = 0;
    for c in trimmed.chars() {
        match c {
            '(' => depth += 1,
            ')' => {
                depth -= 1;
                if depth < 0 {
                    return Err(invalid());
                }
            }
            _ => {}
        }
    }
    if depth != 0 {
        return Err(invalid());
    }

    Ok(trimmed)
}
