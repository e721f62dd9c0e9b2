use crate::error::{Result, SeedError};
use crate::source::literal::parse_array_literal;
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::Value;

use super::Record;

/// `export const <name>` with an optional type annotation, up to the opening bracket
static DECLARATION_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"export\s+const\s+([A-Za-z_$][\w$]*)\s*(?::[^=;]*)?=\s*\[").unwrap()
});

/// the exported array a source file declares
#[derive(Debug, Clone, PartialEq)]
pub struct Collection {
    pub name: String,
    pub records: Vec<Record>,
}

/// Locate the first exported array constant in `text` and parse its records.
pub fn extract_collection(file: &str, text: &str) -> Result<Collection> {
    let captures = DECLARATION_REGEX.captures(text).ok_or_else(|| {
        SeedError::malformed(file, "no `export const <name> = [...]` declaration found")
    })?;

    let name = captures
        .get(1)
        .map(|m| m.as_str().to_string())
        .unwrap_or_default();
    let whole = captures
        .get(0)
        .ok_or_else(|| SeedError::malformed(file, "declaration match is empty"))?;

    // the match ends just past the opening bracket
    let literal = &text[whole.end() - 1..];
    let (items, _rest) = parse_array_literal(literal)
        .map_err(|e| SeedError::malformed(file, format!("invalid array literal:\n{}", e)))?;

    let records = items
        .into_iter()
        .enumerate()
        .map(|(index, item)| match item {
            Value::Object(fields) => Ok(fields),
            other => Err(SeedError::malformed(
                file,
                format!("element {} of `{}` is not an object: {}", index, name, other),
            )),
        })
        .collect::<Result<Vec<_>>>()?;

    tracing::debug!(file, collection = %name, records = records.len(), "extracted collection");

    Ok(Collection { name, records })
}
