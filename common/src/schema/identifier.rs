use crate::error::{Result, SeedError};
use crate::schema::inference::TableSchema;

/// identifiers longer than this are rejected by MySQL
pub const MAX_IDENTIFIER_LEN: usize = 64;

/// Reserved words that cannot name a table or column.
const RESERVED_WORDS: &[&str] = &[
    "ADD", "ALL", "ALTER", "AND", "AS", "ASC", "BETWEEN", "BIGINT", "BLOB", "BOTH", "BY",
    "CALL", "CASCADE", "CASE", "CHANGE", "CHAR", "CHECK", "COLUMN", "CONDITION", "CONSTRAINT",
    "CONTINUE", "CONVERT", "CREATE", "CROSS", "CURRENT_DATE", "CURRENT_TIME",
    "CURRENT_TIMESTAMP", "CURRENT_USER", "CURSOR", "DATABASE", "DATABASES", "DEC", "DECIMAL",
    "DECLARE", "DEFAULT", "DELETE", "DESC", "DESCRIBE", "DISTINCT", "DIV", "DOUBLE", "DROP",
    "EACH", "ELSE", "ELSEIF", "ENCLOSED", "ESCAPED", "EXISTS", "EXIT", "EXPLAIN", "FALSE",
    "FETCH", "FLOAT", "FOR", "FORCE", "FOREIGN", "FROM", "FULLTEXT", "FUNCTION", "GRANT",
    "GROUP", "GROUPS", "HAVING", "IF", "IGNORE", "IN", "INDEX", "INNER", "INSERT", "INT",
    "INTEGER", "INTERVAL", "INTO", "IS", "ITERATE", "JOIN", "KEY", "KEYS", "KILL", "LEADING",
    "LEAVE", "LEFT", "LIKE", "LIMIT", "LINES", "LOAD", "LOCK", "LONG", "LOOP", "MATCH",
    "MOD", "NATURAL", "NOT", "NULL", "NUMERIC", "OF", "ON", "OPTION", "OR", "ORDER", "OUT",
    "OUTER", "OVER", "PARTITION", "PRIMARY", "PROCEDURE", "RANGE", "RANK", "READ", "REAL",
    "REFERENCES", "REGEXP", "RENAME", "REPEAT", "REPLACE", "REQUIRE", "RESTRICT", "RETURN",
    "REVOKE", "RIGHT", "RLIKE", "ROW", "ROWS", "SCHEMA", "SCHEMAS", "SELECT", "SET", "SHOW",
    "SMALLINT", "SPATIAL", "SQL", "STARTING", "TABLE", "TERMINATED", "THEN", "TINYINT", "TO",
    "TRAILING", "TRIGGER", "TRUE", "UNION", "UNIQUE", "UNLOCK", "UNSIGNED", "UPDATE", "USAGE",
    "USE", "USING", "VALUES", "VARCHAR", "WHEN", "WHERE", "WHILE", "WINDOW", "WITH", "WRITE",
    "XOR", "ZEROFILL",
];

pub fn is_reserved(word: &str) -> bool {
    RESERVED_WORDS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(word))
}

/// Check that `identifier` can be emitted as a table or column name.
pub fn validate_identifier(file: &str, identifier: &str) -> Result<()> {
    let reject = |reason: &str| SeedError::InvalidIdentifier {
        file: file.to_string(),
        identifier: identifier.to_string(),
        reason: reason.to_string(),
    };

    let mut chars = identifier.chars();
    match chars.next() {
        None => return Err(reject("identifier is empty")),
        Some(c) if !(c.is_ascii_alphabetic() || c == '_') => {
            return Err(reject("must start with a letter or underscore"))
        }
        Some(_) => {}
    }
    if !chars.all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(reject("only letters, digits and underscores are allowed"));
    }
    if identifier.len() > MAX_IDENTIFIER_LEN {
        return Err(reject("longer than 64 characters"));
    }
    if is_reserved(identifier) {
        return Err(reject("reserved SQL word"));
    }
    Ok(())
}

/// Validate the table name and every column of `schema`.
pub fn validate_schema(file: &str, schema: &TableSchema) -> Result<()> {
    validate_identifier(file, &schema.table)?;
    for column in &schema.columns {
        validate_identifier(file, &column.name)?;
    }
    Ok(())
}
