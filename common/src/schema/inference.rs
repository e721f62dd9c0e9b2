use crate::source::Record;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// the column every generated table is keyed on
pub const PRIMARY_KEY: &str = "id";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SqlType {
    Text,
    BigInt,
    Double,
    Boolean,
    Json,
    /// string primary key
    Key,
}

impl SqlType {
    pub fn ddl(&self) -> &'static str {
        match self {
            SqlType::Text => "TEXT",
            SqlType::BigInt => "BIGINT",
            SqlType::Double => "DOUBLE",
            SqlType::Boolean => "TINYINT(1)",
            SqlType::Json => "JSON",
            SqlType::Key => "VARCHAR(100)",
        }
    }
}

impl fmt::Display for SqlType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.ddl())
    }
}

/// type a column gets from the first value seen for it
pub fn infer_type(value: &Value) -> SqlType {
    match value {
        Value::Null => SqlType::Text,
        Value::Bool(_) => SqlType::Boolean,
        Value::Number(n) if n.is_i64() || n.is_u64() => SqlType::BigInt,
        Value::Number(_) => SqlType::Double,
        Value::String(_) => SqlType::Text,
        Value::Array(_) | Value::Object(_) => SqlType::Json,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    pub sql_type: SqlType,
    pub primary_key: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub table: String,
    pub columns: Vec<Column>,
    pub row_count: usize,
}

impl TableSchema {
    pub fn column(&self, name: &str) -> Option<&Column> {
        self.columns.iter().find(|c| c.name == name)
    }
}

/// Derive the columns of `table` from its records.
///
/// Columns appear in first-seen order across all records. `id` is always
/// present as a string primary key: in place if some record has it,
/// appended last otherwise.
pub fn infer_table(table: &str, records: &[Record]) -> TableSchema {
    let mut columns: Vec<Column> = Vec::new();

    for record in records {
        for (key, value) in record {
            if columns.iter().any(|c| &c.name == key) {
                continue;
            }
            let column = if key == PRIMARY_KEY {
                Column {
                    name: key.clone(),
                    sql_type: SqlType::Key,
                    primary_key: true,
                }
            } else {
                Column {
                    name: key.clone(),
                    sql_type: infer_type(value),
                    primary_key: false,
                }
            };
            tracing::trace!(table, column = %column.name, sql_type = %column.sql_type, "adding column");
            columns.push(column);
        }
    }

    if !columns.iter().any(|c| c.name == PRIMARY_KEY) {
        tracing::debug!(table, "no record supplies an id, appending synthesized key");
        columns.push(Column {
            name: PRIMARY_KEY.to_string(),
            sql_type: SqlType::Key,
            primary_key: true,
        });
    }

    TableSchema {
        table: table.to_string(),
        columns,
        row_count: records.len(),
    }
}
