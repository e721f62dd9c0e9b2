use crate::error::Result;
use crate::source::Record;
use crate::sql::{quote_ident, quote_text};
use serde_json::Value;

/// Render a field value as a SQL literal.
pub fn sql_literal(value: &Value) -> Result<String> {
    let literal = match value {
        Value::Null => "NULL".to_string(),
        Value::Number(n) => n.to_string(),
        Value::Bool(true) => "1".to_string(),
        Value::Bool(false) => "0".to_string(),
        Value::Array(_) | Value::Object(_) => quote_text(&serde_json::to_string(value)?),
        Value::String(s) => quote_text(s),
    };
    Ok(literal)
}

/// One INSERT line per record, covering only the fields that record has.
pub fn render_inserts(table: &str, records: &[Record]) -> Result<String> {
    let table = quote_ident(table);
    let mut out = String::new();

    for record in records {
        let columns = record
            .keys()
            .map(|k| quote_ident(k))
            .collect::<Vec<_>>()
            .join(",");
        let values = record
            .values()
            .map(sql_literal)
            .collect::<Result<Vec<_>>>()?
            .join(",");

        out.push_str(&format!(
            "INSERT INTO {} ({}) VALUES ({});\n",
            table, columns, values
        ));
    }

    Ok(out)
}
