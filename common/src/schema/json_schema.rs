use crate::schema::inference::{SqlType, TableSchema};
use serde_json::{json, Value};

/// describe one row of an inferred table as json schema draft 2020-12
#[tracing::instrument(skip(schema), fields(table = %schema.table))]
pub fn to_json_schema(schema: &TableSchema) -> Value {
    tracing::debug!("converting table schema to json schema format");

    let mut properties = serde_json::Map::new();
    for column in &schema.columns {
        let mut property = json!({
            "type": json_type(column.sql_type),
            "x-sql-type": column.sql_type.ddl(),
        });
        if column.primary_key {
            property["x-primary-key"] = json!(true);
        }
        properties.insert(column.name.clone(), property);
    }

    let primary: Vec<&str> = schema
        .columns
        .iter()
        .filter(|c| c.primary_key)
        .map(|c| c.name.as_str())
        .collect();

    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": format!("https://example.com/{}.schema.json", schema.table),
        "title": schema.table,
        "type": "object",
        "properties": properties,
        "required": primary,
    })
}

/// json types a column of this sql type holds
fn json_type(sql_type: SqlType) -> Value {
    match sql_type {
        // the first observed value fixed the type; later rows may still be null
        SqlType::Text => json!(["string", "null"]),
        SqlType::BigInt => json!(["integer", "null"]),
        SqlType::Double => json!(["number", "null"]),
        SqlType::Boolean => json!(["boolean", "null"]),
        SqlType::Json => json!(["object", "array", "null"]),
        SqlType::Key => json!("string"),
    }
}
