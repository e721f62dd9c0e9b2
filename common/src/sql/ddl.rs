use crate::schema::TableSchema;
use crate::sql::quote_ident;

/// `DROP TABLE IF EXISTS` + `CREATE TABLE` for one table, followed by a blank line
pub fn render_schema(schema: &TableSchema) -> String {
    let table = quote_ident(&schema.table);

    let columns = schema
        .columns
        .iter()
        .map(|column| {
            let key = if column.primary_key { " PRIMARY KEY" } else { "" };
            format!("  {} {}{}", quote_ident(&column.name), column.sql_type, key)
        })
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "DROP TABLE IF EXISTS {table};\nCREATE TABLE {table} (\n{columns}\n);\n\n",
        table = table,
        columns = columns
    )
}
