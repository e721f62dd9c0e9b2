pub mod ddl;
pub mod insert;

pub use ddl::render_schema;
pub use insert::{render_inserts, sql_literal};

/// wrap an identifier in backticks
pub fn quote_ident(name: &str) -> String {
    format!("`{}`", name)
}

/// wrap text in single quotes, doubling embedded quotes
pub fn quote_text(text: &str) -> String {
    format!("'{}'", text.replace('\'', "''"))
}
