pub mod identifier;
pub mod inference;
pub mod json_schema;

pub use identifier::{validate_identifier, validate_schema};
pub use inference::{infer_table, infer_type, Column, SqlType, TableSchema, PRIMARY_KEY};
pub use json_schema::to_json_schema;
