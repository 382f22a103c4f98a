use thiserror::Error;

#[derive(Debug, Error)]
pub enum ModelError {
    #[error("table {table} has no column named {column}")]
    UnknownColumn { table: String, column: String },
    #[error("no declared schema for table {0}")]
    UnknownTable(String),
}
