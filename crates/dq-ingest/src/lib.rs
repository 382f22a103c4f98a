//! CSV ingestion and emission for the data-quality pipeline.
//!
//! Reads raw delimited sources against declared schemas (a fixed token set
//! is interpreted as null on read, malformed scalars map to null) and writes
//! cleaned tables, violation files, and run summaries.

pub mod csv_read;
pub mod csv_write;
pub mod discovery;

pub use csv_read::{parse_cell, read_table, read_untyped};
pub use csv_write::{write_summary, write_table, write_violations};
pub use discovery::DataLayout;
