//! Shared data model for the data-quality pipeline.
//!
//! Rows, tables, declared schemas, violations, and run summaries used by
//! every other crate in the workspace.

pub mod error;
pub mod relationship;
pub mod schema;
pub mod summary;
pub mod table;
pub mod value;
pub mod violation;

pub use error::ModelError;
pub use relationship::Relationship;
pub use schema::{
    Column, ColumnType, NULL_TOKENS, TableSchema, is_null_token, schema_catalog, schema_for,
};
pub use summary::{
    RunReport, RunStatus, SinkOutcome, StageKind, StageReport, TableSummary,
};
pub use table::{Row, Table};
pub use value::{TIMESTAMP_FORMAT, Value};
pub use violation::{ReasonCode, Violation};
