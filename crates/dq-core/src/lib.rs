//! Cleaning engine: rule stages, the table cleaner, and the per-table
//! business-rule catalogs.

pub mod cleaner;
pub mod datetime;
pub mod rules;
pub mod stage;
pub mod text;

pub use cleaner::{CleanOutcome, TableCleaner};
pub use datetime::parse_timestamp;
pub use rules::{CLEANING_ORDER, rule_set_for};
pub use stage::{RuleSet, Stage, StageOp};
pub use text::{collapse_whitespace, title_case};
