//! Validation layer: numeric storage-range checks and cross-table
//! referential-integrity resolution.

pub mod integrity;
pub mod range;

pub use integrity::{
    ResolveOutcome, count_orphans, relationship_catalog, resolve_conjunction,
    resolve_relationship,
};
pub use range::{
    BIGINT_MAX, BIGINT_MIN, ColumnSelection, ColumnStats, RangeBounds, RangeReport,
    RangeValidator,
};
