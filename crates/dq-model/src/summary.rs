#![deny(unsafe_code)]

use std::collections::BTreeMap;

use crate::Violation;

/// Stage kind, reported alongside per-stage drop counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum StageKind {
    Filter,
    Transform,
}

/// Per-stage outcome of one table's cleaning pass.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct StageReport {
    pub stage: String,
    pub kind: StageKind,
    pub dropped: usize,
}

/// Row-count accounting for one table across the run.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TableSummary {
    pub table: String,
    pub original_count: usize,
    pub cleaned_count: usize,
    pub post_ri_count: usize,
    pub stages: Vec<StageReport>,
}

impl TableSummary {
    pub fn removed_count(&self) -> usize {
        self.original_count.saturating_sub(self.post_ri_count)
    }

    pub fn removed_percent(&self) -> f64 {
        if self.original_count == 0 {
            0.0
        } else {
            self.removed_count() as f64 / self.original_count as f64 * 100.0
        }
    }
}

/// Rows the sink reported persisted for one table.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct SinkOutcome {
    pub table: String,
    pub rows_sent: usize,
    pub rows_persisted: usize,
}

impl SinkOutcome {
    /// Fewer rows persisted than sent is reportable but non-fatal.
    pub fn has_discrepancy(&self) -> bool {
        self.rows_persisted < self.rows_sent
    }
}

/// Overall disposition of one pipeline run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum RunStatus {
    /// No violations recorded, no sink failures.
    Clean,
    /// Run finished but RI or range violations were recorded and dropped.
    CompletedWithViolations,
    /// A sink failure or residual integrity violation remained.
    Failed,
}

/// Aggregated result of one pipeline run.
///
/// Immutable once the run finishes; serialized as the machine-readable
/// run report.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct RunReport {
    pub summaries: BTreeMap<String, TableSummary>,
    /// Violations grouped by relationship or check name.
    pub violations: BTreeMap<String, Vec<Violation>>,
    pub skipped_tables: Vec<String>,
    pub sink_outcomes: Vec<SinkOutcome>,
    pub sink_failures: Vec<String>,
    /// Orphans still present after resolution; must be zero.
    pub residual_orphans: usize,
    pub status: RunStatus,
}

impl RunReport {
    pub fn total_violations(&self) -> usize {
        self.violations.values().map(Vec::len).sum()
    }

    pub fn compute_status(&self) -> RunStatus {
        if !self.sink_failures.is_empty() || self.residual_orphans > 0 {
            RunStatus::Failed
        } else if self.total_violations() > 0 {
            RunStatus::CompletedWithViolations
        } else {
            RunStatus::Clean
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn summary(original: usize, cleaned: usize, post_ri: usize) -> TableSummary {
        TableSummary {
            table: "orders".to_string(),
            original_count: original,
            cleaned_count: cleaned,
            post_ri_count: post_ri,
            stages: Vec::new(),
        }
    }

    #[test]
    fn removed_percent_counts_all_drops() {
        let s = summary(200, 150, 100);
        assert_eq!(s.removed_count(), 100);
        assert!((s.removed_percent() - 50.0).abs() < 1e-9);
    }

    #[test]
    fn removed_percent_on_empty_table_is_zero() {
        assert_eq!(summary(0, 0, 0).removed_percent(), 0.0);
    }

    #[test]
    fn status_prefers_failure_over_violations() {
        let mut report = RunReport {
            summaries: BTreeMap::new(),
            violations: BTreeMap::new(),
            skipped_tables: Vec::new(),
            sink_outcomes: Vec::new(),
            sink_failures: Vec::new(),
            residual_orphans: 0,
            status: RunStatus::Clean,
        };
        assert_eq!(report.compute_status(), RunStatus::Clean);

        report.violations.insert("orders_user".to_string(), Vec::new());
        assert_eq!(report.compute_status(), RunStatus::Clean);

        report.violations.get_mut("orders_user").unwrap().push(
            crate::Violation {
                check: "orders_user".to_string(),
                row_key: "1".to_string(),
                row_number: None,
                column: "user_id".to_string(),
                value: "9".to_string(),
                reason: crate::ReasonCode::OrphanRow,
                parent_table: Some("users".to_string()),
                message: String::new(),
            },
        );
        assert_eq!(report.compute_status(), RunStatus::CompletedWithViolations);

        report.sink_failures.push("orders".to_string());
        assert_eq!(report.compute_status(), RunStatus::Failed);
    }
}
