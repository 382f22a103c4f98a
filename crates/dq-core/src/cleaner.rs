//! Per-table cleaning: primary-key dedup plus ordered stage application.

use std::collections::BTreeSet;

use dq_model::{StageReport, Table};

use crate::stage::{RuleSet, StageOp};

/// Result of one table's cleaning pass.
#[derive(Debug)]
pub struct CleanOutcome {
    pub table: Table,
    pub original_count: usize,
    pub stage_reports: Vec<StageReport>,
}

impl CleanOutcome {
    pub fn cleaned_count(&self) -> usize {
        self.table.len()
    }
}

/// Applies a table's rule set to raw input.
///
/// Deduplicates on the declared primary key (and any extra declared dedup
/// columns) keeping the first occurrence in input order, then applies each
/// stage in declared order. Filtering is stable: survivors keep their
/// original relative order.
#[derive(Debug, Default)]
pub struct TableCleaner;

impl TableCleaner {
    pub fn new() -> Self {
        Self
    }

    pub fn clean(&self, mut table: Table, rules: &RuleSet) -> CleanOutcome {
        let original_count = table.len();
        let mut stage_reports = Vec::new();

        let mut dedup_columns = vec![table.schema.primary_key.clone()];
        for column in &rules.dedup_columns {
            if !dedup_columns.contains(column) {
                dedup_columns.push(column.clone());
            }
        }
        for column in dedup_columns {
            let dropped = dedup_first_wins(&mut table, &column);
            stage_reports.push(StageReport {
                stage: format!("dedup_{column}"),
                kind: dq_model::StageKind::Filter,
                dropped,
            });
        }

        for stage in &rules.stages {
            let before = table.len();
            match &stage.op {
                StageOp::Transform(apply) => {
                    let schema = table.schema.clone();
                    table.rows = table
                        .rows
                        .into_iter()
                        .map(|row| apply(&schema, row))
                        .collect();
                }
                StageOp::Filter(predicate) => {
                    let schema = table.schema.clone();
                    table.rows.retain(|row| predicate(&schema, row));
                }
            }
            let dropped = before - table.len();
            if dropped > 0 {
                tracing::debug!(
                    table = rules.table,
                    stage = stage.name,
                    dropped,
                    "stage dropped rows"
                );
            }
            stage_reports.push(StageReport {
                stage: stage.name.clone(),
                kind: stage.kind(),
                dropped,
            });
        }

        tracing::info!(
            table = rules.table,
            original = original_count,
            cleaned = table.len(),
            "table cleaned"
        );
        CleanOutcome {
            table,
            original_count,
            stage_reports,
        }
    }
}

/// First-occurrence-wins dedup on one column. Null keys never collide.
fn dedup_first_wins(table: &mut Table, column: &str) -> usize {
    let Some(idx) = table.schema.column_index(column) else {
        return 0;
    };
    let before = table.len();
    let mut seen = BTreeSet::new();
    table.rows.retain(|row| {
        let key = row.get(idx).render();
        if key.is_empty() {
            return true;
        }
        seen.insert(key)
    });
    before - table.len()
}
