//! Three-stage run: independent per-table cleaning, ordered
//! referential-integrity resolution, then reporting and persistence.

use std::collections::BTreeMap;
use std::fs;

use anyhow::{Context, Result, anyhow};
use tracing::{info, info_span, warn};

use dq_core::{CLEANING_ORDER, TableCleaner, rule_set_for};
use dq_ingest::{DataLayout, read_table, write_summary, write_table, write_violations};
use dq_model::{
    Relationship, RunReport, RunStatus, SinkOutcome, Table, TableSummary, Violation, schema_for,
};
use dq_validate::{count_orphans, relationship_catalog, resolve_conjunction};

use crate::sink::{LOAD_ORDER, TableSink};

/// Drives a full data-quality run over one data root.
///
/// Cleaning never fails a run; a missing raw source is skipped with a
/// warning. Integrity checks whose parent table was skipped are skipped
/// too, since there is no key set to test against.
pub struct PipelineOrchestrator {
    layout: DataLayout,
    cleaner: TableCleaner,
    sink: Option<Box<dyn TableSink>>,
}

impl PipelineOrchestrator {
    pub fn new(layout: DataLayout) -> Self {
        Self {
            layout,
            cleaner: TableCleaner::new(),
            sink: None,
        }
    }

    /// Attach a persistence target, fed in foreign-key dependency order
    /// after integrity resolution.
    #[must_use]
    pub fn with_sink(mut self, sink: Box<dyn TableSink>) -> Self {
        self.sink = Some(sink);
        self
    }

    pub fn run(&mut self) -> Result<RunReport> {
        self.layout.ensure_output_dirs()?;

        let mut current: BTreeMap<String, Table> = BTreeMap::new();
        let mut summaries: BTreeMap<String, TableSummary> = BTreeMap::new();
        let mut skipped_tables = Vec::new();

        {
            let span = info_span!("clean");
            let _guard = span.enter();
            for table_name in CLEANING_ORDER {
                let Some(path) = self.layout.raw_source(table_name) else {
                    warn!(table = table_name, "raw source missing, table skipped");
                    skipped_tables.push(table_name.to_string());
                    continue;
                };
                let schema = schema_for(table_name)
                    .ok_or_else(|| anyhow!("no declared schema for table: {table_name}"))?;
                let rules = rule_set_for(table_name)
                    .ok_or_else(|| anyhow!("no rule set for table: {table_name}"))?;
                let raw = read_table(&path, &schema)
                    .with_context(|| format!("read raw table: {table_name}"))?;
                let outcome = self.cleaner.clean(raw, &rules);
                summaries.insert(
                    table_name.to_string(),
                    TableSummary {
                        table: table_name.to_string(),
                        original_count: outcome.original_count,
                        cleaned_count: outcome.cleaned_count(),
                        post_ri_count: outcome.cleaned_count(),
                        stages: outcome.stage_reports,
                    },
                );
                current.insert(table_name.to_string(), outcome.table);
            }
        }

        let catalog = relationship_catalog();
        let mut violations: BTreeMap<String, Vec<Violation>> = BTreeMap::new();
        {
            let span = info_span!("integrity");
            let _guard = span.enter();
            for group in child_groups(&catalog) {
                let child_name = group[0].child_table.clone();
                let Some(child) = current.remove(&child_name) else {
                    continue;
                };

                let mut pairs: Vec<(&Relationship, &Table)> = Vec::new();
                for relationship in group {
                    match current.get(relationship.parent_table.as_str()) {
                        Some(parent) => pairs.push((relationship, parent)),
                        None => warn!(
                            relationship = relationship.name,
                            parent = relationship.parent_table,
                            "parent table missing, check skipped"
                        ),
                    }
                }
                if pairs.is_empty() {
                    current.insert(child_name, child);
                    continue;
                }

                let outcome = resolve_conjunction(child, &pairs);
                for violation in outcome.violations {
                    violations
                        .entry(violation.check.clone())
                        .or_default()
                        .push(violation);
                }
                if let Some(summary) = summaries.get_mut(&child_name) {
                    summary.post_ri_count = outcome.retained.len();
                }
                current.insert(child_name, outcome.retained);
            }
        }

        // Fixed-point check: re-running every relationship over the final
        // tables must find nothing.
        let mut residual_orphans = 0;
        for relationship in &catalog {
            if let (Some(child), Some(parent)) = (
                current.get(relationship.child_table.as_str()),
                current.get(relationship.parent_table.as_str()),
            ) {
                residual_orphans += count_orphans(child, relationship, parent);
            }
        }

        let mut sink_outcomes = Vec::new();
        let mut sink_failures = Vec::new();
        if let Some(sink) = self.sink.as_mut() {
            let span = info_span!("persist");
            let _guard = span.enter();
            for table_name in LOAD_ORDER {
                let Some(table) = current.get(table_name) else {
                    continue;
                };
                match sink.persist(table) {
                    Ok(rows_persisted) => {
                        let outcome = SinkOutcome {
                            table: table_name.to_string(),
                            rows_sent: table.len(),
                            rows_persisted,
                        };
                        if outcome.has_discrepancy() {
                            warn!(
                                table = table_name,
                                sent = outcome.rows_sent,
                                persisted = outcome.rows_persisted,
                                "sink persisted fewer rows than sent"
                            );
                        }
                        sink_outcomes.push(outcome);
                    }
                    Err(error) => {
                        tracing::error!(table = table_name, %error, "sink failure");
                        sink_failures.push(format!("{table_name}: {error}"));
                    }
                }
            }
        }

        for table_name in CLEANING_ORDER {
            if let Some(table) = current.get(table_name) {
                write_table(&self.layout.cleaned_path(table_name), table)
                    .with_context(|| format!("write cleaned table: {table_name}"))?;
            }
        }
        for (check, records) in &violations {
            write_violations(&self.layout.violations_path(check), records)
                .with_context(|| format!("write violations: {check}"))?;
        }
        let ordered: Vec<TableSummary> = CLEANING_ORDER
            .iter()
            .filter_map(|name| summaries.get(*name).cloned())
            .collect();
        write_summary(&self.layout.summary_path(), &ordered)?;

        let mut report = RunReport {
            summaries,
            violations,
            skipped_tables,
            sink_outcomes,
            sink_failures,
            residual_orphans,
            status: RunStatus::Clean,
        };
        report.status = report.compute_status();

        let json = serde_json::to_string_pretty(&report).context("serialize run report")?;
        let report_path = self.layout.report_path();
        fs::write(&report_path, json)
            .with_context(|| format!("write run report: {}", report_path.display()))?;

        info!(
            status = ?report.status,
            violations = report.total_violations(),
            residual_orphans = report.residual_orphans,
            "pipeline run complete"
        );
        Ok(report)
    }
}

/// Split the catalog into runs of consecutive relationships sharing one
/// child table. Relationships in one group resolve against the same child
/// snapshot; groups observe the retained output of earlier groups.
fn child_groups(catalog: &[Relationship]) -> Vec<&[Relationship]> {
    let mut groups = Vec::new();
    let mut start = 0;
    while start < catalog.len() {
        let mut end = start + 1;
        while end < catalog.len() && catalog[end].child_table == catalog[start].child_table {
            end += 1;
        }
        groups.push(&catalog[start..end]);
        start = end;
    }
    groups
}
