use std::fs;

use anyhow::{Context, Result};
use tracing::info;

use dq_ingest::{DataLayout, read_untyped};
use dq_model::RunReport;
use dq_pipeline::{CsvSink, PipelineOrchestrator};
use dq_validate::{
    BIGINT_MAX, BIGINT_MIN, ColumnSelection, RangeBounds, RangeReport, RangeValidator,
};

use crate::cli::{RunArgs, ValidateArgs};

pub fn run_pipeline(args: &RunArgs) -> Result<RunReport> {
    let layout = DataLayout::new(&args.data_root);
    info!(root = %args.data_root.display(), "starting pipeline run");
    let mut orchestrator = PipelineOrchestrator::new(layout);
    if let Some(dir) = &args.sink_dir {
        fs::create_dir_all(dir)
            .with_context(|| format!("create sink dir: {}", dir.display()))?;
        orchestrator =
            orchestrator.with_sink(Box::new(CsvSink::with_warehouse_renames(dir)));
    }
    orchestrator.run()
}

pub fn run_validate(args: &ValidateArgs) -> Result<RangeReport> {
    let table = read_untyped(&args.file)
        .with_context(|| format!("read input: {}", args.file.display()))?;
    let bounds = RangeBounds {
        min: args.min.unwrap_or(BIGINT_MIN),
        max: args.max.unwrap_or(BIGINT_MAX),
    };
    let selection = if args.columns.is_empty() {
        ColumnSelection::AutoDetect
    } else {
        ColumnSelection::Declared(args.columns.clone())
    };
    info!(
        file = %args.file.display(),
        rows = table.len(),
        "validating storage range"
    );
    Ok(RangeValidator::with_bounds(bounds).validate(&table, &selection))
}

#[cfg(test)]
mod tests {
    use super::*;
    use dq_model::RunStatus;

    #[test]
    fn run_over_a_data_root_reports_violations_and_skips() {
        let dir = tempfile::tempdir().expect("tempdir");
        let raw = dir.path().join("raw");
        fs::create_dir_all(&raw).expect("raw dir");
        fs::write(
            raw.join("users.csv"),
            "id,first_name,last_name,email,age,city,created_at\n\
             1,ada,lovelace,ada@example.com,30,Portland,2019-01-01 10:00:00\n",
        )
        .expect("users csv");
        fs::write(
            raw.join("orders.csv"),
            "order_id,user_id,status,created_at\n\
             10,1,Shipped,2020-01-01 00:00:00\n\
             11,99,Shipped,2020-01-01 00:00:00\n",
        )
        .expect("orders csv");

        let args = RunArgs {
            data_root: dir.path().to_path_buf(),
            sink_dir: Some(dir.path().join("warehouse")),
        };
        let report = run_pipeline(&args).expect("run");
        assert_eq!(report.status, RunStatus::CompletedWithViolations);
        assert_eq!(report.violations["orphan_orders"].len(), 1);
        assert_eq!(report.skipped_tables.len(), 5);
        assert!(dir.path().join("warehouse/users.csv").exists());
    }

    #[test]
    fn validate_flags_out_of_range_cells() {
        let dir = tempfile::tempdir().expect("tempdir");
        let path = dir.path().join("events.csv");
        fs::write(&path, "id,sequence_number\n1,42\n2,9223372036854775808\n")
            .expect("events csv");

        let args = ValidateArgs {
            file: path,
            columns: vec!["sequence_number".to_string()],
            min: None,
            max: None,
        };
        let report = run_validate(&args).expect("validate");
        assert!(!report.ok);
        assert_eq!(report.violations.len(), 1);
        assert_eq!(report.violations[0].row_number, Some(3));
    }
}
