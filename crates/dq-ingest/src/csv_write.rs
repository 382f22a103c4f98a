use std::path::Path;

use anyhow::{Context, Result};
use csv::{QuoteStyle, WriterBuilder};

use dq_model::{Table, TableSummary, Violation};

/// Write a cleaned table back out.
///
/// Every field is quoted and nulls serialize as empty fields, preserving
/// the empty-vs-absent distinction on re-read.
pub fn write_table(path: &Path, table: &Table) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .from_path(path)
        .with_context(|| format!("write csv: {}", path.display()))?;

    writer
        .write_record(table.schema.column_names())
        .context("write header")?;
    for row in &table.rows {
        let record: Vec<String> = row.cells.iter().map(|cell| cell.render()).collect();
        writer.write_record(&record).context("write row")?;
    }
    writer
        .flush()
        .with_context(|| format!("flush csv: {}", path.display()))?;
    Ok(())
}

/// Write one relationship's (or check's) violation records for audit.
pub fn write_violations(path: &Path, violations: &[Violation]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("write violations: {}", path.display()))?;

    writer.write_record([
        "row_key",
        "row_number",
        "column",
        "value",
        "reason",
        "parent_table",
        "message",
    ])?;
    for violation in violations {
        writer.write_record([
            violation.row_key.as_str(),
            &violation
                .row_number
                .map(|n| n.to_string())
                .unwrap_or_default(),
            violation.column.as_str(),
            violation.value.as_str(),
            violation.reason.as_str(),
            violation.parent_table.as_deref().unwrap_or(""),
            violation.message.as_str(),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("flush violations: {}", path.display()))?;
    Ok(())
}

/// Write the per-table run summary.
pub fn write_summary(path: &Path, summaries: &[TableSummary]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .from_path(path)
        .with_context(|| format!("write summary: {}", path.display()))?;

    writer.write_record([
        "table",
        "original_rows",
        "clean_rows",
        "clean_rows_after_ri",
        "removed_rows",
        "removed_percent",
    ])?;
    for summary in summaries {
        writer.write_record([
            summary.table.as_str(),
            &summary.original_count.to_string(),
            &summary.cleaned_count.to_string(),
            &summary.post_ri_count.to_string(),
            &summary.removed_count().to_string(),
            &format!("{:.2}", summary.removed_percent()),
        ])?;
    }
    writer
        .flush()
        .with_context(|| format!("flush summary: {}", path.display()))?;
    Ok(())
}
