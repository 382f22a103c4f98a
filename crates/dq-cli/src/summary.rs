//! Terminal rendering of run and validation results.

use comfy_table::modifiers::{UTF8_ROUND_CORNERS, UTF8_SOLID_INNER_BORDERS};
use comfy_table::presets::UTF8_FULL;
use comfy_table::{Attribute, Cell, CellAlignment, Color, ContentArrangement, Table};

use dq_model::{RunReport, RunStatus};
use dq_validate::RangeReport;

pub fn print_run_summary(report: &RunReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Table"),
        header_cell("Original"),
        header_cell("Cleaned"),
        header_cell("After RI"),
        header_cell("Removed"),
        header_cell("Removed %"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=5 {
        align_column(&mut table, index, CellAlignment::Right);
    }

    let mut total_original = 0usize;
    let mut total_final = 0usize;
    for summary in report.summaries.values() {
        total_original += summary.original_count;
        total_final += summary.post_ri_count;
        table.add_row(vec![
            Cell::new(&summary.table),
            Cell::new(summary.original_count),
            Cell::new(summary.cleaned_count),
            Cell::new(summary.post_ri_count),
            removed_cell(summary.removed_count()),
            Cell::new(format!("{:.2}", summary.removed_percent())),
        ]);
    }
    let total_removed = total_original.saturating_sub(total_final);
    table.add_row(vec![
        Cell::new("TOTAL")
            .fg(Color::Cyan)
            .add_attribute(Attribute::Bold),
        Cell::new(total_original).add_attribute(Attribute::Bold),
        dim_cell("-"),
        Cell::new(total_final).add_attribute(Attribute::Bold),
        removed_cell(total_removed).add_attribute(Attribute::Bold),
        dim_cell("-"),
    ]);
    println!("{table}");

    if !report.skipped_tables.is_empty() {
        println!("Skipped (no raw source): {}", report.skipped_tables.join(", "));
    }
    print_violation_counts(report);
    print_sink_results(report);
    println!("Status: {}", status_label(report.status));
}

fn print_violation_counts(report: &RunReport) {
    if report.violations.is_empty() {
        return;
    }
    let mut table = Table::new();
    table.set_header(vec![header_cell("Check"), header_cell("Dropped rows")]);
    apply_summary_table_style(&mut table);
    align_column(&mut table, 1, CellAlignment::Right);
    for (check, records) in &report.violations {
        table.add_row(vec![
            Cell::new(check),
            Cell::new(records.len())
                .fg(Color::Yellow)
                .add_attribute(Attribute::Bold),
        ]);
    }
    println!();
    println!("Integrity violations:");
    println!("{table}");
}

fn print_sink_results(report: &RunReport) {
    for outcome in &report.sink_outcomes {
        if outcome.has_discrepancy() {
            println!(
                "Sink discrepancy: {} sent {} rows, persisted {}",
                outcome.table, outcome.rows_sent, outcome.rows_persisted
            );
        }
    }
    for failure in &report.sink_failures {
        eprintln!("Sink failure: {failure}");
    }
}

pub fn print_range_report(report: &RangeReport) {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell("Column"),
        header_cell("Total"),
        header_cell("Nulls"),
        header_cell("In range"),
        header_cell("Min"),
        header_cell("Max"),
        header_cell("Mean"),
    ]);
    apply_summary_table_style(&mut table);
    for index in 1..=6 {
        align_column(&mut table, index, CellAlignment::Right);
    }
    for (column, stats) in &report.stats {
        table.add_row(vec![
            Cell::new(column),
            Cell::new(stats.total_count),
            Cell::new(stats.null_count),
            Cell::new(stats.in_range_count),
            number_cell(stats.min),
            number_cell(stats.max),
            number_cell(stats.mean),
        ]);
    }
    println!("{table}");

    if report.violations.is_empty() {
        println!("All checked values fit the storage bounds.");
        return;
    }
    println!();
    println!("Violations ({}):", report.violations.len());
    for violation in report.violations.iter().take(MAX_LISTED_VIOLATIONS) {
        let row = violation
            .row_number
            .map(|n| n.to_string())
            .unwrap_or_else(|| "?".to_string());
        println!(
            "  row {row}, column {}: {} ({})",
            violation.column,
            violation.value,
            violation.reason.as_str()
        );
    }
    let remaining = report.violations.len().saturating_sub(MAX_LISTED_VIOLATIONS);
    if remaining > 0 {
        println!("  ... and {remaining} more");
    }
}

const MAX_LISTED_VIOLATIONS: usize = 20;

fn status_label(status: RunStatus) -> &'static str {
    match status {
        RunStatus::Clean => "clean",
        RunStatus::CompletedWithViolations => "completed with violations",
        RunStatus::Failed => "failed",
    }
}

fn header_cell(text: &str) -> Cell {
    Cell::new(text).add_attribute(Attribute::Bold)
}

fn dim_cell(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).add_attribute(Attribute::Dim)
}

fn removed_cell(count: usize) -> Cell {
    if count > 0 {
        Cell::new(count).fg(Color::Yellow)
    } else {
        dim_cell(count)
    }
}

fn number_cell(value: Option<f64>) -> Cell {
    match value {
        Some(v) => Cell::new(format!("{v:.2}")),
        None => dim_cell("-"),
    }
}

fn apply_summary_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .apply_modifier(UTF8_SOLID_INNER_BORDERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(120);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}
