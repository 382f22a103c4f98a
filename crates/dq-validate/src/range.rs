//! Generic numeric-domain validation against integer storage bounds.
//!
//! Guards the storage boundary: every cell of a numeric column is
//! classified before rows are handed to a relational sink whose integer
//! columns are 64-bit. Classification goes through an exact integer path
//! first (i64, then i128) so the storage boundary itself is never
//! disturbed by f64 rounding.

use std::collections::BTreeMap;

use dq_model::{ReasonCode, Table, Value, Violation};

/// Signed 64-bit storage range (PostgreSQL bigint).
pub const BIGINT_MIN: i64 = i64::MIN;
pub const BIGINT_MAX: i64 = i64::MAX;

/// Inclusive storage bounds for the target integer type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RangeBounds {
    pub min: i64,
    pub max: i64,
}

impl Default for RangeBounds {
    fn default() -> Self {
        Self {
            min: BIGINT_MIN,
            max: BIGINT_MAX,
        }
    }
}

/// Which columns to validate.
#[derive(Debug, Clone)]
pub enum ColumnSelection {
    /// Validate exactly these columns; an unknown name is skipped with a
    /// warning.
    Declared(Vec<String>),
    /// Validate every column where at least one non-null value parses as
    /// numeric.
    AutoDetect,
}

/// Descriptive statistics for one validated column. Reporting only;
/// never part of pass/fail.
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize)]
pub struct ColumnStats {
    pub min: Option<f64>,
    pub max: Option<f64>,
    pub mean: Option<f64>,
    pub null_count: usize,
    pub total_count: usize,
    pub in_range_count: usize,
}

/// Outcome of one validation pass.
#[derive(Debug)]
pub struct RangeReport {
    pub ok: bool,
    pub violations: Vec<Violation>,
    pub stats: BTreeMap<String, ColumnStats>,
}

/// Per-cell classification result.
#[derive(Debug, PartialEq)]
enum CellClass {
    Null,
    Numeric { value: f64, reasons: Vec<ReasonCode> },
    NonNumeric,
}

fn classify(raw: &str, bounds: RangeBounds) -> CellClass {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return CellClass::Null;
    }
    if let Ok(v) = trimmed.parse::<i64>() {
        let mut reasons = Vec::new();
        if v < bounds.min {
            reasons.push(ReasonCode::BelowMinimum);
        } else if v > bounds.max {
            reasons.push(ReasonCode::AboveMaximum);
        }
        return CellClass::Numeric {
            value: v as f64,
            reasons,
        };
    }
    // Integers past the i64 edge still classify exactly via i128.
    if let Ok(v) = trimmed.parse::<i128>() {
        let mut reasons = Vec::new();
        if v < bounds.min as i128 {
            reasons.push(ReasonCode::BelowMinimum);
        } else if v > bounds.max as i128 {
            reasons.push(ReasonCode::AboveMaximum);
        }
        return CellClass::Numeric {
            value: v as f64,
            reasons,
        };
    }
    if let Ok(v) = trimmed.parse::<f64>() {
        if !v.is_finite() {
            return CellClass::NonNumeric;
        }
        let mut reasons = Vec::new();
        if v < bounds.min as f64 {
            reasons.push(ReasonCode::BelowMinimum);
        } else if v > bounds.max as f64 {
            reasons.push(ReasonCode::AboveMaximum);
        }
        if v.fract() != 0.0 {
            reasons.push(ReasonCode::PrecisionLoss);
        }
        return CellClass::Numeric { value: v, reasons };
    }
    CellClass::NonNumeric
}

/// Generic numeric-domain checker for any cleaned or final table.
#[derive(Debug, Default)]
pub struct RangeValidator {
    bounds: RangeBounds,
}

impl RangeValidator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bounds(bounds: RangeBounds) -> Self {
        Self { bounds }
    }

    pub fn validate(&self, table: &Table, selection: &ColumnSelection) -> RangeReport {
        let columns = match selection {
            ColumnSelection::Declared(names) => {
                let mut resolved = Vec::new();
                for name in names {
                    if table.schema.column_index(name).is_some() {
                        resolved.push(name.clone());
                    } else {
                        tracing::warn!(
                            table = table.name(),
                            column = name,
                            "validated column not found"
                        );
                    }
                }
                resolved
            }
            ColumnSelection::AutoDetect => detect_numeric_columns(table),
        };

        let mut violations = Vec::new();
        let mut stats = BTreeMap::new();
        for column in columns {
            let column_stats = self.validate_column(table, &column, &mut violations);
            stats.insert(column, column_stats);
        }

        RangeReport {
            ok: violations.is_empty(),
            violations,
            stats,
        }
    }

    fn validate_column(
        &self,
        table: &Table,
        column: &str,
        violations: &mut Vec<Violation>,
    ) -> ColumnStats {
        let Ok(idx) = table.column_index(column) else {
            return ColumnStats::default();
        };

        let mut stats = ColumnStats {
            total_count: table.len(),
            ..ColumnStats::default()
        };
        let mut sum = 0.0f64;
        let mut numeric_count = 0usize;

        for (row_idx, row) in table.rows.iter().enumerate() {
            // 1-based file row, header counted as row 1.
            let row_number = row_idx as u64 + 2;
            let raw = row.get(idx).render();
            match classify(&raw, self.bounds) {
                CellClass::Null => stats.null_count += 1,
                CellClass::NonNumeric => {
                    stats.null_count += 1;
                    violations.push(self.violation(
                        table,
                        row,
                        row_number,
                        column,
                        &raw,
                        ReasonCode::NonNumeric,
                        format!("non-numeric value in numeric column {column}"),
                    ));
                }
                CellClass::Numeric { value, reasons } => {
                    numeric_count += 1;
                    sum += value;
                    stats.min = Some(stats.min.map_or(value, |m: f64| m.min(value)));
                    stats.max = Some(stats.max.map_or(value, |m: f64| m.max(value)));
                    if reasons
                        .iter()
                        .all(|r| *r == ReasonCode::PrecisionLoss)
                    {
                        stats.in_range_count += 1;
                    }
                    for reason in reasons {
                        let message = match reason {
                            ReasonCode::BelowMinimum => {
                                format!("value {raw} < minimum ({})", self.bounds.min)
                            }
                            ReasonCode::AboveMaximum => {
                                format!("value {raw} > maximum ({})", self.bounds.max)
                            }
                            _ => format!(
                                "value {raw} will lose precision in an integer column"
                            ),
                        };
                        violations.push(self.violation(
                            table, row, row_number, column, &raw, reason, message,
                        ));
                    }
                }
            }
        }

        if numeric_count > 0 {
            stats.mean = Some(sum / numeric_count as f64);
        }
        stats
    }

    #[allow(clippy::too_many_arguments)]
    fn violation(
        &self,
        table: &Table,
        row: &dq_model::Row,
        row_number: u64,
        column: &str,
        value: &str,
        reason: ReasonCode,
        message: String,
    ) -> Violation {
        Violation {
            check: format!("range_{}", table.name()),
            row_key: table.row_key(row),
            row_number: Some(row_number),
            column: column.to_string(),
            value: value.to_string(),
            reason,
            parent_table: None,
            message,
        }
    }
}

/// A column is numeric when at least one non-null value parses as numeric.
fn detect_numeric_columns(table: &Table) -> Vec<String> {
    let mut detected = Vec::new();
    for (idx, column) in table.schema.columns.iter().enumerate() {
        let numeric = table.rows.iter().any(|row| match row.get(idx) {
            Value::Int(_) | Value::Float(_) => true,
            Value::Text(text) => {
                let trimmed = text.trim();
                !trimmed.is_empty()
                    && (trimmed.parse::<f64>().is_ok() || trimmed.parse::<i128>().is_ok())
            }
            _ => false,
        });
        if numeric {
            detected.push(column.name.clone());
        }
    }
    detected
}
