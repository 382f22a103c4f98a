//! Stage builders shared by the per-table rule catalogs.

use dq_model::{Row, TableSchema, Value};

use crate::datetime::parse_timestamp;
use crate::stage::Stage;

fn set_column(schema: &TableSchema, row: &mut Row, column: &str, value: Value) {
    if let Some(idx) = schema.column_index(column) {
        row.set(idx, value);
    }
}

fn cell<'a>(schema: &TableSchema, row: &'a Row, column: &str) -> &'a Value {
    match schema.column_index(column) {
        Some(idx) => row.get(idx),
        None => &Value::Null,
    }
}

/// Convert raw timestamp text in the given columns; invalid content maps
/// to null. Already-parsed cells pass through unchanged, so the stage is
/// a fixed point on its own output.
pub(crate) fn parse_timestamps(name: &str, columns: &[&str]) -> Stage {
    let columns: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
    Stage::transform(name, move |schema, mut row| {
        for column in &columns {
            let parsed = match cell(schema, &row, column) {
                Value::Text(raw) => match parse_timestamp(raw) {
                    Some(ts) => Value::Timestamp(ts),
                    None => Value::Null,
                },
                Value::Timestamp(ts) => Value::Timestamp(*ts),
                _ => Value::Null,
            };
            set_column(schema, &mut row, column, parsed);
        }
        row
    })
}

/// Drop rows whose column is null (used after a parse stage decides what
/// survives as a value).
pub(crate) fn require_value(name: &str, column: &str) -> Stage {
    let column = column.to_string();
    Stage::filter(name, move |schema, row| !cell(schema, row, &column).is_null())
}

/// Replace a null cell with a fixed default.
pub(crate) fn fill_null(name: &str, column: &str, default: &str) -> Stage {
    let column = column.to_string();
    let default = default.to_string();
    Stage::transform(name, move |schema, mut row| {
        if cell(schema, &row, &column).is_null() {
            set_column(schema, &mut row, &column, Value::Text(default.clone()));
        }
        row
    })
}

/// Apply a text function to the named columns; non-text cells pass through.
pub(crate) fn apply_text(
    name: &str,
    columns: &[&str],
    func: impl Fn(&str) -> String + Send + Sync + 'static,
) -> Stage {
    let columns: Vec<String> = columns.iter().map(|c| (*c).to_string()).collect();
    Stage::transform(name, move |schema, mut row| {
        for column in &columns {
            if let Value::Text(text) = cell(schema, &row, column) {
                let updated = func(text);
                set_column(schema, &mut row, column, Value::Text(updated));
            }
        }
        row
    })
}

/// Apply a text function to every text cell in the row.
pub(crate) fn apply_text_all(
    name: &str,
    func: impl Fn(&str) -> String + Send + Sync + 'static,
) -> Stage {
    Stage::transform(name, move |_schema, mut row| {
        for cell in &mut row.cells {
            if let Value::Text(text) = cell {
                *cell = Value::Text(func(text));
            }
        }
        row
    })
}

/// Keep rows whose numeric column is at least `min`; null fails.
pub(crate) fn min_value(name: &str, column: &str, min: f64) -> Stage {
    let column = column.to_string();
    Stage::filter(name, move |schema, row| {
        cell(schema, row, &column)
            .as_number()
            .is_some_and(|v| v >= min)
    })
}

/// Keep rows where `left >= right` numerically; null on either side fails.
pub(crate) fn column_geq(name: &str, left: &str, right: &str) -> Stage {
    let left = left.to_string();
    let right = right.to_string();
    Stage::filter(name, move |schema, row| {
        let Some(a) = cell(schema, row, &left).as_number() else {
            return false;
        };
        let Some(b) = cell(schema, row, &right).as_number() else {
            return false;
        };
        a >= b
    })
}

/// Keep rows whose text column is one of the allowed values; null fails.
pub(crate) fn one_of(name: &str, column: &str, allowed: &[&str]) -> Stage {
    let column = column.to_string();
    let allowed: Vec<String> = allowed.iter().map(|v| (*v).to_string()).collect();
    Stage::filter(name, move |schema, row| {
        match cell(schema, row, &column) {
            Value::Text(text) => allowed.iter().any(|v| v == text.trim()),
            _ => false,
        }
    })
}

/// Date-ordering filter: a row survives when `later` is null, or `later`
/// and `earlier` are both parsed and `later >= earlier`. When
/// `missing_earlier_ok` is set a null `earlier` also passes (pending rows
/// with no earlier event are legitimate).
pub(crate) fn ordered_after(
    name: &str,
    later: &str,
    earlier: &str,
    missing_earlier_ok: bool,
) -> Stage {
    let later = later.to_string();
    let earlier = earlier.to_string();
    Stage::filter(name, move |schema, row| {
        let Some(later_ts) = cell(schema, row, &later).as_timestamp() else {
            return true;
        };
        match cell(schema, row, &earlier).as_timestamp() {
            Some(earlier_ts) => later_ts >= earlier_ts,
            None => missing_earlier_ok,
        }
    })
}
