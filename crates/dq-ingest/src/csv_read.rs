use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;

use dq_model::{ColumnType, Row, Table, TableSchema, Value, is_null_token};

fn normalize_cell(raw: &str) -> String {
    raw.trim_matches('\u{feff}').to_string()
}

/// Parse one raw cell against its declared column type.
///
/// A malformed scalar maps to null rather than failing the row; downstream
/// filter stages decide whether null is acceptable.
pub fn parse_cell(raw: &str, ty: ColumnType) -> Value {
    if is_null_token(raw) {
        return Value::Null;
    }
    match ty {
        ColumnType::Integer => {
            let trimmed = raw.trim();
            if let Ok(v) = trimmed.parse::<i64>() {
                return Value::Int(v);
            }
            // Integer extracts sometimes arrive float-formatted ("7.0").
            // Range-check through i128: comparing against `i64::MAX as f64`
            // would admit 2^63 (the cast rounds up) and saturate the key.
            match trimmed.parse::<f64>() {
                Ok(v) if v.is_finite() && v.fract() == 0.0 => {
                    match i64::try_from(v as i128) {
                        Ok(exact) => Value::Int(exact),
                        Err(_) => Value::Null,
                    }
                }
                _ => Value::Null,
            }
        }
        ColumnType::Decimal => match raw.trim().parse::<f64>() {
            Ok(v) => Value::Float(v),
            Err(_) => Value::Null,
        },
        // Timestamp text is carried through; the catalog's parse stage
        // converts it so date-ordering filters observe the stage output.
        ColumnType::Timestamp | ColumnType::Text => Value::Text(raw.to_string()),
    }
}

/// Read one delimited source into a typed table using its declared schema.
///
/// Columns are matched to the schema by header name; a column absent from
/// the file reads as null in every row. Extra file columns are ignored.
pub fn read_table(path: &Path, schema: &TableSchema) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header: {}", path.display()))?
        .iter()
        .map(normalize_cell)
        .collect();

    // Schema position -> file position.
    let positions: Vec<Option<usize>> = schema
        .columns
        .iter()
        .map(|col| headers.iter().position(|h| h == &col.name))
        .collect();

    let mut table = Table::new(schema.clone());
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let mut cells = Vec::with_capacity(schema.columns.len());
        for (col, position) in schema.columns.iter().zip(&positions) {
            let raw = position
                .and_then(|idx| record.get(idx))
                .map(normalize_cell)
                .unwrap_or_default();
            cells.push(parse_cell(&raw, col.ty));
        }
        table.push_row(Row::new(cells));
    }

    tracing::debug!(
        table = schema.name,
        rows = table.len(),
        "loaded raw table"
    );
    Ok(table)
}

/// Read a CSV with no declared schema.
///
/// Every column reads as text (null tokens still map to null) and the
/// first header column is taken as the key. Used for range validation of
/// foreign files that have no entry in the schema catalog.
pub fn read_untyped(path: &Path) -> Result<Table> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("read csv: {}", path.display()))?;

    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read header: {}", path.display()))?
        .iter()
        .map(normalize_cell)
        .collect();
    let name = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("input");
    let columns: Vec<(&str, ColumnType)> = headers
        .iter()
        .map(|h| (h.as_str(), ColumnType::Text))
        .collect();
    let primary_key = headers.first().map(String::as_str).unwrap_or("id");
    let schema = TableSchema::new(name, primary_key, &columns);

    let mut table = Table::new(schema);
    for record in reader.records() {
        let record = record.with_context(|| format!("read record: {}", path.display()))?;
        let mut cells = Vec::with_capacity(headers.len());
        for idx in 0..headers.len() {
            let raw = record.get(idx).map(normalize_cell).unwrap_or_default();
            cells.push(parse_cell(&raw, ColumnType::Text));
        }
        table.push_row(Row::new(cells));
    }
    Ok(table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn malformed_scalars_become_null() {
        assert_eq!(parse_cell("abc", ColumnType::Integer), Value::Null);
        assert_eq!(parse_cell("7", ColumnType::Integer), Value::Int(7));
        assert_eq!(parse_cell("7.0", ColumnType::Integer), Value::Int(7));
        assert_eq!(parse_cell("7.5", ColumnType::Integer), Value::Null);
        assert_eq!(parse_cell("x", ColumnType::Decimal), Value::Null);
        assert_eq!(parse_cell("1.25", ColumnType::Decimal), Value::Float(1.25));
    }

    #[test]
    fn integer_overflow_maps_to_null_never_saturates() {
        // The exact i64 boundary still loads.
        assert_eq!(
            parse_cell("9223372036854775807", ColumnType::Integer),
            Value::Int(i64::MAX)
        );
        // One past the boundary is out of storage range, not a clamped key.
        assert_eq!(
            parse_cell("9223372036854775808", ColumnType::Integer),
            Value::Null
        );
        assert_eq!(
            parse_cell("9223372036854775808.0", ColumnType::Integer),
            Value::Null
        );
        assert_eq!(parse_cell("1e300", ColumnType::Integer), Value::Null);
        assert_eq!(parse_cell("inf", ColumnType::Integer), Value::Null);
    }

    #[test]
    fn null_tokens_read_as_null() {
        for token in ["", " ", "NULL", "null", "None", "nan"] {
            assert_eq!(parse_cell(token, ColumnType::Text), Value::Null);
        }
    }
}
