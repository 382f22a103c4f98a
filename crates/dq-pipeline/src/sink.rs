//! Downstream persistence behind the `TableSink` trait.
//!
//! Tables are handed to the sink in foreign-key dependency order so a
//! relational target never sees a child row before its parent. The bundled
//! `CsvSink` writes one file per table, applying the per-table column
//! renames the warehouse schema expects.

use std::collections::BTreeMap;
use std::path::PathBuf;

use csv::{QuoteStyle, WriterBuilder};
use thiserror::Error;

use dq_model::Table;

/// Persistence order respecting foreign-key dependencies: parents first.
pub const LOAD_ORDER: [&str; 7] = [
    "distribution_centers",
    "users",
    "products",
    "inventory_items",
    "orders",
    "order_items",
    "events",
];

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("sink write failed for table {table}: {source}")]
    Write {
        table: String,
        #[source]
        source: csv::Error,
    },
    #[error("sink flush failed for table {table}: {source}")]
    Flush {
        table: String,
        #[source]
        source: std::io::Error,
    },
}

/// A destination for cleaned tables.
///
/// Returns the number of rows the target reports persisted; a count below
/// the rows sent is a reportable discrepancy, not an error.
pub trait TableSink {
    fn persist(&mut self, table: &Table) -> Result<usize, SinkError>;
}

/// File-per-table CSV sink with optional column renames at the boundary.
#[derive(Debug)]
pub struct CsvSink {
    dir: PathBuf,
    renames: BTreeMap<String, Vec<(String, String)>>,
}

impl CsvSink {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            renames: BTreeMap::new(),
        }
    }

    /// Rename a column on output for one table.
    #[must_use]
    pub fn with_rename(mut self, table: &str, from: &str, to: &str) -> Self {
        self.renames
            .entry(table.to_string())
            .or_default()
            .push((from.to_string(), to.to_string()));
        self
    }

    /// Sink preconfigured with the warehouse column names: each table's
    /// generic `id` becomes the qualified key the target schema declares
    /// (`user_id`, `product_id`, ...). Orders already carry `order_id`.
    pub fn with_warehouse_renames(dir: impl Into<PathBuf>) -> Self {
        Self::new(dir)
            .with_rename("distribution_centers", "id", "center_id")
            .with_rename("users", "id", "user_id")
            .with_rename("products", "id", "product_id")
            .with_rename("inventory_items", "id", "inventory_item_id")
            .with_rename("order_items", "id", "order_item_id")
            .with_rename("events", "id", "event_id")
    }

    fn output_name(&self, table: &str, column: &str) -> String {
        if let Some(pairs) = self.renames.get(table) {
            for (from, to) in pairs {
                if from == column {
                    return to.clone();
                }
            }
        }
        column.to_string()
    }
}

impl TableSink for CsvSink {
    fn persist(&mut self, table: &Table) -> Result<usize, SinkError> {
        let path = self.dir.join(format!("{}.csv", table.name()));
        let mut writer = WriterBuilder::new()
            .quote_style(QuoteStyle::Always)
            .from_path(&path)
            .map_err(|source| SinkError::Write {
                table: table.name().to_string(),
                source,
            })?;

        let header: Vec<String> = table
            .schema
            .column_names()
            .iter()
            .map(|name| self.output_name(table.name(), name))
            .collect();
        writer.write_record(&header).map_err(|source| SinkError::Write {
            table: table.name().to_string(),
            source,
        })?;
        for row in &table.rows {
            let record: Vec<String> = row.cells.iter().map(|cell| cell.render()).collect();
            writer.write_record(&record).map_err(|source| SinkError::Write {
                table: table.name().to_string(),
                source,
            })?;
        }
        writer.flush().map_err(|source| SinkError::Flush {
            table: table.name().to_string(),
            source,
        })?;
        tracing::info!(table = table.name(), rows = table.len(), "table persisted");
        Ok(table.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_order_puts_parents_before_children() {
        let position = |name: &str| {
            LOAD_ORDER
                .iter()
                .position(|t| *t == name)
                .unwrap_or_else(|| panic!("{name} missing from load order"))
        };
        assert!(position("users") < position("orders"));
        assert!(position("orders") < position("order_items"));
        assert!(position("products") < position("order_items"));
        assert!(position("users") < position("events"));
    }

    #[test]
    fn rename_falls_through_for_unmapped_columns() {
        let sink = CsvSink::with_warehouse_renames("/tmp");
        assert_eq!(sink.output_name("users", "id"), "user_id");
        assert_eq!(sink.output_name("users", "email"), "email");
        assert_eq!(sink.output_name("orders", "order_id"), "order_id");
    }
}
