#![deny(unsafe_code)]

use crate::{ModelError, TableSchema, Value};

/// One record: cells aligned positionally with the owning table's schema.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Row {
    pub cells: Vec<Value>,
}

impl Row {
    pub fn new(cells: Vec<Value>) -> Self {
        Self { cells }
    }

    pub fn get(&self, index: usize) -> &Value {
        self.cells.get(index).unwrap_or(&Value::Null)
    }

    pub fn set(&mut self, index: usize, value: Value) {
        if index < self.cells.len() {
            self.cells[index] = value;
        }
    }
}

/// A named, ordered sequence of rows sharing one declared schema.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Table {
    pub schema: TableSchema,
    pub rows: Vec<Row>,
}

impl Table {
    pub fn new(schema: TableSchema) -> Self {
        Self {
            schema,
            rows: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.schema.name
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn push_row(&mut self, row: Row) {
        self.rows.push(row);
    }

    pub fn column_index(&self, name: &str) -> Result<usize, ModelError> {
        self.schema
            .column_index(name)
            .ok_or_else(|| ModelError::UnknownColumn {
                table: self.schema.name.clone(),
                column: name.to_string(),
            })
    }

    pub fn primary_key_index(&self) -> Result<usize, ModelError> {
        let pk = self.schema.primary_key.clone();
        self.column_index(&pk)
    }

    /// Cell lookup by row index and column name; absent cells read as null.
    pub fn value(&self, row: usize, column: &str) -> &Value {
        let Some(col) = self.schema.column_index(column) else {
            return &Value::Null;
        };
        self.rows.get(row).map(|r| r.get(col)).unwrap_or(&Value::Null)
    }

    /// Rendered primary-key value for one row (empty string when null).
    pub fn row_key(&self, row: &Row) -> String {
        match self.schema.column_index(&self.schema.primary_key) {
            Some(idx) => row.get(idx).render(),
            None => String::new(),
        }
    }
}
