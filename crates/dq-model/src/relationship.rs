#![deny(unsafe_code)]

/// A directed foreign-key declaration between two cleaned tables.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Relationship {
    /// Stable name used for violation files and reporting.
    pub name: String,
    pub child_table: String,
    pub child_column: String,
    pub parent_table: String,
    pub parent_column: String,
    /// When true, a null child value is not an orphan.
    pub nullable: bool,
}

impl Relationship {
    pub fn new(
        name: &str,
        child_table: &str,
        child_column: &str,
        parent_table: &str,
        parent_column: &str,
        nullable: bool,
    ) -> Self {
        Self {
            name: name.to_string(),
            child_table: child_table.to_string(),
            child_column: child_column.to_string(),
            parent_table: parent_table.to_string(),
            parent_column: parent_column.to_string(),
            nullable,
        }
    }
}
