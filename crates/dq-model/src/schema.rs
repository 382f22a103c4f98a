#![deny(unsafe_code)]

//! Declared table schemas for the e-commerce extract.
//!
//! Column types and the null-token set are explicit configuration resolved
//! once at table-load time; nothing downstream infers types ad hoc.

/// String tokens interpreted as null on read.
pub const NULL_TOKENS: [&str; 6] = ["", " ", "NULL", "null", "None", "nan"];

pub fn is_null_token(raw: &str) -> bool {
    NULL_TOKENS.contains(&raw)
}

/// Expected storage type of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ColumnType {
    Integer,
    Decimal,
    Text,
    Timestamp,
}

#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct Column {
    pub name: String,
    pub ty: ColumnType,
}

/// Schema for one named table: column order, types, and the primary key.
#[derive(Debug, Clone, serde::Serialize, serde::Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub primary_key: String,
    pub columns: Vec<Column>,
}

impl TableSchema {
    pub fn new(name: &str, primary_key: &str, columns: &[(&str, ColumnType)]) -> Self {
        Self {
            name: name.to_string(),
            primary_key: primary_key.to_string(),
            columns: columns
                .iter()
                .map(|(name, ty)| Column {
                    name: (*name).to_string(),
                    ty: *ty,
                })
                .collect(),
        }
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|col| col.name == name)
    }

    pub fn column_type(&self, name: &str) -> Option<ColumnType> {
        self.columns
            .iter()
            .find(|col| col.name == name)
            .map(|col| col.ty)
    }

    pub fn column_names(&self) -> Vec<String> {
        self.columns.iter().map(|col| col.name.clone()).collect()
    }
}

/// All declared table schemas, in raw-source order.
pub fn schema_catalog() -> Vec<TableSchema> {
    use ColumnType::{Decimal, Integer, Text, Timestamp};
    vec![
        TableSchema::new(
            "users",
            "id",
            &[
                ("id", Integer),
                ("first_name", Text),
                ("last_name", Text),
                ("email", Text),
                ("age", Integer),
                ("gender", Text),
                ("state", Text),
                ("street_address", Text),
                ("postal_code", Text),
                ("city", Text),
                ("country", Text),
                ("latitude", Decimal),
                ("longitude", Decimal),
                ("traffic_source", Text),
                ("created_at", Timestamp),
            ],
        ),
        TableSchema::new(
            "products",
            "id",
            &[
                ("id", Integer),
                ("cost", Decimal),
                ("category", Text),
                ("name", Text),
                ("brand", Text),
                ("retail_price", Decimal),
                ("department", Text),
                ("sku", Text),
                ("distribution_center_id", Integer),
            ],
        ),
        TableSchema::new(
            "orders",
            "order_id",
            &[
                ("order_id", Integer),
                ("user_id", Integer),
                ("status", Text),
                ("gender", Text),
                ("created_at", Timestamp),
                ("returned_at", Timestamp),
                ("shipped_at", Timestamp),
                ("delivered_at", Timestamp),
                ("num_of_item", Integer),
            ],
        ),
        TableSchema::new(
            "order_items",
            "id",
            &[
                ("id", Integer),
                ("order_id", Integer),
                ("user_id", Integer),
                ("product_id", Integer),
                ("inventory_item_id", Integer),
                ("status", Text),
                ("created_at", Timestamp),
                ("shipped_at", Timestamp),
                ("delivered_at", Timestamp),
                ("returned_at", Timestamp),
                ("sale_price", Decimal),
            ],
        ),
        TableSchema::new(
            "inventory_items",
            "id",
            &[
                ("id", Integer),
                ("product_id", Integer),
                ("created_at", Timestamp),
                ("sold_at", Timestamp),
                ("cost", Decimal),
                ("product_category", Text),
                ("product_name", Text),
                ("product_brand", Text),
                ("product_retail_price", Decimal),
                ("product_department", Text),
                ("product_sku", Text),
                ("product_distribution_center_id", Integer),
            ],
        ),
        TableSchema::new(
            "events",
            "id",
            &[
                ("id", Integer),
                ("user_id", Integer),
                ("sequence_number", Integer),
                ("session_id", Text),
                ("created_at", Timestamp),
                ("ip_address", Text),
                ("city", Text),
                ("state", Text),
                ("postal_code", Text),
                ("browser", Text),
                ("traffic_source", Text),
                ("uri", Text),
                ("event_type", Text),
            ],
        ),
        TableSchema::new(
            "distribution_centers",
            "id",
            &[
                ("id", Integer),
                ("name", Text),
                ("latitude", Decimal),
                ("longitude", Decimal),
            ],
        ),
    ]
}

/// Look up one declared schema by table name.
pub fn schema_for(table: &str) -> Option<TableSchema> {
    schema_catalog().into_iter().find(|s| s.name == table)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_has_seven_tables() {
        let names: Vec<String> = schema_catalog().into_iter().map(|s| s.name).collect();
        assert_eq!(
            names,
            vec![
                "users",
                "products",
                "orders",
                "order_items",
                "inventory_items",
                "events",
                "distribution_centers",
            ]
        );
    }

    #[test]
    fn null_tokens_cover_pandas_na_values() {
        for token in ["", " ", "NULL", "null", "None", "nan"] {
            assert!(is_null_token(token), "{token:?} should read as null");
        }
        assert!(!is_null_token("N/A"));
    }
}
