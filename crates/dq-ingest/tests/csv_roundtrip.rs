//! Tests for typed CSV reads and quote-all writes.

use std::fs;

use dq_ingest::{DataLayout, read_table, read_untyped, write_table};
use dq_model::{ColumnType, TableSchema, Value};

fn schema() -> TableSchema {
    TableSchema::new(
        "items",
        "id",
        &[
            ("id", ColumnType::Integer),
            ("name", ColumnType::Text),
            ("price", ColumnType::Decimal),
            ("created_at", ColumnType::Timestamp),
        ],
    )
}

#[test]
fn reads_null_tokens_and_typed_cells() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.csv");
    fs::write(
        &path,
        "id,name,price,created_at\n1,widget,9.50,2023-01-02 03:04:05\nNULL,None,nan,null\nx,gadget,oops,2023-05-06 07:08:09\n",
    )
    .expect("write file");

    let table = read_table(&path, &schema()).expect("read");
    assert_eq!(table.len(), 3);
    assert_eq!(table.value(0, "id"), &Value::Int(1));
    assert_eq!(table.value(0, "price"), &Value::Float(9.5));
    // Timestamp columns load as raw text; parsing is a cleaning stage.
    assert_eq!(
        table.value(0, "created_at"),
        &Value::Text("2023-01-02 03:04:05".to_string())
    );
    for column in ["id", "name", "price", "created_at"] {
        assert_eq!(table.value(1, column), &Value::Null, "row 2 {column}");
    }
    // Malformed scalars map to null, never fail the row.
    assert_eq!(table.value(2, "id"), &Value::Null);
    assert_eq!(table.value(2, "price"), &Value::Null);
    assert_eq!(table.value(2, "name"), &Value::Text("gadget".to_string()));
}

#[test]
fn missing_schema_column_reads_as_null() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.csv");
    fs::write(&path, "id,name\n5,thing\n").expect("write file");

    let table = read_table(&path, &schema()).expect("read");
    assert_eq!(table.value(0, "id"), &Value::Int(5));
    assert_eq!(table.value(0, "price"), &Value::Null);
    assert_eq!(table.value(0, "created_at"), &Value::Null);
}

#[test]
fn writes_quote_all_with_nulls_as_empty() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("items.csv");
    fs::write(&path, "id,name,price,created_at\n1,,2.0,\n").expect("write file");

    let table = read_table(&path, &schema()).expect("read");
    let out = dir.path().join("items_cleaned.csv");
    write_table(&out, &table).expect("write");

    let written = fs::read_to_string(&out).expect("read back");
    let mut lines = written.lines();
    assert_eq!(
        lines.next(),
        Some("\"id\",\"name\",\"price\",\"created_at\"")
    );
    assert_eq!(lines.next(), Some("\"1\",\"\",\"2\",\"\""));

    // Round trip: empty quoted fields come back as null.
    let reread = read_table(&out, &schema()).expect("reread");
    assert_eq!(reread.value(0, "name"), &Value::Null);
    assert_eq!(reread.value(0, "id"), &Value::Int(1));
}

#[test]
fn untyped_read_is_all_text_with_first_column_as_key() {
    let dir = tempfile::tempdir().expect("tempdir");
    let path = dir.path().join("foreign.csv");
    fs::write(&path, "code,amount\nA1,10\nNULL,\n").expect("write file");

    let table = read_untyped(&path).expect("read");
    assert_eq!(table.name(), "foreign");
    assert_eq!(table.schema.primary_key, "code");
    assert_eq!(table.value(0, "amount"), &Value::Text("10".to_string()));
    assert_eq!(table.value(1, "code"), &Value::Null);
    assert_eq!(table.value(1, "amount"), &Value::Null);
}

#[test]
fn layout_skips_absent_raw_sources() {
    let dir = tempfile::tempdir().expect("tempdir");
    let layout = DataLayout::new(dir.path());
    assert!(layout.raw_source("users").is_none());

    fs::create_dir_all(dir.path().join("raw")).expect("mkdir");
    fs::write(dir.path().join("raw/users.csv"), "id\n1\n").expect("write");
    assert!(layout.raw_source("users").is_some());

    layout.ensure_output_dirs().expect("dirs");
    assert!(dir.path().join("processed").is_dir());
    assert!(dir.path().join("violations").is_dir());
}
