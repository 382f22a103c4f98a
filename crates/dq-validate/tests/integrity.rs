//! Orphan resolution across cleaned tables.

use dq_model::{ColumnType, ReasonCode, Relationship, Row, Table, TableSchema, Value};
use dq_validate::{count_orphans, relationship_catalog, resolve_conjunction, resolve_relationship};

fn table(name: &str, pk: &str, columns: &[&str], rows: Vec<Vec<Value>>) -> Table {
    let column_defs: Vec<(&str, ColumnType)> = columns
        .iter()
        .map(|c| (*c, ColumnType::Integer))
        .collect();
    let mut out = Table::new(TableSchema::new(name, pk, &column_defs));
    for row in rows {
        out.push_row(Row::new(row));
    }
    out
}

fn users(ids: &[i64]) -> Table {
    table(
        "users",
        "id",
        &["id"],
        ids.iter().map(|id| vec![Value::Int(*id)]).collect(),
    )
}

#[test]
fn orphan_orders_are_dropped_and_audited() {
    let users = users(&[1, 2]);
    let orders = table(
        "orders",
        "order_id",
        &["order_id", "user_id"],
        vec![
            vec![Value::Int(10), Value::Int(1)],
            vec![Value::Int(11), Value::Int(99)],
            vec![Value::Int(12), Value::Int(2)],
        ],
    );
    let relationship = &relationship_catalog()[0];
    let outcome = resolve_relationship(orders, relationship, &users);

    assert_eq!(outcome.retained.len(), 2);
    assert_eq!(outcome.violations.len(), 1);
    let violation = &outcome.violations[0];
    assert_eq!(violation.check, "orphan_orders");
    assert_eq!(violation.row_key, "11");
    assert_eq!(violation.column, "user_id");
    assert_eq!(violation.value, "99");
    assert_eq!(violation.reason, ReasonCode::OrphanRow);
    assert_eq!(violation.parent_table.as_deref(), Some("users"));

    // Fixed point: re-checking the retained output finds nothing.
    assert_eq!(count_orphans(&outcome.retained, relationship, &users), 0);
}

#[test]
fn nullable_relationship_keeps_anonymous_rows() {
    let users = users(&[1]);
    let events = table(
        "events",
        "id",
        &["id", "user_id"],
        vec![
            vec![Value::Int(100), Value::Null],
            vec![Value::Int(101), Value::Int(1)],
            vec![Value::Int(102), Value::Int(42)],
        ],
    );
    let relationship = relationship_catalog()
        .into_iter()
        .find(|r| r.name == "orphan_events")
        .expect("events relationship");
    let outcome = resolve_relationship(events, &relationship, &users);

    let kept: Vec<String> = outcome
        .retained
        .rows
        .iter()
        .map(|row| outcome.retained.row_key(row))
        .collect();
    assert_eq!(kept, vec!["100", "101"]);
    assert_eq!(outcome.violations.len(), 1);
    assert_eq!(outcome.violations[0].row_key, "102");
    assert_eq!(outcome.violations[0].value, "42");
}

#[test]
fn non_nullable_relationship_drops_null_foreign_keys() {
    let parents = users(&[1]);
    let children = table(
        "orders",
        "order_id",
        &["order_id", "user_id"],
        vec![vec![Value::Int(10), Value::Null]],
    );
    let relationship = Relationship::new("orphan_orders", "orders", "user_id", "users", "id", false);
    let outcome = resolve_relationship(children, &relationship, &parents);
    assert_eq!(outcome.retained.len(), 0);
    assert_eq!(outcome.violations.len(), 1);
    assert_eq!(outcome.violations[0].value, "");
}

#[test]
fn missing_foreign_key_column_skips_the_check() {
    let parents = users(&[1]);
    // No user_id column at all: nothing to test, nothing dropped.
    let children = table(
        "orders",
        "order_id",
        &["order_id"],
        vec![vec![Value::Int(10)], vec![Value::Int(11)]],
    );
    let relationship = Relationship::new("orphan_orders", "orders", "user_id", "users", "id", false);
    let outcome = resolve_relationship(children, &relationship, &parents);
    assert_eq!(outcome.retained.len(), 2);
    assert!(outcome.violations.is_empty());
}

#[test]
fn order_items_row_failing_both_checks_is_double_counted() {
    let orders = table("orders", "order_id", &["order_id"], vec![vec![Value::Int(1)]]);
    let products = table("products", "id", &["id"], vec![vec![Value::Int(7)]]);
    let order_items = table(
        "order_items",
        "id",
        &["id", "order_id", "product_id"],
        vec![
            // fails both the order and product checks
            vec![Value::Int(50), Value::Int(9), Value::Int(9)],
            // passes both
            vec![Value::Int(51), Value::Int(1), Value::Int(7)],
        ],
    );

    let catalog = relationship_catalog();
    let by_orders = catalog.iter().find(|r| r.name == "oi_missing_orders").unwrap();
    let by_products = catalog
        .iter()
        .find(|r| r.name == "oi_missing_products")
        .unwrap();

    let outcome = resolve_conjunction(
        order_items,
        &[(by_orders, &orders), (by_products, &products)],
    );

    // Both checks run against the same snapshot, so a row failing both
    // is audited once per check even though it is removed once.
    assert_eq!(outcome.violations.len(), 2);
    let checks: Vec<&str> = outcome.violations.iter().map(|v| v.check.as_str()).collect();
    assert_eq!(checks, vec!["oi_missing_orders", "oi_missing_products"]);
    assert!(outcome.violations.iter().all(|v| v.row_key == "50"));
    assert_eq!(outcome.retained.len(), 1);
    assert_eq!(
        outcome.retained.row_key(&outcome.retained.rows[0]),
        "51"
    );
}

#[test]
fn matching_keys_compare_across_value_representations() {
    // A parent key re-read from CSV may be Float-typed; rendering is
    // canonical so 7 and 7.0 match.
    let parents = table("products", "id", &["id"], vec![vec![Value::Float(7.0)]]);
    let children = table(
        "order_items",
        "id",
        &["id", "product_id"],
        vec![vec![Value::Int(1), Value::Int(7)]],
    );
    let relationship =
        Relationship::new("oi_missing_products", "order_items", "product_id", "products", "id", false);
    let outcome = resolve_relationship(children, &relationship, &parents);
    assert_eq!(outcome.retained.len(), 1);
    assert!(outcome.violations.is_empty());
}
