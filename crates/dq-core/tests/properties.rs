//! Count-monotonicity and key-uniqueness properties of the cleaner.

use std::collections::BTreeSet;

use proptest::prelude::*;

use dq_core::{TableCleaner, rule_set_for};
use dq_model::{Row, Table, Value, schema_for};

fn users_table(rows: &[(i64, i64, bool)]) -> Table {
    let schema = schema_for("users").expect("users schema");
    let mut table = Table::new(schema.clone());
    for (id, age, valid_email) in rows {
        let mut row = Row::new(vec![Value::Null; schema.columns.len()]);
        let set = |row: &mut Row, column: &str, value: Value| {
            let idx = schema.column_index(column).expect("column");
            row.set(idx, value);
        };
        set(&mut row, "id", Value::Int(*id));
        set(&mut row, "age", Value::Int(*age));
        let email = if *valid_email {
            format!("user{id}@example.com")
        } else {
            format!("user{id}-example.com")
        };
        set(&mut row, "email", Value::Text(email));
        set(
            &mut row,
            "created_at",
            Value::Text("2022-01-01 00:00:00".to_string()),
        );
        table.push_row(row);
    }
    table
}

proptest! {
    #[test]
    fn cleaned_count_never_exceeds_original(
        rows in prop::collection::vec((0i64..50, 0i64..90, any::<bool>()), 0..60)
    ) {
        let table = users_table(&rows);
        let original = table.len();
        let outcome = TableCleaner::new().clean(table, &rule_set_for("users").unwrap());
        prop_assert!(outcome.cleaned_count() <= original);
        prop_assert_eq!(outcome.original_count, original);
    }

    #[test]
    fn primary_key_is_unique_after_cleaning(
        rows in prop::collection::vec((0i64..20, 0i64..90, any::<bool>()), 0..60)
    ) {
        let table = users_table(&rows);
        let outcome = TableCleaner::new().clean(table, &rule_set_for("users").unwrap());
        let mut seen = BTreeSet::new();
        for row in &outcome.table.rows {
            let key = outcome.table.row_key(row);
            prop_assert!(seen.insert(key.clone()), "duplicate key {}", key);
        }
    }
}
