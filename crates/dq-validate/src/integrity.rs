//! Referential-integrity resolution across cleaned tables.
//!
//! Each relationship builds the parent key set once and tests child rows
//! by membership, O(parent + child) per relationship. Orphans are removed
//! and every removal is recorded as a violation; business-rule drops in
//! cleaning stay silent, RI drops are always audited.

use std::collections::HashSet;

use dq_model::{ReasonCode, Relationship, Table, Violation};

/// Declared relationships, in required evaluation order. A relationship
/// later in the list observes the retained output of earlier ones
/// touching the same table.
pub fn relationship_catalog() -> Vec<Relationship> {
    vec![
        Relationship::new("orphan_orders", "orders", "user_id", "users", "id", false),
        Relationship::new(
            "oi_missing_orders",
            "order_items",
            "order_id",
            "orders",
            "order_id",
            false,
        ),
        Relationship::new(
            "oi_missing_products",
            "order_items",
            "product_id",
            "products",
            "id",
            false,
        ),
        // Anonymous events carry a null user_id and are not orphans.
        Relationship::new("orphan_events", "events", "user_id", "users", "id", true),
    ]
}

/// Retained child rows plus the violation records for the dropped ones.
#[derive(Debug)]
pub struct ResolveOutcome {
    pub retained: Table,
    pub violations: Vec<Violation>,
}

fn parent_key_set(parent: &Table, column: &str) -> HashSet<String> {
    let Some(idx) = parent.schema.column_index(column) else {
        return HashSet::new();
    };
    parent
        .rows
        .iter()
        .filter_map(|row| {
            let value = row.get(idx);
            if value.is_null() {
                None
            } else {
                Some(value.render())
            }
        })
        .collect()
}

/// Resolve one relationship: drop child orphans, record each as a violation.
pub fn resolve_relationship(
    child: Table,
    relationship: &Relationship,
    parent: &Table,
) -> ResolveOutcome {
    let outcome = resolve_conjunction(child, &[(relationship, parent)]);
    if !outcome.violations.is_empty() {
        tracing::warn!(
            relationship = relationship.name,
            dropped = outcome.violations.len(),
            "orphan rows removed"
        );
    }
    outcome
}

/// Resolve several relationships sharing one child table against the same
/// child snapshot.
///
/// Every relationship records its violations independently, so a row
/// failing two checks appears in two violation sets (totals may
/// double-count); retention is the conjunction of all checks.
pub fn resolve_conjunction(
    child: Table,
    relationships: &[(&Relationship, &Table)],
) -> ResolveOutcome {
    let mut keep = vec![true; child.rows.len()];
    let mut violations = Vec::new();

    for (relationship, parent) in relationships {
        // A child without the declared FK column has nothing to test;
        // treating every row as a null key would wipe the table.
        let Some(child_idx) = child.schema.column_index(&relationship.child_column) else {
            tracing::warn!(
                relationship = relationship.name,
                column = relationship.child_column,
                "child column missing, check skipped"
            );
            continue;
        };
        let keys = parent_key_set(parent, &relationship.parent_column);
        for (row_idx, row) in child.rows.iter().enumerate() {
            let value = row.get(child_idx);
            let ok = if value.is_null() {
                relationship.nullable
            } else {
                keys.contains(&value.render())
            };
            if !ok {
                keep[row_idx] = false;
                violations.push(Violation {
                    check: relationship.name.clone(),
                    row_key: child.row_key(row),
                    row_number: None,
                    column: relationship.child_column.clone(),
                    value: value.render(),
                    reason: ReasonCode::OrphanRow,
                    parent_table: Some(relationship.parent_table.clone()),
                    message: format!(
                        "{}.{} value '{}' not present in {}.{}",
                        relationship.child_table,
                        relationship.child_column,
                        value.render(),
                        relationship.parent_table,
                        relationship.parent_column,
                    ),
                });
            }
        }
    }

    let mut retained = Table::new(child.schema.clone());
    for (row, keep_row) in child.rows.into_iter().zip(keep) {
        if keep_row {
            retained.push_row(row);
        }
    }
    ResolveOutcome {
        retained,
        violations,
    }
}

/// Count orphans without removing them. Used to verify the fixed point
/// after resolution: every count must be zero on the final tables.
pub fn count_orphans(child: &Table, relationship: &Relationship, parent: &Table) -> usize {
    let keys = parent_key_set(parent, &relationship.parent_column);
    let Some(idx) = child.schema.column_index(&relationship.child_column) else {
        return 0;
    };
    child
        .rows
        .iter()
        .filter(|row| {
            let value = row.get(idx);
            if value.is_null() {
                !relationship.nullable
            } else {
                !keys.contains(&value.render())
            }
        })
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn catalog_order_is_fixed() {
        let names: Vec<String> = relationship_catalog()
            .into_iter()
            .map(|r| r.name)
            .collect();
        assert_eq!(
            names,
            vec![
                "orphan_orders",
                "oi_missing_orders",
                "oi_missing_products",
                "orphan_events",
            ]
        );
    }
}
