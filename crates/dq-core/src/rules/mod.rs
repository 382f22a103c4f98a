//! Per-table business-rule catalogs.
//!
//! Each table module declares an ordered `RuleSet`; the registry hands
//! them out by table name so the orchestrator can introspect stage names
//! and per-stage drop counts.

pub(crate) mod common;

mod distribution_centers;
mod events;
mod inventory_items;
mod order_items;
mod orders;
mod products;
mod users;

use crate::stage::RuleSet;

/// Tables in cleaning order (matches the raw-source layout; cleaning is
/// independent per table, so this order is cosmetic, unlike RI order).
pub const CLEANING_ORDER: [&str; 7] = [
    "users",
    "products",
    "orders",
    "order_items",
    "inventory_items",
    "events",
    "distribution_centers",
];

/// Look up the declared rule set for one table.
pub fn rule_set_for(table: &str) -> Option<RuleSet> {
    match table {
        "users" => Some(users::rule_set()),
        "products" => Some(products::rule_set()),
        "orders" => Some(orders::rule_set()),
        "order_items" => Some(order_items::rule_set()),
        "inventory_items" => Some(inventory_items::rule_set()),
        "events" => Some(events::rule_set()),
        "distribution_centers" => Some(distribution_centers::rule_set()),
        _ => None,
    }
}
