//! inventory_items: non-negative costs, sold_at after created_at when sold.
//!
//! Null sold_at is legitimate (unsold inventory). A sold item whose
//! created_at failed to parse cannot prove its ordering and is dropped.

use crate::rules::common::{fill_null, min_value, ordered_after, parse_timestamps};
use crate::stage::RuleSet;

pub(crate) fn rule_set() -> RuleSet {
    RuleSet::new("inventory_items")
        .stage(min_value("cost_non_negative", "cost", 0.0))
        .stage(min_value(
            "retail_price_non_negative",
            "product_retail_price",
            0.0,
        ))
        .stage(parse_timestamps(
            "parse_timestamps",
            &["created_at", "sold_at"],
        ))
        .stage(ordered_after(
            "sold_after_created",
            "sold_at",
            "created_at",
            false,
        ))
        .stage(fill_null(
            "fill_missing_product_name",
            "product_name",
            "Unknown Product",
        ))
        .stage(fill_null(
            "fill_missing_product_brand",
            "product_brand",
            "Generic",
        ))
}
