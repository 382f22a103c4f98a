//! order_items: non-negative sale price, valid status.
//!
//! Note the status vocabulary differs from orders: "Complete", not
//! "Completed".

use crate::rules::common::{min_value, one_of, parse_timestamps};
use crate::stage::RuleSet;

pub(crate) const VALID_STATUSES: [&str; 5] =
    ["Complete", "Cancelled", "Processing", "Shipped", "Returned"];

pub(crate) fn rule_set() -> RuleSet {
    RuleSet::new("order_items")
        .stage(min_value("sale_price_non_negative", "sale_price", 0.0))
        .stage(parse_timestamps(
            "parse_timestamps",
            &["created_at", "shipped_at", "delivered_at", "returned_at"],
        ))
        .stage(one_of("valid_status", "status", &VALID_STATUSES))
}
