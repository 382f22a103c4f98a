//! orders: valid status, coherent created/shipped/delivered ordering.
//!
//! Null shipped_at or delivered_at is legitimate (pending and cancelled
//! orders); the ordering filters only fire when the later timestamp exists.

use crate::rules::common::{one_of, ordered_after, parse_timestamps};
use crate::stage::RuleSet;

pub(crate) const VALID_STATUSES: [&str; 5] =
    ["Completed", "Cancelled", "Processing", "Shipped", "Returned"];

pub(crate) fn rule_set() -> RuleSet {
    RuleSet::new("orders")
        .stage(parse_timestamps(
            "parse_timestamps",
            &["created_at", "shipped_at", "delivered_at", "returned_at"],
        ))
        .stage(one_of("valid_status", "status", &VALID_STATUSES))
        .stage(ordered_after(
            "shipped_after_created",
            "shipped_at",
            "created_at",
            true,
        ))
        .stage(ordered_after(
            "delivered_after_shipped",
            "delivered_at",
            "shipped_at",
            true,
        ))
}
