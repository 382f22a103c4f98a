//! products: non-negative cost, retail price at least cost, text defaults.

use crate::rules::common::{apply_text, column_geq, fill_null, min_value};
use crate::stage::RuleSet;
use crate::text::title_case;

pub(crate) fn rule_set() -> RuleSet {
    RuleSet::new("products")
        .stage(min_value("cost_non_negative", "cost", 0.0))
        // Equal retail and cost is valid.
        .stage(column_geq("retail_at_least_cost", "retail_price", "cost"))
        .stage(fill_null("fill_missing_name", "name", "Unknown Product"))
        .stage(fill_null("fill_missing_brand", "brand", "Generic"))
        .stage(fill_null(
            "fill_missing_category",
            "category",
            "Uncategorized",
        ))
        .stage(apply_text(
            "trim_text",
            &["name", "brand", "department"],
            |text| text.trim().to_string(),
        ))
        .stage(apply_text("normalize_category", &["category"], |text| {
            title_case(text.trim())
        }))
}
