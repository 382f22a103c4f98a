//! distribution_centers: small reference table, dedup and a name trim.

use crate::rules::common::apply_text;
use crate::stage::RuleSet;

pub(crate) fn rule_set() -> RuleSet {
    RuleSet::new("distribution_centers").stage(apply_text("trim_name", &["name"], |text| {
        text.trim().to_string()
    }))
}
