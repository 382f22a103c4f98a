//! events: a parseable creation time is mandatory; anonymous rows are kept.
//!
//! A null user_id is legitimate here (anonymous browsing) and is handled
//! by the nullable events → users relationship, not by cleaning.

use crate::rules::common::{apply_text_all, fill_null, parse_timestamps, require_value};
use crate::stage::RuleSet;
use crate::text::collapse_whitespace;

pub(crate) fn rule_set() -> RuleSet {
    RuleSet::new("events")
        .stage(parse_timestamps("parse_created_at", &["created_at"]))
        .stage(require_value("valid_created_at", "created_at"))
        .stage(fill_null("fill_missing_city", "city", "Unknown"))
        .stage(apply_text_all("collapse_whitespace", collapse_whitespace))
}
