//! users: adults only, valid unique emails, a parseable creation time.

use std::sync::LazyLock;

use regex::Regex;

use dq_model::Value;

use crate::rules::common::{apply_text, fill_null, min_value, parse_timestamps, require_value};
use crate::stage::{RuleSet, Stage};
use crate::text::title_case;

static EMAIL_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[A-Za-z0-9._%+-]+@[A-Za-z0-9.-]+\.[A-Za-z]{2,}$").expect("email pattern")
});

pub(crate) fn email_is_valid(raw: &str) -> bool {
    EMAIL_RE.is_match(raw)
}

pub(crate) fn rule_set() -> RuleSet {
    RuleSet::new("users")
        .dedup_by("email")
        .stage(min_value("age_at_least_18", "age", 18.0))
        .stage(fill_null("fill_missing_city", "city", "Unknown"))
        .stage(apply_text(
            "normalize_names",
            &["first_name", "last_name", "country"],
            |text| title_case(text.trim()),
        ))
        .stage(apply_text("trim_city", &["city"], |text| {
            text.trim().to_string()
        }))
        .stage(Stage::filter("valid_email", |schema, row| {
            let Some(idx) = schema.column_index("email") else {
                return false;
            };
            match row.get(idx) {
                Value::Text(email) => email_is_valid(email),
                _ => false,
            }
        }))
        .stage(parse_timestamps("parse_created_at", &["created_at"]))
        .stage(require_value("valid_created_at", "created_at"))
}
