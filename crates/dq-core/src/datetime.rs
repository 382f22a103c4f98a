//! Timestamp parsing for raw extract columns.
//!
//! Sources mix naive timestamps, RFC 3339, and BigQuery-style
//! `... +00:00 UTC` renderings. Parsing is total: anything unparseable
//! yields `None`, and a later filter stage decides whether null is
//! acceptable for the column.

use chrono::{DateTime, NaiveDate, NaiveDateTime};

const NAIVE_FORMATS: [&str; 4] = [
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
    "%Y-%m-%dT%H:%M",
];

const OFFSET_FORMATS: [&str; 2] = ["%Y-%m-%d %H:%M:%S%.f%z", "%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parse one raw timestamp string; invalid content maps to `None`.
pub fn parse_timestamp(raw: &str) -> Option<NaiveDateTime> {
    let mut trimmed = raw.trim();
    if let Some(stripped) = trimmed.strip_suffix("UTC") {
        trimmed = stripped.trim_end();
    }
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.naive_utc());
    }
    for format in OFFSET_FORMATS {
        if let Ok(dt) = DateTime::parse_from_str(trimmed, format) {
            return Some(dt.naive_utc());
        }
    }
    for format in NAIVE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(trimmed, format) {
            return Some(dt);
        }
    }
    if let Ok(date) = NaiveDate::parse_from_str(trimmed, "%Y-%m-%d") {
        return date.and_hms_opt(0, 0, 0);
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_extract_shapes() {
        assert!(parse_timestamp("2023-04-05 06:07:08").is_some());
        assert!(parse_timestamp("2023-04-05T06:07:08").is_some());
        assert!(parse_timestamp("2023-04-05 06:07:08+00:00 UTC").is_some());
        assert!(parse_timestamp("2023-04-05T06:07:08Z").is_some());
        assert!(parse_timestamp("2023-04-05").is_some());
    }

    #[test]
    fn invalid_content_maps_to_none() {
        assert!(parse_timestamp("").is_none());
        assert!(parse_timestamp("soon").is_none());
        assert!(parse_timestamp("2023-13-01 00:00:00").is_none());
        assert!(parse_timestamp("2023-02-30").is_none());
    }

    #[test]
    fn offsets_normalize_to_utc() {
        let utc = parse_timestamp("2023-04-05 08:00:00+02:00").expect("parse");
        assert_eq!(utc.to_string(), "2023-04-05 06:00:00");
    }
}
