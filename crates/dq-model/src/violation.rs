#![deny(unsafe_code)]

/// Why a row or cell was rejected by an integrity or range check.
///
/// Business-rule filter rejections are deliberately absent: those are
/// dropped silently and show up only in summary counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub enum ReasonCode {
    /// Child row whose foreign key has no match in the parent table.
    OrphanRow,
    /// Numeric cell below the configured storage minimum.
    BelowMinimum,
    /// Numeric cell above the configured storage maximum.
    AboveMaximum,
    /// Non-numeric content in a column declared (or detected) numeric.
    NonNumeric,
    /// Fractional value that would lose precision in an integer column.
    PrecisionLoss,
}

impl ReasonCode {
    pub fn as_str(self) -> &'static str {
        match self {
            ReasonCode::OrphanRow => "ORPHAN_ROW",
            ReasonCode::BelowMinimum => "UNDERFLOW",
            ReasonCode::AboveMaximum => "OVERFLOW",
            ReasonCode::NonNumeric => "NON_NUMERIC",
            ReasonCode::PrecisionLoss => "PRECISION_LOSS",
        }
    }
}

/// One audited rejection. Append-only; never mutated after emission.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct Violation {
    /// Relationship or check name that produced this record.
    pub check: String,
    /// Rendered primary-key value of the offending row, when known.
    pub row_key: String,
    /// 1-based input-file row number (header counted as row 1), when known.
    pub row_number: Option<u64>,
    /// Offending column.
    pub column: String,
    /// Offending value as read.
    pub value: String,
    pub reason: ReasonCode,
    /// Parent table the row failed against, for RI violations.
    pub parent_table: Option<String>,
    pub message: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reason_codes_match_audit_tokens() {
        assert_eq!(ReasonCode::AboveMaximum.as_str(), "OVERFLOW");
        assert_eq!(ReasonCode::BelowMinimum.as_str(), "UNDERFLOW");
        assert_eq!(ReasonCode::OrphanRow.as_str(), "ORPHAN_ROW");
    }

    #[test]
    fn violation_serializes_to_json() {
        let violation = Violation {
            check: "orders_user".to_string(),
            row_key: "12".to_string(),
            row_number: None,
            column: "user_id".to_string(),
            value: "99".to_string(),
            reason: ReasonCode::OrphanRow,
            parent_table: Some("users".to_string()),
            message: "user_id 99 not present in users.id".to_string(),
        };
        let json = serde_json::to_string(&violation).expect("serialize");
        assert!(json.contains("OrphanRow"));
    }
}
