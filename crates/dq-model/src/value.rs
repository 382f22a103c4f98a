#![deny(unsafe_code)]

use std::fmt;

use chrono::NaiveDateTime;

/// Timestamp rendering used when a cell is written back to CSV.
pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A typed scalar held by one table cell.
///
/// Cells are immutable once built; transform stages produce new values
/// rather than mutating in place.
#[derive(Debug, Clone, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(tag = "kind", content = "value")]
pub enum Value {
    Int(i64),
    Float(f64),
    Text(String),
    Timestamp(NaiveDateTime),
    Null,
}

impl Value {
    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn as_int(&self) -> Option<i64> {
        match self {
            Value::Int(v) => Some(*v),
            _ => None,
        }
    }

    /// Numeric view of the cell, integers widened to f64.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Value::Int(v) => Some(*v as f64),
            Value::Float(v) => Some(*v),
            _ => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Value::Text(v) => Some(v.as_str()),
            _ => None,
        }
    }

    pub fn as_timestamp(&self) -> Option<NaiveDateTime> {
        match self {
            Value::Timestamp(v) => Some(*v),
            _ => None,
        }
    }

    /// Canonical string rendering; `Null` renders as the empty string.
    ///
    /// Integers render without a fractional part so foreign-key membership
    /// tests compare `Int(7)` and a re-read `"7"` equal.
    pub fn render(&self) -> String {
        match self {
            Value::Int(v) => v.to_string(),
            Value::Float(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    format!("{}", *v as i64)
                } else {
                    v.to_string()
                }
            }
            Value::Text(v) => v.clone(),
            Value::Timestamp(v) => v.format(TIMESTAMP_FORMAT).to_string(),
            Value::Null => String::new(),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn render_is_canonical_for_keys() {
        assert_eq!(Value::Int(7).render(), "7");
        assert_eq!(Value::Float(7.0).render(), "7");
        assert_eq!(Value::Float(7.5).render(), "7.5");
        assert_eq!(Value::Null.render(), "");
    }

    #[test]
    fn number_view_widens_ints() {
        assert_eq!(Value::Int(3).as_number(), Some(3.0));
        assert_eq!(Value::Text("3".into()).as_number(), None);
    }
}
