//! Text normalization helpers.
//!
//! Every routine here is idempotent: re-applying it to its own output is
//! a no-op, which keeps transform stages safely re-runnable.

/// Title-case in the pandas `str.title` sense: the first letter after any
/// non-alphabetic character is uppercased, the rest lowercased.
pub fn title_case(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut prev_alpha = false;
    for ch in value.chars() {
        if ch.is_alphabetic() {
            if prev_alpha {
                out.extend(ch.to_lowercase());
            } else {
                out.extend(ch.to_uppercase());
            }
            prev_alpha = true;
        } else {
            out.push(ch);
            prev_alpha = false;
        }
    }
    out
}

/// Collapse every run of whitespace into a single space.
pub fn collapse_whitespace(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    let mut in_run = false;
    for ch in value.chars() {
        if ch.is_whitespace() {
            if !in_run {
                out.push(' ');
            }
            in_run = true;
        } else {
            out.push(ch);
            in_run = false;
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn title_case_matches_pandas_title() {
        assert_eq!(title_case("united kingdom"), "United Kingdom");
        assert_eq!(title_case("BRasIL"), "Brasil");
        assert_eq!(title_case("o'neil"), "O'Neil");
    }

    #[test]
    fn title_case_is_idempotent() {
        for input in ["são paulo", "NEW york", "x", ""] {
            let once = title_case(input);
            assert_eq!(title_case(&once), once);
        }
    }

    #[test]
    fn collapse_whitespace_is_idempotent() {
        assert_eq!(collapse_whitespace("a   b\t\tc"), "a b c");
        let once = collapse_whitespace("a   b");
        assert_eq!(collapse_whitespace(&once), once);
    }
}
