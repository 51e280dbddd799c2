//! Operator-input parsing for the presentation boundary.
//!
//! # Responsibility
//! - Turn free-text form fields (id filter, name filter, salary) into typed
//!   values before they reach repository or controller APIs.
//!
//! # Invariants
//! - Malformed numeric text is rejected here; the query layer assumes
//!   filters are already well-typed.
//! - Blank text means "no filter", not an error.

use crate::model::employee::EmployeeId;
use once_cell::sync::Lazy;
use regex::Regex;
use std::error::Error;
use std::fmt::{Display, Formatter};

static AMOUNT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(?:\d+|\d{1,3}(?:,\d{3})+)(?:\.\d+)?$").expect("valid amount regex")
});

/// Rejected free-text field value.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputError {
    /// Id filter text is not a plain positive integer.
    InvalidId(String),
    /// Salary text is not a non-negative decimal amount.
    InvalidAmount(String),
}

impl Display for InputError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(text) => write!(f, "not a valid employee id: `{text}`"),
            Self::InvalidAmount(text) => write!(f, "not a valid amount: `{text}`"),
        }
    }
}

impl Error for InputError {}

/// Parses the id-filter field. Blank input means no id constraint.
pub fn parse_id_filter(text: &str) -> Result<Option<EmployeeId>, InputError> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }

    trimmed
        .parse::<EmployeeId>()
        .ok()
        .filter(|id| *id > 0)
        .map(Some)
        .ok_or_else(|| InputError::InvalidId(trimmed.to_string()))
}

/// Parses the name-filter field. Blank input means no name constraint.
pub fn parse_name_filter(text: &str) -> Option<String> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Parses a salary field, tolerating thousands separators ("5,000.50").
pub fn parse_salary(text: &str) -> Result<f64, InputError> {
    let trimmed = text.trim();
    if !AMOUNT_RE.is_match(trimmed) {
        return Err(InputError::InvalidAmount(trimmed.to_string()));
    }

    trimmed
        .replace(',', "")
        .parse::<f64>()
        .ok()
        .filter(|value| value.is_finite())
        .ok_or_else(|| InputError::InvalidAmount(trimmed.to_string()))
}

#[cfg(test)]
mod tests {
    use super::{parse_id_filter, parse_name_filter, parse_salary, InputError};

    #[test]
    fn blank_id_text_means_no_filter() {
        assert_eq!(parse_id_filter(""), Ok(None));
        assert_eq!(parse_id_filter("   "), Ok(None));
    }

    #[test]
    fn numeric_id_text_parses() {
        assert_eq!(parse_id_filter(" 42 "), Ok(Some(42)));
    }

    #[test]
    fn non_numeric_id_text_is_rejected() {
        assert!(matches!(
            parse_id_filter("abc"),
            Err(InputError::InvalidId(_))
        ));
        assert!(matches!(
            parse_id_filter("-3"),
            Err(InputError::InvalidId(_))
        ));
        assert!(matches!(
            parse_id_filter("1.5"),
            Err(InputError::InvalidId(_))
        ));
    }

    #[test]
    fn name_filter_trims_and_blanks_to_none() {
        assert_eq!(parse_name_filter("  Alice "), Some("Alice".to_string()));
        assert_eq!(parse_name_filter("   "), None);
    }

    #[test]
    fn salary_accepts_plain_and_separated_amounts() {
        assert_eq!(parse_salary("5000"), Ok(5000.0));
        assert_eq!(parse_salary(" 5,000.50 "), Ok(5000.5));
        assert_eq!(parse_salary("1,234,567"), Ok(1234567.0));
        assert_eq!(parse_salary("0"), Ok(0.0));
    }

    #[test]
    fn salary_rejects_garbage_and_negatives() {
        for text in ["", "abc", "-100", "5..0", "5,00", "1e10"] {
            assert!(
                matches!(parse_salary(text), Err(InputError::InvalidAmount(_))),
                "`{text}` should be rejected"
            );
        }
    }
}
