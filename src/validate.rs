use lazy_static::lazy_static;
use regex::Regex;
use time::{format_description::FormatItem, macros::format_description, Date};

use crate::error::ApiError;

lazy_static! {
    static ref EMAIL_RE: Regex = Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").unwrap();
    static ref ISO_DATE_RE: Regex = Regex::new(r"^\d{4}-\d{2}-\d{2}$").unwrap();
}

const ISO_DATE: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

pub fn is_valid_email(email: &str) -> bool {
    EMAIL_RE.is_match(email)
}

pub fn require_email(field: &'static str, value: &str) -> Result<(), ApiError> {
    if is_valid_email(value) {
        Ok(())
    } else {
        Err(ApiError::validation(field, "Invalid email"))
    }
}

/// Non-empty string within `min..=max` characters.
pub fn require_len(
    field: &'static str,
    value: &str,
    min: usize,
    max: usize,
) -> Result<(), ApiError> {
    let len = value.chars().count();
    if len < min {
        return Err(ApiError::validation(
            field,
            format!("Must be at least {min} character(s)"),
        ));
    }
    if len > max {
        return Err(ApiError::validation(
            field,
            format!("Must not exceed {max} characters"),
        ));
    }
    Ok(())
}

pub fn max_len(field: &'static str, value: &str, max: usize) -> Result<(), ApiError> {
    require_len(field, value, 0, max)
}

pub fn non_negative(field: &'static str, value: i64) -> Result<(), ApiError> {
    if value < 0 {
        return Err(ApiError::validation(field, "Must be non-negative"));
    }
    Ok(())
}

pub fn max_items(field: &'static str, items: &[String], max: usize) -> Result<(), ApiError> {
    if items.len() > max {
        return Err(ApiError::validation(
            field,
            format!("Maximum {max} items allowed"),
        ));
    }
    Ok(())
}

/// `YYYY-MM-DD`, and a real calendar date.
pub fn require_iso_date(field: &'static str, value: &str) -> Result<(), ApiError> {
    if !ISO_DATE_RE.is_match(value) || Date::parse(value, ISO_DATE).is_err() {
        return Err(ApiError::validation(field, "Expected ISO date (YYYY-MM-DD)"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.c"));
        assert!(is_valid_email("dev.team+tag@example.co.uk"));
        assert!(!is_valid_email("not-an-email"));
        assert!(!is_valid_email("a b@c.d"));
        assert!(!is_valid_email("a@b"));
    }

    #[test]
    fn length_bounds() {
        assert!(require_len("companyName", "Acme", 1, 120).is_ok());
        assert!(require_len("companyName", "", 1, 120).is_err());
        assert!(require_len("companyName", &"x".repeat(121), 1, 120).is_err());
        assert!(max_len("notes", &"x".repeat(5000), 5000).is_ok());
        assert!(max_len("notes", &"x".repeat(5001), 5000).is_err());
    }

    #[test]
    fn salary_bound() {
        assert!(non_negative("salary", 0).is_ok());
        assert!(non_negative("salary", 65000).is_ok());
        assert!(non_negative("salary", -1).is_err());
    }

    #[test]
    fn tags_cardinality() {
        let ten: Vec<String> = (0..10).map(|i| format!("t{i}")).collect();
        assert!(max_items("tags", &ten, 10).is_ok());
        let eleven: Vec<String> = (0..11).map(|i| format!("t{i}")).collect();
        assert!(max_items("tags", &eleven, 10).is_err());
    }

    #[test]
    fn iso_dates() {
        assert!(require_iso_date("appliedDate", "2025-01-10").is_ok());
        assert!(require_iso_date("appliedDate", "2025-1-10").is_err());
        assert!(require_iso_date("appliedDate", "2025-13-01").is_err());
        assert!(require_iso_date("appliedDate", "2025-02-30").is_err());
        assert!(require_iso_date("appliedDate", "10/01/2025").is_err());
    }

    #[test]
    fn validation_error_names_field() {
        let err = require_len("roleTitle", "", 1, 120).unwrap_err();
        match err {
            crate::error::ApiError::Validation { field, .. } => assert_eq!(field, "roleTitle"),
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
