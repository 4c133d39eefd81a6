//! Input validation helpers shared by the service boundary.
//!
//! Validation runs before any mutation; every failure maps to a 400.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::CoreError;
use crate::types::Timestamp;

fn email_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").unwrap())
}

/// Validate an email address (loose format check, not full RFC 5322).
pub fn validate_email(email: &str) -> Result<(), CoreError> {
    if email_regex().is_match(email) {
        Ok(())
    } else {
        Err(CoreError::Validation("Invalid email format".into()))
    }
}

/// Validate that a URL parses.
pub fn validate_url(value: &str, field: &str) -> Result<(), CoreError> {
    url::Url::parse(value)
        .map(|_| ())
        .map_err(|_| CoreError::Validation(format!("Invalid {field} URL")))
}

/// Validate a string length in characters. A `min` of 0 means no lower
/// bound.
///
/// The error message names the field, e.g. `"Name must be at least 1
/// characters"`.
pub fn validate_length(
    value: &str,
    field: &str,
    min: usize,
    max: usize,
) -> Result<(), CoreError> {
    let len = value.chars().count();
    if len < min {
        return Err(CoreError::Validation(format!(
            "{field} must be at least {min} characters"
        )));
    }
    if len > max {
        return Err(CoreError::Validation(format!(
            "{field} must be at most {max} characters"
        )));
    }
    Ok(())
}

/// Validate that a time range is strictly ordered (start before end).
pub fn validate_time_range(start: Timestamp, end: Timestamp) -> Result<(), CoreError> {
    if start >= end {
        return Err(CoreError::Validation(
            "Start time must be before end time".into(),
        ));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    #[test]
    fn accepts_ordinary_emails() {
        assert!(validate_email("dev@example.com").is_ok());
        assert!(validate_email("a.b+tag@sub.domain.io").is_ok());
    }

    #[test]
    fn rejects_malformed_emails() {
        for bad in ["", "no-at.example.com", "two@@example.com", "a b@c.de", "no-dot@host"] {
            assert!(validate_email(bad).is_err(), "{bad:?} should be rejected");
        }
    }

    #[test]
    fn length_bounds_are_inclusive() {
        assert!(validate_length("abc", "Name", 1, 3).is_ok());
        assert!(validate_length("", "Name", 1, 200).is_err());
        assert!(validate_length("abcd", "Name", 0, 3).is_err());
    }

    #[test]
    fn zero_min_allows_empty() {
        assert!(validate_length("", "Description", 0, 2000).is_ok());
    }

    #[test]
    fn length_error_names_the_field() {
        let err = validate_length("", "Password", 8, 200).unwrap_err();
        assert!(matches!(err, CoreError::Validation(ref m) if m.starts_with("Password")));
    }

    #[test]
    fn url_validation() {
        assert!(validate_url("https://www.linkedin.com/in/someone", "LinkedIn profile").is_ok());
        assert!(validate_url("not a url", "LinkedIn profile").is_err());
    }

    #[test]
    fn time_range_must_be_strict() {
        let now = Utc::now();
        assert!(validate_time_range(now, now + Duration::hours(1)).is_ok());
        assert!(validate_time_range(now, now).is_err());
        assert!(validate_time_range(now + Duration::hours(1), now).is_err());
    }
}
