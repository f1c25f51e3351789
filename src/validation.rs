// Validation utilities module
// Provides custom validation functions for domain-specific rules

use regex::Regex;
use std::sync::OnceLock;
use validator::{ValidationError, ValidationErrors};

fn username_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| Regex::new(r"^[a-zA-Z0-9_]{3,20}$").expect("username regex is valid"))
}

/// Validates that a username is 3-20 characters of alphanumerics/underscore.
/// Usernames are case-normalized to lowercase before storage, so the rule
/// accepts either case here.
pub fn validate_username(username: &str) -> Result<(), ValidationError> {
    if username_regex().is_match(username) {
        Ok(())
    } else {
        let mut err = ValidationError::new("invalid_username");
        err.message = Some("must be 3-20 alphanumeric or underscore characters".into());
        Err(err)
    }
}

/// Validates that a priority score is within [0, 10].
/// Out-of-range scores are rejected, not clamped.
pub fn validate_priority_score(score: f64) -> Result<(), ValidationError> {
    if (0.0..=10.0).contains(&score) {
        Ok(())
    } else {
        let mut err = ValidationError::new("priority_score_out_of_range");
        err.message = Some("must be between 0 and 10".into());
        Err(err)
    }
}

/// Validates that an estimated time is non-negative
pub fn validate_estimated_time(estimated: f64) -> Result<(), ValidationError> {
    if estimated >= 0.0 {
        Ok(())
    } else {
        let mut err = ValidationError::new("estimated_time_negative");
        err.message = Some("must not be negative".into());
        Err(err)
    }
}

/// Flattens validator errors into one human-readable message per failure,
/// so a rejected request reports every violated rule at once.
pub fn validation_messages(errors: &ValidationErrors) -> Vec<String> {
    let mut messages: Vec<String> = errors
        .field_errors()
        .iter()
        .flat_map(|(field, errs)| {
            errs.iter().map(move |err| {
                let detail = err
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| err.code.to_string());
                format!("{}: {}", field, detail)
            })
        })
        .collect();
    messages.sort();
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_well_formed_usernames() {
        let long = "a".repeat(20);
        for name in ["abc", "user_42", "UPPER_case_ok", long.as_str()] {
            assert!(validate_username(name).is_ok(), "expected {} to be valid", name);
        }
    }

    #[test]
    fn rejects_malformed_usernames() {
        let too_long = "a".repeat(21);
        for name in ["ab", "", too_long.as_str(), "has space", "dash-ed", "ünicode"] {
            assert!(validate_username(name).is_err(), "expected {} to be invalid", name);
        }
    }

    #[test]
    fn priority_score_bounds_are_inclusive() {
        assert!(validate_priority_score(0.0).is_ok());
        assert!(validate_priority_score(10.0).is_ok());
        assert!(validate_priority_score(5.5).is_ok());
    }

    #[test]
    fn priority_score_out_of_range_is_rejected() {
        assert!(validate_priority_score(-0.1).is_err());
        assert!(validate_priority_score(10.1).is_err());
        assert!(validate_priority_score(15.0).is_err());
    }

    #[test]
    fn estimated_time_must_not_be_negative() {
        assert!(validate_estimated_time(0.0).is_ok());
        assert!(validate_estimated_time(2.5).is_ok());
        assert!(validate_estimated_time(-1.0).is_err());
    }
}
