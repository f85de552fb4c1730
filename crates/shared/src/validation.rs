//! Common validation utilities for admin edit forms.

use lazy_static::lazy_static;
use regex::Regex;
use validator::ValidationError;

lazy_static! {
    /// 24-hour clock, zero-padded: "09:00", "18:30".
    static ref TIME_OF_DAY: Regex = Regex::new(r"^([01][0-9]|2[0-3]):[0-5][0-9]$").unwrap();

    /// Loose phone format: optional leading +, then digits with common separators.
    static ref PHONE: Regex = Regex::new(r"^\+?[0-9][0-9 ().-]{5,18}[0-9]$").unwrap();
}

/// Validates a time-of-day string in HH:MM (24-hour) format.
pub fn validate_time_of_day(value: &str) -> Result<(), ValidationError> {
    if TIME_OF_DAY.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("time_of_day");
        err.message = Some("Time must be in HH:MM 24-hour format".into());
        Err(err)
    }
}

/// Validates that a URL is absolute http(s) with a non-empty host.
pub fn validate_http_url(value: &str) -> Result<(), ValidationError> {
    let rest = value
        .strip_prefix("https://")
        .or_else(|| value.strip_prefix("http://"));

    let valid = match rest {
        Some(rest) => {
            let host = rest.split('/').next().unwrap_or("");
            !host.is_empty() && !host.contains(char::is_whitespace)
        }
        None => false,
    };

    if valid {
        Ok(())
    } else {
        let mut err = ValidationError::new("http_url");
        err.message = Some("Must be an absolute http(s) URL".into());
        Err(err)
    }
}

/// Validates a phone number in loose international format.
pub fn validate_phone(value: &str) -> Result<(), ValidationError> {
    if PHONE.is_match(value) {
        Ok(())
    } else {
        let mut err = ValidationError::new("phone_format");
        err.message = Some("Phone number format is not recognized".into());
        Err(err)
    }
}

/// Validates that every entry in a string list is non-blank.
///
/// Used for ordered reference lists (scripture references, discussion
/// questions) where an empty entry is always an authoring mistake.
pub fn validate_non_blank_items(items: &[String]) -> Result<(), ValidationError> {
    if items.iter().all(|s| !s.trim().is_empty()) {
        Ok(())
    } else {
        let mut err = ValidationError::new("blank_item");
        err.message = Some("List entries must not be blank".into());
        Err(err)
    }
}
