//! Shared field checks used by both form validators
//!
//! Every helper appends findings to the caller's error list; none of them
//! short-circuit, so a form pass reports all violated rules together.

use once_cell::sync::Lazy;
use regex::Regex;
use url::Url;

use super::{ErrorCode, ValidationError};

/// Overall email length cap per RFC 5321
const MAX_EMAIL_LENGTH: usize = 254;
/// Local part cap per RFC 5321
const MAX_EMAIL_LOCAL_LENGTH: usize = 64;
/// Domain cap per RFC 1035
const MAX_EMAIL_DOMAIN_LENGTH: usize = 253;

/// URLs longer than this are rejected outright
const MAX_URL_LENGTH: usize = 2048;
const MAX_URL_HOST_LENGTH: usize = 253;

// Based on the HTML5 spec's "valid email address" definition but stricter
static EMAIL_REGEX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^[a-zA-Z0-9.!#$%&'*+/=?^_`{|}~-]+@[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?(?:\.[a-zA-Z0-9](?:[a-zA-Z0-9-]{0,61}[a-zA-Z0-9])?)*$",
    )
    .unwrap()
});

// Digits with common grouping punctuation, optional leading +
static PHONE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"^\+?[0-9()\[\] .\-]{6,25}$").unwrap());

/// Require a non-blank text field; returns true when a value is present
pub(crate) fn require_text(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: &str,
    label: &str,
) -> bool {
    if value.trim().is_empty() {
        errors.push(ValidationError::new(
            field,
            format!("{} is required", label),
            ErrorCode::RequiredField,
        ));
        false
    } else {
        true
    }
}

/// Cap a text field's character count
pub(crate) fn check_max_chars(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: &str,
    max: usize,
    label: &str,
) {
    let count = value.chars().count();
    if count > max {
        errors.push(ValidationError::new(
            field,
            format!("{} must be at most {} characters (got {})", label, max, count),
            ErrorCode::MaxLength,
        ));
    }
}

/// Structural email check; produces at most one finding
pub(crate) fn check_email(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    if !is_valid_email(value) {
        errors.push(ValidationError::new(
            field,
            "Invalid email format",
            ErrorCode::InvalidFormat,
        ));
    }
}

pub(crate) fn is_valid_email(value: &str) -> bool {
    if value.len() > MAX_EMAIL_LENGTH || value.contains("..") {
        return false;
    }
    let (local, domain) = match value.split_once('@') {
        Some(parts) => parts,
        None => return false,
    };
    if local.is_empty() || local.len() > MAX_EMAIL_LOCAL_LENGTH {
        return false;
    }
    if domain.is_empty() || domain.len() > MAX_EMAIL_DOMAIN_LENGTH {
        return false;
    }
    EMAIL_REGEX.is_match(value)
}

/// Absolute http(s) URL with a sane host and bounded length
pub(crate) fn check_url(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: &str,
    label: &str,
) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    if !is_valid_url(value) {
        errors.push(ValidationError::new(
            field,
            format!("{} must be a valid http(s) URL", label),
            ErrorCode::InvalidFormat,
        ));
    }
}

pub(crate) fn is_valid_url(value: &str) -> bool {
    if value.len() > MAX_URL_LENGTH {
        return false;
    }
    let url = match Url::parse(value) {
        Ok(url) => url,
        Err(_) => return false,
    };
    if !matches!(url.scheme(), "http" | "https") {
        return false;
    }
    match url.host_str() {
        Some(host) => !host.is_empty() && host.len() <= MAX_URL_HOST_LENGTH,
        None => false,
    }
}

/// Phone shape: punctuation-tolerant pattern plus a digit-count window
pub(crate) fn check_phone(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    let value = value.trim();
    if value.is_empty() {
        return;
    }

    if !PHONE_REGEX.is_match(value) {
        errors.push(ValidationError::new(
            field,
            "Invalid phone number format",
            ErrorCode::InvalidFormat,
        ));
        return;
    }

    let digits = value.chars().filter(|c| c.is_ascii_digit()).count();
    if !(7..=15).contains(&digits) {
        errors.push(ValidationError::new(
            field,
            "Phone number must contain 7 to 15 digits",
            ErrorCode::InvalidLength,
        ));
    }
}

/// Consent checkboxes must be ticked
pub(crate) fn require_consent(
    errors: &mut Vec<ValidationError>,
    field: &str,
    checked: bool,
    label: &str,
) {
    if !checked {
        errors.push(ValidationError::new(
            field,
            format!("{} is required", label),
            ErrorCode::RequiredField,
        ));
    }
}

/// Typed signature: required, at least two characters, bounded
pub(crate) fn check_signature(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if !require_text(errors, field, value, "Signature") {
        return;
    }
    let count = value.trim().chars().count();
    if count < 2 {
        errors.push(ValidationError::new(
            field,
            "Signature must be at least 2 characters",
            ErrorCode::InvalidLength,
        ));
    }
    check_max_chars(errors, field, value, 200, "Signature");
}
