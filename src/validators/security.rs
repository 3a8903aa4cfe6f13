//! Content security checks for free-text fields
//!
//! The pattern tables are fixed: markup injection, dangerous URL schemes,
//! SQL keyword shapes, and NoSQL operator shapes. A match flags the field
//! with `SUSPICIOUS_CONTENT`. A separate heuristic flags low-vocabulary
//! spam with `REPETITIVE_CONTENT`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::{ErrorCode, ValidationError};

/// Fewer unique words than this share of the total reads as spam
const REPETITION_RATIO: f64 = 0.3;
/// Repetition is only judged past this many words
const REPETITION_MIN_WORDS: usize = 10;

static MARKUP_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)<script",
        r"(?i)</script",
        r"(?i)<iframe",
        r"(?i)<object",
        r"(?i)<embed",
        r"(?i)\bon\w+\s*=",
        r"(?i)javascript:",
        r"(?i)vbscript:",
        r"(?i)data:text/html",
        r"(?i)about:blank",
        r"(?i)file://",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static SQL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [
        r"(?i)UNION\s+SELECT",
        r"(?i);\s*DROP\s+TABLE",
        r"(?i);\s*DELETE\s+FROM",
        r"(?i);\s*INSERT\s+INTO",
        r"(?i)'\s*OR\s*'1'\s*=\s*'1",
        r"(?i)'\s*OR\s*1\s*=\s*1",
        r"(?i)SELECT\s+.*\s+FROM\s+\w+",
    ]
    .iter()
    .map(|p| Regex::new(p).unwrap())
    .collect()
});

static NOSQL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    [r"\{\$", r"\$where:", r"\$ne:", r"\$gt:", r"\$lt:", r"\$regex:"]
        .iter()
        .map(|p| Regex::new(p).unwrap())
        .collect()
});

/// Name of the first pattern category the text matches, if any
pub fn suspicious_category(text: &str) -> Option<&'static str> {
    if MARKUP_PATTERNS.iter().any(|re| re.is_match(text)) {
        return Some("markup injection");
    }
    if SQL_PATTERNS.iter().any(|re| re.is_match(text)) {
        return Some("SQL fragment");
    }
    if NOSQL_PATTERNS.iter().any(|re| re.is_match(text)) {
        return Some("NoSQL operator");
    }
    None
}

/// True when the text repeats a tiny vocabulary over many words
pub fn is_repetitive(text: &str) -> bool {
    let words: Vec<&str> = text.split_whitespace().collect();
    if words.len() <= REPETITION_MIN_WORDS {
        return false;
    }
    let unique: std::collections::HashSet<String> =
        words.iter().map(|w| w.to_lowercase()).collect();
    (unique.len() as f64) / (words.len() as f64) < REPETITION_RATIO
}

/// Flag a field whose value matches a dangerous pattern
pub(crate) fn scan_field(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if let Some(category) = suspicious_category(value) {
        errors.push(ValidationError::new(
            field,
            format!("Content contains a disallowed {}", category),
            ErrorCode::SuspiciousContent,
        ));
    }
}

/// Flag a field whose value reads as repeated filler
pub(crate) fn check_repetition(errors: &mut Vec<ValidationError>, field: &str, value: &str) {
    if is_repetitive(value) {
        errors.push(ValidationError::new(
            field,
            "Content is excessively repetitive",
            ErrorCode::RepetitiveContent,
        ));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_markup_injection() {
        assert_eq!(suspicious_category("hello world"), None);
        assert_eq!(
            suspicious_category("<script>alert(1)</script>"),
            Some("markup injection")
        );
        assert_eq!(
            suspicious_category("<img src=x onerror=alert(1)>"),
            Some("markup injection")
        );
        assert_eq!(suspicious_category("javascript:alert(1)"), Some("markup injection"));
        assert_eq!(suspicious_category("JAVASCRIPT:alert(1)"), Some("markup injection"));
    }

    #[test]
    fn test_sql_fragments() {
        assert_eq!(suspicious_category("1' UNION SELECT password"), Some("SQL fragment"));
        assert_eq!(
            suspicious_category("x'; DROP TABLE applications"),
            Some("SQL fragment")
        );
        assert_eq!(suspicious_category("We select great founders"), None);
    }

    #[test]
    fn test_nosql_operators() {
        assert_eq!(suspicious_category(r#"{"$where:": "code"}"#), Some("NoSQL operator"));
        assert_eq!(suspicious_category("$ne: null"), Some("NoSQL operator"));
        assert_eq!(suspicious_category("We charge $50 per seat"), None);
    }

    #[test]
    fn test_repetition_needs_more_than_ten_words() {
        assert!(!is_repetitive("buy buy buy"));
        assert!(!is_repetitive("buy buy buy buy buy buy buy buy buy buy"));
        assert!(is_repetitive("buy buy buy buy buy buy buy buy buy buy buy"));
    }

    #[test]
    fn test_repetition_ratio() {
        // 11 words, 4 unique: 0.36 is above the cutoff
        assert!(!is_repetitive("one two three four one two three four one two three"));
        // 11 words, 2 unique: 0.18 is below the cutoff
        assert!(is_repetitive("spam ham spam ham spam ham spam ham spam ham spam"));
        let ordinary = "We build developer tooling for payment reconciliation teams at mid-market banks.";
        assert!(!is_repetitive(ordinary));
    }

    #[test]
    fn test_scan_field_pushes_one_finding() {
        let mut errors = Vec::new();
        scan_field(&mut errors, "problem", "<script>alert(1)</script> UNION SELECT x");
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0].code, ErrorCode::SuspiciousContent);
        assert_eq!(errors[0].field, "problem");
    }
}
