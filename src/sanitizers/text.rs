//! String sanitizers for free-text intake fields
//!
//! `sanitize_text` is the standard pass applied to narrative fields before a
//! payload is built. The field-specific variants keep a narrower character
//! set for names and jurisdictions.

use once_cell::sync::Lazy;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

use super::{chain_sanitizers, SanitizeResult};

/// Hard ceiling applied after all other steps
pub const MAX_TEXT_LENGTH: usize = 10_000;

static CONTROL_CHARS_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[\x00-\x08\x0B\x0C\x0E-\x1F\x7F]").unwrap());

static WHITESPACE_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").unwrap());

/// Tag tokens, inline event handlers, and executable URL schemes.
/// The tag pattern tolerates an unterminated tag so a trailing `<script`
/// fragment is still removed.
static MARKUP_REMOVAL_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)<\s*/?\s*(script|iframe|object|embed|style|link|meta|form)\b[^>]*>?")
            .unwrap(),
        Regex::new(r#"(?i)\bon\w+\s*=\s*(?:"[^"]*"|'[^']*'|[^\s>]+)"#).unwrap(),
        Regex::new(r"(?i)(?:javascript|vbscript)\s*:").unwrap(),
        Regex::new(r"(?i)data:text/html").unwrap(),
    ]
});

/// Injection fragments with no place in narrative text
static QUERY_FRAGMENT_PATTERNS: Lazy<Vec<Regex>> = Lazy::new(|| {
    vec![
        Regex::new(r"(?i)\bunion\s+select\b").unwrap(),
        Regex::new(r"(?i);\s*drop\s+table\b").unwrap(),
        Regex::new(r"(?i);\s*delete\s+from\b").unwrap(),
        Regex::new(r"(?i);\s*insert\s+into\b").unwrap(),
        Regex::new(r"(?i)'\s*or\s*'?1'?\s*=\s*'?1").unwrap(),
        Regex::new(r#"\{\s*"?\$(?:where|ne|gt|lt|regex)\b[^}]*\}?"#).unwrap(),
        Regex::new(r#""?\$(?:where|ne|gt|lt|regex)"?\s*:"#).unwrap(),
    ]
});

/// Remove control characters from a string
pub fn remove_control_chars(input: &str) -> SanitizeResult<String> {
    let sanitized = CONTROL_CHARS_REGEX.replace_all(input, "").to_string();

    if sanitized == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(sanitized, Some("Removed control characters".to_string()))
    }
}

/// Normalize Unicode text (NFC form)
pub fn normalize_unicode(input: &str) -> SanitizeResult<String> {
    let normalized = input.nfc().collect::<String>();

    if normalized == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(
            normalized,
            Some("Normalized Unicode characters".to_string()),
        )
    }
}

/// Collapse whitespace runs into single spaces and trim the ends
pub fn collapse_whitespace(input: &str) -> SanitizeResult<String> {
    let collapsed = WHITESPACE_REGEX.replace_all(input, " ");
    let result = collapsed.trim().to_string();

    if result == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(result, Some("Collapsed whitespace".to_string()))
    }
}

/// Remove markup tags, event handler attributes, and executable schemes
pub fn remove_dangerous_markup(input: &str) -> SanitizeResult<String> {
    let mut result = input.to_string();
    for pattern in MARKUP_REMOVAL_PATTERNS.iter() {
        result = pattern.replace_all(&result, "").to_string();
    }

    if result == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(result, Some("Removed markup".to_string()))
    }
}

/// Remove SQL and NoSQL injection fragments
pub fn remove_query_fragments(input: &str) -> SanitizeResult<String> {
    let mut result = input.to_string();
    for pattern in QUERY_FRAGMENT_PATTERNS.iter() {
        result = pattern.replace_all(&result, "").to_string();
    }

    if result == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(result, Some("Removed query fragments".to_string()))
    }
}

/// Limit string length to a maximum number of characters
pub fn limit_length(input: &str, max_length: usize) -> SanitizeResult<String> {
    if input.chars().count() <= max_length {
        SanitizeResult::unmodified(input.to_string())
    } else {
        let truncated = input.chars().take(max_length).collect::<String>();
        SanitizeResult::modified(
            truncated,
            Some(format!("Truncated to {} characters", max_length)),
        )
    }
}

/// Standard cleanup pass for free-text fields
///
/// Order matters: markup is removed before whitespace collapse so that gaps
/// left by stripped tags do not survive as double spaces.
pub fn sanitize_text(input: &str) -> SanitizeResult<String> {
    let sanitizers: Vec<Box<dyn FnOnce(String) -> SanitizeResult<String>>> = vec![
        Box::new(|s| remove_control_chars(&s)),
        Box::new(|s| normalize_unicode(&s)),
        Box::new(|s| remove_dangerous_markup(&s)),
        Box::new(|s| remove_query_fragments(&s)),
        Box::new(|s| collapse_whitespace(&s)),
        Box::new(|s| limit_length(&s, MAX_TEXT_LENGTH)),
    ];

    chain_sanitizers(input.to_string(), sanitizers)
}

/// Restrict a person name to letters, spaces, hyphens, apostrophes, periods
pub fn sanitize_person_name(input: &str) -> SanitizeResult<String> {
    let filtered: String = input
        .chars()
        .filter(|c| c.is_alphabetic() || matches!(c, ' ' | '-' | '\'' | '.'))
        .collect();
    let collapsed = collapse_whitespace(&filtered);

    if collapsed.sanitized == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(
            collapsed.sanitized,
            Some("Removed characters not valid in a name".to_string()),
        )
    }
}

/// Restrict a jurisdiction value to letters, spaces, and hyphens
pub fn sanitize_jurisdiction(input: &str) -> SanitizeResult<String> {
    let filtered: String = input
        .chars()
        .filter(|c| c.is_alphabetic() || matches!(c, ' ' | '-'))
        .collect();
    let collapsed = collapse_whitespace(&filtered);

    if collapsed.sanitized == input {
        SanitizeResult::unmodified(input.to_string())
    } else {
        SanitizeResult::modified(
            collapsed.sanitized,
            Some("Removed characters not valid in a jurisdiction".to_string()),
        )
    }
}

/// Short sanitized excerpt safe to echo into logs and analytics
pub fn safe_preview(input: &str, max_chars: usize) -> String {
    let cleaned = sanitize_text(input).sanitized;
    if cleaned.chars().count() <= max_chars {
        cleaned
    } else {
        let mut preview: String = cleaned.chars().take(max_chars).collect();
        preview.push_str("...");
        preview
    }
}
