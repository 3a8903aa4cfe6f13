//! Defensive text cleanup for intake form fields
//!
//! Sanitizers never fail: they take a string and return a cleaned string
//! together with a record of what changed. They run before payloads are
//! built and before any text is echoed into analytics.

pub mod text;

pub use text::*;

/// Sanitization result containing the sanitized content and information
/// about whether changes were made during sanitization
#[derive(Debug, Clone, PartialEq)]
pub struct SanitizeResult<T> {
    /// Sanitized content
    pub sanitized: T,
    /// Whether any changes were made during sanitization
    pub was_modified: bool,
    /// Optional details about what was modified
    pub details: Option<String>,
}

impl<T> SanitizeResult<T> {
    /// Create a new sanitization result
    pub fn new(sanitized: T, was_modified: bool, details: Option<String>) -> Self {
        Self {
            sanitized,
            was_modified,
            details,
        }
    }

    /// Create a result with unmodified content
    pub fn unmodified(content: T) -> Self {
        Self {
            sanitized: content,
            was_modified: false,
            details: None,
        }
    }

    /// Create a result with modified content
    pub fn modified(content: T, details: Option<String>) -> Self {
        Self {
            sanitized: content,
            was_modified: true,
            details,
        }
    }

    /// Map the sanitized content
    pub fn map<U, F>(self, f: F) -> SanitizeResult<U>
    where
        F: FnOnce(T) -> U,
    {
        SanitizeResult {
            sanitized: f(self.sanitized),
            was_modified: self.was_modified,
            details: self.details,
        }
    }
}

/// Run multiple sanitizers in sequence, merging their change details
pub fn chain_sanitizers<T, F>(input: T, sanitizers: Vec<F>) -> SanitizeResult<T>
where
    F: FnOnce(T) -> SanitizeResult<T>,
{
    let mut result = SanitizeResult::unmodified(input);
    let mut all_details = Vec::new();

    for sanitizer in sanitizers {
        let current = sanitizer(result.sanitized);

        result.sanitized = current.sanitized;

        if current.was_modified {
            result.was_modified = true;
            if let Some(details) = current.details {
                all_details.push(details);
            }
        }
    }

    if !all_details.is_empty() {
        result.details = Some(all_details.join("; "));
    }

    result
}
