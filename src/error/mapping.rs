//! Error mapping for the intake API
//!
//! This module provides mapping functions to convert intake API
//! error responses to our normalized ServiceError type.

use reqwest::StatusCode;
use serde_json::Value;

use super::{ErrorContext, ServiceError};
use crate::validators::ValidationError;

/// Map an intake API error response to a ServiceError
///
/// A 400 carrying a structured `errors` array becomes a terminal
/// `Rejected`; 429 becomes `RateLimited` with the server's retry hint;
/// 5xx become retryable `Service` errors.
pub fn map_intake_error(
    status: StatusCode,
    body: &str,
    context: &mut ErrorContext,
) -> ServiceError {
    context.status_code = Some(status.as_u16());

    let json = serde_json::from_str::<Value>(body).ok();

    let message = json
        .as_ref()
        .and_then(|j| {
            j.get("message")
                .or_else(|| j.get("error"))
                .and_then(|m| m.as_str())
        })
        .map(|s| s.to_string())
        .unwrap_or_else(|| fallback_message(status, body));

    match status {
        StatusCode::BAD_REQUEST => {
            if let Some(errors) = json.as_ref().and_then(parse_rejection_errors) {
                ServiceError::rejected(errors)
            } else {
                ServiceError::validation(message)
            }
        }
        StatusCode::TOO_MANY_REQUESTS => {
            let retry_after = json.as_ref().and_then(parse_retry_after);
            ServiceError::rate_limited(message, retry_after)
        }
        StatusCode::NOT_FOUND => ServiceError::not_found(message),
        StatusCode::REQUEST_TIMEOUT => ServiceError::timeout(message),
        _ => ServiceError::service(message),
    }
}

/// Extract the structured field errors from a rejection body, if present
fn parse_rejection_errors(json: &Value) -> Option<Vec<ValidationError>> {
    let raw = json.get("errors")?.as_array()?;
    let errors: Vec<ValidationError> = raw
        .iter()
        .filter_map(|entry| serde_json::from_value(entry.clone()).ok())
        .collect();
    if errors.is_empty() {
        None
    } else {
        Some(errors)
    }
}

/// Extract the retry hint from a throttle body, if present
fn parse_retry_after(json: &Value) -> Option<u64> {
    json.get("retryAfterSeconds")
        .or_else(|| json.get("retry_after_seconds"))
        .and_then(|v| v.as_u64())
}

/// Extract the retry hint from response headers, if present
pub fn retry_after_from_headers(headers: &reqwest::header::HeaderMap) -> Option<u64> {
    headers
        .get(reqwest::header::RETRY_AFTER)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok())
}

fn fallback_message(status: StatusCode, body: &str) -> String {
    if body.is_empty() {
        status.to_string()
    } else if body.len() > 100 {
        format!("{}: {:.100}...", status, body)
    } else {
        format!("{}: {}", status, body)
    }
}

/// Helper function to classify HTTP errors by category
pub fn classify_http_error(status: StatusCode) -> &'static str {
    match status.as_u16() {
        400 => "validation",
        401 => "authentication",
        403 => "authorization",
        404 => "not_found",
        408 => "timeout",
        429 => "rate_limit",
        500..=599 => "server",
        _ => "unknown",
    }
}

/// Determine if an HTTP status code indicates a retryable error
pub fn is_retryable_status(status: StatusCode) -> bool {
    match status.as_u16() {
        408 | 429 | 500 | 502 | 503 | 504 => true,
        _ => false,
    }
}
