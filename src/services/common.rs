//! Common utilities for the intake clients
//!
//! This module provides shared functionality for all service clients.

use std::fmt;
use std::time::Duration;

use log::warn;
use reqwest::{header, Client};
use serde::Deserialize;
use uuid::Uuid;

use crate::error::{ErrorContext, Result, ServiceError};

/// Header carrying the per-request correlation id
pub const REQUEST_ID_HEADER: &str = "X-Request-Id";

/// Response body of the intake API's health endpoint
#[derive(Debug, Clone, Deserialize)]
pub struct HealthResponse {
    pub status: String,
}

/// UserAgent structure for identifying the client to the intake API
#[derive(Debug, Clone)]
pub struct UserAgent {
    /// Application name
    pub app_name: String,

    /// Version string
    pub version: String,

    /// Optional extra info
    pub extra: Option<String>,
}

impl Default for UserAgent {
    fn default() -> Self {
        Self {
            app_name: "Crestline-Intake".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            extra: Some("intake-sdk".to_string()),
        }
    }
}

impl fmt::Display for UserAgent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.app_name, self.version)?;

        if let Some(ref extra) = self.extra {
            write!(f, " ({})", extra)?;
        }

        Ok(())
    }
}

/// Build a standard HTTP client with default settings
pub fn build_http_client(
    user_agent: Option<UserAgent>,
    timeout: Option<Duration>,
) -> Result<Client> {
    let mut headers = header::HeaderMap::new();
    let ua = user_agent.unwrap_or_default().to_string();

    headers.insert(
        header::USER_AGENT,
        header::HeaderValue::from_str(&ua)
            .map_err(|e| ServiceError::configuration(format!("Invalid user agent: {}", e)))?,
    );

    let client = reqwest::Client::builder()
        .default_headers(headers)
        .timeout(timeout.unwrap_or_else(|| Duration::from_secs(30)))
        .gzip(true)
        .build()
        .map_err(|e| ServiceError::configuration(format!("Failed to build HTTP client: {}", e)))?;

    Ok(client)
}

/// Fresh correlation id for one submission attempt
pub fn new_request_id() -> String {
    Uuid::new_v4().to_string()
}

/// Probe the health endpoint under `base_url`
///
/// Transport failures and unreadable bodies report unhealthy rather than
/// erroring.
pub async fn check_health(http_client: &Client, base_url: &str) -> Result<bool> {
    let url = format!("{}/health", base_url);

    let response = match http_client.get(&url).send().await {
        Ok(response) => response,
        Err(err) => {
            warn!("Health check request failed: {}", err);
            return Ok(false);
        }
    };

    if !response.status().is_success() {
        warn!("Health check returned {}", response.status());
        return Ok(false);
    }

    match response.json::<HealthResponse>().await {
        Ok(health) => Ok(health.status.eq_ignore_ascii_case("ok")),
        Err(err) => {
            warn!("Health check body unreadable: {}", err);
            Ok(false)
        }
    }
}

/// Create error context for HTTP requests
pub fn create_error_context(
    service_name: &str,
    status: Option<reqwest::StatusCode>,
) -> ErrorContext {
    let mut context = ErrorContext::for_service(service_name);

    if let Some(status_code) = status {
        context = context.status_code(status_code.as_u16());
    }

    context
}

/// Parse error response from HTTP response
pub async fn parse_error_response(
    service_name: &str,
    endpoint: &str,
    request_id: &str,
    response: reqwest::Response,
) -> ServiceError {
    let status = response.status();
    let mut context = create_error_context(service_name, Some(status))
        .endpoint(endpoint)
        .request_id(request_id);

    let retry_after = crate::error::mapping::retry_after_from_headers(response.headers());

    let body = match response.text().await {
        Ok(body) => body,
        Err(e) => format!("Failed to read error response: {}", e),
    };

    let error = crate::error::mapping::map_intake_error(status, &body, &mut context);

    // A Retry-After header wins over a body hint
    let error = match (error, retry_after) {
        (ServiceError::RateLimited { message, .. }, Some(secs)) => {
            ServiceError::rate_limited(message, Some(secs))
        }
        (error, _) => error,
    };

    error.with_context(context)
}
