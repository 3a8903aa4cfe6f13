//! Typed clients for the intake API
//!
//! This module contains the HTTP clients the pipeline drives: one for
//! application submission and one for file upload targets. Both expose the
//! [`ServiceClient`] surface for callers that only need identity and
//! liveness.

use async_trait::async_trait;

use crate::error::Result;

pub mod applications;
pub mod uploads;
mod common;

pub use common::{HealthResponse, UserAgent};

/// Base trait for the intake API clients
#[async_trait]
pub trait ServiceClient: Send + Sync {
    /// The client name, as used in logs and error context
    fn name(&self) -> &str;

    /// The base URL for the service
    fn base_url(&self) -> &str;

    /// Health check for the service
    async fn health_check(&self) -> Result<bool>;
}
