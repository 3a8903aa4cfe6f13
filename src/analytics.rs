//! Best-effort submission logging
//!
//! Accepted submissions are reported to an `AnalyticsSink`. Sink failures
//! are logged and swallowed so analytics can never break a submission that
//! the server already accepted.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use log::debug;
use serde::Serialize;

use crate::error::Result;

/// One accepted submission, as reported to analytics
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionLogEntry {
    /// Offering kind: "startup", "investor-506b", or "investor-506c"
    pub offering: String,

    /// Identifier assigned by the server
    pub submission_id: String,

    /// When the entry was recorded
    pub submitted_at: DateTime<Utc>,

    /// Sanitized one-line summary, safe to echo into dashboards
    pub summary: String,
}

impl SubmissionLogEntry {
    pub fn new(
        offering: impl Into<String>,
        submission_id: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            offering: offering.into(),
            submission_id: submission_id.into(),
            submitted_at: Utc::now(),
            summary: summary.into(),
        }
    }
}

/// Destination for submission log entries
#[async_trait]
pub trait AnalyticsSink: Send + Sync {
    /// Record one accepted submission
    async fn record_submission(&self, entry: &SubmissionLogEntry) -> Result<()>;
}

/// Sink that drops entries, for embedders without analytics
#[derive(Debug, Default, Clone)]
pub struct NoopAnalytics;

#[async_trait]
impl AnalyticsSink for NoopAnalytics {
    async fn record_submission(&self, entry: &SubmissionLogEntry) -> Result<()> {
        debug!(
            "Dropping submission log entry for {} ({})",
            entry.submission_id, entry.offering
        );
        Ok(())
    }
}
