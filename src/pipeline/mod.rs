//! Submission orchestrator
//!
//! `ApplicationService` runs the full intake flow for one application:
//! validate the form, consult the client-side rate limiter, upload any
//! attached file, build the wire payload, and POST it with bounded retries.
//! Stages run sequentially; the first stage that cannot proceed produces
//! the outcome and later stages are skipped.
//!
//! Expected failures are data, not errors: callers receive a
//! [`SubmissionOutcome`] they can match on instead of a `Result` that mixes
//! validation findings with transport faults.

use std::future::Future;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use log::{debug, error, info, warn};

use crate::analytics::{AnalyticsSink, NoopAnalytics, SubmissionLogEntry};
use crate::config::{IntakeConfig, ServiceConfig, DEFAULT_PROVIDER};
use crate::error::{Result, ServiceError};
use crate::model::{FileUpload, InvestorApplication, OfferingMode, StartupApplication, StoredFileRef};
use crate::rate_limit::{RateLimitDecision, RateLimiter};
use crate::resilience::{RetryConfig, RetryExecutor};
use crate::sanitizers::safe_preview;
use crate::services::applications::{
    ApplicationsClient, InvestorSubmissionPayload, StartupSubmissionPayload, SubmissionReceipt,
};
use crate::services::uploads::UploadsClient;
use crate::services::ServiceClient;
use crate::storage::{MemoryStorage, StorageProvider};
use crate::validators::{validate_investor_form, validate_startup_form, ValidationError};

/// Longest analytics summary, in characters
const SUMMARY_MAX_CHARS: usize = 80;

/// Retry hint when the server throttles without saying for how long
const DEFAULT_RETRY_AFTER_SECS: u64 = 60;

/// Result of driving one application through the pipeline
///
/// Every expected way a submission can end has its own variant; only faults
/// the caller cannot act on (transport errors after retries, service bugs)
/// surface as `Failed`.
#[derive(Debug)]
pub enum SubmissionOutcome {
    /// The server accepted the application
    Accepted {
        /// Server-assigned submission identifier
        id: String,
        /// Server-side acceptance time
        created_at: DateTime<Utc>,
    },

    /// Validation failed, locally or on the server; nothing was submitted
    /// (or the server refused it) and the findings say why
    Rejected { errors: Vec<ValidationError> },

    /// Throttled, either by the client-side limiter or by the server
    Throttled { retry_after_secs: u64 },

    /// The submission could not be completed
    Failed { error: ServiceError },
}

impl SubmissionOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, SubmissionOutcome::Accepted { .. })
    }

    /// Server-assigned identifier, when accepted
    pub fn submission_id(&self) -> Option<&str> {
        match self {
            SubmissionOutcome::Accepted { id, .. } => Some(id),
            _ => None,
        }
    }
}

/// Builder for [`ApplicationService`]
///
/// Starts from default configuration with in-memory rate-limit storage and
/// no analytics; embedders swap in their own collaborators as needed.
pub struct ApplicationServiceBuilder {
    config: IntakeConfig,
    storage: Option<Arc<dyn StorageProvider>>,
    analytics: Option<Arc<dyn AnalyticsSink>>,
    retry_config: Option<RetryConfig>,
}

impl Default for ApplicationServiceBuilder {
    fn default() -> Self {
        Self {
            config: IntakeConfig::default(),
            storage: None,
            analytics: None,
            retry_config: None,
        }
    }
}

impl ApplicationServiceBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole configuration
    pub fn config(mut self, config: IntakeConfig) -> Self {
        self.config = config;
        self
    }

    /// Storage backing the rate limiter's submission history
    pub fn storage(mut self, storage: Arc<dyn StorageProvider>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Sink receiving accepted-submission log entries
    pub fn analytics(mut self, analytics: Arc<dyn AnalyticsSink>) -> Self {
        self.analytics = Some(analytics);
        self
    }

    /// Override the retry policy derived from the configuration
    pub fn retry_config(mut self, retry_config: RetryConfig) -> Self {
        self.retry_config = Some(retry_config);
        self
    }

    /// Build the service, validating the configuration
    pub fn build(self) -> Result<ApplicationService> {
        self.config.validate()?;

        let applications = Arc::new(ApplicationsClient::new(self.config.clone())?);
        let uploads = UploadsClient::new(self.config.clone())?;

        let storage = self
            .storage
            .unwrap_or_else(|| Arc::new(MemoryStorage::new()));
        let rate_limiter = RateLimiter::new(storage).with_limits(
            self.config.rate_limit_window_secs,
            self.config.rate_limit_max_submissions,
        );

        let analytics = self.analytics.unwrap_or_else(|| Arc::new(NoopAnalytics));

        let retry_config = self
            .retry_config
            .unwrap_or_else(|| self.config.retry_config());

        Ok(ApplicationService {
            applications,
            uploads,
            rate_limiter,
            analytics,
            retry: RetryExecutor::new(retry_config),
        })
    }
}

/// End-to-end intake pipeline for startup and investor applications
pub struct ApplicationService {
    applications: Arc<ApplicationsClient>,
    uploads: UploadsClient,
    rate_limiter: RateLimiter,
    analytics: Arc<dyn AnalyticsSink>,
    retry: RetryExecutor,
}

impl ApplicationService {
    /// Start building a service
    pub fn builder() -> ApplicationServiceBuilder {
        ApplicationServiceBuilder::new()
    }

    /// Create a service with the given configuration and default collaborators
    pub fn new(config: IntakeConfig) -> Result<Self> {
        Self::builder().config(config).build()
    }

    /// Create a service configured from `CRESTLINE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let config = IntakeConfig::from_provider(&**DEFAULT_PROVIDER)?;
        Self::new(config)
    }

    /// Submit a startup application
    ///
    /// Runs validation, the rate limiter, the optional deck upload, and the
    /// submission POST in order. The first stage that cannot proceed decides
    /// the outcome.
    pub async fn submit_startup(&self, form: &StartupApplication) -> SubmissionOutcome {
        let report = validate_startup_form(form);
        if !report.is_valid {
            debug!(
                "Startup application blocked by {} validation finding(s)",
                report.errors.len()
            );
            return SubmissionOutcome::Rejected {
                errors: report.errors,
            };
        }

        if let Some(outcome) = self.check_rate_limit().await {
            return outcome;
        }

        let deck_file = match self.upload_attachment(form.deck_file.as_ref(), false).await {
            Ok(stored) => stored,
            Err(error) => return SubmissionOutcome::Failed { error },
        };

        let payload = StartupSubmissionPayload::from_form(form, deck_file);
        let summary = safe_preview(&form.company_name, SUMMARY_MAX_CHARS);

        let client = Arc::clone(&self.applications);
        let payload = Arc::new(payload);
        self.post_and_record("startup", summary, move || {
            let client = Arc::clone(&client);
            let payload = Arc::clone(&payload);
            async move { client.submit_startup(&payload).await }
        })
        .await
    }

    /// Submit an investor application
    ///
    /// For 506(c) applications an attached verification document is uploaded
    /// under the stricter verification rules before the main call.
    pub async fn submit_investor(&self, form: &InvestorApplication) -> SubmissionOutcome {
        let report = validate_investor_form(form);
        if !report.is_valid {
            debug!(
                "Investor application blocked by {} validation finding(s)",
                report.errors.len()
            );
            return SubmissionOutcome::Rejected {
                errors: report.errors,
            };
        }

        if let Some(outcome) = self.check_rate_limit().await {
            return outcome;
        }

        let verification = if form.mode == OfferingMode::Rule506c {
            form.verification_file.as_ref()
        } else {
            None
        };
        let verification_file = match self.upload_attachment(verification, true).await {
            Ok(stored) => stored,
            Err(error) => return SubmissionOutcome::Failed { error },
        };

        let payload = InvestorSubmissionPayload::from_form(form, verification_file);
        let offering = format!("investor-{}", form.mode.as_str());
        let summary = safe_preview(&form.full_name, SUMMARY_MAX_CHARS);

        let client = Arc::clone(&self.applications);
        let payload = Arc::new(payload);
        self.post_and_record(&offering, summary, move || {
            let client = Arc::clone(&client);
            let payload = Arc::clone(&payload);
            async move { client.submit_investor(&payload).await }
        })
        .await
    }

    /// Upload a general attachment through the uploads service
    pub async fn upload_file(&self, file: &FileUpload) -> Result<StoredFileRef> {
        self.uploads.upload_file(file).await
    }

    /// Upload an accreditation verification document
    pub async fn upload_verification_document(&self, file: &FileUpload) -> Result<StoredFileRef> {
        self.uploads.upload_verification_document(file).await
    }

    /// Clear the rate limiter's recorded submission history
    pub async fn reset_rate_limit(&self) {
        self.rate_limiter.reset().await;
    }

    async fn check_rate_limit(&self) -> Option<SubmissionOutcome> {
        match self.rate_limiter.check_and_record().await {
            RateLimitDecision::Allowed => None,
            RateLimitDecision::Limited { retry_after_secs } => {
                info!(
                    "Submission throttled client-side, retry in {}s",
                    retry_after_secs
                );
                Some(SubmissionOutcome::Throttled { retry_after_secs })
            }
        }
    }

    /// Upload the attachment, if any, aborting the submission on failure
    async fn upload_attachment(
        &self,
        file: Option<&FileUpload>,
        verification: bool,
    ) -> Result<Option<StoredFileRef>> {
        let Some(file) = file else {
            return Ok(None);
        };

        let uploaded = if verification {
            self.uploads.upload_verification_document(file).await
        } else {
            self.uploads.upload_file(file).await
        };

        match uploaded {
            Ok(stored) => Ok(Some(stored)),
            Err(err) => {
                warn!("Attachment upload failed, submission aborted: {}", err);
                Err(err)
            }
        }
    }

    /// POST the payload with retries and turn the result into an outcome
    async fn post_and_record<F, Fut>(
        &self,
        offering: &str,
        summary: String,
        submit: F,
    ) -> SubmissionOutcome
    where
        F: Fn() -> Fut + Send + Sync + Clone + 'static,
        Fut: Future<Output = Result<SubmissionReceipt>> + Send + 'static,
    {
        match self.retry.execute(submit).await {
            Ok(receipt) => {
                info!("Submission {} accepted as {}", offering, receipt.id);
                self.record_submission(offering, &receipt, summary).await;
                SubmissionOutcome::Accepted {
                    id: receipt.id,
                    created_at: receipt.created_at,
                }
            }
            Err(error) => Self::failure_outcome(error),
        }
    }

    /// Map a terminal submission error onto the matching outcome
    fn failure_outcome(error: ServiceError) -> SubmissionOutcome {
        if let Some(errors) = error.rejection_errors() {
            return SubmissionOutcome::Rejected {
                errors: errors.to_vec(),
            };
        }

        if error.is_rate_limited() {
            let retry_after_secs = error.retry_after_secs().unwrap_or(DEFAULT_RETRY_AFTER_SECS);
            return SubmissionOutcome::Throttled { retry_after_secs };
        }

        error!("Submission failed: {}", error);
        SubmissionOutcome::Failed { error }
    }

    /// Report an accepted submission to analytics; failures never bubble up
    async fn record_submission(
        &self,
        offering: &str,
        receipt: &SubmissionReceipt,
        summary: String,
    ) {
        let entry = SubmissionLogEntry::new(offering, &receipt.id, summary);
        if let Err(err) = self.analytics.record_submission(&entry).await {
            warn!("Failed to record submission log entry: {}", err);
        }
    }
}

impl std::fmt::Debug for ApplicationService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationService")
            .field("base_url", &self.applications.base_url())
            .finish()
    }
}
