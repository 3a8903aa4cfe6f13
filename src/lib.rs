//! # Intake SDK
//!
//! Validation and submission pipeline for Crestline application intake.
//!
//! This crate provides:
//!
//! - Typed payloads for startup and investor applications
//! - Layered validation (field, cross-field, file, security) with a closed
//!   error-code taxonomy
//! - Defensive text sanitization and spam heuristics
//! - Client-side advisory rate limiting over pluggable storage
//! - HTTP submission with bounded retries and typed outcomes
//!
//! ## Architecture
//!
//! The SDK is designed around the following key abstractions:
//!
//! - `ApplicationService`: Orchestrates validate → throttle → upload → submit
//! - `ApplicationsClient` / `UploadsClient`: Typed clients for the intake API
//! - `StorageProvider`: Client-side key-value storage for rate-limit state
//! - `AnalyticsSink`: Best-effort submission logging
//! - `ServiceError`: Comprehensive error handling system
//! - `ValidationReport`: Accumulated field errors with blocking/advisory split

// Re-export form payloads
pub mod model;
pub use model::{StartupApplication, InvestorApplication, FileUpload, OfferingMode};

// Re-export validation
pub mod validators;
pub use validators::{
    ErrorCode, ValidationError, ValidationReport,
    validate_startup_form, validate_startup_field,
    validate_investor_form, validate_investor_field,
};

// Re-export sanitization and spam detection
pub mod sanitizers;
pub use sanitizers::{SanitizeResult, sanitize_text, sanitize_person_name};
pub mod spam;
pub use spam::{SpamAssessment, detect_potential_spam};

// Re-export error handling
pub mod error;
pub use error::{ServiceError, ErrorContext, Result};

// Re-export resilience patterns
pub mod resilience;
pub use resilience::{RetryConfig, RetryExecutor};

// Re-export configuration management
pub mod config;
pub use config::{ConfigProvider, IntakeConfig};

// Client-side collaborators
pub mod storage;
pub use storage::{StorageProvider, MemoryStorage};
pub mod analytics;
pub use analytics::{AnalyticsSink, NoopAnalytics, SubmissionLogEntry};
pub mod rate_limit;
pub use rate_limit::{RateLimiter, RateLimitDecision};

// Service clients and orchestration
pub mod services;
pub use services::{applications, uploads, ServiceClient};
pub mod pipeline;
pub use pipeline::{ApplicationService, SubmissionOutcome};

// Form progress and real-time validation scheduling
pub mod progress;
pub use progress::{startup_completion_percentage, investor_completion_percentage};
pub mod debounce;
pub use debounce::FieldDebouncer;

#[cfg(test)]
mod tests;
