//! Layered validation for intake form payloads
//!
//! Validation is pure and deterministic: every rule is a function of the
//! form snapshot, all violated rules are reported together, and nothing
//! here performs I/O. Field errors carry a code from the closed taxonomy
//! below; the server speaks the same codes on terminal rejections.

use std::fmt;

use serde::{Deserialize, Serialize};

pub mod common;
pub mod startup;
pub mod investor;
pub mod file;
pub mod security;

pub use startup::{validate_startup_form, validate_startup_field};
pub use investor::{validate_investor_form, validate_investor_field};
pub use file::{validate_deck_file, validate_verification_file};

/// Closed set of validation error codes
///
/// The set is shared with the intake API; codes serialize in
/// SCREAMING_SNAKE_CASE on the wire.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    // Structural
    RequiredField,
    InvalidFormat,
    MaxLength,
    InvalidLength,

    // Enumerations
    InvalidCountry,
    InvalidState,
    InvalidInvestorType,
    InvalidAccreditationStatus,
    InvalidCheckSize,
    InvalidVerificationMethod,
    InvalidAreasOfInterest,

    // Files
    FileTooLarge,
    FileTooSmall,
    EmptyFile,
    InvalidFileType,
    InvalidFileExtension,
    SuspiciousFilename,
    FilenameTooLong,
    HiddenFile,
    InvalidFilename,

    // Content security
    SuspiciousContent,
    RepetitiveContent,

    // Business and regulatory
    AccreditationRequired,
    BusinessLogicMismatch,
    RestrictedJurisdiction,
    JurisdictionMismatch,
    JurisdictionInsufficient,
    EntityNameInsufficient,
    VerificationFileRequired,

    // Operational
    RateLimited,
    SubmissionError,
    NetworkError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorCode::RequiredField => "REQUIRED_FIELD",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::MaxLength => "MAX_LENGTH",
            ErrorCode::InvalidLength => "INVALID_LENGTH",
            ErrorCode::InvalidCountry => "INVALID_COUNTRY",
            ErrorCode::InvalidState => "INVALID_STATE",
            ErrorCode::InvalidInvestorType => "INVALID_INVESTOR_TYPE",
            ErrorCode::InvalidAccreditationStatus => "INVALID_ACCREDITATION_STATUS",
            ErrorCode::InvalidCheckSize => "INVALID_CHECK_SIZE",
            ErrorCode::InvalidVerificationMethod => "INVALID_VERIFICATION_METHOD",
            ErrorCode::InvalidAreasOfInterest => "INVALID_AREAS_OF_INTEREST",
            ErrorCode::FileTooLarge => "FILE_TOO_LARGE",
            ErrorCode::FileTooSmall => "FILE_TOO_SMALL",
            ErrorCode::EmptyFile => "EMPTY_FILE",
            ErrorCode::InvalidFileType => "INVALID_FILE_TYPE",
            ErrorCode::InvalidFileExtension => "INVALID_FILE_EXTENSION",
            ErrorCode::SuspiciousFilename => "SUSPICIOUS_FILENAME",
            ErrorCode::FilenameTooLong => "FILENAME_TOO_LONG",
            ErrorCode::HiddenFile => "HIDDEN_FILE",
            ErrorCode::InvalidFilename => "INVALID_FILENAME",
            ErrorCode::SuspiciousContent => "SUSPICIOUS_CONTENT",
            ErrorCode::RepetitiveContent => "REPETITIVE_CONTENT",
            ErrorCode::AccreditationRequired => "ACCREDITATION_REQUIRED",
            ErrorCode::BusinessLogicMismatch => "BUSINESS_LOGIC_MISMATCH",
            ErrorCode::RestrictedJurisdiction => "RESTRICTED_JURISDICTION",
            ErrorCode::JurisdictionMismatch => "JURISDICTION_MISMATCH",
            ErrorCode::JurisdictionInsufficient => "JURISDICTION_INSUFFICIENT",
            ErrorCode::EntityNameInsufficient => "ENTITY_NAME_INSUFFICIENT",
            ErrorCode::VerificationFileRequired => "VERIFICATION_FILE_REQUIRED",
            ErrorCode::RateLimited => "RATE_LIMITED",
            ErrorCode::SubmissionError => "SUBMISSION_ERROR",
            ErrorCode::NetworkError => "NETWORK_ERROR",
        }
    }

    /// Advisory codes flag the submission for review but do not fail it
    pub fn is_advisory(&self) -> bool {
        matches!(
            self,
            ErrorCode::BusinessLogicMismatch | ErrorCode::RestrictedJurisdiction
        )
    }

    /// Blocking codes make a report invalid
    pub fn is_blocking(&self) -> bool {
        !self.is_advisory()
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single validation finding on a field
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationError {
    /// Form field the error applies to
    pub field: String,

    /// Human-readable message for display next to the field
    pub message: String,

    /// Code from the closed taxonomy
    pub code: ErrorCode,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>, code: ErrorCode) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
            code,
        }
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {} ({})", self.field, self.message, self.code)
    }
}

/// Outcome of validating a whole form
///
/// `is_valid` is true iff no blocking error is present; advisory findings
/// may still appear in `errors`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ValidationReport {
    pub is_valid: bool,
    pub errors: Vec<ValidationError>,
}

impl ValidationReport {
    /// Report with no findings
    pub fn valid() -> Self {
        Self {
            is_valid: true,
            errors: Vec::new(),
        }
    }

    /// Build a report from accumulated findings
    pub fn from_errors(errors: Vec<ValidationError>) -> Self {
        let is_valid = !errors.iter().any(|e| e.code.is_blocking());
        Self { is_valid, errors }
    }

    /// Findings for one field
    pub fn errors_for(&self, field: &str) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.field == field).collect()
    }

    /// Findings that fail the form
    pub fn blocking_errors(&self) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.code.is_blocking()).collect()
    }

    /// Findings surfaced for review only
    pub fn advisory_errors(&self) -> Vec<&ValidationError> {
        self.errors.iter().filter(|e| e.code.is_advisory()).collect()
    }

    /// True when a specific code was reported
    pub fn has_code(&self, code: ErrorCode) -> bool {
        self.errors.iter().any(|e| e.code == code)
    }
}
