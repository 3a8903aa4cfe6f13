//! Typed form payloads for the intake pipeline
//!
//! These structs hold raw form state as entered in a UI layer: free-text
//! fields stay `String` (empty string means "not filled in") and select
//! fields are checked against their enum's allowed set during validation
//! rather than panicking on parse. The enums themselves are used when
//! building wire payloads.

pub mod startup;
pub mod investor;
pub mod file;

pub use startup::{
    StartupApplication, StartupStage, Industry, TractionLevel, RaiseAmount, RevenueBand,
};
pub use investor::{
    InvestorApplication, OfferingMode, InvestorType, AccreditationStatus, CheckSize,
    VerificationMethod,
};
pub use file::{FileUpload, FilePurpose, StoredFileRef};
