//! Investor application form state

use std::fmt;

use serde::{Deserialize, Serialize};

use super::file::FileUpload;

/// Offering exemption the application is made under
///
/// 506(b) allows self-certified accreditation; 506(c) requires verified
/// accreditation and collects the extra verification fields.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum OfferingMode {
    #[serde(rename = "506b")]
    Rule506b,
    #[serde(rename = "506c")]
    Rule506c,
}

impl OfferingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            OfferingMode::Rule506b => "506b",
            OfferingMode::Rule506c => "506c",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "506b" => Some(OfferingMode::Rule506b),
            "506c" => Some(OfferingMode::Rule506c),
            _ => None,
        }
    }
}

impl Default for OfferingMode {
    fn default() -> Self {
        OfferingMode::Rule506b
    }
}

impl fmt::Display for OfferingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Investor classification options
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum InvestorType {
    Individual,
    FamilyOffice,
    Institutional,
    Other,
}

impl InvestorType {
    pub const ALL: [InvestorType; 4] = [
        InvestorType::Individual,
        InvestorType::FamilyOffice,
        InvestorType::Institutional,
        InvestorType::Other,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InvestorType::Individual => "individual",
            InvestorType::FamilyOffice => "family-office",
            InvestorType::Institutional => "institutional",
            InvestorType::Other => "other",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for InvestorType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Self-reported accreditation status
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum AccreditationStatus {
    Yes,
    No,
    Unsure,
}

impl AccreditationStatus {
    pub const ALL: [AccreditationStatus; 3] = [
        AccreditationStatus::Yes,
        AccreditationStatus::No,
        AccreditationStatus::Unsure,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AccreditationStatus::Yes => "yes",
            AccreditationStatus::No => "no",
            AccreditationStatus::Unsure => "unsure",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for AccreditationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Check size bands, smallest first
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum CheckSize {
    #[serde(rename = "25k-50k")]
    K25To50,
    #[serde(rename = "50k-100k")]
    K50To100,
    #[serde(rename = "100k-250k")]
    K100To250,
    #[serde(rename = "250k-500k")]
    K250To500,
    #[serde(rename = "500k-plus")]
    K500Plus,
}

impl CheckSize {
    pub const ALL: [CheckSize; 5] = [
        CheckSize::K25To50,
        CheckSize::K50To100,
        CheckSize::K100To250,
        CheckSize::K250To500,
        CheckSize::K500Plus,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            CheckSize::K25To50 => "25k-50k",
            CheckSize::K50To100 => "50k-100k",
            CheckSize::K100To250 => "100k-250k",
            CheckSize::K250To500 => "250k-500k",
            CheckSize::K500Plus => "500k-plus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }

    /// The smallest band offered on the form
    pub fn smallest() -> Self {
        CheckSize::K25To50
    }
}

impl fmt::Display for CheckSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// How 506(c) accreditation will be verified
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub enum VerificationMethod {
    /// Letter from a CPA, attorney, or registered adviser
    Letter,
    /// Third-party verification provider
    ThirdParty,
    /// Bank or brokerage statements
    BankBrokerage,
}

impl VerificationMethod {
    pub const ALL: [VerificationMethod; 3] = [
        VerificationMethod::Letter,
        VerificationMethod::ThirdParty,
        VerificationMethod::BankBrokerage,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            VerificationMethod::Letter => "letter",
            VerificationMethod::ThirdParty => "third-party",
            VerificationMethod::BankBrokerage => "bank-brokerage",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|v| v.as_str() == value)
    }
}

impl fmt::Display for VerificationMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Areas of interest offered on the investor form
pub const AREAS_OF_INTEREST: [&str; 8] = [
    "pre-seed",
    "seed",
    "series-a",
    "fintech",
    "healthcare",
    "enterprise-ai",
    "consumer",
    "climate",
];

/// Raw state of the investor application form
///
/// The `mode` tab decides which fields are required: 506(c) additionally
/// collects verification method, entity name, jurisdiction, and an optional
/// verification document. 506(c) with accreditation "no" is rejected
/// outright.
#[derive(Debug, Clone, Default)]
pub struct InvestorApplication {
    /// Offering exemption selected on the form
    pub mode: OfferingMode,

    /// Investor's full name
    pub full_name: String,

    /// Contact email
    pub email: String,

    /// Country of residence, ISO 3166-1 alpha-2
    pub country: String,

    /// State or region, required for US, CA, and AU
    pub state: String,

    /// Investor classification, one of `InvestorType`
    pub investor_type: String,

    /// Accreditation status, one of `AccreditationStatus`
    pub accreditation_status: String,

    /// Expected check size, one of `CheckSize`
    pub check_size: String,

    /// Selected areas of interest, each from `AREAS_OF_INTEREST`
    pub areas_of_interest: Vec<String>,

    /// How accreditation will be verified, one of `VerificationMethod` (506(c) only)
    pub verification_method: String,

    /// Verification document selected in the picker (506(c) letter method)
    pub verification_file: Option<FileUpload>,

    /// Legal entity name the investment would be made through (506(c) only)
    pub entity_name: String,

    /// Jurisdiction of the entity (506(c) only)
    pub jurisdiction: String,

    /// Custodian or broker details (506(c), optional)
    pub custodian_info: String,

    /// Consent to be contacted about offerings
    pub consent_confirm: bool,

    /// Typed signature
    pub signature: String,
}
