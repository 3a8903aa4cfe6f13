//! Wire types for the application submission endpoints
//!
//! Payload structs mirror the intake API's JSON contract (camelCase keys,
//! optional sections omitted entirely). Building a payload from a form is a
//! renaming and sanitization step only; validation has already happened.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::model::file::StoredFileRef;
use crate::model::investor::{InvestorApplication, OfferingMode};
use crate::model::startup::StartupApplication;
use crate::sanitizers::{sanitize_jurisdiction, sanitize_person_name, sanitize_text};

fn clean(value: &str) -> String {
    sanitize_text(value).sanitized
}

fn optional(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Startup application as posted to `applications/startup`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartupSubmissionPayload {
    pub full_name: String,
    pub email: String,
    pub phone: String,
    pub role: String,
    pub company_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub linkedin: Option<String>,
    pub stage: String,
    pub industry: String,
    pub one_liner: String,
    pub problem: String,
    pub solution: String,
    pub traction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub revenue: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_file: Option<StoredFileRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub deck_link: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub video_url: Option<String>,
    pub raise_amount: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub previously_raised: Option<String>,
    pub accuracy_confirm: bool,
    pub understanding_confirm: bool,
    pub signature: String,
    pub submitted_at: DateTime<Utc>,
}

impl StartupSubmissionPayload {
    /// Build the wire payload from a validated form
    ///
    /// `deck_file` is the stored reference when a deck was uploaded first;
    /// the form's raw bytes never travel with the submission itself.
    pub fn from_form(form: &StartupApplication, deck_file: Option<StoredFileRef>) -> Self {
        Self {
            full_name: sanitize_person_name(&form.full_name).sanitized,
            email: form.email.trim().to_string(),
            phone: form.phone.trim().to_string(),
            role: clean(&form.role),
            company_name: clean(&form.company_name),
            website: optional(&form.website),
            linkedin: optional(&form.linkedin_url),
            stage: form.stage.trim().to_string(),
            industry: form.industry.trim().to_string(),
            one_liner: clean(&form.one_liner),
            problem: clean(&form.problem),
            solution: clean(&form.solution),
            traction: form.traction.trim().to_string(),
            revenue: optional(&form.revenue),
            deck_file,
            deck_link: optional(&form.deck_link),
            video_url: optional(&form.video_link),
            raise_amount: form.raise_amount.trim().to_string(),
            previously_raised: optional(&form.previously_raised).map(|v| clean(&v)),
            accuracy_confirm: form.accuracy_confirm,
            understanding_confirm: form.understanding_confirm,
            signature: form.signature.trim().to_string(),
            submitted_at: Utc::now(),
        }
    }
}

/// Investor application as posted to `applications/investor`
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct InvestorSubmissionPayload {
    pub mode: OfferingMode,
    pub full_name: String,
    pub email: String,
    pub country: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,
    pub investor_type: String,
    pub accreditation_status: String,
    pub check_size: String,
    pub areas_of_interest: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_method: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub verification_file: Option<StoredFileRef>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub jurisdiction: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub custodian_info: Option<String>,
    pub consent_confirm: bool,
    pub signature: String,
    pub submitted_at: DateTime<Utc>,
}

impl InvestorSubmissionPayload {
    /// Build the wire payload from a validated form
    ///
    /// Verification fields travel only for 506(c) submissions; a 506(b)
    /// payload omits them even when the form happens to hold values.
    pub fn from_form(form: &InvestorApplication, verification_file: Option<StoredFileRef>) -> Self {
        let is_506c = form.mode == OfferingMode::Rule506c;

        Self {
            mode: form.mode,
            full_name: sanitize_person_name(&form.full_name).sanitized,
            email: form.email.trim().to_string(),
            country: form.country.trim().to_ascii_uppercase(),
            state: optional(&form.state).map(|s| s.to_ascii_uppercase()),
            investor_type: form.investor_type.trim().to_string(),
            accreditation_status: form.accreditation_status.trim().to_string(),
            check_size: form.check_size.trim().to_string(),
            areas_of_interest: form.areas_of_interest.clone(),
            verification_method: if is_506c {
                optional(&form.verification_method)
            } else {
                None
            },
            verification_file: if is_506c { verification_file } else { None },
            entity_name: if is_506c {
                optional(&form.entity_name).map(|v| clean(&v))
            } else {
                None
            },
            jurisdiction: if is_506c {
                optional(&form.jurisdiction).map(|v| sanitize_jurisdiction(&v).sanitized)
            } else {
                None
            },
            custodian_info: if is_506c {
                optional(&form.custodian_info).map(|v| clean(&v))
            } else {
                None
            },
            consent_confirm: form.consent_confirm,
            signature: form.signature.trim().to_string(),
            submitted_at: Utc::now(),
        }
    }
}

/// Server acknowledgement for an accepted application
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionReceipt {
    /// Identifier assigned by the server
    pub id: String,

    /// Server-side acceptance time
    pub created_at: DateTime<Utc>,
}
