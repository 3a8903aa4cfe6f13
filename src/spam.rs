//! Spam heuristics over free-text payload fields
//!
//! Runs the suspicious-content and repetition passes across every free-text
//! field of a payload and reports the reasons found. The same passes feed
//! per-field validation; this module gives callers a whole-payload verdict.

use crate::model::{InvestorApplication, StartupApplication};
use crate::validators::security::{is_repetitive, suspicious_category};

/// Whole-payload spam verdict
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SpamAssessment {
    /// True when any heuristic fired
    pub is_spam: bool,
    /// One entry per finding, naming the field and the heuristic
    pub reasons: Vec<String>,
}

impl SpamAssessment {
    pub fn clean() -> Self {
        Self {
            is_spam: false,
            reasons: Vec::new(),
        }
    }
}

/// Payloads that expose their free-text fields for content heuristics
pub trait HasFreeText {
    fn free_text_fields(&self) -> Vec<(&'static str, &str)>;
}

impl HasFreeText for StartupApplication {
    fn free_text_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("full_name", self.full_name.as_str()),
            ("role", self.role.as_str()),
            ("company_name", self.company_name.as_str()),
            ("one_liner", self.one_liner.as_str()),
            ("problem", self.problem.as_str()),
            ("solution", self.solution.as_str()),
            ("previously_raised", self.previously_raised.as_str()),
        ]
    }
}

impl HasFreeText for InvestorApplication {
    fn free_text_fields(&self) -> Vec<(&'static str, &str)> {
        vec![
            ("full_name", self.full_name.as_str()),
            ("entity_name", self.entity_name.as_str()),
            ("jurisdiction", self.jurisdiction.as_str()),
            ("custodian_info", self.custodian_info.as_str()),
        ]
    }
}

/// Run both heuristics over every free-text field of a payload
pub fn detect_potential_spam<T: HasFreeText>(payload: &T) -> SpamAssessment {
    let mut reasons = Vec::new();

    for (field, text) in payload.free_text_fields() {
        if let Some(category) = suspicious_category(text) {
            reasons.push(format!("{} contains a {}", field, category));
        }
        if is_repetitive(text) {
            reasons.push(format!("{} is highly repetitive", field));
        }
    }

    SpamAssessment {
        is_spam: !reasons.is_empty(),
        reasons,
    }
}
