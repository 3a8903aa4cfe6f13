//! Form completion tracking
//!
//! Completion is a presence check, not a validity check: a field counts as
//! filled once it holds something, even if validation would still reject
//! the value. The percentage is the share of required fields that are
//! filled, so it reaches 100 exactly when every required field for the
//! form (and offering mode) is filled and 0 exactly when none are.

use crate::model::{InvestorApplication, OfferingMode, StartupApplication};
use crate::validators::investor::STATE_REQUIRED_COUNTRIES;

fn filled(value: &str) -> bool {
    !value.trim().is_empty()
}

fn percentage(filled_count: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    ((filled_count as f64 / total as f64) * 100.0).round() as u8
}

/// Completion percentage of a startup application, `0..=100`
pub fn startup_completion_percentage(form: &StartupApplication) -> u8 {
    let requirements = [
        filled(&form.full_name),
        filled(&form.role),
        filled(&form.email),
        filled(&form.phone),
        filled(&form.company_name),
        filled(&form.website),
        filled(&form.stage),
        filled(&form.industry),
        filled(&form.one_liner),
        filled(&form.problem),
        filled(&form.solution),
        filled(&form.traction),
        // The pitch deck requirement is one slot satisfiable either way
        form.deck_file.is_some() || filled(&form.deck_link),
        filled(&form.raise_amount),
        form.accuracy_confirm,
        form.understanding_confirm,
        filled(&form.signature),
    ];

    let filled_count = requirements.iter().filter(|&&f| f).count();
    percentage(filled_count, requirements.len())
}

/// Completion percentage of an investor application, `0..=100`
///
/// The required set follows the offering mode: 506(c) adds verification
/// method, entity name, and jurisdiction. A state is required only once a
/// country that uses states is selected, and a verification document only
/// once the letter method is.
pub fn investor_completion_percentage(form: &InvestorApplication) -> u8 {
    let mut requirements = vec![
        filled(&form.full_name),
        filled(&form.email),
        filled(&form.country),
        filled(&form.investor_type),
        filled(&form.accreditation_status),
        filled(&form.check_size),
        !form.areas_of_interest.is_empty(),
        form.consent_confirm,
        filled(&form.signature),
    ];

    let country = form.country.trim().to_uppercase();
    if STATE_REQUIRED_COUNTRIES.contains(&country.as_str()) {
        requirements.push(filled(&form.state));
    }

    if form.mode == OfferingMode::Rule506c {
        requirements.push(filled(&form.verification_method));
        requirements.push(filled(&form.entity_name));
        requirements.push(filled(&form.jurisdiction));

        if form.verification_method.trim() == "letter" {
            requirements.push(form.verification_file.is_some());
        }
    }

    let filled_count = requirements.iter().filter(|&&f| f).count();
    percentage(filled_count, requirements.len())
}
