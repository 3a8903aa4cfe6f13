//! Startup application validation
//!
//! `validate_startup_form` runs every rule and accumulates findings;
//! `validate_startup_field` runs just the rules for one field so a UI can
//! validate as the founder types. Both are pure functions of the form
//! snapshot and always agree with each other.

use crate::model::startup::{
    Industry, RaiseAmount, RevenueBand, StartupApplication, StartupStage, TractionLevel,
};

use super::common::{
    check_email, check_max_chars, check_phone, check_signature, check_url, require_consent,
    require_text,
};
use super::file::validate_deck_file;
use super::security::{check_repetition, scan_field};
use super::{ErrorCode, ValidationError, ValidationReport};

const MAX_NAME_LENGTH: usize = 100;
const MAX_COMPANY_NAME_LENGTH: usize = 200;
const MAX_ONE_LINER_LENGTH: usize = 150;
const MAX_NARRATIVE_LENGTH: usize = 300;
const MAX_PREVIOUSLY_RAISED_LENGTH: usize = 100;

/// Validate the whole startup application
pub fn validate_startup_form(form: &StartupApplication) -> ValidationReport {
    let mut errors = Vec::new();

    check_full_name(&mut errors, form);
    check_role(&mut errors, form);
    check_email_field(&mut errors, form);
    check_phone_field(&mut errors, form);
    check_linkedin(&mut errors, form);
    check_company_name(&mut errors, form);
    check_website(&mut errors, form);
    check_stage(&mut errors, form);
    check_industry(&mut errors, form);
    check_one_liner(&mut errors, form);
    check_problem(&mut errors, form);
    check_solution(&mut errors, form);
    check_traction(&mut errors, form);
    check_revenue(&mut errors, form);
    check_pitch_materials(&mut errors, form);
    check_video_link(&mut errors, form);
    check_raise_amount(&mut errors, form);
    check_previously_raised(&mut errors, form);
    check_accuracy_confirm(&mut errors, form);
    check_understanding_confirm(&mut errors, form);
    check_signature_field(&mut errors, form);

    ValidationReport::from_errors(errors)
}

/// Validate a single startup form field against the current snapshot
///
/// The pitch material fields validate as a pair; an unknown field name
/// yields no findings.
pub fn validate_startup_field(field: &str, form: &StartupApplication) -> Vec<ValidationError> {
    let mut errors = Vec::new();

    match field {
        "full_name" => check_full_name(&mut errors, form),
        "role" => check_role(&mut errors, form),
        "email" => check_email_field(&mut errors, form),
        "phone" => check_phone_field(&mut errors, form),
        "linkedin_url" => check_linkedin(&mut errors, form),
        "company_name" => check_company_name(&mut errors, form),
        "website" => check_website(&mut errors, form),
        "stage" => check_stage(&mut errors, form),
        "industry" => check_industry(&mut errors, form),
        "one_liner" => check_one_liner(&mut errors, form),
        "problem" => check_problem(&mut errors, form),
        "solution" => check_solution(&mut errors, form),
        "traction" => check_traction(&mut errors, form),
        "revenue" => check_revenue(&mut errors, form),
        "deck_file" | "deck_link" => check_pitch_materials(&mut errors, form),
        "video_link" => check_video_link(&mut errors, form),
        "raise_amount" => check_raise_amount(&mut errors, form),
        "previously_raised" => check_previously_raised(&mut errors, form),
        "accuracy_confirm" => check_accuracy_confirm(&mut errors, form),
        "understanding_confirm" => check_understanding_confirm(&mut errors, form),
        "signature" => check_signature_field(&mut errors, form),
        _ => {}
    }

    errors
}

fn check_full_name(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "full_name", &form.full_name, "Full name") {
        check_max_chars(errors, "full_name", &form.full_name, MAX_NAME_LENGTH, "Full name");
        scan_field(errors, "full_name", &form.full_name);
    }
}

fn check_role(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "role", &form.role, "Role") {
        check_max_chars(errors, "role", &form.role, MAX_NAME_LENGTH, "Role");
        scan_field(errors, "role", &form.role);
    }
}

fn check_email_field(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "email", &form.email, "Email") {
        check_email(errors, "email", &form.email);
    }
}

fn check_phone_field(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "phone", &form.phone, "Phone number") {
        check_phone(errors, "phone", &form.phone);
    }
}

fn check_linkedin(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    check_url(errors, "linkedin_url", &form.linkedin_url, "LinkedIn URL");
}

fn check_company_name(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "company_name", &form.company_name, "Company name") {
        check_max_chars(
            errors,
            "company_name",
            &form.company_name,
            MAX_COMPANY_NAME_LENGTH,
            "Company name",
        );
        scan_field(errors, "company_name", &form.company_name);
    }
}

fn check_website(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "website", &form.website, "Website") {
        check_url(errors, "website", &form.website, "Website");
    }
}

fn check_stage(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    check_select(errors, "stage", &form.stage, "Funding stage", |v| {
        StartupStage::parse(v).is_some()
    });
}

fn check_industry(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    check_select(errors, "industry", &form.industry, "Industry", |v| {
        Industry::parse(v).is_some()
    });
}

fn check_one_liner(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "one_liner", &form.one_liner, "One-liner") {
        check_max_chars(
            errors,
            "one_liner",
            &form.one_liner,
            MAX_ONE_LINER_LENGTH,
            "One-liner",
        );
        scan_field(errors, "one_liner", &form.one_liner);
        check_repetition(errors, "one_liner", &form.one_liner);
    }
}

fn check_problem(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "problem", &form.problem, "Problem statement") {
        check_max_chars(
            errors,
            "problem",
            &form.problem,
            MAX_NARRATIVE_LENGTH,
            "Problem statement",
        );
        scan_field(errors, "problem", &form.problem);
        check_repetition(errors, "problem", &form.problem);
    }
}

fn check_solution(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    if require_text(errors, "solution", &form.solution, "Solution description") {
        check_max_chars(
            errors,
            "solution",
            &form.solution,
            MAX_NARRATIVE_LENGTH,
            "Solution description",
        );
        scan_field(errors, "solution", &form.solution);
        check_repetition(errors, "solution", &form.solution);
    }
}

fn check_traction(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    check_select(errors, "traction", &form.traction, "Traction", |v| {
        TractionLevel::parse(v).is_some()
    });
}

fn check_revenue(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    let value = form.revenue.trim();
    if !value.is_empty() && RevenueBand::parse(value).is_none() {
        errors.push(ValidationError::new(
            "revenue",
            "Select a valid revenue band",
            ErrorCode::InvalidFormat,
        ));
    }
}

/// Exactly one of deck file and deck link must be provided
fn check_pitch_materials(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    let has_file = form.deck_file.is_some();
    let has_link = !form.deck_link.trim().is_empty();

    match (has_file, has_link) {
        (false, false) => {
            errors.push(ValidationError::new(
                "deck_file",
                "Upload a pitch deck or provide a link",
                ErrorCode::RequiredField,
            ));
            errors.push(ValidationError::new(
                "deck_link",
                "Upload a pitch deck or provide a link",
                ErrorCode::RequiredField,
            ));
        }
        (true, true) => {
            errors.push(ValidationError::new(
                "deck_file",
                "Provide either an uploaded deck or a link, not both",
                ErrorCode::InvalidFormat,
            ));
            errors.push(ValidationError::new(
                "deck_link",
                "Provide either an uploaded deck or a link, not both",
                ErrorCode::InvalidFormat,
            ));
        }
        (true, false) => {
            if let Some(file) = &form.deck_file {
                errors.extend(validate_deck_file(file));
            }
        }
        (false, true) => {
            check_url(errors, "deck_link", &form.deck_link, "Deck link");
        }
    }
}

fn check_video_link(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    check_url(errors, "video_link", &form.video_link, "Video link");
}

fn check_raise_amount(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    check_select(errors, "raise_amount", &form.raise_amount, "Raise amount", |v| {
        RaiseAmount::parse(v).is_some()
    });
}

fn check_previously_raised(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    let value = form.previously_raised.trim();
    if !value.is_empty() {
        check_max_chars(
            errors,
            "previously_raised",
            value,
            MAX_PREVIOUSLY_RAISED_LENGTH,
            "Previously raised",
        );
        scan_field(errors, "previously_raised", value);
    }
}

fn check_accuracy_confirm(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    require_consent(
        errors,
        "accuracy_confirm",
        form.accuracy_confirm,
        "Accuracy confirmation",
    );
}

fn check_understanding_confirm(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    require_consent(
        errors,
        "understanding_confirm",
        form.understanding_confirm,
        "Understanding confirmation",
    );
}

fn check_signature_field(errors: &mut Vec<ValidationError>, form: &StartupApplication) {
    check_signature(errors, "signature", &form.signature);
}

/// Required select field whose value must be in the enum's allowed set
fn check_select(
    errors: &mut Vec<ValidationError>,
    field: &str,
    value: &str,
    label: &str,
    is_member: impl Fn(&str) -> bool,
) {
    let value = value.trim();
    if value.is_empty() {
        errors.push(ValidationError::new(
            field,
            format!("{} is required", label),
            ErrorCode::RequiredField,
        ));
    } else if !is_member(value) {
        errors.push(ValidationError::new(
            field,
            format!("Select a valid {}", label.to_lowercase()),
            ErrorCode::InvalidFormat,
        ));
    }
}
