//! Investor application validation
//!
//! Field rules run first, then the cross-field pass: 506(c) gating,
//! type/accreditation and type/check-size consistency advisories, and the
//! jurisdiction review list. Advisory findings never fail the report.

use crate::model::investor::{
    AccreditationStatus, CheckSize, InvestorApplication, InvestorType, OfferingMode,
    VerificationMethod, AREAS_OF_INTEREST,
};

use super::common::{check_email, check_max_chars, check_signature, require_consent, require_text};
use super::file::validate_verification_file;
use super::security::scan_field;
use super::{ErrorCode, ValidationError, ValidationReport};

const MAX_NAME_LENGTH: usize = 100;
const MAX_ENTITY_NAME_LENGTH: usize = 200;
const MAX_JURISDICTION_LENGTH: usize = 100;
const MAX_CUSTODIAN_LENGTH: usize = 500;

/// ISO 3166-1 alpha-2 country codes
pub const COUNTRIES: [&str; 249] = [
    "AD", "AE", "AF", "AG", "AI", "AL", "AM", "AO", "AQ", "AR", "AS", "AT", "AU", "AW", "AX",
    "AZ", "BA", "BB", "BD", "BE", "BF", "BG", "BH", "BI", "BJ", "BL", "BM", "BN", "BO", "BQ",
    "BR", "BS", "BT", "BV", "BW", "BY", "BZ", "CA", "CC", "CD", "CF", "CG", "CH", "CI", "CK",
    "CL", "CM", "CN", "CO", "CR", "CU", "CV", "CW", "CX", "CY", "CZ", "DE", "DJ", "DK", "DM",
    "DO", "DZ", "EC", "EE", "EG", "EH", "ER", "ES", "ET", "FI", "FJ", "FK", "FM", "FO", "FR",
    "GA", "GB", "GD", "GE", "GF", "GG", "GH", "GI", "GL", "GM", "GN", "GP", "GQ", "GR", "GS",
    "GT", "GU", "GW", "GY", "HK", "HM", "HN", "HR", "HT", "HU", "ID", "IE", "IL", "IM", "IN",
    "IO", "IQ", "IR", "IS", "IT", "JE", "JM", "JO", "JP", "KE", "KG", "KH", "KI", "KM", "KN",
    "KP", "KR", "KW", "KY", "KZ", "LA", "LB", "LC", "LI", "LK", "LR", "LS", "LT", "LU", "LV",
    "LY", "MA", "MC", "MD", "ME", "MF", "MG", "MH", "MK", "ML", "MM", "MN", "MO", "MP", "MQ",
    "MR", "MS", "MT", "MU", "MV", "MW", "MX", "MY", "MZ", "NA", "NC", "NE", "NF", "NG", "NI",
    "NL", "NO", "NP", "NR", "NU", "NZ", "OM", "PA", "PE", "PF", "PG", "PH", "PK", "PL", "PM",
    "PN", "PR", "PS", "PT", "PW", "PY", "QA", "RE", "RO", "RS", "RU", "RW", "SA", "SB", "SC",
    "SD", "SE", "SG", "SH", "SI", "SJ", "SK", "SL", "SM", "SN", "SO", "SR", "SS", "ST", "SV",
    "SX", "SY", "SZ", "TC", "TD", "TF", "TG", "TH", "TJ", "TK", "TL", "TM", "TN", "TO", "TR",
    "TT", "TV", "TW", "TZ", "UA", "UG", "UM", "US", "UY", "UZ", "VA", "VC", "VE", "VG", "VI",
    "VN", "VU", "WF", "WS", "YE", "YT", "ZA", "ZM", "ZW",
];

/// Countries whose applications are routed to compliance review
pub const REVIEW_LIST_COUNTRIES: [&str; 4] = ["KP", "IR", "SY", "CU"];

/// Countries where a state or region selection is mandatory
pub const STATE_REQUIRED_COUNTRIES: [&str; 3] = ["US", "CA", "AU"];

/// US state and territory codes, plus DC
pub const US_STATES: [&str; 51] = [
    "AL", "AK", "AZ", "AR", "CA", "CO", "CT", "DE", "DC", "FL", "GA", "HI", "ID", "IL", "IN",
    "IA", "KS", "KY", "LA", "ME", "MD", "MA", "MI", "MN", "MS", "MO", "MT", "NE", "NV", "NH",
    "NJ", "NM", "NY", "NC", "ND", "OH", "OK", "OR", "PA", "RI", "SC", "SD", "TN", "TX", "UT",
    "VT", "VA", "WA", "WV", "WI", "WY",
];

/// Canadian province and territory codes
pub const CA_PROVINCES: [&str; 13] = [
    "AB", "BC", "MB", "NB", "NL", "NS", "NT", "NU", "ON", "PE", "QC", "SK", "YT",
];

/// Australian state and territory codes
pub const AU_STATES: [&str; 8] = ["NSW", "VIC", "QLD", "WA", "SA", "TAS", "ACT", "NT"];

/// Incorporation jurisdictions accepted by name for US entities
const US_JURISDICTION_NAMES: [&str; 12] = [
    "delaware",
    "nevada",
    "wyoming",
    "california",
    "new york",
    "texas",
    "florida",
    "washington",
    "massachusetts",
    "colorado",
    "illinois",
    "georgia",
];

const CA_JURISDICTION_NAMES: [&str; 14] = [
    "alberta",
    "british columbia",
    "manitoba",
    "new brunswick",
    "newfoundland and labrador",
    "nova scotia",
    "northwest territories",
    "nunavut",
    "ontario",
    "prince edward island",
    "quebec",
    "saskatchewan",
    "yukon",
    "canada",
];

const GB_JURISDICTION_NAMES: [&str; 6] = [
    "england",
    "scotland",
    "wales",
    "northern ireland",
    "united kingdom",
    "england and wales",
];

const AU_JURISDICTION_NAMES: [&str; 9] = [
    "new south wales",
    "victoria",
    "queensland",
    "western australia",
    "south australia",
    "tasmania",
    "australian capital territory",
    "northern territory",
    "australia",
];

/// Bare entity suffixes that do not identify a legal entity on their own
const TRIVIAL_ENTITY_NAMES: [&str; 12] = [
    "llc", "inc", "ltd", "corp", "co", "lp", "llp", "gmbh", "plc", "n/a", "na", "none",
];

/// Validate the whole investor application for its offering mode
pub fn validate_investor_form(form: &InvestorApplication) -> ValidationReport {
    let mut errors = Vec::new();

    check_full_name(&mut errors, form);
    check_email_field(&mut errors, form);
    check_country(&mut errors, form);
    check_state(&mut errors, form);
    check_investor_type(&mut errors, form);
    check_accreditation(&mut errors, form);
    check_check_size(&mut errors, form);
    check_areas_of_interest(&mut errors, form);
    check_verification_method(&mut errors, form);
    check_verification_file(&mut errors, form);
    check_entity_name(&mut errors, form);
    check_jurisdiction(&mut errors, form);
    check_custodian_info(&mut errors, form);
    check_consent(&mut errors, form);
    check_signature_field(&mut errors, form);

    ValidationReport::from_errors(errors)
}

/// Validate a single investor form field against the current snapshot
///
/// Mode-dependent fields validate according to the form's current mode; an
/// unknown field name yields an empty, valid report.
pub fn validate_investor_field(field: &str, form: &InvestorApplication) -> ValidationReport {
    let mut errors = Vec::new();

    match field {
        "full_name" => check_full_name(&mut errors, form),
        "email" => check_email_field(&mut errors, form),
        "country" => check_country(&mut errors, form),
        "state" => check_state(&mut errors, form),
        "investor_type" => check_investor_type(&mut errors, form),
        "accreditation_status" => check_accreditation(&mut errors, form),
        "check_size" => check_check_size(&mut errors, form),
        "areas_of_interest" => check_areas_of_interest(&mut errors, form),
        "verification_method" => check_verification_method(&mut errors, form),
        "verification_file" => check_verification_file(&mut errors, form),
        "entity_name" => check_entity_name(&mut errors, form),
        "jurisdiction" => check_jurisdiction(&mut errors, form),
        "custodian_info" => check_custodian_info(&mut errors, form),
        "consent_confirm" => check_consent(&mut errors, form),
        "signature" => check_signature_field(&mut errors, form),
        _ => {}
    }

    ValidationReport::from_errors(errors)
}

fn check_full_name(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if require_text(errors, "full_name", &form.full_name, "Full name") {
        check_max_chars(errors, "full_name", &form.full_name, MAX_NAME_LENGTH, "Full name");
        scan_field(errors, "full_name", &form.full_name);
    }
}

fn check_email_field(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if require_text(errors, "email", &form.email, "Email") {
        check_email(errors, "email", &form.email);
    }
}

fn check_country(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if !require_text(errors, "country", &form.country, "Country") {
        return;
    }

    let code = form.country.trim().to_ascii_uppercase();
    if !COUNTRIES.contains(&code.as_str()) {
        errors.push(ValidationError::new(
            "country",
            "Select a valid country",
            ErrorCode::InvalidCountry,
        ));
        return;
    }

    if REVIEW_LIST_COUNTRIES.contains(&code.as_str()) {
        errors.push(ValidationError::new(
            "country",
            "Applications from this jurisdiction require compliance review",
            ErrorCode::RestrictedJurisdiction,
        ));
    }
}

fn check_state(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    let country = form.country.trim().to_ascii_uppercase();
    if !STATE_REQUIRED_COUNTRIES.contains(&country.as_str()) {
        return;
    }

    if !require_text(errors, "state", &form.state, "State or region") {
        return;
    }

    let state = form.state.trim().to_ascii_uppercase();
    let valid = match country.as_str() {
        "US" => US_STATES.contains(&state.as_str()),
        "CA" => CA_PROVINCES.contains(&state.as_str()),
        "AU" => AU_STATES.contains(&state.as_str()),
        _ => true,
    };
    if !valid {
        errors.push(ValidationError::new(
            "state",
            "Select a valid state or region",
            ErrorCode::InvalidState,
        ));
    }
}

fn check_investor_type(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    let value = form.investor_type.trim();
    if value.is_empty() {
        errors.push(ValidationError::new(
            "investor_type",
            "Investor type is required",
            ErrorCode::RequiredField,
        ));
    } else if InvestorType::parse(value).is_none() {
        errors.push(ValidationError::new(
            "investor_type",
            "Select a valid investor type",
            ErrorCode::InvalidInvestorType,
        ));
    }
}

fn check_accreditation(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    let value = form.accreditation_status.trim();
    if value.is_empty() {
        errors.push(ValidationError::new(
            "accreditation_status",
            "Accreditation status is required",
            ErrorCode::RequiredField,
        ));
        return;
    }

    let status = match AccreditationStatus::parse(value) {
        Some(status) => status,
        None => {
            errors.push(ValidationError::new(
                "accreditation_status",
                "Select a valid accreditation status",
                ErrorCode::InvalidAccreditationStatus,
            ));
            return;
        }
    };

    // 506(c) offerings are open to verified accredited investors only
    if form.mode == OfferingMode::Rule506c && status == AccreditationStatus::No {
        errors.push(ValidationError::new(
            "accreditation_status",
            "506(c) offerings are limited to accredited investors",
            ErrorCode::AccreditationRequired,
        ));
    }

    if status == AccreditationStatus::No {
        if let Some(investor_type) = InvestorType::parse(form.investor_type.trim()) {
            if matches!(investor_type, InvestorType::Institutional | InvestorType::FamilyOffice) {
                errors.push(ValidationError::new(
                    "accreditation_status",
                    "Institutions and family offices are typically accredited",
                    ErrorCode::BusinessLogicMismatch,
                ));
            }
        }
    }
}

fn check_check_size(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    let value = form.check_size.trim();
    if value.is_empty() {
        errors.push(ValidationError::new(
            "check_size",
            "Check size is required",
            ErrorCode::RequiredField,
        ));
        return;
    }

    let size = match CheckSize::parse(value) {
        Some(size) => size,
        None => {
            errors.push(ValidationError::new(
                "check_size",
                "Select a valid check size",
                ErrorCode::InvalidCheckSize,
            ));
            return;
        }
    };

    if size == CheckSize::smallest() {
        if let Some(investor_type) = InvestorType::parse(form.investor_type.trim()) {
            if matches!(investor_type, InvestorType::FamilyOffice | InvestorType::Institutional) {
                errors.push(ValidationError::new(
                    "check_size",
                    "Check size is unusually small for this investor type",
                    ErrorCode::BusinessLogicMismatch,
                ));
            }
        }
    }
}

fn check_areas_of_interest(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if form.areas_of_interest.is_empty() {
        errors.push(ValidationError::new(
            "areas_of_interest",
            "Select at least one area of interest",
            ErrorCode::RequiredField,
        ));
        return;
    }

    for area in &form.areas_of_interest {
        if !AREAS_OF_INTEREST.contains(&area.as_str()) {
            errors.push(ValidationError::new(
                "areas_of_interest",
                format!("'{}' is not an available area of interest", area),
                ErrorCode::InvalidAreasOfInterest,
            ));
        }
    }
}

fn check_verification_method(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if form.mode != OfferingMode::Rule506c {
        return;
    }

    let value = form.verification_method.trim();
    if value.is_empty() {
        errors.push(ValidationError::new(
            "verification_method",
            "Verification method is required",
            ErrorCode::RequiredField,
        ));
    } else if VerificationMethod::parse(value).is_none() {
        errors.push(ValidationError::new(
            "verification_method",
            "Select a valid verification method",
            ErrorCode::InvalidVerificationMethod,
        ));
    }
}

fn check_verification_file(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if form.mode != OfferingMode::Rule506c {
        return;
    }

    let method = VerificationMethod::parse(form.verification_method.trim());
    match &form.verification_file {
        Some(file) => errors.extend(validate_verification_file(file)),
        None => {
            // The letter method cannot proceed without the letter itself
            if method == Some(VerificationMethod::Letter) {
                errors.push(ValidationError::new(
                    "verification_file",
                    "Upload the verification letter",
                    ErrorCode::VerificationFileRequired,
                ));
            }
        }
    }
}

fn check_entity_name(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if form.mode != OfferingMode::Rule506c {
        return;
    }

    if !require_text(errors, "entity_name", &form.entity_name, "Entity name") {
        return;
    }

    check_max_chars(
        errors,
        "entity_name",
        &form.entity_name,
        MAX_ENTITY_NAME_LENGTH,
        "Entity name",
    );
    scan_field(errors, "entity_name", &form.entity_name);

    let normalized = form.entity_name.trim().trim_end_matches('.').to_lowercase();
    let insufficient = normalized.chars().count() < 3
        || !normalized.chars().any(|c| c.is_alphabetic())
        || TRIVIAL_ENTITY_NAMES.contains(&normalized.as_str());
    if insufficient {
        errors.push(ValidationError::new(
            "entity_name",
            "Enter the full legal entity name",
            ErrorCode::EntityNameInsufficient,
        ));
    }
}

fn check_jurisdiction(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if form.mode != OfferingMode::Rule506c {
        return;
    }

    if !require_text(errors, "jurisdiction", &form.jurisdiction, "Jurisdiction") {
        return;
    }

    check_max_chars(
        errors,
        "jurisdiction",
        &form.jurisdiction,
        MAX_JURISDICTION_LENGTH,
        "Jurisdiction",
    );

    let value = form.jurisdiction.trim();
    if value.chars().count() < 2 {
        errors.push(ValidationError::new(
            "jurisdiction",
            "Jurisdiction is too short",
            ErrorCode::JurisdictionInsufficient,
        ));
        return;
    }

    let country = form.country.trim().to_ascii_uppercase();
    if !jurisdiction_matches_country(&country, value) {
        errors.push(ValidationError::new(
            "jurisdiction",
            "Jurisdiction does not match the selected country",
            ErrorCode::JurisdictionMismatch,
        ));
    }
}

/// Country-specific jurisdiction shapes; countries without a curated set
/// accept any non-trivial value
fn jurisdiction_matches_country(country: &str, value: &str) -> bool {
    let upper = value.to_ascii_uppercase();
    let lower = value.to_lowercase();

    match country {
        "US" => {
            US_STATES.contains(&upper.as_str())
                || US_JURISDICTION_NAMES.contains(&lower.as_str())
        }
        "CA" => {
            CA_PROVINCES.contains(&upper.as_str())
                || CA_JURISDICTION_NAMES.contains(&lower.as_str())
        }
        "GB" => GB_JURISDICTION_NAMES.contains(&lower.as_str()),
        "AU" => {
            AU_STATES.contains(&upper.as_str())
                || AU_JURISDICTION_NAMES.contains(&lower.as_str())
        }
        _ => true,
    }
}

fn check_custodian_info(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    if form.mode != OfferingMode::Rule506c {
        return;
    }

    let value = form.custodian_info.trim();
    if !value.is_empty() {
        check_max_chars(errors, "custodian_info", value, MAX_CUSTODIAN_LENGTH, "Custodian info");
        scan_field(errors, "custodian_info", value);
    }
}

fn check_consent(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    require_consent(errors, "consent_confirm", form.consent_confirm, "Consent");
}

fn check_signature_field(errors: &mut Vec<ValidationError>, form: &InvestorApplication) {
    check_signature(errors, "signature", &form.signature);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::file::FileUpload;

    fn filled_506b() -> InvestorApplication {
        InvestorApplication {
            mode: OfferingMode::Rule506b,
            full_name: "Grace Hopper".into(),
            email: "grace@example.com".into(),
            country: "US".into(),
            state: "NY".into(),
            investor_type: "individual".into(),
            accreditation_status: "yes".into(),
            check_size: "100k-250k".into(),
            areas_of_interest: vec!["seed".into(), "enterprise-ai".into()],
            verification_method: String::new(),
            verification_file: None,
            entity_name: String::new(),
            jurisdiction: String::new(),
            custodian_info: String::new(),
            consent_confirm: true,
            signature: "Grace Hopper".into(),
        }
    }

    fn filled_506c() -> InvestorApplication {
        let mut form = filled_506b();
        form.mode = OfferingMode::Rule506c;
        form.verification_method = "third-party".into();
        form.entity_name = "Hopper Ventures LLC".into();
        form.jurisdiction = "Delaware".into();
        form
    }

    #[test]
    fn test_filled_506b_is_valid() {
        let report = validate_investor_form(&filled_506b());
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
        assert!(report.errors.is_empty());
    }

    #[test]
    fn test_filled_506c_is_valid() {
        let report = validate_investor_form(&filled_506c());
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn test_506b_ignores_verification_fields() {
        let mut form = filled_506b();
        form.entity_name = String::new();
        form.jurisdiction = String::new();
        form.verification_method = String::new();
        assert!(validate_investor_form(&form).is_valid);
    }

    #[test]
    fn test_506c_requires_verification_fields() {
        let mut form = filled_506c();
        form.verification_method = String::new();
        form.entity_name = String::new();
        form.jurisdiction = String::new();
        let report = validate_investor_form(&form);
        assert!(!report.is_valid);
        for field in ["verification_method", "entity_name", "jurisdiction"] {
            assert!(
                report.errors_for(field).iter().any(|e| e.code == ErrorCode::RequiredField),
                "missing REQUIRED_FIELD for {}",
                field
            );
        }
    }

    #[test]
    fn test_506c_with_no_accreditation_is_hard_failure() {
        let mut form = filled_506c();
        form.accreditation_status = "no".into();
        let report = validate_investor_form(&form);
        assert!(!report.is_valid);
        assert!(report.has_code(ErrorCode::AccreditationRequired));
    }

    #[test]
    fn test_506b_with_no_accreditation_is_allowed() {
        let mut form = filled_506b();
        form.accreditation_status = "no".into();
        let report = validate_investor_form(&form);
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
        assert!(!report.has_code(ErrorCode::AccreditationRequired));
    }

    #[test]
    fn test_institutional_unaccredited_is_advisory_only() {
        let mut form = filled_506b();
        form.investor_type = "institutional".into();
        form.accreditation_status = "no".into();
        let report = validate_investor_form(&form);
        assert!(report.is_valid);
        assert!(report.has_code(ErrorCode::BusinessLogicMismatch));
    }

    #[test]
    fn test_family_office_smallest_check_is_advisory() {
        let mut form = filled_506b();
        form.investor_type = "family-office".into();
        form.check_size = "25k-50k".into();
        let report = validate_investor_form(&form);
        assert!(report.is_valid);
        assert!(report
            .errors_for("check_size")
            .iter()
            .any(|e| e.code == ErrorCode::BusinessLogicMismatch));
    }

    #[test]
    fn test_review_list_country_is_advisory() {
        let mut form = filled_506b();
        form.country = "IR".into();
        form.state = String::new();
        let report = validate_investor_form(&form);
        assert!(report.is_valid);
        assert!(report.has_code(ErrorCode::RestrictedJurisdiction));
    }

    #[test]
    fn test_unknown_country_is_invalid() {
        let mut form = filled_506b();
        form.country = "XX".into();
        let report = validate_investor_form(&form);
        assert!(report.errors_for("country").iter().any(|e| e.code == ErrorCode::InvalidCountry));
    }

    #[test]
    fn test_us_requires_valid_state() {
        let mut form = filled_506b();
        form.state = String::new();
        let report = validate_investor_form(&form);
        assert!(report.errors_for("state").iter().any(|e| e.code == ErrorCode::RequiredField));

        form.state = "ZZ".into();
        let report = validate_investor_form(&form);
        assert!(report.errors_for("state").iter().any(|e| e.code == ErrorCode::InvalidState));
    }

    #[test]
    fn test_state_not_required_outside_us_ca_au() {
        let mut form = filled_506b();
        form.country = "DE".into();
        form.state = String::new();
        assert!(validate_investor_form(&form).is_valid);
    }

    #[test]
    fn test_areas_of_interest_must_be_nonempty_and_known() {
        let mut form = filled_506b();
        form.areas_of_interest = vec![];
        let report = validate_investor_form(&form);
        assert!(report
            .errors_for("areas_of_interest")
            .iter()
            .any(|e| e.code == ErrorCode::RequiredField));

        form.areas_of_interest = vec!["seed".into(), "crypto-day-trading".into()];
        let report = validate_investor_form(&form);
        assert!(report
            .errors_for("areas_of_interest")
            .iter()
            .any(|e| e.code == ErrorCode::InvalidAreasOfInterest));
    }

    #[test]
    fn test_letter_method_requires_file() {
        let mut form = filled_506c();
        form.verification_method = "letter".into();
        form.verification_file = None;
        let report = validate_investor_form(&form);
        assert!(!report.is_valid);
        assert!(report.has_code(ErrorCode::VerificationFileRequired));

        form.verification_file = Some(FileUpload::new(
            "letter.pdf",
            "application/pdf",
            vec![0u8; 4096],
        ));
        let report = validate_investor_form(&form);
        assert!(report.is_valid, "unexpected errors: {:?}", report.errors);
    }

    #[test]
    fn test_verification_file_must_be_pdf() {
        let mut form = filled_506c();
        form.verification_file = Some(FileUpload::new("letter.png", "image/png", vec![0u8; 4096]));
        let report = validate_investor_form(&form);
        assert!(report.has_code(ErrorCode::InvalidFileType));
    }

    #[test]
    fn test_trivial_entity_name_is_insufficient() {
        let mut form = filled_506c();
        for name in ["LLC", "inc.", "x"] {
            form.entity_name = name.into();
            let report = validate_investor_form(&form);
            assert!(
                report.has_code(ErrorCode::EntityNameInsufficient),
                "expected insufficient for {:?}",
                name
            );
        }
    }

    #[test]
    fn test_jurisdiction_matching() {
        let mut form = filled_506c();
        form.jurisdiction = "DE".into();
        assert!(validate_investor_form(&form).is_valid);

        form.jurisdiction = "Bavaria".into();
        let report = validate_investor_form(&form);
        assert!(report.has_code(ErrorCode::JurisdictionMismatch));

        form.jurisdiction = "Q".into();
        let report = validate_investor_form(&form);
        assert!(report.has_code(ErrorCode::JurisdictionInsufficient));

        form.country = "CH".into();
        form.state = String::new();
        form.jurisdiction = "Zug".into();
        assert!(validate_investor_form(&form).is_valid);
    }

    #[test]
    fn test_field_dispatch_respects_mode() {
        let report = validate_investor_field("entity_name", &filled_506b());
        assert!(report.is_valid);
        assert!(report.errors.is_empty());

        let mut form = filled_506c();
        form.entity_name = String::new();
        let report = validate_investor_field("entity_name", &form);
        assert!(!report.is_valid);
    }

    #[test]
    fn test_validation_is_idempotent() {
        let form = filled_506c();
        assert_eq!(validate_investor_form(&form), validate_investor_form(&form));
    }
}
