//! Form Validation Walkthrough
//!
//! This example runs the client-side validation stack over a startup
//! application without touching the network: full-form validation,
//! per-field checks, sanitization, spam heuristics, and the debounced
//! scheduling a UI layer would use while the user types.
//!
//! To run this example:
//! ```
//! cargo run --example validate_form
//! ```

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use intake_sdk::{
    debounce::FieldDebouncer,
    model::StartupApplication,
    progress::startup_completion_percentage,
    sanitizers::sanitize_text,
    spam::detect_potential_spam,
    validators::{validate_startup_field, validate_startup_form},
};

#[tokio::main]
async fn main() {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("Form Validation Walkthrough");
    println!("===========================\n");

    // Step 1: validate a half-finished form
    println!("FULL-FORM VALIDATION");
    println!("--------------------");

    let mut form = StartupApplication {
        full_name: "Ada Lovelace".into(),
        role: "CEO".into(),
        email: "not-an-email".into(),
        phone: "+1 415 555 0123".into(),
        company_name: "Analytical Engines".into(),
        website: "https://analytical-engines.example.com".into(),
        stage: "seed".into(),
        industry: "enterprise-saas".into(),
        one_liner: "Programmable computation for every business".into(),
        problem: "Manual bookkeeping does not scale past a handful of clerks".into(),
        solution: "A general-purpose analytical engine with a simple ledger API".into(),
        traction: "early-users".into(),
        raise_amount: "1m-3m".into(),
        ..StartupApplication::default()
    };

    let report = validate_startup_form(&form);
    println!("Form is valid: {}", report.is_valid);
    println!("Completion: {}%", startup_completion_percentage(&form));
    for error in &report.errors {
        println!("  {}", error);
    }

    // Step 2: re-check a single field after fixing it
    println!("\nPER-FIELD VALIDATION");
    println!("--------------------");

    println!("Checking 'email' with value {:?}...", form.email);
    for error in validate_startup_field("email", &form) {
        println!("  {}", error);
    }

    form.email = "ada@analytical-engines.example.com".to_string();
    println!("Checking 'email' with value {:?}...", form.email);
    let findings = validate_startup_field("email", &form);
    if findings.is_empty() {
        println!("  No findings.");
    }

    // Step 3: sanitize pasted content before it reaches the form
    println!("\nSANITIZATION");
    println!("------------");

    let pasted = "  Ledgers   for <script>alert('everyone')</script> everyone  ";
    let result = sanitize_text(pasted);
    println!("Input:     {:?}", pasted);
    println!("Sanitized: {:?}", result.sanitized);
    println!("Modified:  {}", result.was_modified);
    if let Some(details) = &result.details {
        println!("Details:   {}", details);
    }

    // Step 4: run the spam heuristics over the whole payload
    println!("\nSPAM HEURISTICS");
    println!("---------------");

    let mut stuffed = form.clone();
    stuffed.problem =
        "buy now buy now buy now buy now buy now buy now buy now buy now".to_string();
    let assessment = detect_potential_spam(&stuffed);
    println!("Payload flagged as spam: {}", assessment.is_spam);
    for reason in &assessment.reasons {
        println!("  {}", reason);
    }

    // Step 5: debounce per-field validation the way a UI would
    println!("\nDEBOUNCED VALIDATION");
    println!("--------------------");

    let debouncer = FieldDebouncer::with_delay(Duration::from_millis(100));
    let runs = Arc::new(AtomicUsize::new(0));

    println!("Simulating three rapid keystrokes on 'email'...");
    for keystroke in ["a", "ad", "ada@example.com"] {
        let runs = Arc::clone(&runs);
        let value = keystroke.to_string();
        debouncer
            .schedule("email", move || async move {
                runs.fetch_add(1, Ordering::SeqCst);
                println!("  Validation ran for value {:?}", value);
            })
            .await;
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    // Wait past the debounce delay so the surviving task fires
    tokio::time::sleep(Duration::from_millis(200)).await;
    println!("Validations executed: {}", runs.load(Ordering::SeqCst));

    // Step 6: finish the form and confirm it passes
    println!("\nCOMPLETED FORM");
    println!("--------------");

    form.deck_link = "https://docs.google.com/presentation/d/deck".to_string();
    form.accuracy_confirm = true;
    form.understanding_confirm = true;
    form.signature = "Ada Lovelace".to_string();

    let report = validate_startup_form(&form);
    println!("Form is valid: {}", report.is_valid);
    println!("Completion: {}%", startup_completion_percentage(&form));

    println!("\nValidation walkthrough completed.");
}
