//! Application Submission Example
//!
//! This example pushes a demo startup application through the full
//! pipeline: validation, the client-side rate limiter, and the HTTP
//! submission with retries.
//!
//! To run this example against a local or staging intake API:
//! ```
//! CRESTLINE_INTAKE_BASE_URL=http://localhost:8080/v1 cargo run --example submit_application
//! ```

use intake_sdk::{
    config::{ConfigProviderExt, EnvConfigProvider, IntakeConfig},
    error::Result,
    model::StartupApplication,
    pipeline::{ApplicationService, SubmissionOutcome},
    progress::startup_completion_percentage,
    services::{applications::ApplicationsClient, ServiceClient},
};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::init_from_env(env_logger::Env::default().default_filter_or("info"));

    println!("Application Submission Example");

    // Require an explicit endpoint so the demo never posts anywhere real
    let provider = EnvConfigProvider::new().with_prefix("CRESTLINE");
    let base_url = provider.get_string_or("intake_base_url", "");
    if base_url.is_empty() {
        eprintln!("Please set CRESTLINE_INTAKE_BASE_URL environment variable");
        std::process::exit(1);
    }

    let config = IntakeConfig::from_provider(&provider)?;

    // Probe service health before submitting
    let client = ApplicationsClient::new(config.clone())?;
    match client.health_check().await {
        Ok(true) => println!("Intake API at {} is healthy", client.base_url()),
        Ok(false) => println!("Intake API reports degraded health, submitting anyway"),
        Err(e) => println!("Health check failed ({}), submitting anyway", e),
    }

    let service = ApplicationService::builder().config(config).build()?;

    let form = StartupApplication {
        full_name: "Ada Lovelace".into(),
        role: "CEO".into(),
        email: "ada@analytical-engines.example.com".into(),
        phone: "+1 415 555 0123".into(),
        company_name: "Analytical Engines".into(),
        website: "https://analytical-engines.example.com".into(),
        stage: "seed".into(),
        industry: "enterprise-saas".into(),
        one_liner: "Programmable computation for every business".into(),
        problem: "Manual bookkeeping does not scale past a handful of clerks".into(),
        solution: "A general-purpose analytical engine with a simple ledger API".into(),
        traction: "early-users".into(),
        deck_link: "https://docs.google.com/presentation/d/deck".into(),
        raise_amount: "1m-3m".into(),
        accuracy_confirm: true,
        understanding_confirm: true,
        signature: "Ada Lovelace".into(),
        ..StartupApplication::default()
    };

    println!(
        "Submitting application for {} ({}% complete)...",
        form.company_name,
        startup_completion_percentage(&form)
    );

    match service.submit_startup(&form).await {
        SubmissionOutcome::Accepted { id, created_at } => {
            println!("Accepted as {} at {}", id, created_at);
        }
        SubmissionOutcome::Rejected { errors } => {
            println!("Rejected with {} finding(s):", errors.len());
            for error in errors {
                println!("  {}", error);
            }
        }
        SubmissionOutcome::Throttled { retry_after_secs } => {
            println!("Throttled; try again in {} seconds", retry_after_secs);
        }
        SubmissionOutcome::Failed { error } => {
            println!("Submission failed: {}", error);
        }
    }

    Ok(())
}
