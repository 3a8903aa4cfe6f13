//! Resilience patterns for the submission pipeline
//!
//! Retry with exponential backoff is the only pattern the intake flow
//! needs: submissions are user-initiated one-shots, so throttling beyond
//! the rate limiter and bounded retry stays with the server.

mod retry;

pub use retry::{RetryConfig, RetryExecutor};
