//! Unit and integration tests for the Intake SDK
//!
//! This module contains tests that cross component boundaries: mocked HTTP
//! tests for the service clients and end-to-end pipeline scenarios.

// Re-export test modules
pub mod applications_mock_tests;
pub mod uploads_mock_tests;
