//! Mock tests for the applications client
//!
//! These tests use WireMock to simulate the intake API and verify that the
//! applications client sends the right requests and maps responses and
//! errors correctly.

#[cfg(test)]
mod tests {
    use wiremock::matchers::{header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use serde_json::json;

    use crate::config::IntakeConfig;
    use crate::error::ServiceError;
    use crate::model::{InvestorApplication, StartupApplication};
    use crate::services::applications::{
        ApplicationsClient, InvestorSubmissionPayload, StartupSubmissionPayload,
    };
    use crate::services::ServiceClient;

    /// Creates a test client pointed at the mock server
    fn create_test_client(mock_server: &MockServer) -> ApplicationsClient {
        let config = IntakeConfig {
            base_url: mock_server.uri(),
            timeout_seconds: 5,
            ..IntakeConfig::default()
        };
        ApplicationsClient::new(config).expect("Failed to build applications client")
    }

    fn startup_payload() -> StartupSubmissionPayload {
        let form = StartupApplication {
            full_name: "Ada Lovelace".into(),
            email: "ada@example.com".into(),
            company_name: "Analytical Engines".into(),
            ..StartupApplication::default()
        };
        StartupSubmissionPayload::from_form(&form, None)
    }

    #[tokio::test]
    async fn test_submit_startup_parses_receipt() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "id": "app_8841",
            "createdAt": "2026-03-01T12:00:00Z"
        });

        // Every submission must carry a request id for tracing
        Mock::given(method("POST"))
            .and(path("/applications/startup"))
            .and(header_exists("X-Request-Id"))
            .respond_with(ResponseTemplate::new(201).set_body_json(&mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let receipt = client.submit_startup(&startup_payload()).await.unwrap();

        assert_eq!(receipt.id, "app_8841");
        assert_eq!(receipt.created_at.to_rfc3339(), "2026-03-01T12:00:00+00:00");
    }

    #[tokio::test]
    async fn test_submit_investor_posts_to_investor_endpoint() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "id": "inv_17",
            "createdAt": "2026-03-01T12:00:00Z"
        });

        Mock::given(method("POST"))
            .and(path("/applications/investor"))
            .respond_with(ResponseTemplate::new(201).set_body_json(&mock_response))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let payload = InvestorSubmissionPayload::from_form(&InvestorApplication::default(), None);
        let receipt = client.submit_investor(&payload).await.unwrap();

        assert_eq!(receipt.id, "inv_17");
    }

    #[tokio::test]
    async fn test_rejection_carries_server_field_errors() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "error": "Validation failed",
            "errors": [
                {"field": "email", "message": "Email domain is not accepted", "code": "INVALID_FORMAT"},
                {"field": "signature", "message": "Signature is required", "code": "REQUIRED_FIELD"}
            ]
        });

        Mock::given(method("POST"))
            .and(path("/applications/startup"))
            .respond_with(ResponseTemplate::new(400).set_body_json(&mock_response))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let error = client.submit_startup(&startup_payload()).await.unwrap_err();

        let errors = error.rejection_errors().expect("expected rejection errors");
        assert_eq!(errors.len(), 2);
        assert_eq!(errors[0].field, "email");
        assert!(!error.is_retryable());
    }

    #[tokio::test]
    async fn test_retry_after_header_wins_over_body_hint() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "error": "Rate limit exceeded",
            "retryAfterSeconds": 300
        });

        Mock::given(method("POST"))
            .and(path("/applications/startup"))
            .respond_with(
                ResponseTemplate::new(429)
                    .set_body_json(&mock_response)
                    .insert_header("Retry-After", "30"),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let error = client.submit_startup(&startup_payload()).await.unwrap_err();

        assert_eq!(error.retry_after_secs(), Some(30));
        assert!(error.is_retryable());
    }

    #[tokio::test]
    async fn test_throttle_body_hint_used_without_header() {
        let mock_server = MockServer::start().await;

        let mock_response = json!({
            "error": "Rate limit exceeded",
            "retryAfterSeconds": 45
        });

        Mock::given(method("POST"))
            .and(path("/applications/startup"))
            .respond_with(ResponseTemplate::new(429).set_body_json(&mock_response))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let error = client.submit_startup(&startup_payload()).await.unwrap_err();

        assert_eq!(error.retry_after_secs(), Some(45));
    }

    #[tokio::test]
    async fn test_server_error_is_retryable_with_context() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/applications/startup"))
            .respond_with(
                ResponseTemplate::new(500).set_body_json(json!({"error": "Database unavailable"})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let error = client.submit_startup(&startup_payload()).await.unwrap_err();

        assert!(error.is_retryable());
        assert_eq!(error.status_code(), Some(500));
        match error {
            ServiceError::WithContext { inner, context } => {
                assert!(matches!(*inner, ServiceError::Service(_)));
                assert_eq!(context.service, "applications");
            }
            other => panic!("Expected WithContext, got: {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_health_check() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "ok"})))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(client.health_check().await.unwrap());
    }

    #[tokio::test]
    async fn test_health_check_reports_unhealthy_without_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/health"))
            .respond_with(ResponseTemplate::new(503).set_body_string("Service Unavailable"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        assert!(!client.health_check().await.unwrap());
    }
}
