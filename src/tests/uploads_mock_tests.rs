//! Mock tests for the uploads client
//!
//! These tests use WireMock to simulate both halves of the upload flow:
//! the signed-target endpoint and the transfer URL it hands back.

#[cfg(test)]
mod tests {
    use wiremock::matchers::{body_partial_json, header_exists, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};
    use serde_json::json;
    use chrono::{Duration, Utc};

    use crate::config::IntakeConfig;
    use crate::model::{FileUpload, FilePurpose};
    use crate::services::uploads::{UploadTarget, UploadsClient};
    use crate::validators::ErrorCode;

    /// Creates a test client pointed at the mock server
    fn create_test_client(mock_server: &MockServer) -> UploadsClient {
        let config = IntakeConfig {
            base_url: mock_server.uri(),
            timeout_seconds: 5,
            ..IntakeConfig::default()
        };
        UploadsClient::new(config).expect("Failed to build uploads client")
    }

    fn deck_pdf() -> FileUpload {
        FileUpload::new("deck.pdf", "application/pdf", vec![0u8; 4096])
    }

    fn target_response(mock_server: &MockServer) -> serde_json::Value {
        json!({
            "uploadTargetRef": "upl_001",
            "transferUrl": format!("{}/transfer/upl_001", mock_server.uri()),
            "expiresAt": "2099-01-01T00:00:00Z",
            "maxSize": 26_214_400u64,
            "allowedTypes": ["application/pdf", "image/jpeg", "image/png"]
        })
    }

    #[tokio::test]
    async fn test_upload_requests_target_then_transfers() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/uploads/targets"))
            .and(header_exists("X-Request-Id"))
            .and(body_partial_json(json!({
                "fileName": "deck.pdf",
                "fileType": "application/pdf",
                "purpose": "general"
            })))
            .respond_with(ResponseTemplate::new(201).set_body_json(target_response(&mock_server)))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/transfer/upl_001"))
            .respond_with(ResponseTemplate::new(200))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let stored = client.upload_file(&deck_pdf()).await.unwrap();

        assert_eq!(stored.reference, "upl_001");
        assert_eq!(stored.file_name, "deck.pdf");
    }

    #[tokio::test]
    async fn test_verification_upload_declares_purpose() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/uploads/targets"))
            .and(body_partial_json(json!({"purpose": "verification"})))
            .respond_with(ResponseTemplate::new(201).set_body_json(target_response(&mock_server)))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/transfer/upl_001"))
            .respond_with(ResponseTemplate::new(200))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let letter = FileUpload::new("letter.pdf", "application/pdf", vec![0u8; 4096]);
        client.upload_verification_document(&letter).await.unwrap();
    }

    #[tokio::test]
    async fn test_oversized_file_rejected_without_network() {
        let mock_server = MockServer::start().await;

        // No mocks mounted: any request would return 404 and fail differently
        let client = create_test_client(&mock_server);

        let mut file = deck_pdf();
        file.size_bytes = 26 * 1024 * 1024;
        let error = client.upload_file(&file).await.unwrap_err();

        let findings = error.rejection_errors().expect("expected file findings");
        assert!(findings.iter().any(|e| e.code == ErrorCode::FileTooLarge));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_verification_path_rejects_images_locally() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let image = FileUpload::new("letter.png", "image/png", vec![0u8; 4096]);
        let error = client.upload_verification_document(&image).await.unwrap_err();

        let findings = error.rejection_errors().expect("expected file findings");
        assert!(findings.iter().any(|e| e.code == ErrorCode::InvalidFileType));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_expired_target_fails_before_transfer() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let target = UploadTarget {
            upload_target_ref: "upl_stale".into(),
            transfer_url: format!("{}/transfer/upl_stale", mock_server.uri()),
            expires_at: Utc::now() - Duration::minutes(5),
            max_size: 26_214_400,
            allowed_types: vec![],
        };

        let error = client.transfer(&target, &deck_pdf()).await.unwrap_err();
        assert!(error.to_string().contains("expired"));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_target_size_echo_is_respected() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        // Server granted a smaller ceiling than the general limit
        let target = UploadTarget {
            upload_target_ref: "upl_small".into(),
            transfer_url: format!("{}/transfer/upl_small", mock_server.uri()),
            expires_at: Utc::now() + Duration::minutes(10),
            max_size: 1024,
            allowed_types: vec![],
        };

        let error = client.transfer(&target, &deck_pdf()).await.unwrap_err();
        assert!(error.to_string().contains("limit"));
        assert!(mock_server.received_requests().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_target_type_echo_is_respected() {
        let mock_server = MockServer::start().await;
        let client = create_test_client(&mock_server);

        let target = UploadTarget {
            upload_target_ref: "upl_pdfonly".into(),
            transfer_url: format!("{}/transfer/upl_pdfonly", mock_server.uri()),
            expires_at: Utc::now() + Duration::minutes(10),
            max_size: 26_214_400,
            allowed_types: vec!["image/png".into()],
        };

        let error = client.transfer(&target, &deck_pdf()).await.unwrap_err();
        assert!(error.to_string().contains("accepted type"));
    }

    #[tokio::test]
    async fn test_failed_transfer_surfaces_service_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/uploads/targets"))
            .respond_with(ResponseTemplate::new(201).set_body_json(target_response(&mock_server)))
            .mount(&mock_server)
            .await;

        Mock::given(method("PUT"))
            .and(path("/transfer/upl_001"))
            .respond_with(
                ResponseTemplate::new(403).set_body_json(json!({"error": "Signature mismatch"})),
            )
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let error = client.upload_file(&deck_pdf()).await.unwrap_err();

        assert_eq!(error.status_code(), Some(403));
        assert!(error.to_string().contains("Signature mismatch"));
    }

    #[tokio::test]
    async fn test_target_endpoint_outage_is_retryable() {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/uploads/targets"))
            .respond_with(ResponseTemplate::new(503).set_body_string("upstream unavailable"))
            .mount(&mock_server)
            .await;

        let client = create_test_client(&mock_server);
        let error = client
            .request_upload_target(&deck_pdf(), FilePurpose::General)
            .await
            .unwrap_err();

        assert!(error.is_retryable());
        assert_eq!(error.status_code(), Some(503));
    }
}
