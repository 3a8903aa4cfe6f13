//! Client for the file upload flow
//!
//! Uploads are two-step: request a signed target from the uploads service,
//! then transfer the bytes to the target URL. The application payload then
//! carries only the stored reference.

mod models;
pub use models::*;

use async_trait::async_trait;
use log::{debug, warn};
use reqwest::Client;

use crate::config::{IntakeConfig, ServiceConfig, DEFAULT_PROVIDER};
use crate::error::{Result, ServiceError};
use crate::model::file::{FilePurpose, FileUpload, StoredFileRef};
use crate::services::common::{
    build_http_client, check_health, new_request_id, parse_error_response, UserAgent,
    REQUEST_ID_HEADER,
};
use crate::services::ServiceClient;
use crate::validators::file::validate_file;

const SERVICE_NAME: &str = "uploads";

/// Client for the intake uploads API
pub struct UploadsClient {
    http_client: Client,
    config: IntakeConfig,
}

impl UploadsClient {
    /// Create a client with the given configuration
    pub fn new(config: IntakeConfig) -> Result<Self> {
        config.validate()?;

        let http_client = build_http_client(
            Some(UserAgent {
                extra: Some("uploads-client".to_string()),
                ..UserAgent::default()
            }),
            Some(config.timeout()),
        )?;

        Ok(Self {
            http_client,
            config,
        })
    }

    /// Create a client configured from `CRESTLINE_*` environment variables
    pub fn from_env() -> Result<Self> {
        let config = IntakeConfig::from_provider(&**DEFAULT_PROVIDER)?;
        Self::new(config)
    }

    /// Upload a pitch deck or other general attachment
    pub async fn upload_file(&self, file: &FileUpload) -> Result<StoredFileRef> {
        self.upload(file, FilePurpose::General).await
    }

    /// Upload an accreditation verification document
    pub async fn upload_verification_document(&self, file: &FileUpload) -> Result<StoredFileRef> {
        self.upload(file, FilePurpose::Verification).await
    }

    async fn upload(&self, file: &FileUpload, purpose: FilePurpose) -> Result<StoredFileRef> {
        // Re-check the file rules so a caller bypassing form validation
        // still cannot start a doomed transfer
        let findings = validate_file("file", file, purpose);
        if !findings.is_empty() {
            return Err(ServiceError::rejected(findings));
        }

        let target = self.request_upload_target(file, purpose).await?;
        self.transfer(&target, file).await
    }

    /// Ask the uploads service for a signed upload target
    pub async fn request_upload_target(
        &self,
        file: &FileUpload,
        purpose: FilePurpose,
    ) -> Result<UploadTarget> {
        let url = format!("{}/uploads/targets", self.config.base_url);
        let request_id = new_request_id();
        let request = UploadTargetRequest::for_file(file, purpose);
        debug!(
            "POST {} [{}] for {} ({} bytes)",
            url, request_id, file.file_name, file.size_bytes
        );

        let response = self
            .http_client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(&request)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            response
                .json::<UploadTarget>()
                .await
                .map_err(|e| ServiceError::parsing(format!("Failed to parse upload target: {}", e)))
        } else {
            Err(parse_error_response(SERVICE_NAME, "uploads/targets", &request_id, response).await)
        }
    }

    /// Transfer file bytes to a previously issued target
    ///
    /// The target's own expiry and limit echo are checked first; a stale or
    /// over-limit transfer fails without touching the network.
    pub async fn transfer(&self, target: &UploadTarget, file: &FileUpload) -> Result<StoredFileRef> {
        if target.is_expired() {
            return Err(ServiceError::validation(format!(
                "Upload target for {} expired at {}",
                file.file_name, target.expires_at
            )));
        }

        if file.size_bytes > target.max_size {
            return Err(ServiceError::validation(format!(
                "{} is {} bytes, over the {} byte limit for this target",
                file.file_name, file.size_bytes, target.max_size
            )));
        }

        if !target.allowed_types.is_empty() && !target.allowed_types.contains(&file.mime_type) {
            return Err(ServiceError::validation(format!(
                "{} is not an accepted type for this target",
                file.mime_type
            )));
        }

        let request_id = new_request_id();
        debug!(
            "PUT {} [{}] ({} bytes)",
            target.transfer_url, request_id, file.size_bytes
        );

        let response = self
            .http_client
            .put(&target.transfer_url)
            .header(REQUEST_ID_HEADER, &request_id)
            .header(reqwest::header::CONTENT_TYPE, &file.mime_type)
            .body(file.bytes.clone())
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("Stored {} as {}", file.file_name, target.upload_target_ref);
            Ok(StoredFileRef {
                reference: target.upload_target_ref.clone(),
                file_name: file.file_name.clone(),
            })
        } else {
            warn!(
                "Transfer for {} failed with {} [{}]",
                file.file_name, status, request_id
            );
            Err(parse_error_response(SERVICE_NAME, "transfer", &request_id, response).await)
        }
    }
}

#[async_trait]
impl ServiceClient for UploadsClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Probe the shared intake health endpoint
    async fn health_check(&self) -> Result<bool> {
        check_health(&self.http_client, &self.config.base_url).await
    }
}

impl std::fmt::Debug for UploadsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("UploadsClient")
            .field("base_url", &self.config.base_url)
            .finish()
    }
}
