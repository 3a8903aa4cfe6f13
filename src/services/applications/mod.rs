//! Client for the application submission endpoints
//!
//! This module provides a strongly-typed client for posting startup and
//! investor applications and probing service health. Retry policy lives in
//! the pipeline, not here: one call means one HTTP request.

mod models;
pub use models::*;

use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::config::{IntakeConfig, ServiceConfig, DEFAULT_PROVIDER};
use crate::error::{Result, ServiceError};
use crate::services::common::{
    build_http_client, check_health, new_request_id, parse_error_response, UserAgent,
    REQUEST_ID_HEADER,
};
use crate::services::ServiceClient;

const SERVICE_NAME: &str = "applications";

/// Client for the intake applications API
pub struct ApplicationsClient {
    http_client: Client,
    config: IntakeConfig,
}

impl ApplicationsClient {
    /// Create a client with the given configuration
    pub fn new(config: IntakeConfig) -> Result<Self> {
        config.validate()?;

        let http_client = build_http_client(
            Some(UserAgent {
                extra: Some("applications-client".to_string()),
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

    /// Submit a startup application
    pub async fn submit_startup(
        &self,
        payload: &StartupSubmissionPayload,
    ) -> Result<SubmissionReceipt> {
        self.post_json("applications/startup", payload).await
    }

    /// Submit an investor application
    pub async fn submit_investor(
        &self,
        payload: &InvestorSubmissionPayload,
    ) -> Result<SubmissionReceipt> {
        self.post_json("applications/investor", payload).await
    }

    async fn post_json<T, R>(&self, endpoint: &str, body: &T) -> Result<R>
    where
        T: Serialize + Send + Sync,
        R: DeserializeOwned + Send,
    {
        let url = format!("{}/{}", self.config.base_url, endpoint);
        let request_id = new_request_id();
        debug!("POST {} [{}]", url, request_id);

        let response = self
            .http_client
            .post(&url)
            .header(REQUEST_ID_HEADER, &request_id)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        if status.is_success() {
            debug!("{} {} accepted [{}]", status.as_u16(), endpoint, request_id);
            response
                .json::<R>()
                .await
                .map_err(|e| ServiceError::parsing(format!("Failed to parse response: {}", e)))
        } else {
            Err(parse_error_response(SERVICE_NAME, endpoint, &request_id, response).await)
        }
    }
}

#[async_trait]
impl ServiceClient for ApplicationsClient {
    fn name(&self) -> &str {
        SERVICE_NAME
    }

    fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Probe the intake API, returning whether it reported healthy
    async fn health_check(&self) -> Result<bool> {
        check_health(&self.http_client, &self.config.base_url).await
    }
}

impl std::fmt::Debug for ApplicationsClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApplicationsClient")
            .field("base_url", &self.config.base_url)
            .field("service", &self.config.service_name())
            .finish()
    }
}
