//! Configuration management for the intake clients
//!
//! This module provides utilities for loading and validating client
//! configuration, with support for environment variables.

use std::collections::HashMap;
use std::env;
use std::fmt::Debug;
use std::sync::Arc;
use std::time::Duration;

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::{Result, ServiceError};
use crate::resilience::RetryConfig;

/// Base trait for configuration providers
pub trait ConfigProvider: Send + Sync {
    /// Get a string configuration value
    fn get_string(&self, key: &str) -> Result<String>;
}

/// Extension methods for configuration providers
pub trait ConfigProviderExt: ConfigProvider {
    /// Get an integer configuration value
    fn get_int(&self, key: &str) -> Result<i64> {
        let value = self.get_string(key)?;
        value.parse::<i64>().map_err(|e| {
            ServiceError::configuration(format!("Invalid integer for key {}: {}", key, e))
        })
    }

    /// Get a boolean configuration value
    fn get_bool(&self, key: &str) -> Result<bool> {
        let value = self.get_string(key)?;
        match value.to_lowercase().as_str() {
            "true" | "yes" | "1" | "on" => Ok(true),
            "false" | "no" | "0" | "off" => Ok(false),
            _ => Err(ServiceError::configuration(format!(
                "Invalid boolean value for key {}: {}",
                key, value
            ))),
        }
    }

    /// Get a string configuration value with a default
    fn get_string_or(&self, key: &str, default: &str) -> String {
        self.get_string(key).unwrap_or_else(|_| default.to_string())
    }

    /// Get an integer configuration value with a default
    fn get_int_or(&self, key: &str, default: i64) -> i64 {
        self.get_int(key).unwrap_or(default)
    }

    /// Get a boolean configuration value with a default
    fn get_bool_or(&self, key: &str, default: bool) -> bool {
        self.get_bool(key).unwrap_or(default)
    }
}

impl<T: ConfigProvider> ConfigProviderExt for T {}

/// Environment variable based configuration provider
#[derive(Debug, Clone, Default)]
pub struct EnvConfigProvider {
    /// Optional prefix for environment variables
    prefix: Option<String>,
}

impl EnvConfigProvider {
    /// Create a new environment variable config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Set a prefix for environment variables
    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Format a configuration key as an environment variable
    fn format_key(&self, key: &str) -> String {
        let mut env_key = String::new();

        if let Some(ref prefix) = self.prefix {
            env_key.push_str(prefix);
            env_key.push('_');
        }

        env_key.push_str(
            &key.to_uppercase()
                .replace(|c: char| !c.is_ascii_alphanumeric(), "_"),
        );

        env_key
    }
}

impl ConfigProvider for EnvConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        let env_key = self.format_key(key);

        env::var(&env_key).map_err(|e| match e {
            env::VarError::NotPresent => {
                ServiceError::configuration(format!("Environment variable not set: {}", env_key))
            }
            env::VarError::NotUnicode(_) => ServiceError::configuration(format!(
                "Environment variable is not valid unicode: {}",
                env_key
            )),
        })
    }
}

/// In-memory config provider for testing or static configuration
#[derive(Debug, Clone, Default)]
pub struct MemoryConfigProvider {
    values: HashMap<String, String>,
}

impl MemoryConfigProvider {
    /// Create a new empty memory config provider
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a memory config provider with initial values
    pub fn with_values(values: HashMap<String, String>) -> Self {
        Self { values }
    }

    /// Set a configuration value
    pub fn set<K, V>(&mut self, key: K, value: V)
    where
        K: Into<String>,
        V: ToString,
    {
        self.values.insert(key.into(), value.to_string());
    }
}

impl ConfigProvider for MemoryConfigProvider {
    fn get_string(&self, key: &str) -> Result<String> {
        self.values
            .get(key)
            .cloned()
            .ok_or_else(|| ServiceError::configuration(format!("Configuration key not found: {}", key)))
    }
}

/// A composite config provider that tries multiple providers in order
#[derive(Debug, Clone)]
pub struct CompositeConfigProvider<P: ConfigProvider> {
    providers: Vec<P>,
}

impl<P: ConfigProvider> CompositeConfigProvider<P> {
    /// Create a new composite config provider
    pub fn new() -> Self {
        Self {
            providers: Vec::new(),
        }
    }

    /// Add a provider to the chain
    pub fn add_provider(&mut self, provider: P) {
        self.providers.push(provider);
    }

    /// Create a new provider with an initial list
    pub fn with_providers(providers: Vec<P>) -> Self {
        Self { providers }
    }
}

impl<P: ConfigProvider> ConfigProvider for CompositeConfigProvider<P> {
    fn get_string(&self, key: &str) -> Result<String> {
        for provider in &self.providers {
            if let Ok(value) = provider.get_string(key) {
                return Ok(value);
            }
        }

        Err(ServiceError::configuration(format!(
            "Configuration key not found in any provider: {}",
            key
        )))
    }
}

/// Global default configuration provider
pub static DEFAULT_PROVIDER: Lazy<Arc<EnvConfigProvider>> =
    Lazy::new(|| Arc::new(EnvConfigProvider::new().with_prefix("CRESTLINE")));

/// Trait for service-specific configuration
pub trait ServiceConfig: Debug + Send + Sync {
    /// Validate this configuration
    fn validate(&self) -> Result<()>;

    /// Service name
    fn service_name(&self) -> &str;
}

/// Configuration for the intake API clients and pipeline
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IntakeConfig {
    /// Base URL of the intake API
    pub base_url: String,

    /// Per-request timeout in seconds
    pub timeout_seconds: u64,

    /// Retry attempts after the first failed submission
    pub max_retries: u32,

    /// Wait before the first retry, in seconds; later waits double
    pub retry_initial_interval_secs: u64,

    /// Sliding rate-limit window in seconds
    pub rate_limit_window_secs: i64,

    /// Submissions allowed per window
    pub rate_limit_max_submissions: usize,

    /// Delay before per-field validation fires, in milliseconds
    pub debounce_delay_ms: u64,
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            base_url: "https://api.crestline.vc/v1".to_string(),
            timeout_seconds: 30,
            max_retries: 2,
            retry_initial_interval_secs: 2,
            rate_limit_window_secs: 60,
            rate_limit_max_submissions: 5,
            debounce_delay_ms: 300,
        }
    }
}

impl IntakeConfig {
    /// Load configuration from a config provider
    pub fn from_provider<P: ConfigProvider + ConfigProviderExt>(provider: &P) -> Result<Self> {
        let defaults = Self::default();

        let config = Self {
            base_url: provider.get_string_or("intake_base_url", &defaults.base_url),
            timeout_seconds: provider
                .get_int_or("intake_timeout_seconds", defaults.timeout_seconds as i64)
                as u64,
            max_retries: provider.get_int_or("intake_max_retries", defaults.max_retries as i64)
                as u32,
            retry_initial_interval_secs: provider.get_int_or(
                "intake_retry_initial_interval_secs",
                defaults.retry_initial_interval_secs as i64,
            ) as u64,
            rate_limit_window_secs: provider.get_int_or(
                "intake_rate_limit_window_secs",
                defaults.rate_limit_window_secs,
            ),
            rate_limit_max_submissions: provider.get_int_or(
                "intake_rate_limit_max_submissions",
                defaults.rate_limit_max_submissions as i64,
            ) as usize,
            debounce_delay_ms: provider
                .get_int_or("intake_debounce_delay_ms", defaults.debounce_delay_ms as i64)
                as u64,
        };

        config.validate()?;
        Ok(config)
    }

    /// Build the retry policy these knobs describe
    pub fn retry_config(&self) -> RetryConfig {
        RetryConfig {
            max_retries: self.max_retries,
            initial_interval: Duration::from_secs(self.retry_initial_interval_secs),
            ..RetryConfig::default()
        }
    }

    /// Per-request timeout as a duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

impl ServiceConfig for IntakeConfig {
    fn validate(&self) -> Result<()> {
        if self.base_url.is_empty() {
            return Err(ServiceError::configuration("Intake base URL is required"));
        }

        let url = Url::parse(&self.base_url)
            .map_err(|e| ServiceError::configuration(format!("Invalid intake base URL: {}", e)))?;
        if url.scheme() != "http" && url.scheme() != "https" {
            return Err(ServiceError::configuration(
                "Intake base URL must be http or https",
            ));
        }

        if self.timeout_seconds == 0 {
            return Err(ServiceError::configuration("Timeout must be positive"));
        }

        if self.rate_limit_window_secs <= 0 {
            return Err(ServiceError::configuration(
                "Rate limit window must be positive",
            ));
        }

        if self.rate_limit_max_submissions == 0 {
            return Err(ServiceError::configuration(
                "Rate limit must allow at least one submission",
            ));
        }

        Ok(())
    }

    fn service_name(&self) -> &str {
        "crestline-intake"
    }
}
