//! Configuration management

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::debug;

use crate::core::errors::{Result, TranslatorError};

/// Default Apertium JSON translate endpoint
pub const DEFAULT_ENDPOINT: &str = "https://api.apertium.org/json/translate";

/// Shortest key the service accepts, counted in `char`s (not UTF-16 units)
pub const MIN_API_KEY_LEN: usize = 27;

/// Proof that a configuration passed [`ClientConfig::validate`]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Ready(());

/// Configuration for the Apertium client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientConfig {
    pub api_key: Option<String>,
    pub referrer: Option<String>,
    pub api_endpoint: String,
    /// No timeout when unset
    pub timeout_ms: Option<u64>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_key: None,
            referrer: None,
            api_endpoint: DEFAULT_ENDPOINT.to_string(),
            timeout_ms: None,
        }
    }
}

impl ClientConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> anyhow::Result<Self> {
        let api_key = std::env::var("APERTIUM_API_KEY").ok();
        let referrer = std::env::var("APERTIUM_REFERRER").ok();

        let api_endpoint =
            std::env::var("APERTIUM_ENDPOINT").unwrap_or_else(|_| DEFAULT_ENDPOINT.to_string());

        let timeout_ms = match std::env::var("REQUEST_TIMEOUT_MS") {
            Ok(value) => Some(value.parse::<u64>()?),
            Err(_) => None,
        };

        Ok(Self {
            api_key,
            referrer,
            api_endpoint,
            timeout_ms,
        })
    }

    /// Load from JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to file
    pub fn to_file<P: AsRef<Path>>(&self, path: P) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Set the API key
    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Set the HTTP referrer sent with every request
    pub fn with_referrer(mut self, referrer: impl Into<String>) -> Self {
        self.referrer = Some(referrer.into());
        self
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    pub fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = Some(timeout_ms);
        self
    }

    /// Check the credential before a request goes out.
    ///
    /// Only the key length is checked; the service decides whether the key
    /// is actually valid.
    pub fn validate(&self) -> Result<Ready> {
        match &self.api_key {
            Some(key) if key.chars().count() >= MIN_API_KEY_LEN => Ok(Ready(())),
            _ => {
                debug!("Rejecting API key shorter than {} characters", MIN_API_KEY_LEN);
                Err(TranslatorError::ConfigError {
                    message: "INVALID_API_KEY - Please set the API Key with your Apertium API Key"
                        .to_string(),
                })
            }
        }
    }
}
