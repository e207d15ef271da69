//! Configuration structures for networking API clients.
//!
//! This module provides the endpoint configuration a [`ServiceClient`] is built
//! from, including validation of the values a caller (or a JSON file) supplies.
//!
//! [`ServiceClient`]: crate::client::ServiceClient

use crate::Error;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use url::Url;
use validator::Validate;

/// Default API version prefix appended to the endpoint.
pub const DEFAULT_RESOURCE_BASE: &str = "v2.0/";

/// Configuration for a networking API client.
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct NetworkClientConfig {
    /// Networking service endpoint (e.g. `https://network.example.com:9696/`)
    #[validate(url)]
    pub endpoint: String,

    /// Token sent in the `X-Auth-Token` header
    #[serde(default, skip_serializing)]
    pub token: Option<String>,

    /// Path joined to the endpoint before resource paths
    #[validate(length(min = 1))]
    #[serde(default = "default_resource_base")]
    pub resource_base: String,

    /// Request timeout in seconds
    #[validate(range(min = 1, max = 300))]
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Whether to verify TLS certificates
    #[serde(default = "default_tls_verify")]
    pub tls_verify: bool,
}

fn default_resource_base() -> String {
    DEFAULT_RESOURCE_BASE.to_string()
}

const fn default_request_timeout_secs() -> u64 {
    20
}

const fn default_tls_verify() -> bool {
    true
}

impl NetworkClientConfig {
    /// Create a new client configuration for the given endpoint.
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint is not a valid URL.
    pub fn new(endpoint: impl Into<String>) -> Result<Self, Error> {
        let config = Self {
            endpoint: endpoint.into(),
            token: None,
            resource_base: default_resource_base(),
            request_timeout_secs: default_request_timeout_secs(),
            tls_verify: default_tls_verify(),
        };

        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;

        Ok(config)
    }

    /// Load a configuration from its JSON representation and validate it.
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed or validation fails.
    pub fn from_json(json: &str) -> Result<Self, Error> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| Error::ConfigError(format!("Invalid configuration JSON: {e}")))?;
        config
            .validate()
            .map_err(|e| Error::ConfigError(format!("Invalid configuration: {e}")))?;
        Ok(config)
    }

    /// Set the auth token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Set the resource base path.
    #[must_use]
    pub fn with_resource_base(mut self, base: impl Into<String>) -> Self {
        self.resource_base = base.into();
        self
    }

    /// Set request timeout in seconds.
    #[must_use]
    pub const fn with_timeout(mut self, seconds: u64) -> Self {
        self.request_timeout_secs = seconds;
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Get the request timeout as a Duration.
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Parse the endpoint URL.
    ///
    /// # Errors
    ///
    /// Returns an error if the URL cannot be parsed.
    pub fn parse_endpoint(&self) -> Result<Url, Error> {
        Url::parse(&self.endpoint)
            .map_err(|e| Error::ConfigError(format!("Invalid endpoint URL: {e}")))
    }
}
