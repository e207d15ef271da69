//! Shared HTTP client for networking API bindings.
//!
//! [`ServiceClient`] resolves resource URLs under the service's resource base,
//! injects the auth token and JSON headers, checks the status codes an
//! operation expects, and hands back the raw response for deferred decoding.

use crate::config::{NetworkClientConfig, DEFAULT_RESOURCE_BASE};
use crate::{Error, Result};
use bytes::Bytes;
use reqwest::header::{HeaderMap, ACCEPT};
use reqwest::{Client, ClientBuilder, Method, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};
use url::Url;

/// Default request timeout in seconds.
pub const DEFAULT_TIMEOUT: u64 = 20;

/// Default connect timeout in seconds.
pub const DEFAULT_CONNECT_TIMEOUT: u64 = 10;

/// Default idle timeout for connection pools
pub const DEFAULT_POOL_IDLE_TIMEOUT: u64 = 90;

/// Default maximum idle connections per host
pub const DEFAULT_POOL_MAX_IDLE_PER_HOST: usize = 10;

/// Header carrying the auth token.
pub const AUTH_TOKEN_HEADER: &str = "X-Auth-Token";

const USER_AGENT: &str = concat!("neutron-core/", env!("CARGO_PKG_VERSION"));

/// HTTP client configuration handed to the underlying reqwest client.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Request timeout
    pub timeout: Duration,

    /// Connection pool idle timeout
    pub pool_idle_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Enable response compression
    pub enable_compression: bool,
}

impl ClientConfig {
    /// Create a new client configuration with default values.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            timeout: Duration::from_secs(DEFAULT_TIMEOUT),
            pool_idle_timeout: Duration::from_secs(DEFAULT_POOL_IDLE_TIMEOUT),
            pool_max_idle_per_host: DEFAULT_POOL_MAX_IDLE_PER_HOST,
            enable_compression: true,
        }
    }

    /// Set request timeout.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set connection pool idle timeout.
    #[must_use]
    pub const fn with_pool_idle_timeout(mut self, timeout: Duration) -> Self {
        self.pool_idle_timeout = timeout;
        self
    }

    /// Set maximum idle connections per host.
    #[must_use]
    pub const fn with_pool_max_idle(mut self, max: usize) -> Self {
        self.pool_max_idle_per_host = max;
        self
    }

    /// Enable or disable compression.
    #[must_use]
    pub const fn with_compression(mut self, enabled: bool) -> Self {
        self.enable_compression = enabled;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Status codes accepted for a method when the caller does not override them.
#[must_use]
pub fn default_ok_codes(method: &Method) -> &'static [StatusCode] {
    if *method == Method::POST || *method == Method::PUT {
        &[StatusCode::CREATED, StatusCode::ACCEPTED]
    } else if *method == Method::PATCH {
        &[StatusCode::OK, StatusCode::ACCEPTED, StatusCode::NO_CONTENT]
    } else if *method == Method::DELETE {
        &[StatusCode::ACCEPTED, StatusCode::NO_CONTENT]
    } else {
        &[StatusCode::OK]
    }
}

/// Per-request options: JSON body, query pairs and accepted status codes.
#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    body: Option<serde_json::Value>,
    query: Vec<(&'static str, String)>,
    ok_codes: Option<Vec<StatusCode>>,
}

impl RequestOptions {
    /// Create empty request options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a JSON body; this also sets `Content-Type: application/json`.
    #[must_use]
    pub fn with_json(mut self, body: serde_json::Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Attach query string pairs.
    #[must_use]
    pub fn with_query(mut self, query: Vec<(&'static str, String)>) -> Self {
        self.query = query;
        self
    }

    /// Override the status codes treated as success.
    #[must_use]
    pub fn with_ok_codes(mut self, codes: &[StatusCode]) -> Self {
        self.ok_codes = Some(codes.to_vec());
        self
    }

    /// JSON body, if any.
    #[must_use]
    pub fn body(&self) -> Option<&serde_json::Value> {
        self.body.as_ref()
    }

    /// Query pairs.
    #[must_use]
    pub fn query(&self) -> &[(&'static str, String)] {
        &self.query
    }
}

/// A response whose status was accepted, with the body not yet decoded.
#[derive(Debug, Clone)]
pub struct RawResponse {
    /// Response status
    pub status: StatusCode,
    /// Response headers
    pub headers: HeaderMap,
    /// Raw response body
    pub body: Bytes,
}

/// Builder for [`ServiceClient`].
#[derive(Debug, Clone)]
pub struct ServiceClientBuilder {
    endpoint: Url,
    resource_base: String,
    http_config: ClientConfig,
    token: Option<String>,
    user_agent: String,
    tls_verify: bool,
}

impl ServiceClientBuilder {
    /// Create a builder for the given service endpoint.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the endpoint is not a valid base URL.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let url = Url::parse(endpoint.as_ref()).map_err(|err| {
            Error::ConfigError(format!("Invalid endpoint `{}`: {err}", endpoint.as_ref()))
        })?;
        Self::from_url(url)
    }

    fn from_url(mut url: Url) -> Result<Self> {
        if url.cannot_be_a_base() {
            return Err(Error::ConfigError(format!(
                "Endpoint `{url}` cannot be used as a base URL"
            )));
        }
        if !url.path().ends_with('/') {
            let path = format!("{}/", url.path());
            url.set_path(&path);
        }

        Ok(Self {
            endpoint: url,
            resource_base: DEFAULT_RESOURCE_BASE.to_string(),
            http_config: ClientConfig::new(),
            token: None,
            user_agent: USER_AGENT.to_string(),
            tls_verify: true,
        })
    }

    /// Create a builder from a validated [`NetworkClientConfig`].
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the configured endpoint is invalid.
    pub fn from_config(config: &NetworkClientConfig) -> Result<Self> {
        let mut builder = Self::from_url(config.parse_endpoint()?)?
            .with_resource_base(config.resource_base.clone())
            .with_http_config(ClientConfig::new().with_timeout(config.timeout()))
            .with_tls_verify(config.tls_verify);
        if let Some(token) = &config.token {
            builder = builder.with_token(token.clone());
        }
        Ok(builder)
    }

    /// Configure the `X-Auth-Token` header.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Override the resource base (`v2.0/` by default).
    #[must_use]
    pub fn with_resource_base(mut self, base: impl Into<String>) -> Self {
        self.resource_base = base.into();
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.http_config = config;
        self
    }

    /// Override the `User-Agent` header.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Set whether to verify TLS certificates.
    #[must_use]
    pub const fn with_tls_verify(mut self, verify: bool) -> Self {
        self.tls_verify = verify;
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the resource base does not resolve
    /// against the endpoint or the HTTP client cannot be constructed.
    pub fn build(self) -> Result<ServiceClient> {
        let mut base = self.resource_base.trim_start_matches('/').to_string();
        if !base.is_empty() && !base.ends_with('/') {
            base.push('/');
        }
        let resource_base = self.endpoint.join(&base).map_err(|err| {
            Error::ConfigError(format!("Invalid resource base `{base}`: {err}"))
        })?;

        let mut builder = ClientBuilder::new()
            .timeout(self.http_config.timeout)
            .user_agent(self.user_agent)
            .pool_idle_timeout(self.http_config.pool_idle_timeout)
            .pool_max_idle_per_host(self.http_config.pool_max_idle_per_host)
            .connect_timeout(Duration::from_secs(DEFAULT_CONNECT_TIMEOUT));

        if !self.http_config.enable_compression {
            builder = builder.no_gzip();
        }
        if !self.tls_verify {
            warn!("TLS verification disabled for networking API client");
            builder = builder.danger_accept_invalid_certs(true);
        }

        let http = builder
            .build()
            .map_err(|err| Error::ConfigError(format!("Failed to build HTTP client: {err}")))?;

        Ok(ServiceClient {
            http,
            endpoint: self.endpoint,
            resource_base,
            token: self.token,
        })
    }
}

/// Asynchronous client shared by every resource binding of a service.
#[derive(Clone)]
pub struct ServiceClient {
    http: Client,
    endpoint: Url,
    resource_base: Url,
    token: Option<String>,
}

impl ServiceClient {
    /// Construct directly from an endpoint with default settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigError`] if the endpoint is invalid.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        ServiceClientBuilder::new(endpoint)?.build()
    }

    /// The service endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        &self.endpoint
    }

    /// The resource base: endpoint plus API version prefix, ending in `/`.
    #[must_use]
    pub fn resource_base_url(&self) -> &str {
        self.resource_base.as_str()
    }

    /// Join path parts under the resource base, percent-encoding each part as
    /// a single segment.
    #[must_use]
    pub fn service_url(&self, parts: &[&str]) -> String {
        let mut url = self.resource_base.clone();
        if parts.is_empty() {
            return url.into();
        }
        // The resource base is checked to be a base URL when built.
        if let Ok(mut segments) = url.path_segments_mut() {
            segments.pop_if_empty().extend(parts);
        }
        url.into()
    }

    /// Perform a request and return the raw response if its status is one of
    /// the accepted codes.
    ///
    /// # Errors
    ///
    /// Returns a transport error on network failure or when the status is not
    /// accepted.
    pub async fn request(
        &self,
        method: Method,
        url: &str,
        options: RequestOptions,
    ) -> Result<RawResponse> {
        let mut request = self
            .http
            .request(method.clone(), url)
            .header(ACCEPT, "application/json");

        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(token) = &self.token {
            request = request.header(AUTH_TOKEN_HEADER, token);
        }
        if let Some(body) = &options.body {
            request = request.json(body);
        }

        info!(%method, url, "Sending networking API request");

        let response = request.send().await?;
        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|err| Error::HttpError(format!("Failed to read response body: {err}")))?;

        debug!(%method, url, %status, bytes = body.len(), "Received networking API response");

        let accepted = options
            .ok_codes
            .as_deref()
            .unwrap_or_else(|| default_ok_codes(&method));
        if accepted.contains(&status) {
            Ok(RawResponse {
                status,
                headers,
                body,
            })
        } else {
            let text = String::from_utf8_lossy(&body).into_owned();
            Err(Error::from_status(status, text))
        }
    }
}
