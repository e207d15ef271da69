//! Asynchronous trunk client implementation.

use crate::requests::{
    ToAddSubportsBody, ToRemoveSubportsBody, ToTrunkCreateBody, ToTrunkListQuery,
    ToTrunkUpdateBody,
};
use crate::results::{
    AddSubportsResult, CreateResult, DeleteResult, GetResult, GetSubportsResult,
    RemoveSubportsResult, UpdateResult, TRUNKS_KEY,
};
use crate::{urls, Result};
use neutron_core::client::ClientConfig;
use neutron_core::config::NetworkClientConfig;
use neutron_core::{
    Error, Pager, RequestOptions, ResponseResult, ServiceClient, ServiceClientBuilder,
};
use reqwest::{Method, StatusCode};
use serde_json::Value;
use tracing::debug;
use url::Url;

const USER_AGENT: &str = concat!("neutron-trunks/", env!("CARGO_PKG_VERSION"));

/// Builder for [`TrunksClient`].
#[derive(Debug, Clone)]
pub struct TrunksClientBuilder {
    inner: ServiceClientBuilder,
}

impl TrunksClientBuilder {
    /// Create a builder for the networking service endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint is not a valid URL.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        let builder = ServiceClientBuilder::new(endpoint)?.with_user_agent(USER_AGENT);
        Ok(Self { inner: builder })
    }

    /// Create a builder from a validated configuration.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint is not a valid URL.
    pub fn from_config(config: &NetworkClientConfig) -> Result<Self> {
        let builder = ServiceClientBuilder::from_config(config)?.with_user_agent(USER_AGENT);
        Ok(Self { inner: builder })
    }

    /// Configure the `X-Auth-Token` header.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.inner = self.inner.with_token(token);
        self
    }

    /// Override the resource base (`v2.0/` by default).
    #[must_use]
    pub fn with_resource_base(mut self, base: impl Into<String>) -> Self {
        self.inner = self.inner.with_resource_base(base);
        self
    }

    /// Override the HTTP client configuration.
    #[must_use]
    pub fn with_http_config(mut self, config: ClientConfig) -> Self {
        self.inner = self.inner.with_http_config(config);
        self
    }

    /// Build the client.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the HTTP client cannot be built.
    pub fn build(self) -> Result<TrunksClient> {
        let inner = self.inner.build()?;
        Ok(TrunksClient { inner })
    }
}

/// Asynchronous client for the trunk extension.
///
/// Operations return deferred results: the exchange is complete when the
/// future resolves, and the body is decoded only on `extract`.
#[derive(Clone)]
pub struct TrunksClient {
    inner: ServiceClient,
}

impl TrunksClient {
    /// Construct a client directly from the endpoint.
    ///
    /// # Errors
    ///
    /// Returns a configuration error if the endpoint is not a valid URL.
    pub fn new(endpoint: impl AsRef<str>) -> Result<Self> {
        TrunksClientBuilder::new(endpoint)?.build()
    }

    /// Reuse an existing service client.
    #[must_use]
    pub fn from_service_client(inner: ServiceClient) -> Self {
        Self { inner }
    }

    /// The shared service client.
    #[must_use]
    pub fn service_client(&self) -> &ServiceClient {
        &self.inner
    }

    /// Return the service endpoint.
    #[must_use]
    pub fn endpoint(&self) -> &Url {
        self.inner.endpoint()
    }

    /// List trunks. Pages are fetched lazily as the pager is advanced.
    pub fn list(&self, opts: &impl ToTrunkListQuery) -> Pager {
        Pager::new(
            self.inner.clone(),
            urls::list_url(&self.inner),
            opts.to_trunk_list_query(),
            TRUNKS_KEY,
        )
    }

    /// Fetch a trunk by id.
    pub async fn get(&self, id: &str) -> GetResult {
        let url = urls::get_url(&self.inner, id);
        self.send(Method::GET, &url, None, StatusCode::OK)
            .await
            .into()
    }

    /// Create a trunk.
    pub async fn create(&self, opts: &impl ToTrunkCreateBody) -> CreateResult {
        let body = match opts.to_trunk_create_body() {
            Ok(body) => body,
            Err(err) => return rejected("create", err).into(),
        };
        let url = urls::create_url(&self.inner);
        self.send(Method::POST, &url, Some(body), StatusCode::CREATED)
            .await
            .into()
    }

    /// Update a trunk.
    pub async fn update(&self, id: &str, opts: &impl ToTrunkUpdateBody) -> UpdateResult {
        let body = match opts.to_trunk_update_body() {
            Ok(body) => body,
            Err(err) => return rejected("update", err).into(),
        };
        let url = urls::update_url(&self.inner, id);
        self.send(Method::PUT, &url, Some(body), StatusCode::OK)
            .await
            .into()
    }

    /// Delete a trunk.
    pub async fn delete(&self, id: &str) -> DeleteResult {
        let url = urls::delete_url(&self.inner, id);
        self.send(Method::DELETE, &url, None, StatusCode::NO_CONTENT)
            .await
            .into()
    }

    /// Attach subports to a trunk.
    pub async fn add_subports(
        &self,
        id: &str,
        opts: &impl ToAddSubportsBody,
    ) -> AddSubportsResult {
        let body = match opts.to_add_subports_body() {
            Ok(body) => body,
            Err(err) => return rejected("add_subports", err).into(),
        };
        let url = urls::add_subports_url(&self.inner, id);
        self.send(Method::PUT, &url, Some(body), StatusCode::OK)
            .await
            .into()
    }

    /// Detach subports from a trunk.
    pub async fn remove_subports(
        &self,
        id: &str,
        opts: &impl ToRemoveSubportsBody,
    ) -> RemoveSubportsResult {
        let body = match opts.to_remove_subports_body() {
            Ok(body) => body,
            Err(err) => return rejected("remove_subports", err).into(),
        };
        let url = urls::remove_subports_url(&self.inner, id);
        self.send(Method::PUT, &url, Some(body), StatusCode::OK)
            .await
            .into()
    }

    /// List the subports of a trunk.
    pub async fn get_subports(&self, id: &str) -> GetSubportsResult {
        let url = urls::get_subports_url(&self.inner, id);
        self.send(Method::GET, &url, None, StatusCode::OK)
            .await
            .into()
    }

    async fn send(
        &self,
        method: Method,
        url: &str,
        body: Option<Value>,
        ok: StatusCode,
    ) -> ResponseResult {
        let mut options = RequestOptions::new().with_ok_codes(&[ok]);
        if let Some(body) = body {
            options = options.with_json(body);
        }
        ResponseResult::new(self.inner.request(method, url, options).await)
    }
}

fn rejected(operation: &str, err: Error) -> ResponseResult {
    debug!(operation, error = %err, "Trunk request rejected before sending");
    ResponseResult::from_error(err)
}
