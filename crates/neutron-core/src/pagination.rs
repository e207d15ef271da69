//! Link-following pagination.
//!
//! Collection responses carry their items under a resource key (`trunks`) and
//! an optional `<key>_links` array whose `next` entry points at the following
//! page. A [`Pager`] fetches one page per call and stops at the first page
//! without a `next` link, at the first empty page, or at the first error.
//! A page whose items or links do not decode is an error, never an empty page.
//! Once exhausted it stays exhausted; reading again means starting a new list.

use crate::client::{RequestOptions, ServiceClient};
use crate::{Error, Result};
use reqwest::Method;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

/// A link object from a `<key>_links` array.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct Link {
    /// Target URL
    pub href: String,
    /// Relation (`next`, `previous`)
    pub rel: String,
}

/// One decoded page of a collection.
#[derive(Debug, Clone)]
pub struct Page {
    resource_key: &'static str,
    body: Value,
}

impl Page {
    /// Parse a page body.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the body is not JSON.
    pub fn from_body(resource_key: &'static str, body: &[u8]) -> Result<Self> {
        let body = serde_json::from_slice(body)?;
        Ok(Self { resource_key, body })
    }

    /// The key the items live under.
    #[must_use]
    pub fn resource_key(&self) -> &'static str {
        self.resource_key
    }

    /// The raw page body.
    #[must_use]
    pub fn body(&self) -> &Value {
        &self.body
    }

    fn items(&self) -> Result<&[Value]> {
        let items = self.body.get(self.resource_key).ok_or_else(|| {
            Error::DecodeError(format!("page has no `{}` member", self.resource_key))
        })?;
        items.as_array().map(Vec::as_slice).ok_or_else(|| {
            Error::DecodeError(format!("page member `{}` is not an array", self.resource_key))
        })
    }

    /// Decode the items of this page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the items are missing or malformed.
    pub fn extract<T: DeserializeOwned>(&self) -> Result<Vec<T>> {
        self.items()?
            .iter()
            .map(|item| T::deserialize(item).map_err(Error::from))
            .collect()
    }

    /// Number of items on this page.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the items are missing or not an array.
    pub fn item_count(&self) -> Result<usize> {
        Ok(self.items()?.len())
    }

    /// Links advertised by the page; none when the links member is absent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the links member is malformed.
    pub fn links(&self) -> Result<Vec<Link>> {
        let key = format!("{}_links", self.resource_key);
        match self.body.get(&key) {
            Some(links) => Vec::<Link>::deserialize(links).map_err(Error::from),
            None => Ok(Vec::new()),
        }
    }

    /// The `next` link, if any.
    ///
    /// # Errors
    ///
    /// Returns [`Error::DecodeError`] if the links member is malformed.
    pub fn next_url(&self) -> Result<Option<String>> {
        Ok(self
            .links()?
            .into_iter()
            .find(|link| link.rel == "next")
            .map(|link| link.href))
    }
}

#[derive(Debug, Clone)]
struct PageRequest {
    url: String,
    query: Vec<(&'static str, String)>,
}

/// Lazy, finite sequence of pages.
pub struct Pager {
    client: ServiceClient,
    resource_key: &'static str,
    next: Option<PageRequest>,
    pages_fetched: usize,
}

impl Pager {
    /// Create a pager starting at `url` with the given query pairs.
    ///
    /// Nothing is fetched until [`Pager::next_page`] is called.
    #[must_use]
    pub fn new(
        client: ServiceClient,
        url: String,
        query: Vec<(&'static str, String)>,
        resource_key: &'static str,
    ) -> Self {
        Self {
            client,
            resource_key,
            next: Some(PageRequest { url, query }),
            pages_fetched: 0,
        }
    }

    /// Number of pages fetched so far.
    #[must_use]
    pub fn pages_fetched(&self) -> usize {
        self.pages_fetched
    }

    /// Whether the sequence has ended.
    #[must_use]
    pub fn is_exhausted(&self) -> bool {
        self.next.is_none()
    }

    /// Fetch the next page; `Ok(None)` once the sequence has ended.
    ///
    /// # Errors
    ///
    /// Returns the transport or decode error of the failing page. The pager is
    /// exhausted afterwards.
    pub async fn next_page(&mut self) -> Result<Option<Page>> {
        let Some(request) = self.next.take() else {
            return Ok(None);
        };

        let response = self
            .client
            .request(
                Method::GET,
                &request.url,
                RequestOptions::new().with_query(request.query),
            )
            .await?;
        let page = Page::from_body(self.resource_key, &response.body)?;
        let items = page.item_count()?;

        if items == 0 {
            debug!(resource = self.resource_key, "Empty page ends pagination");
            return Ok(None);
        }

        let next_url = page.next_url()?;
        self.pages_fetched += 1;
        self.next = next_url.map(|url| PageRequest {
            url,
            query: Vec::new(),
        });
        debug!(
            resource = self.resource_key,
            page = self.pages_fetched,
            items,
            has_next = self.next.is_some(),
            "Fetched page"
        );

        Ok(Some(page))
    }

    /// Drain every remaining page into a single item list.
    ///
    /// # Errors
    ///
    /// Returns the first transport or decode error encountered.
    pub async fn all_items<T: DeserializeOwned>(mut self) -> Result<Vec<T>> {
        let mut items = Vec::new();
        while let Some(page) = self.next_page().await? {
            items.extend(page.extract::<T>()?);
        }
        Ok(items)
    }
}
