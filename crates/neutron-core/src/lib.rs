//! # neutron-core
//!
//! Shared plumbing for networking API bindings.
//!
//! Resource crates build URLs through [`client::ServiceClient`], validate and
//! serialize their options, issue requests through the same client, and hand
//! back a [`result::ResponseResult`] that decodes only when extracted.
//!
//! ## Modules
//!
//! - [`error`] - Error type, error kinds and HTTP status mapping
//! - [`config`] - Endpoint configuration
//! - [`client`] - Shared HTTP client and request options
//! - [`query`] - Query string builder for list filters
//! - [`result`] - Deferred-decode result wrapper
//! - [`pagination`] - Link-following pager for collections

#![deny(missing_docs)]
#![deny(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod client;
pub mod config;
pub mod error;
pub mod pagination;
pub mod query;
pub mod result;

// Re-export commonly used types
pub use client::{RawResponse, RequestOptions, ServiceClient, ServiceClientBuilder};
pub use error::{Error, ErrorKind, Result};
pub use pagination::{Page, Pager};
pub use result::ResponseResult;
