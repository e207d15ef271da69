//! Deferred results.
//!
//! Operations complete the network exchange and return a [`ResponseResult`]
//! without decoding anything. Decoding happens only when the caller asks for
//! it, and the first error of the whole chain (validation, transport or
//! decode) is what the caller sees.

use crate::client::RawResponse;
use crate::{Error, Result};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Either a raw response awaiting decode or an error captured earlier.
#[derive(Debug, Clone)]
pub struct ResponseResult {
    inner: Result<RawResponse>,
}

impl ResponseResult {
    /// Wrap the outcome of a request.
    #[must_use]
    pub fn new(inner: Result<RawResponse>) -> Self {
        Self { inner }
    }

    /// Wrap an error raised before or during the request.
    #[must_use]
    pub fn from_error(error: Error) -> Self {
        Self { inner: Err(error) }
    }

    /// The captured error, if the exchange failed.
    #[must_use]
    pub fn err(&self) -> Option<&Error> {
        self.inner.as_ref().err()
    }

    /// The raw response, if the exchange succeeded.
    #[must_use]
    pub fn response(&self) -> Option<&RawResponse> {
        self.inner.as_ref().ok()
    }

    /// Consume the wrapper without decoding the body.
    ///
    /// # Errors
    ///
    /// Returns the captured error.
    pub fn into_result(self) -> Result<RawResponse> {
        self.inner
    }

    /// Decode the whole body.
    ///
    /// # Errors
    ///
    /// Returns the captured error, or [`Error::DecodeError`] if the body does
    /// not match `T`.
    pub fn extract_into<T: DeserializeOwned>(&self) -> Result<T> {
        let response = self.inner.as_ref().map_err(Clone::clone)?;
        serde_json::from_slice(&response.body).map_err(Error::from)
    }

    /// Decode the value nested under `key` (the envelope).
    ///
    /// # Errors
    ///
    /// Returns the captured error, or [`Error::DecodeError`] if the body is not
    /// JSON, lacks `key`, or the nested value does not match `T`.
    pub fn extract_into_key<T: DeserializeOwned>(&self, key: &str) -> Result<T> {
        let mut body: Value = self.extract_into()?;
        let nested = body
            .get_mut(key)
            .map(Value::take)
            .ok_or_else(|| Error::DecodeError(format!("response has no `{key}` member")))?;
        serde_json::from_value(nested).map_err(Error::from)
    }
}

impl From<Result<RawResponse>> for ResponseResult {
    fn from(inner: Result<RawResponse>) -> Self {
        Self::new(inner)
    }
}
