//! Trunk models and deferred operation results.

use crate::requests::Subport;
use crate::Result;
use chrono::{DateTime, Utc};
use neutron_core::{Page, RawResponse, ResponseResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope key of a single trunk.
pub const TRUNK_KEY: &str = "trunk";

/// Envelope key of a trunk collection.
pub const TRUNKS_KEY: &str = "trunks";

/// Envelope key of a subport list.
pub const SUB_PORTS_KEY: &str = "sub_ports";

/// A trunk as returned by the service.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Trunk {
    /// Trunk identifier.
    pub id: String,
    /// Name.
    #[serde(default)]
    pub name: String,
    /// Description.
    #[serde(default)]
    pub description: String,
    /// Status reported by the service (`ACTIVE`, `DOWN`, `BUILD`, ...).
    #[serde(default)]
    pub status: String,
    /// Parent port identifier.
    pub port_id: String,
    /// Administrative state.
    #[serde(default)]
    pub admin_state_up: bool,
    /// Owning tenant.
    #[serde(default)]
    pub tenant_id: String,
    /// Owning project.
    #[serde(default)]
    pub project_id: String,
    /// Attached subports, in no particular order.
    #[serde(default)]
    pub sub_ports: Vec<Subport>,
    /// Revision number, bumped on every change.
    #[serde(default)]
    pub revision_number: u64,
    /// Tags.
    #[serde(default)]
    pub tags: Vec<String>,
    /// Creation time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
    /// Last update time.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl Trunk {
    /// Whether a subport backed by `port_id` is attached.
    #[must_use]
    pub fn has_subport(&self, port_id: &str) -> bool {
        self.sub_ports.iter().any(|subport| subport.port_id == port_id)
    }
}

/// Deferred result of an operation returning one trunk.
#[derive(Debug, Clone)]
pub struct TrunkResult(ResponseResult);

impl TrunkResult {
    /// Decode the trunk.
    ///
    /// The trunk may arrive wrapped in `{"trunk": ...}` or bare; subport
    /// actions answer with the bare object.
    ///
    /// # Errors
    ///
    /// Returns the error captured by the operation, or a decode error if the
    /// body is not a trunk.
    pub fn extract(&self) -> Result<Trunk> {
        let mut body: Value = self.0.extract_into()?;
        let trunk = if body.get(TRUNK_KEY).is_some() {
            body[TRUNK_KEY].take()
        } else {
            body
        };
        Ok(serde_json::from_value(trunk)?)
    }

    /// The captured error, if the operation failed.
    #[must_use]
    pub fn err(&self) -> Option<&neutron_core::Error> {
        self.0.err()
    }

    /// The underlying deferred response.
    #[must_use]
    pub fn into_inner(self) -> ResponseResult {
        self.0
    }
}

impl From<ResponseResult> for TrunkResult {
    fn from(inner: ResponseResult) -> Self {
        Self(inner)
    }
}

/// Deferred result of listing a trunk's subports.
#[derive(Debug, Clone)]
pub struct SubportsResult(ResponseResult);

impl SubportsResult {
    /// Decode the subports under `sub_ports`.
    ///
    /// # Errors
    ///
    /// Returns the error captured by the operation, or a decode error.
    pub fn extract(&self) -> Result<Vec<Subport>> {
        self.0.extract_into_key(SUB_PORTS_KEY)
    }

    /// The captured error, if the operation failed.
    #[must_use]
    pub fn err(&self) -> Option<&neutron_core::Error> {
        self.0.err()
    }
}

impl From<ResponseResult> for SubportsResult {
    fn from(inner: ResponseResult) -> Self {
        Self(inner)
    }
}

/// Result of a delete; there is no body to decode.
#[derive(Debug, Clone)]
pub struct DeleteResult(ResponseResult);

impl DeleteResult {
    /// The captured error, if the delete failed.
    #[must_use]
    pub fn err(&self) -> Option<&neutron_core::Error> {
        self.0.err()
    }

    /// Convert into a plain result.
    ///
    /// # Errors
    ///
    /// Returns the captured error.
    pub fn into_result(self) -> Result<()> {
        self.0.into_result().map(|_: RawResponse| ())
    }
}

impl From<ResponseResult> for DeleteResult {
    fn from(inner: ResponseResult) -> Self {
        Self(inner)
    }
}

/// Result of [`TrunksClient::create`](crate::TrunksClient::create).
pub type CreateResult = TrunkResult;
/// Result of [`TrunksClient::get`](crate::TrunksClient::get).
pub type GetResult = TrunkResult;
/// Result of [`TrunksClient::update`](crate::TrunksClient::update).
pub type UpdateResult = TrunkResult;
/// Result of [`TrunksClient::add_subports`](crate::TrunksClient::add_subports).
pub type AddSubportsResult = TrunkResult;
/// Result of [`TrunksClient::remove_subports`](crate::TrunksClient::remove_subports).
pub type RemoveSubportsResult = TrunkResult;
/// Result of [`TrunksClient::get_subports`](crate::TrunksClient::get_subports).
pub type GetSubportsResult = SubportsResult;

/// Decode the trunks of one list page.
///
/// # Errors
///
/// Returns a decode error if the page does not hold a trunk array.
pub fn extract_trunks(page: &Page) -> Result<Vec<Trunk>> {
    page.extract()
}
