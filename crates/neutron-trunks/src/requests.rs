//! Request options for trunk operations.
//!
//! Option structures validate themselves before anything is sent. A missing
//! required value (an empty string, or a zero segmentation id) is rejected
//! with [`Error::ValidationError`](neutron_core::Error::ValidationError) naming
//! the field, and the operation never reaches the network.

use crate::Result;
use neutron_core::query::QueryParams;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use std::borrow::Cow;
use std::collections::HashSet;
use validator::{Validate, ValidationError};

/// A child port attached to a trunk with a segmentation tag.
///
/// All three fields are required when attaching.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct Subport {
    /// Segmentation identifier (e.g. the VLAN id).
    #[validate(range(min = 1, message = "segmentation_id is required"))]
    pub segmentation_id: u32,
    /// Segmentation type (e.g. `vlan`).
    #[validate(length(min = 1, message = "segmentation_type is required"))]
    pub segmentation_type: String,
    /// Child port identifier.
    #[validate(length(min = 1, message = "port_id is required"))]
    pub port_id: String,
}

impl Subport {
    /// Build a subport from its three required parts.
    #[must_use]
    pub fn new(
        port_id: impl Into<String>,
        segmentation_type: impl Into<String>,
        segmentation_id: u32,
    ) -> Self {
        Self {
            segmentation_id,
            segmentation_type: segmentation_type.into(),
            port_id: port_id.into(),
        }
    }

    /// Shorthand for a VLAN-tagged subport.
    #[must_use]
    pub fn vlan(port_id: impl Into<String>, vlan_id: u32) -> Self {
        Self::new(port_id, "vlan", vlan_id)
    }
}

/// A subport to detach, identified only by its port.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Validate)]
pub struct RemoveSubport {
    /// Child port identifier.
    #[validate(length(min = 1, message = "port_id is required"))]
    pub port_id: String,
}

impl RemoveSubport {
    /// Detach the subport backed by `port_id`.
    #[must_use]
    pub fn new(port_id: impl Into<String>) -> Self {
        Self {
            port_id: port_id.into(),
        }
    }
}

/// A trunk holds at most one subport per child port.
fn distinct_port_ids<'a>(
    port_ids: impl IntoIterator<Item = &'a str>,
) -> std::result::Result<(), ValidationError> {
    let mut seen = HashSet::new();
    match port_ids.into_iter().find(|id| !seen.insert(*id)) {
        Some(id) => Err(ValidationError::new("duplicate_port_id")
            .with_message(Cow::Owned(format!("port_id `{id}` is listed more than once")))),
        None => Ok(()),
    }
}

fn distinct_subports(sub_ports: &[Subport]) -> std::result::Result<(), ValidationError> {
    distinct_port_ids(sub_ports.iter().map(|subport| subport.port_id.as_str()))
}

fn distinct_removals(sub_ports: &[RemoveSubport]) -> std::result::Result<(), ValidationError> {
    distinct_port_ids(sub_ports.iter().map(|subport| subport.port_id.as_str()))
}

/// Produces the body of a create request.
pub trait ToTrunkCreateBody {
    /// Validate and serialize into `{"trunk": {...}}`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if a required field is missing.
    fn to_trunk_create_body(&self) -> Result<Value>;
}

/// Produces the body of an update request.
pub trait ToTrunkUpdateBody {
    /// Serialize into `{"trunk": {...}}`.
    ///
    /// # Errors
    ///
    /// Returns an error if the options cannot be serialized.
    fn to_trunk_update_body(&self) -> Result<Value>;
}

/// Produces the query string of a list request.
pub trait ToTrunkListQuery {
    /// Collect the query pairs.
    fn to_trunk_list_query(&self) -> Vec<(&'static str, String)>;
}

/// Produces the body of an `add_subports` request.
pub trait ToAddSubportsBody {
    /// Validate and serialize into `{"sub_ports": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any subport misses a field.
    fn to_add_subports_body(&self) -> Result<Value>;
}

/// Produces the body of a `remove_subports` request.
pub trait ToRemoveSubportsBody {
    /// Validate and serialize into `{"sub_ports": [...]}`.
    ///
    /// # Errors
    ///
    /// Returns a validation error if any entry misses its port id.
    fn to_remove_subports_body(&self) -> Result<Value>;
}

/// Options for creating a trunk.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct CreateOpts {
    /// Owning tenant (admin only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tenant_id: Option<String>,
    /// Owning project (admin only).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<String>,
    /// Human-readable name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Administrative state; omitted when unset.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
    /// Parent port identifier.
    #[validate(length(min = 1, message = "port_id (parent port) is required"))]
    pub port_id: String,
    /// Subports attached at creation.
    #[validate(nested, custom(function = "distinct_subports"))]
    pub sub_ports: Vec<Subport>,
}

impl CreateOpts {
    /// Options for a trunk on the given parent port.
    #[must_use]
    pub fn new(port_id: impl Into<String>) -> Self {
        Self {
            port_id: port_id.into(),
            ..Self::default()
        }
    }
}

impl ToTrunkCreateBody for CreateOpts {
    fn to_trunk_create_body(&self) -> Result<Value> {
        self.validate()?;
        Ok(json!({ "trunk": serde_json::to_value(self)? }))
    }
}

/// Options for updating a trunk. Only supplied fields are sent.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct UpdateOpts {
    /// New name.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New administrative state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub admin_state_up: Option<bool>,
}

impl ToTrunkUpdateBody for UpdateOpts {
    fn to_trunk_update_body(&self) -> Result<Value> {
        Ok(json!({ "trunk": serde_json::to_value(self)? }))
    }
}

/// Options for attaching subports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct AddSubportsOpts {
    /// Subports to attach.
    #[validate(nested, custom(function = "distinct_subports"))]
    pub sub_ports: Vec<Subport>,
}

impl ToAddSubportsBody for AddSubportsOpts {
    fn to_add_subports_body(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}

/// Options for detaching subports.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Validate)]
pub struct RemoveSubportsOpts {
    /// Subports to detach.
    #[validate(nested, custom(function = "distinct_removals"))]
    pub sub_ports: Vec<RemoveSubport>,
}

impl ToRemoveSubportsBody for RemoveSubportsOpts {
    fn to_remove_subports_body(&self) -> Result<Value> {
        self.validate()?;
        Ok(serde_json::to_value(self)?)
    }
}

/// Filters and pagination markers for listing trunks.
///
/// Values are passed to the service as given.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ListOpts {
    /// Filter by administrative state.
    pub admin_state_up: Option<bool>,
    /// Filter by description.
    pub description: Option<String>,
    /// Filter by trunk id.
    pub id: Option<String>,
    /// Filter by name.
    pub name: Option<String>,
    /// Filter by parent port id.
    pub port_id: Option<String>,
    /// Filter by revision number.
    pub revision_number: Option<u64>,
    /// Filter by status (`ACTIVE`, `DOWN`, ...).
    pub status: Option<String>,
    /// Filter by tenant.
    pub tenant_id: Option<String>,
    /// Filter by project.
    pub project_id: Option<String>,
    /// Sort direction (`asc` or `desc`).
    pub sort_dir: Option<String>,
    /// Sort attribute.
    pub sort_key: Option<String>,
    /// Trunks carrying all of these tags.
    pub tags: Vec<String>,
    /// Trunks carrying any of these tags.
    pub tags_any: Vec<String>,
    /// Trunks not carrying all of these tags.
    pub not_tags: Vec<String>,
    /// Trunks not carrying any of these tags.
    pub not_tags_any: Vec<String>,
    /// Page size.
    pub limit: Option<u32>,
    /// Id of the last trunk of the previous page.
    pub marker: Option<String>,
}

impl ToTrunkListQuery for ListOpts {
    fn to_trunk_list_query(&self) -> Vec<(&'static str, String)> {
        let mut params = QueryParams::new();
        params.push_opt("admin_state_up", self.admin_state_up);
        params.push_opt("description", self.description.as_deref());
        params.push_opt("id", self.id.as_deref());
        params.push_opt("name", self.name.as_deref());
        params.push_opt("port_id", self.port_id.as_deref());
        params.push_opt("revision_number", self.revision_number);
        params.push_opt("status", self.status.as_deref());
        params.push_opt("tenant_id", self.tenant_id.as_deref());
        params.push_opt("project_id", self.project_id.as_deref());
        params.push_opt("sort_dir", self.sort_dir.as_deref());
        params.push_opt("sort_key", self.sort_key.as_deref());
        params.push_list("tags", &self.tags);
        params.push_list("tags-any", &self.tags_any);
        params.push_list("not-tags", &self.not_tags);
        params.push_list("not-tags-any", &self.not_tags_any);
        params.push_opt("limit", self.limit);
        params.push_opt("marker", self.marker.as_deref());
        params.into_pairs()
    }
}
