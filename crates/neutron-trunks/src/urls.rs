//! Trunk resource URLs.

use neutron_core::ServiceClient;

const RESOURCE_PATH: &str = "trunks";

/// `.../trunks/{id}`
#[must_use]
pub fn resource_url(client: &ServiceClient, id: &str) -> String {
    client.service_url(&[RESOURCE_PATH, id])
}

/// `.../trunks`
#[must_use]
pub fn root_url(client: &ServiceClient) -> String {
    client.service_url(&[RESOURCE_PATH])
}

/// `.../trunks/{id}/{action}`
#[must_use]
pub fn action_url(client: &ServiceClient, id: &str, action: &str) -> String {
    client.service_url(&[RESOURCE_PATH, id, action])
}

/// URL for listing trunks.
#[must_use]
pub fn list_url(client: &ServiceClient) -> String {
    root_url(client)
}

/// URL for fetching a trunk.
#[must_use]
pub fn get_url(client: &ServiceClient, id: &str) -> String {
    resource_url(client, id)
}

/// URL for creating a trunk.
#[must_use]
pub fn create_url(client: &ServiceClient) -> String {
    root_url(client)
}

/// URL for updating a trunk.
#[must_use]
pub fn update_url(client: &ServiceClient, id: &str) -> String {
    resource_url(client, id)
}

/// URL for deleting a trunk.
#[must_use]
pub fn delete_url(client: &ServiceClient, id: &str) -> String {
    resource_url(client, id)
}

/// URL for attaching subports to a trunk.
#[must_use]
pub fn add_subports_url(client: &ServiceClient, id: &str) -> String {
    action_url(client, id, "add_subports")
}

/// URL for detaching subports from a trunk.
#[must_use]
pub fn remove_subports_url(client: &ServiceClient, id: &str) -> String {
    action_url(client, id, "remove_subports")
}

/// URL for listing the subports of a trunk.
#[must_use]
pub fn get_subports_url(client: &ServiceClient, id: &str) -> String {
    action_url(client, id, "get_subports")
}
