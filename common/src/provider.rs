use anyhow::Result;

use crate::model::{NetworkProfile, ScaleSet};

pub const DISCOVER: [&str; 3] = [
    "Listing scale sets",
    "Could not list scale sets",
    "Listed scale sets",
];

pub const FETCH: [&str; 3] = [
    "Fetching scale set",
    "Could not fetch scale set",
    "Fetched scale set",
];

pub const UPDATE: [&str; 3] = [
    "Updating network profile",
    "Could not update network profile",
    "Network profile updated",
];

pub const PROPAGATE: [&str; 3] = [
    "Updating scale set instances",
    "Could not update scale set instances",
    "Scale set instances updated",
];

/// Management operations on virtual machine scale sets.
#[async_trait::async_trait]
pub trait ScaleSetClient {
    /// Names of the scale sets in `resource_group`, in provider order.
    async fn list_scale_sets(&self, resource_group: &str) -> Result<Vec<String>>;
    async fn show_scale_set(&self, resource_group: &str, name: &str) -> Result<ScaleSet>;
    async fn update_network_profile(
        &self,
        resource_group: &str,
        name: &str,
        network_profile: &NetworkProfile,
    ) -> Result<()>;
    /// Rolls the current model out to every instance.
    async fn update_instances(&self, resource_group: &str, name: &str) -> Result<()>;
    fn name(&self) -> String;
}
