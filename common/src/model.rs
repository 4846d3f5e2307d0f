//! Scale-set shapes as returned by `az vmss show`.
//!
//! Only the fields the provisioner reads or writes are modelled. Everything
//! else is kept in `extra` so that a network profile written back to the
//! provider carries every attribute it was read with. Modelled fields the
//! provider left out stay out on the way back; an explicit `"primary": null`
//! is written back as absent.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ScaleSet {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource_group: Option<String>,
    pub virtual_machine_profile: VirtualMachineProfile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VirtualMachineProfile {
    pub network_profile: NetworkProfile,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkProfile {
    #[serde(default)]
    pub network_interface_configurations: Vec<NetworkInterfaceConfiguration>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkInterfaceConfiguration {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// Absent and empty are kept apart, only a present list is extended.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ip_configurations: Option<Vec<IpConfiguration>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Default, Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IpConfiguration {
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub name: String,
    /// `null` or missing in provider output for every entry but the primary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub primary: Option<bool>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl IpConfiguration {
    pub fn is_primary(&self) -> bool {
        self.primary.unwrap_or(false)
    }

    /// Copy of this configuration under a new name, never primary.
    pub fn as_secondary(&self, name: String) -> IpConfiguration {
        IpConfiguration {
            name,
            primary: Some(false),
            extra: self.extra.clone(),
        }
    }
}
