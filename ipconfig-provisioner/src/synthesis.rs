use std::collections::HashSet;

use common::model::{IpConfiguration, NetworkProfile};
use tracing::{debug, info};

/// A secondary IP configuration appended to a network interface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Added {
    pub interface: String,
    pub name: String,
    /// Interface whose primary configuration was cloned.
    pub source: String,
}

impl Added {
    /// Generated for an earlier interface and carried over to this one.
    pub fn is_carried(&self) -> bool {
        self.interface != self.source
    }
}

/// Candidate names `ipconfig2` up to `ipconfig{count + 1}`.
pub fn candidate_names(count: u32) -> impl Iterator<Item = String> {
    (2..u64::from(count) + 2).map(|i| format!("ipconfig{i}"))
}

/// Clones the primary IP configuration of every network interface `count`
/// times, skipping names that are already taken.
///
/// Names taken and configurations created are tracked across the whole
/// profile, so every interface later in the list also receives the
/// configurations generated for earlier ones, whether or not it has a primary
/// of its own, and cannot reuse their names. A carried configuration whose
/// name the interface already has is left out. Interfaces without an
/// `ipConfigurations` list are not touched.
pub fn synthesize(network_profile: &mut NetworkProfile, count: u32) -> Vec<Added> {
    let mut used: HashSet<String> = HashSet::new();
    let mut secondary: Vec<(String, IpConfiguration)> = Vec::new();
    let mut added = Vec::new();

    for nic in network_profile.network_interface_configurations.iter_mut() {
        let Some(ips) = nic.ip_configurations.as_mut() else {
            debug!("{} has no ip configurations", nic.name);
            continue;
        };

        let mut primary = None;
        for ip in ips.iter() {
            if !ip.name.is_empty() {
                used.insert(ip.name.clone());
            }
            if ip.is_primary() {
                primary = Some(ip);
            }
        }

        match primary.cloned() {
            Some(primary) => {
                for name in candidate_names(count) {
                    if !used.insert(name.clone()) {
                        debug!("{name} already in use, skipping");
                        continue;
                    }
                    secondary.push((nic.name.clone(), primary.as_secondary(name)));
                }
            }
            None => debug!("{} has no primary ip configuration", nic.name),
        }

        let present: HashSet<String> = ips.iter().map(|ip| ip.name.clone()).collect();
        for (source, ip) in secondary.iter().filter(|(_, ip)| !present.contains(&ip.name)) {
            info!("adding {} to {}", ip.name, nic.name);
            ips.push(ip.clone());
            added.push(Added {
                interface: nic.name.clone(),
                name: ip.name.clone(),
                source: source.clone(),
            });
        }
    }

    added
}
