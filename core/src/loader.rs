//! YAML inventory loading.
//!
//! Reads the two-file inventory layout: a hosts file and a groups file,
//! each a mapping from record name to its group references and data:
//!
//! ```yaml
//! # hosts.yaml
//! lab-csr-01.lab.acme.net:
//!   groups: [ios, mel]
//!   data:
//!     device_type: router
//!     mgmt_ip: 10.0.0.1
//!
//! # groups.yaml
//! mel:
//!   groups: [southern]
//!   data:
//!     site_code: mel
//! ```
//!
//! Loading validates referential integrity: a host or group referencing a
//! group that is not defined in the groups file is an
//! [`UnknownGroupReference`](InventoryError::UnknownGroupReference) at
//! load time, before any filtering runs.

use crate::{AttrValue, Group, Host, Inventory, InventoryError};
use serde::Deserialize;
use std::collections::HashMap;
use std::path::Path;

/// One record entry in a hosts or groups file.
#[derive(Debug, Deserialize)]
struct RecordEntry {
    #[serde(default)]
    groups: Vec<String>,
    #[serde(default)]
    data: HashMap<String, AttrValue>,
}

/// Load an inventory from a hosts file and a groups file.
///
/// # Errors
///
/// - [`InventoryError::InvalidConfig`] if a file cannot be read or parsed
/// - [`InventoryError::UnknownGroupReference`] if any record references a
///   group the groups file does not define
pub fn load_inventory(
    hosts_path: impl AsRef<Path>,
    groups_path: impl AsRef<Path>,
) -> Result<Inventory, InventoryError> {
    let hosts_yaml = read(hosts_path.as_ref())?;
    let groups_yaml = read(groups_path.as_ref())?;
    inventory_from_yaml(&hosts_yaml, &groups_yaml)
}

/// Build an inventory from in-memory YAML documents.
///
/// Same contract as [`load_inventory`], without the filesystem.
///
/// # Errors
///
/// See [`load_inventory`].
pub fn inventory_from_yaml(
    hosts_yaml: &str,
    groups_yaml: &str,
) -> Result<Inventory, InventoryError> {
    let host_entries: HashMap<String, RecordEntry> = parse(hosts_yaml, "hosts file")?;
    let group_entries: HashMap<String, RecordEntry> = parse(groups_yaml, "groups file")?;

    let mut inventory = Inventory::new();
    for (name, entry) in group_entries {
        let mut group = Group::new(name);
        for parent in entry.groups {
            group = group.with_parent(parent);
        }
        for (key, value) in entry.data {
            group = group.with_data(key, value);
        }
        inventory.add_group(group);
    }
    for (name, entry) in host_entries {
        let mut host = Host::new(name);
        for group in entry.groups {
            host = host.with_group(group);
        }
        for (key, value) in entry.data {
            host = host.with_data(key, value);
        }
        inventory.add_host(host);
    }

    validate_group_refs(&inventory)?;
    Ok(inventory)
}

/// Check that every group reference points at a defined group.
fn validate_group_refs(inventory: &Inventory) -> Result<(), InventoryError> {
    let missing = |group: &String, referenced_by: &str| InventoryError::UnknownGroupReference {
        group: group.clone(),
        referenced_by: referenced_by.to_string(),
    };

    for (name, host) in inventory.hosts() {
        for group in host.groups() {
            if inventory.group(group).is_none() {
                return Err(missing(group, name));
            }
        }
    }
    for (name, group) in inventory.groups() {
        for parent in group.parents() {
            if inventory.group(parent).is_none() {
                return Err(missing(parent, name));
            }
        }
    }
    Ok(())
}

fn read(path: &Path) -> Result<String, InventoryError> {
    std::fs::read_to_string(path).map_err(|e| InventoryError::InvalidConfig {
        source: format!("failed to read \"{}\": {e}", path.display()),
    })
}

fn parse(yaml: &str, what: &str) -> Result<HashMap<String, RecordEntry>, InventoryError> {
    // An empty document parses as null; treat it as an empty mapping.
    if yaml.trim().is_empty() {
        return Ok(HashMap::new());
    }
    serde_yaml::from_str(yaml).map_err(|e| InventoryError::InvalidConfig {
        source: format!("{what}: {e}"),
    })
}
