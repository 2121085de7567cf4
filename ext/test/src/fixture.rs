//! YAML fixtures mirroring [`sample_inventory`](crate::sample_inventory).
//!
//! The same lab, expressed in the two-file inventory layout the loader
//! reads. Loader tests and the CLI demo use these to prove the YAML path
//! produces the inventory the programmatic builder does.

use netsift::{Inventory, InventoryError};

/// The reference lab's hosts file.
pub const HOSTS_YAML: &str = r"
lab-csr-01:
  groups: [ios, mel, test]
  data:
    device_type: router
    mgmt_ip: 10.0.0.1
    os_version: 17.3.1
    sla: 90
lab-csr-02:
  groups: [ios, chc, prod]
  data:
    device_type: router
    mgmt_ip: 10.0.0.2
    os_version: 17.6.2
    sla: 95
lab-nxos-01:
  groups: [nxos_ssh, mel, prod]
  data:
    device_type: switch
    mgmt_ip: 10.0.0.11
    os_version: 9.3.8
    sla: 85
lab-nxos-02:
  groups: [nxos_ssh, chc, test]
  data:
    device_type: switch
    mgmt_ip: 10.0.0.12
    os_version: 9.3.8
lab-arista-01:
  groups: [eos, ptl, test]
  data:
    device_type: switch
    mgmt_ip: 10.0.0.21
    os_version: 4.27.3F
    sla: 75
lab-arista-02:
  groups: [eos, mel, prod]
  data:
    device_type: switch
    mgmt_ip: 10.0.0.22
    os_version: 4.28.1F
    sla: 99
lab-srx-01:
  groups: [junos, ptl, prod]
  data:
    device_type: firewall
    mgmt_ip: 10.0.0.31
    os_version: 21.4R1
    sla: 80
";

/// The reference lab's groups file.
pub const GROUPS_YAML: &str = r"
ios:
  data:
    vendor: cisco
    os_family: ios
nxos_ssh:
  data:
    vendor: cisco
    os_family: nxos
eos:
  data:
    vendor: arista
    os_family: eos
junos:
  data:
    vendor: juniper
    os_family: junos
southern:
  data:
    hemisphere: southern
northern:
  data:
    hemisphere: northern
mel:
  groups: [southern]
  data:
    site_code: mel
    region: apac
chc:
  groups: [southern]
  data:
    site_code: chc
    region: apac
ptl:
  groups: [northern]
  data:
    site_code: ptl
    region: amer
test:
  data:
    production: false
prod:
  data:
    production: true
";

/// Load the reference lab through the YAML loader.
///
/// # Errors
///
/// Never in practice; the fixtures are well formed. The `Result` keeps
/// the loader's contract visible at call sites.
pub fn sample_inventory_from_yaml() -> Result<Inventory, InventoryError> {
    netsift::inventory_from_yaml(HOSTS_YAML, GROUPS_YAML)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sample_inventory;
    use netsift::prelude::*;

    #[test]
    fn yaml_fixture_loads() {
        let inv = sample_inventory_from_yaml().unwrap();
        assert_eq!(inv.hosts().len(), 7);
        assert_eq!(inv.groups().len(), 11);
    }

    #[test]
    fn yaml_fixture_matches_programmatic_builder() {
        let from_yaml = sample_inventory_from_yaml().unwrap();
        let built = sample_inventory();

        assert_eq!(from_yaml.host_names(), built.host_names());
        assert_eq!(from_yaml.group_names(), built.group_names());

        // Resolution agrees, including typed scalars and inheritance.
        for name in from_yaml.host_names() {
            let yaml_host = from_yaml.host(&name).unwrap();
            let built_host = built.host(&name).unwrap();
            for key in ["vendor", "sla", "hemisphere", "production", "site_code"] {
                assert_eq!(
                    from_yaml.resolve(yaml_host, key).unwrap(),
                    built.resolve(built_host, key).unwrap(),
                    "attribute {key} on {name}"
                );
            }
        }
    }

    #[test]
    fn yaml_fixture_filters_like_the_builder() {
        let inv = sample_inventory_from_yaml().unwrap();
        let routers = inv.filter(&attr("device_type").eq("router")).unwrap();
        assert_eq!(routers.host_names(), ["lab-csr-01", "lab-csr-02"]);
    }
}
