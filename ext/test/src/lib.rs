//! netsift-test: reference inventory fixtures for conformance testing.
//!
//! Provides a small, fully wired lab inventory with every feature the
//! engine exercises: group inheritance (platform, site, hemisphere,
//! environment), numeric and boolean attributes, and a host with sparse
//! data. Conformance tests and benches build on it instead of hand-rolling
//! inventories.
//!
//! # Example
//!
//! ```
//! use netsift::prelude::*;
//! use netsift_test::sample_inventory;
//!
//! let inv = sample_inventory();
//! let cisco = inv.filter(&attr("vendor").eq("cisco")).unwrap();
//! assert_eq!(cisco.hosts().len(), 4);
//! ```

use netsift::{Group, Host, Inventory};

#[cfg(feature = "fixtures")]
pub mod fixture;

/// Build the reference lab inventory.
///
/// Seven devices across three vendors and three sites:
///
/// | Host | Platform | Site | Env | device_type | sla |
/// |------|----------|------|-----|-------------|-----|
/// | `lab-csr-01` | ios | mel | test | router | 90 |
/// | `lab-csr-02` | ios | chc | prod | router | 95 |
/// | `lab-nxos-01` | nxos_ssh | mel | prod | switch | 85 |
/// | `lab-nxos-02` | nxos_ssh | chc | test | switch | (none) |
/// | `lab-arista-01` | eos | ptl | test | switch | 75 |
/// | `lab-arista-02` | eos | mel | prod | switch | 99 |
/// | `lab-srx-01` | junos | ptl | prod | firewall | 80 |
///
/// Sites `mel` and `chc` inherit from `southern`, `ptl` from `northern`,
/// so hemisphere membership is only reachable transitively. `lab-nxos-02`
/// deliberately lacks `sla`.
#[must_use]
pub fn sample_inventory() -> Inventory {
    let mut inv = Inventory::new();

    // Platform groups carry the vendor.
    inv.add_group(
        Group::new("ios")
            .with_data("vendor", "cisco")
            .with_data("os_family", "ios"),
    );
    inv.add_group(
        Group::new("nxos_ssh")
            .with_data("vendor", "cisco")
            .with_data("os_family", "nxos"),
    );
    inv.add_group(
        Group::new("eos")
            .with_data("vendor", "arista")
            .with_data("os_family", "eos"),
    );
    inv.add_group(
        Group::new("junos")
            .with_data("vendor", "juniper")
            .with_data("os_family", "junos"),
    );

    // Hemispheres, inherited by sites.
    inv.add_group(Group::new("southern").with_data("hemisphere", "southern"));
    inv.add_group(Group::new("northern").with_data("hemisphere", "northern"));

    // Sites.
    inv.add_group(
        Group::new("mel")
            .with_parent("southern")
            .with_data("site_code", "mel")
            .with_data("region", "apac"),
    );
    inv.add_group(
        Group::new("chc")
            .with_parent("southern")
            .with_data("site_code", "chc")
            .with_data("region", "apac"),
    );
    inv.add_group(
        Group::new("ptl")
            .with_parent("northern")
            .with_data("site_code", "ptl")
            .with_data("region", "amer"),
    );

    // Environments.
    inv.add_group(Group::new("test").with_data("production", false));
    inv.add_group(Group::new("prod").with_data("production", true));

    inv.add_host(
        Host::new("lab-csr-01")
            .with_group("ios")
            .with_group("mel")
            .with_group("test")
            .with_data("device_type", "router")
            .with_data("mgmt_ip", "10.0.0.1")
            .with_data("os_version", "17.3.1")
            .with_data("sla", 90),
    );
    inv.add_host(
        Host::new("lab-csr-02")
            .with_group("ios")
            .with_group("chc")
            .with_group("prod")
            .with_data("device_type", "router")
            .with_data("mgmt_ip", "10.0.0.2")
            .with_data("os_version", "17.6.2")
            .with_data("sla", 95),
    );
    inv.add_host(
        Host::new("lab-nxos-01")
            .with_group("nxos_ssh")
            .with_group("mel")
            .with_group("prod")
            .with_data("device_type", "switch")
            .with_data("mgmt_ip", "10.0.0.11")
            .with_data("os_version", "9.3.8")
            .with_data("sla", 85),
    );
    // No sla: exercises the absent-attribute path.
    inv.add_host(
        Host::new("lab-nxos-02")
            .with_group("nxos_ssh")
            .with_group("chc")
            .with_group("test")
            .with_data("device_type", "switch")
            .with_data("mgmt_ip", "10.0.0.12")
            .with_data("os_version", "9.3.8"),
    );
    inv.add_host(
        Host::new("lab-arista-01")
            .with_group("eos")
            .with_group("ptl")
            .with_group("test")
            .with_data("device_type", "switch")
            .with_data("mgmt_ip", "10.0.0.21")
            .with_data("os_version", "4.27.3F")
            .with_data("sla", 75),
    );
    inv.add_host(
        Host::new("lab-arista-02")
            .with_group("eos")
            .with_group("mel")
            .with_group("prod")
            .with_data("device_type", "switch")
            .with_data("mgmt_ip", "10.0.0.22")
            .with_data("os_version", "4.28.1F")
            .with_data("sla", 99),
    );
    inv.add_host(
        Host::new("lab-srx-01")
            .with_group("junos")
            .with_group("ptl")
            .with_group("prod")
            .with_data("device_type", "firewall")
            .with_data("mgmt_ip", "10.0.0.31")
            .with_data("os_version", "21.4R1")
            .with_data("sla", 80),
    );

    inv
}

/// Prelude for convenient imports in tests.
pub mod prelude {
    pub use crate::sample_inventory;
    pub use netsift::prelude::*;
}

#[cfg(test)]
mod tests {
    use super::*;
    use netsift::prelude::*;

    #[test]
    fn sample_has_seven_hosts_and_eleven_groups() {
        let inv = sample_inventory();
        assert_eq!(inv.hosts().len(), 7);
        assert_eq!(inv.groups().len(), 11);
    }

    #[test]
    fn every_group_reference_resolves() {
        let inv = sample_inventory();
        for host in inv.hosts().values() {
            inv.expanded_groups(host).expect("chain resolves");
        }
    }

    #[test]
    fn hemisphere_is_only_reachable_transitively() {
        let inv = sample_inventory();
        let host = inv.host("lab-csr-01").unwrap();
        assert!(!host.groups().contains(&"southern".to_string()));
        assert_eq!(
            inv.resolve(host, "hemisphere").unwrap().as_str(),
            Some("southern")
        );
    }

    #[test]
    fn nxos_02_lacks_sla() {
        let inv = sample_inventory();
        let host = inv.host("lab-nxos-02").unwrap();
        assert!(inv.resolve(host, "sla").unwrap().is_none());
    }
}
