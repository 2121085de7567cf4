//! End-to-end conformance through the YAML surfaces: inventory loaded
//! from fixture files, filters built from config documents.

#![cfg(feature = "fixtures")]

use netsift::prelude::*;
use netsift::FilterConfig;
use netsift_test::fixture::sample_inventory_from_yaml;

fn lab() -> Inventory {
    sample_inventory_from_yaml().unwrap()
}

fn filter_from(yaml: &str) -> Filter<Host> {
    let config: FilterConfig = serde_yaml::from_str(yaml).unwrap();
    config.build().unwrap()
}

#[test]
fn config_eq_selects_loaded_hosts() {
    let inv = lab();
    let filter = filter_from(
        r"
type: attr
attr: vendor
match: { eq: cisco }
",
    );
    let cisco = inv.filter(&filter).unwrap();
    assert_eq!(
        cisco.host_names(),
        ["lab-csr-01", "lab-csr-02", "lab-nxos-01", "lab-nxos-02"]
    );
}

#[test]
fn config_compound_matches_builder_equivalent() {
    let inv = lab();
    let from_config = filter_from(
        r"
type: and
filters:
  - { type: attr, attr: device_type, match: { eq: switch } }
  - type: not
    filter: { type: attr, attr: site_code, match: { eq: mel } }
",
    );
    let from_builder: Filter<Host> =
        attr("device_type").eq("switch") & !attr("site_code").eq("mel");

    assert_eq!(
        inv.filter(&from_config).unwrap().host_names(),
        inv.filter(&from_builder).unwrap().host_names()
    );
}

#[test]
fn config_numeric_and_membership_ops() {
    let inv = lab();
    let filter = filter_from(
        r"
type: or
filters:
  - { type: attr, attr: sla, match: { ge: 95 } }
  - { type: attr, attr: site_code, match: { one_of: [ptl] } }
",
    );
    assert_eq!(
        inv.filter(&filter).unwrap().host_names(),
        ["lab-arista-01", "lab-arista-02", "lab-csr-02", "lab-srx-01"]
    );
}

#[test]
fn config_pattern_matches_host_attributes() {
    let inv = lab();
    let filter = filter_from(
        r"
type: attr
attr: os_version
match: { pattern: 'F$' }
",
    );
    // Arista EOS trains end in F.
    assert_eq!(
        inv.filter(&filter).unwrap().host_names(),
        ["lab-arista-01", "lab-arista-02"]
    );
}

#[test]
fn config_groups_containment_is_transitive() {
    let inv = lab();
    let filter = filter_from(
        r"
type: attr
attr: groups
match: { contains: northern }
",
    );
    assert_eq!(
        inv.filter(&filter).unwrap().host_names(),
        ["lab-arista-01", "lab-srx-01"]
    );
}
