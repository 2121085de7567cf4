//! Conformance tests for the filter algebra.
//!
//! The laws every inventory filter must satisfy, checked over a battery
//! of predicate pairs on the reference lab:
//!
//! - double negation: `!!p` selects what `p` selects
//! - De Morgan: `!(p & q)` selects what `!p | !q` selects
//! - chaining: `filter(p).filter(q)` selects what `filter(p & q)` selects
//! - idempotence: `filter(p).filter(p)` selects what `filter(p)` selects

use netsift::prelude::*;
use netsift_test::sample_inventory;

/// A battery of structurally varied host filters over the lab's attributes.
fn battery() -> Vec<Filter<Host>> {
    vec![
        attr("vendor").eq("cisco"),
        attr("device_type").eq("switch"),
        attr("site_code").ne("mel"),
        attr("sla").ge(80),
        attr("sla").le(85),
        attr("site_code").one_of(["mel", "chc"]),
        attr("groups").contains("southern"),
        attr("hemisphere").eq("northern"),
        attr("missing_attribute").eq("anything"),
        Filter::custom("multi-homed", |h: &Host| h.groups().len() >= 3),
        attr("vendor").eq("cisco") & attr("device_type").eq("router"),
        attr("site_code").eq("mel") | attr("site_code").eq("ptl"),
        !attr("production").eq(true),
    ]
}

/// The `i`-th battery filter. Filters are not `Clone` (opaque functions),
/// so each use rebuilds the battery.
fn pick(i: usize) -> Filter<Host> {
    battery().remove(i)
}

fn select(inv: &Inventory, filter: &Filter<Host>) -> Vec<String> {
    inv.filter(filter).unwrap().host_names()
}

#[test]
fn double_negation_is_identity() {
    let inv = sample_inventory();
    for i in 0..battery().len() {
        assert_eq!(select(&inv, &pick(i)), select(&inv, &!!pick(i)), "filter {i}");
    }
}

#[test]
fn de_morgan_over_and() {
    let inv = sample_inventory();
    let n = battery().len();
    for i in 0..n {
        for j in 0..n {
            let negated_conjunction = !(pick(i) & pick(j));
            let disjoined_negations = !pick(i) | !pick(j);
            assert_eq!(
                select(&inv, &negated_conjunction),
                select(&inv, &disjoined_negations),
                "pair ({i}, {j})"
            );
        }
    }
}

#[test]
fn chained_filtering_equals_conjunction() {
    let inv = sample_inventory();
    let n = battery().len();
    for i in 0..n {
        for j in 0..n {
            let chained = inv
                .filter(&pick(i))
                .unwrap()
                .filter(&pick(j))
                .unwrap()
                .host_names();
            let conjunction = select(&inv, &(pick(i) & pick(j)));
            assert_eq!(chained, conjunction, "pair ({i}, {j})");
        }
    }
}

#[test]
fn filtering_is_idempotent() {
    let inv = sample_inventory();
    for i in 0..battery().len() {
        let once = inv.filter(&pick(i)).unwrap();
        let twice = once.filter(&pick(i)).unwrap();
        assert_eq!(once.host_names(), twice.host_names(), "filter {i}");
    }
}

#[test]
fn filtering_never_mutates_the_input() {
    let inv = sample_inventory();
    let before = inv.host_names();
    for p in battery() {
        let _ = inv.filter(&p).unwrap();
    }
    assert_eq!(inv.host_names(), before);
    assert_eq!(inv.hosts().len(), 7);
}

// ═══════════════════════════════════════════════════════════════════════════════
// Scenarios
// ═══════════════════════════════════════════════════════════════════════════════

#[test]
fn scenario_vendor_then_device_type_chaining() {
    let mut inv = Inventory::new();
    inv.add_host(
        Host::new("a")
            .with_data("vendor", "cisco")
            .with_data("device_type", "router"),
    );
    inv.add_host(
        Host::new("b")
            .with_data("vendor", "cisco")
            .with_data("device_type", "switch"),
    );
    inv.add_host(
        Host::new("c")
            .with_data("vendor", "juniper")
            .with_data("device_type", "switch"),
    );

    let cisco = inv.filter(&attr("vendor").eq("cisco")).unwrap();
    assert_eq!(cisco.host_names(), ["a", "b"]);

    let cisco_switches = cisco.filter(&attr("device_type").eq("switch")).unwrap();
    assert_eq!(cisco_switches.host_names(), ["b"]);
}

#[test]
fn scenario_missing_sla_is_excluded_without_error() {
    let inv = sample_inventory();
    // lab-nxos-02 has no sla attribute anywhere on its chain.
    let meeting_sla = inv.filter(&attr("sla").ge(80)).unwrap();
    assert!(!meeting_sla.host_names().contains(&"lab-nxos-02".to_string()));
    assert_eq!(
        meeting_sla.host_names(),
        ["lab-arista-02", "lab-csr-01", "lab-csr-02", "lab-nxos-01", "lab-srx-01"]
    );
}

#[test]
fn scenario_group_cycle_fails_traversal() {
    let mut inv = Inventory::new();
    inv.add_group(Group::new("g1").with_parent("g2"));
    inv.add_group(Group::new("g2").with_parent("g1"));
    inv.add_host(Host::new("h").with_group("g1"));

    let err = inv.children_of_group("g1").unwrap_err();
    assert!(matches!(err, InventoryError::CyclicGroupReference { .. }));
}

#[test]
fn scenario_hemisphere_membership_via_transitive_groups() {
    let inv = sample_inventory();
    // mel and chc inherit from southern; their hosts match transitively.
    let southern = inv.filter(&attr("groups").contains("southern")).unwrap();
    assert_eq!(
        southern.host_names(),
        ["lab-arista-02", "lab-csr-01", "lab-csr-02", "lab-nxos-01", "lab-nxos-02"]
    );

    // Same answer through the traversal API.
    assert_eq!(
        inv.children_of_group("southern").unwrap(),
        southern.host_names()
    );
}

#[test]
fn scenario_site_code_or_and_negation() {
    let inv = sample_inventory();

    let mel_or_chc = inv
        .filter(&(attr("site_code").eq("mel") | attr("site_code").eq("chc")))
        .unwrap();
    assert_eq!(
        mel_or_chc.host_names(),
        ["lab-arista-02", "lab-csr-01", "lab-csr-02", "lab-nxos-01", "lab-nxos-02"]
    );

    let not_mel = inv.filter(&!attr("site_code").eq("mel")).unwrap();
    assert_eq!(
        not_mel.host_names(),
        ["lab-arista-01", "lab-csr-02", "lab-nxos-02", "lab-srx-01"]
    );

    let neither_switch_nor_router = inv
        .filter(&(!attr("device_type").eq("switch") & !attr("device_type").eq("router")))
        .unwrap();
    assert_eq!(neither_switch_nor_router.host_names(), ["lab-srx-01"]);
}

#[test]
fn custom_and_expression_filters_compose_uniformly() {
    let inv = sample_inventory();
    let prod_with_headroom = inv
        .filter(&(Filter::custom("in-prod", |h: &Host| {
            h.groups().contains(&"prod".to_string())
        }) & attr("sla").ge(90)))
        .unwrap();
    assert_eq!(
        prod_with_headroom.host_names(),
        ["lab-arista-02", "lab-csr-02"]
    );
}

#[test]
fn group_filtering_shares_the_vocabulary() {
    let inv = sample_inventory();
    let apac_sites: Filter<Group> = attr("region").eq("apac");
    assert_eq!(inv.find_groups(&apac_sites).unwrap(), ["chc", "mel"]);

    let cisco_platforms: Filter<Group> = attr("vendor").eq("cisco");
    assert_eq!(
        inv.find_groups(&cisco_platforms).unwrap(),
        ["ios", "nxos_ssh"]
    );
}
