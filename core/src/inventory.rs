//! Inventory model: hosts, groups, and the operations over them.
//!
//! An [`Inventory`] is a pair of name-keyed maps (hosts and groups),
//! read-only once constructed. Filtering never mutates an inventory; it
//! produces a new one holding the matching host subset, which is itself
//! filterable.
//!
//! # Attribute resolution
//!
//! A host's effective attributes fall back through its group memberships:
//! the host's own data wins, then groups are searched depth-first in
//! membership order, each group's own data before its parents. Diamond
//! inheritance is fine (the first path wins); a true cycle in the group
//! graph is a [`CyclicGroupReference`](crate::InventoryError::CyclicGroupReference)
//! error, and a reference to a missing group is an
//! [`UnknownGroupReference`](crate::InventoryError::UnknownGroupReference).

use crate::{AttrValue, Filter, InventoryError, Record};
use std::collections::{HashMap, HashSet};

/// The reserved attribute name that resolves to a record's transitively
/// expanded group chain, as a list of group-name strings.
///
/// `attr("groups").contains("southern")` therefore selects every host in
/// any group inheriting from `southern`, not just direct members.
pub const GROUPS_ATTR: &str = "groups";

// ═══════════════════════════════════════════════════════════════════════════════
// Host
// ═══════════════════════════════════════════════════════════════════════════════

/// A single network device record.
///
/// # Example
///
/// ```
/// use netsift::Host;
///
/// let host = Host::new("lab-csr-01.lab.acme.net")
///     .with_group("ios")
///     .with_group("mel")
///     .with_data("vendor", "cisco")
///     .with_data("device_type", "router");
///
/// assert_eq!(host.get("vendor").and_then(|v| v.as_str()), Some("cisco"));
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Host {
    name: String,
    groups: Vec<String>,
    data: HashMap<String, AttrValue>,
}

impl Host {
    /// Create a host with no data and no memberships.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            data: HashMap::new(),
        }
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Append a group membership (builder pattern). Order is significant:
    /// earlier groups win attribute resolution.
    #[must_use]
    pub fn with_group(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// The host's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The host's direct group memberships, in resolution order.
    #[must_use]
    pub fn groups(&self) -> &[String] {
        &self.groups
    }

    /// The host's own attributes (no group fallback; see
    /// [`Inventory::resolve`] for the full chain).
    #[must_use]
    pub fn get(&self, attr: &str) -> Option<&AttrValue> {
        self.data.get(attr)
    }
}

impl Record for Host {
    fn name(&self) -> &str {
        &self.name
    }

    fn data(&self) -> &HashMap<String, AttrValue> {
        &self.data
    }

    fn group_refs(&self) -> &[String] {
        &self.groups
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Group
// ═══════════════════════════════════════════════════════════════════════════════

/// A named collection of shared attributes, applied to member hosts and
/// inheritable from parent groups.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Group {
    name: String,
    groups: Vec<String>,
    data: HashMap<String, AttrValue>,
}

impl Group {
    /// Create a group with no data and no parents.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            groups: Vec::new(),
            data: HashMap::new(),
        }
    }

    /// Add an attribute (builder pattern).
    #[must_use]
    pub fn with_data(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.data.insert(key.into(), value.into());
        self
    }

    /// Append a parent group (builder pattern).
    #[must_use]
    pub fn with_parent(mut self, group: impl Into<String>) -> Self {
        self.groups.push(group.into());
        self
    }

    /// The group's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The group's parent groups, in resolution order.
    #[must_use]
    pub fn parents(&self) -> &[String] {
        &self.groups
    }

    /// The group's own attributes.
    #[must_use]
    pub fn get(&self, attr: &str) -> Option<&AttrValue> {
        self.data.get(attr)
    }
}

impl Record for Group {
    fn name(&self) -> &str {
        &self.name
    }

    fn data(&self) -> &HashMap<String, AttrValue> {
        &self.data
    }

    fn group_refs(&self) -> &[String] {
        &self.groups
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Inventory
// ═══════════════════════════════════════════════════════════════════════════════

/// A host map plus a group map, read-only after construction.
///
/// The result of [`filter`](Inventory::filter) is a new `Inventory` with
/// the matching host subset and the *full* group map: groups are
/// inheritance sources, and pruning them would dangle host references.
///
/// # Example
///
/// ```
/// use netsift::{attr, Group, Host, Inventory};
///
/// let mut inv = Inventory::new();
/// inv.add_group(Group::new("ios").with_data("vendor", "cisco"));
/// inv.add_host(
///     Host::new("edge-01")
///         .with_group("ios")
///         .with_data("device_type", "router"),
/// );
/// inv.add_host(
///     Host::new("edge-02")
///         .with_group("ios")
///         .with_data("device_type", "switch"),
/// );
///
/// let routers = inv.filter(&attr("device_type").eq("router"))?;
/// assert_eq!(routers.host_names(), ["edge-01"]);
///
/// // Inherited through the group chain:
/// let cisco = inv.filter(&attr("vendor").eq("cisco"))?;
/// assert_eq!(cisco.hosts().len(), 2);
/// # Ok::<(), netsift::InventoryError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Inventory {
    hosts: HashMap<String, Host>,
    groups: HashMap<String, Group>,
}

impl Inventory {
    /// Create an empty inventory.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a host, keyed by its name. Replaces any existing host of
    /// the same name.
    pub fn add_host(&mut self, host: Host) {
        self.hosts.insert(host.name.clone(), host);
    }

    /// Insert a group, keyed by its name. Replaces any existing group of
    /// the same name.
    pub fn add_group(&mut self, group: Group) {
        self.groups.insert(group.name.clone(), group);
    }

    /// The host map.
    #[must_use]
    pub fn hosts(&self) -> &HashMap<String, Host> {
        &self.hosts
    }

    /// The group map.
    #[must_use]
    pub fn groups(&self) -> &HashMap<String, Group> {
        &self.groups
    }

    /// Look up a host by name.
    #[must_use]
    pub fn host(&self, name: &str) -> Option<&Host> {
        self.hosts.get(name)
    }

    /// Look up a group by name.
    #[must_use]
    pub fn group(&self, name: &str) -> Option<&Group> {
        self.groups.get(name)
    }

    /// Sorted host names. Map iteration order is unspecified; display and
    /// tests go through this.
    #[must_use]
    pub fn host_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.hosts.keys().cloned().collect();
        names.sort();
        names
    }

    /// Sorted group names.
    #[must_use]
    pub fn group_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.groups.keys().cloned().collect();
        names.sort();
        names
    }

    // ───────────────────────────────────────────────────────────────────────
    // Attribute resolution
    // ───────────────────────────────────────────────────────────────────────

    /// Resolve an attribute for a record, falling back through its group
    /// chain.
    ///
    /// Returns [`AttrValue::None`] when the attribute is absent everywhere
    /// on the chain. The reserved name [`GROUPS_ATTR`] resolves to the
    /// record's transitively expanded group chain as a list.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::UnknownGroupReference`] if the chain references
    ///   a group not present in this inventory
    /// - [`InventoryError::CyclicGroupReference`] if the chain loops
    pub fn resolve<R: Record>(&self, record: &R, attr: &str) -> Result<AttrValue, InventoryError> {
        if attr == GROUPS_ATTR {
            let chain = self.expanded_groups(record)?;
            return Ok(chain.into_iter().collect());
        }
        if let Some(value) = record.data().get(attr) {
            return Ok(value.clone());
        }
        let mut path = Vec::new();
        let mut visited = HashSet::new();
        let found = self.resolve_in_groups(
            record.name(),
            record.group_refs(),
            attr,
            &mut path,
            &mut visited,
        )?;
        Ok(found.unwrap_or(AttrValue::None))
    }

    fn resolve_in_groups(
        &self,
        referenced_by: &str,
        refs: &[String],
        attr: &str,
        path: &mut Vec<String>,
        visited: &mut HashSet<String>,
    ) -> Result<Option<AttrValue>, InventoryError> {
        for name in refs {
            if path.contains(name) {
                return Err(InventoryError::CyclicGroupReference {
                    group: name.clone(),
                    path: path.clone(),
                });
            }
            if !visited.insert(name.clone()) {
                // Diamond: already resolved through another branch.
                continue;
            }
            let group = self.group_or_err(name, referenced_by)?;
            if let Some(value) = group.data.get(attr) {
                return Ok(Some(value.clone()));
            }
            path.push(name.clone());
            let found = self.resolve_in_groups(name, &group.groups, attr, path, visited)?;
            path.pop();
            if found.is_some() {
                return Ok(found);
            }
        }
        Ok(None)
    }

    /// The record's transitively expanded group chain, depth-first in
    /// reference order, each group listed once.
    ///
    /// # Errors
    ///
    /// Same error contract as [`resolve`](Inventory::resolve).
    pub fn expanded_groups<R: Record>(&self, record: &R) -> Result<Vec<String>, InventoryError> {
        let mut chain = Vec::new();
        let mut path = Vec::new();
        self.expand_refs(record.name(), record.group_refs(), &mut chain, &mut path)?;
        Ok(chain)
    }

    fn expand_refs(
        &self,
        referenced_by: &str,
        refs: &[String],
        chain: &mut Vec<String>,
        path: &mut Vec<String>,
    ) -> Result<(), InventoryError> {
        for name in refs {
            if path.contains(name) {
                return Err(InventoryError::CyclicGroupReference {
                    group: name.clone(),
                    path: path.clone(),
                });
            }
            if chain.contains(name) {
                continue;
            }
            let group = self.group_or_err(name, referenced_by)?;
            chain.push(name.clone());
            path.push(name.clone());
            self.expand_refs(name, &group.groups, chain, path)?;
            path.pop();
        }
        Ok(())
    }

    fn group_or_err(&self, name: &str, referenced_by: &str) -> Result<&Group, InventoryError> {
        self.groups
            .get(name)
            .ok_or_else(|| InventoryError::UnknownGroupReference {
                group: name.to_string(),
                referenced_by: referenced_by.to_string(),
            })
    }

    // ───────────────────────────────────────────────────────────────────────
    // Filtering
    // ───────────────────────────────────────────────────────────────────────

    /// Filter hosts by a predicate, returning a new inventory.
    ///
    /// The input is never mutated. The result holds the matching hosts and
    /// the full group map, and is itself filterable: chaining
    /// `inv.filter(&p)?.filter(&q)?` selects the same hosts as
    /// `inv.filter(&(p & q))?`.
    ///
    /// # Errors
    ///
    /// Resolution errors ([`UnknownGroupReference`](InventoryError::UnknownGroupReference),
    /// [`CyclicGroupReference`](InventoryError::CyclicGroupReference))
    /// propagate; they are never silently skipped.
    pub fn filter(&self, filter: &Filter<Host>) -> Result<Inventory, InventoryError> {
        let mut hosts = HashMap::new();
        for (name, host) in &self.hosts {
            if filter.evaluate(host, self)? {
                hosts.insert(name.clone(), host.clone());
            }
        }
        Ok(Inventory {
            hosts,
            groups: self.groups.clone(),
        })
    }

    /// Names of groups matching a predicate, sorted.
    ///
    /// Group filtering is a query rather than a projection: removing
    /// groups from the map would dangle the references hosts and child
    /// groups hold.
    ///
    /// # Errors
    ///
    /// Resolution errors propagate, as with [`filter`](Inventory::filter).
    pub fn find_groups(&self, filter: &Filter<Group>) -> Result<Vec<String>, InventoryError> {
        let mut names = Vec::new();
        for (name, group) in &self.groups {
            if filter.evaluate(group, self)? {
                names.push(name.clone());
            }
        }
        names.sort();
        Ok(names)
    }

    /// Hosts that are direct or transitive members of the named group,
    /// sorted.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::UnknownGroupReference`] if `name` is not a
    ///   group in this inventory, or a membership chain references one
    /// - [`InventoryError::CyclicGroupReference`] if a membership chain
    ///   loops
    pub fn children_of_group(&self, name: &str) -> Result<Vec<String>, InventoryError> {
        if !self.groups.contains_key(name) {
            return Err(InventoryError::UnknownGroupReference {
                group: name.to_string(),
                referenced_by: "inventory query".to_string(),
            });
        }
        let mut members = Vec::new();
        for (host_name, host) in &self.hosts {
            let chain = self.expanded_groups(host)?;
            if chain.iter().any(|g| g == name) {
                members.push(host_name.clone());
            }
        }
        members.sort();
        Ok(members)
    }
}
