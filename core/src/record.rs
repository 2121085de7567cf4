//! `Record`: the seam between the filter engine and inventory records.
//!
//! Hosts and groups are both attribute-bearing records with ordered group
//! references (memberships for a host, parents for a group). Everything
//! the engine needs from a record goes through this trait, which is what
//! lets one predicate vocabulary filter both kinds.

use crate::AttrValue;
use std::collections::HashMap;
use std::fmt::Debug;

/// An inventory record: a named attribute map with ordered group references.
///
/// Implemented by [`Host`](crate::Host) (references are memberships) and
/// [`Group`](crate::Group) (references are parents). Attribute resolution
/// walks the references depth-first, in order, with the record's own data
/// taking precedence.
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `Record`",
    label = "this type cannot be filtered",
    note = "filters evaluate against inventory records; use Host or Group, or implement name/data/group_refs"
)]
pub trait Record: Debug {
    /// The record's unique name within its inventory map.
    fn name(&self) -> &str;

    /// The record's own attributes.
    fn data(&self) -> &HashMap<String, AttrValue>;

    /// Ordered group references: memberships for a host, parents for a group.
    fn group_refs(&self) -> &[String];
}
