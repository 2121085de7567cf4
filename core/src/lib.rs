//! netsift: predicate-based filtering for network-device inventories.
//!
//! An inventory is a set of hosts and groups, each carrying an attribute
//! map; hosts belong to groups, groups inherit from parent groups, and a
//! host's effective attributes fall back through that chain. Filters are
//! boolean expressions over those attributes, composed with `&`, `|`, `!`.
//!
//! # Architecture
//!
//! - [`AttrValue`] — type-erased attribute value (scalars + lists)
//! - [`Record`] — the seam over hosts and groups (name, data, group refs)
//! - [`ValueMatcher`] — attribute-agnostic matching (non-generic, shareable)
//! - [`AttrPredicate`] — leaf: attribute name + matcher
//! - [`Filter<T>`] — boolean composition (And, Or, Not) plus opaque
//!   [`CustomPredicate`] functions
//! - [`Inventory`] — host/group maps; resolution, filtering, traversal
//!
//! # Key invariants
//!
//! 1. **Absent → false**: a missing attribute or a type mismatch makes the
//!    leaf evaluate `false`. One sparse host never aborts a filter run.
//!
//! 2. **Reference errors are loud**: a dangling or cyclic group reference
//!    is an [`InventoryError`], never a silent skip.
//!
//! 3. **Filtering is pure**: [`Inventory::filter`] returns a new
//!    inventory; chaining `filter(p).filter(q)` selects exactly the hosts
//!    of `filter(p & q)`.
//!
//! # Example
//!
//! ```
//! use netsift::prelude::*;
//!
//! let mut inv = Inventory::new();
//! inv.add_group(Group::new("ios").with_data("vendor", "cisco"));
//! inv.add_group(Group::new("junos").with_data("vendor", "juniper"));
//! inv.add_host(
//!     Host::new("rtr-01")
//!         .with_group("ios")
//!         .with_data("device_type", "router")
//!         .with_data("site_code", "mel"),
//! );
//! inv.add_host(
//!     Host::new("fw-01")
//!         .with_group("junos")
//!         .with_data("device_type", "firewall")
//!         .with_data("site_code", "chc"),
//! );
//!
//! // Hosts inherit vendor through their platform group.
//! let cisco = inv.filter(&attr("vendor").eq("cisco"))?;
//! assert_eq!(cisco.host_names(), ["rtr-01"]);
//!
//! // Compose with &, |, ! like any boolean expression.
//! let not_mel_firewalls =
//!     inv.filter(&(!attr("site_code").eq("mel") & attr("device_type").eq("firewall")))?;
//! assert_eq!(not_mel_firewalls.host_names(), ["fw-01"]);
//! # Ok::<(), netsift::InventoryError>(())
//! ```
//!
//! # Features
//!
//! - `serde` — serde support on inventory types plus `FilterConfig` for
//!   filter expressions in YAML/JSON
//! - `yaml` — the `loader` module for the hosts.yaml/groups.yaml
//!   inventory layout (implies `serde`)

// ═══════════════════════════════════════════════════════════════════════════════
// Modules
// ═══════════════════════════════════════════════════════════════════════════════

mod attr_value;
mod filter;
mod inventory;
mod record;
mod trace;
mod value_match;

#[cfg(feature = "serde")]
mod config;
#[cfg(feature = "yaml")]
pub mod loader;

// ═══════════════════════════════════════════════════════════════════════════════
// Public API
// ═══════════════════════════════════════════════════════════════════════════════

// Core types
pub use attr_value::AttrValue;
pub use filter::{attr, AttrPredicate, AttrSelector, CustomPredicate, Filter};
pub use inventory::{Group, Host, Inventory, GROUPS_ATTR};
pub use record::Record;
pub use trace::FilterTrace;

// Concrete matchers
pub use value_match::{
    ContainsMatcher, EqMatcher, GeMatcher, LeMatcher, NeMatcher, OneOfMatcher, PatternMatcher,
    ValueMatcher,
};

// Config (feature-gated)
#[cfg(feature = "serde")]
pub use config::{FilterConfig, ValueMatchConfig};
#[cfg(feature = "yaml")]
pub use loader::{inventory_from_yaml, load_inventory};

// ═══════════════════════════════════════════════════════════════════════════════
// Prelude
// ═══════════════════════════════════════════════════════════════════════════════

/// Prelude module for convenient imports.
///
/// ```
/// use netsift::prelude::*;
/// ```
pub mod prelude {
    pub use crate::{
        attr,
        // Core types
        AttrPredicate,
        AttrValue,
        // Concrete matchers
        ContainsMatcher,
        CustomPredicate,
        EqMatcher,
        Filter,
        FilterTrace,
        GeMatcher,
        Group,
        Host,
        Inventory,
        // Errors
        InventoryError,
        LeMatcher,
        NeMatcher,
        OneOfMatcher,
        PatternMatcher,
        Record,
        ValueMatcher,
    };
}

// ═══════════════════════════════════════════════════════════════════════════════
// Constants
// ═══════════════════════════════════════════════════════════════════════════════

/// Maximum allowed depth for filter trees built from config.
///
/// Protects against stack overflow from deeply nested expressions.
/// Enforced at config load time via `FilterConfig::build`; filters built
/// in code are the caller's responsibility.
pub const MAX_DEPTH: usize = 32;

// ═══════════════════════════════════════════════════════════════════════════════
// Errors
// ═══════════════════════════════════════════════════════════════════════════════

/// Errors from inventory loading, filter construction, and evaluation.
///
/// Per-record evaluation edge cases (missing attribute, type mismatch
/// under an operator) are NOT errors; they evaluate to `false`. Errors
/// are reserved for broken inventories (dangling or cyclic group
/// references) and broken configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InventoryError {
    /// The group inheritance chain loops back on itself.
    CyclicGroupReference {
        /// The group closing the cycle.
        group: String,
        /// The chain walked before the cycle closed.
        path: Vec<String>,
    },
    /// A record references a group the inventory does not define.
    UnknownGroupReference {
        /// The missing group.
        group: String,
        /// The host or group holding the reference.
        referenced_by: String,
    },
    /// Filter nesting exceeds [`MAX_DEPTH`].
    DepthExceeded {
        /// Actual depth of the filter tree.
        depth: usize,
        /// Maximum allowed depth.
        max: usize,
    },
    /// A regex pattern is invalid.
    InvalidPattern {
        /// The pattern that failed to compile.
        pattern: String,
        /// The underlying error message.
        source: String,
    },
    /// Inventory or filter configuration failed to load.
    InvalidConfig {
        /// The underlying error message.
        source: String,
    },
}

impl std::fmt::Display for InventoryError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::CyclicGroupReference { group, path } => {
                write!(
                    f,
                    "cyclic group reference: \"{group}\" reached again via {}",
                    path.join(" -> ")
                )
            }
            Self::UnknownGroupReference {
                group,
                referenced_by,
            } => {
                write!(
                    f,
                    "unknown group \"{group}\" referenced by \"{referenced_by}\""
                )
            }
            Self::DepthExceeded { depth, max } => {
                write!(
                    f,
                    "filter nesting depth is {depth}, but maximum allowed is {max} \
                     (flatten the expression tree)"
                )
            }
            Self::InvalidPattern { pattern, source } => {
                write!(f, "invalid pattern \"{pattern}\": {source}")
            }
            Self::InvalidConfig { source } => {
                write!(f, "invalid config: {source}")
            }
        }
    }
}

impl std::error::Error for InventoryError {}
