//! Config types for filter construction from YAML/JSON.
//!
//! These types mirror the runtime filter types but are serde-deserializable,
//! so filter expressions can live in config files next to the inventory
//! they select from.
//!
//! # Relationship to runtime types
//!
//! | Config type | Runtime type | Loader method |
//! |-------------|--------------|---------------|
//! | [`FilterConfig`] | [`Filter`](crate::Filter) | [`FilterConfig::build`] |
//! | [`ValueMatchConfig`] | `Box<dyn ValueMatcher>` | [`ValueMatchConfig::build`] |
//!
//! [`Filter::Custom`](crate::Filter::Custom) has no config form: opaque
//! functions cannot round-trip through a config file.

use crate::{
    AttrPredicate, AttrValue, ContainsMatcher, EqMatcher, Filter, GeMatcher, InventoryError,
    LeMatcher, NeMatcher, OneOfMatcher, PatternMatcher, Record, ValueMatcher, MAX_DEPTH,
};
use serde::Deserialize;

/// Configuration for a leaf value match.
///
/// Externally tagged, so a config reads as `match: { eq: cisco }`,
/// `match: { one_of: [mel, chc] }`, `match: { ge: 80 }`, and so on.
#[derive(Debug, Clone, Deserialize)]
pub enum ValueMatchConfig {
    /// Type-strict equality.
    #[serde(rename = "eq")]
    Eq(AttrValue),

    /// Present and not equal.
    #[serde(rename = "ne")]
    Ne(AttrValue),

    /// Numeric greater-or-equal.
    #[serde(rename = "ge")]
    Ge(f64),

    /// Numeric less-or-equal.
    #[serde(rename = "le")]
    Le(f64),

    /// Value is one of the choices.
    #[serde(rename = "one_of")]
    OneOf(Vec<AttrValue>),

    /// List element / substring containment.
    #[serde(rename = "contains")]
    Contains(AttrValue),

    /// Regex on string values.
    #[serde(rename = "pattern")]
    Pattern(String),
}

impl ValueMatchConfig {
    /// Build the runtime matcher.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidPattern`] for an uncompilable
    /// `pattern`.
    pub fn build(self) -> Result<Box<dyn ValueMatcher>, InventoryError> {
        Ok(match self {
            Self::Eq(expected) => Box::new(EqMatcher::new(expected)),
            Self::Ne(expected) => Box::new(NeMatcher::new(expected)),
            Self::Ge(threshold) => Box::new(GeMatcher::new(threshold)),
            Self::Le(threshold) => Box::new(LeMatcher::new(threshold)),
            Self::OneOf(choices) => Box::new(OneOfMatcher::new(choices)),
            Self::Contains(needle) => Box::new(ContainsMatcher::new(needle)),
            Self::Pattern(pattern) => Box::new(PatternMatcher::new(&pattern)?),
        })
    }
}

/// Configuration for a [`Filter`](crate::Filter).
///
/// Uses `#[serde(tag = "type")]` for discriminated union deserialization:
///
/// ```yaml
/// type: and
/// filters:
///   - { type: attr, attr: vendor, match: { eq: cisco } }
///   - type: not
///     filter: { type: attr, attr: site_code, match: { eq: mel } }
/// ```
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type")]
pub enum FilterConfig {
    /// A leaf attribute predicate.
    #[serde(rename = "attr")]
    Attr {
        /// The attribute to resolve.
        attr: String,
        /// How to match the resolved value.
        #[serde(rename = "match")]
        value_match: ValueMatchConfig,
    },

    /// All filters must match (logical AND).
    #[serde(rename = "and")]
    And {
        /// Child filters (all must match).
        filters: Vec<FilterConfig>,
    },

    /// Any filter must match (logical OR).
    #[serde(rename = "or")]
    Or {
        /// Child filters (any must match).
        filters: Vec<FilterConfig>,
    },

    /// Inverts the inner filter (logical NOT).
    #[serde(rename = "not")]
    Not {
        /// The filter to negate.
        filter: Box<FilterConfig>,
    },
}

impl FilterConfig {
    /// Build the runtime filter, validating the tree first.
    ///
    /// # Errors
    ///
    /// - [`InventoryError::DepthExceeded`] if nesting exceeds
    ///   [`MAX_DEPTH`]
    /// - [`InventoryError::InvalidPattern`] for an uncompilable regex
    pub fn build<T: Record>(self) -> Result<Filter<T>, InventoryError> {
        let depth = self.depth();
        if depth > MAX_DEPTH {
            return Err(InventoryError::DepthExceeded {
                depth,
                max: MAX_DEPTH,
            });
        }
        self.build_unchecked()
    }

    fn build_unchecked<T: Record>(self) -> Result<Filter<T>, InventoryError> {
        Ok(match self {
            Self::Attr { attr, value_match } => {
                Filter::Attr(AttrPredicate::new(attr, value_match.build()?))
            }
            Self::And { filters } => Filter::And(
                filters
                    .into_iter()
                    .map(Self::build_unchecked)
                    .collect::<Result<_, _>>()?,
            ),
            Self::Or { filters } => Filter::Or(
                filters
                    .into_iter()
                    .map(Self::build_unchecked)
                    .collect::<Result<_, _>>()?,
            ),
            Self::Not { filter } => Filter::Not(Box::new(filter.build_unchecked()?)),
        })
    }

    /// Depth of the config tree, for the load-time limit.
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Attr { .. } => 1,
            Self::And { filters } | Self::Or { filters } => {
                1 + filters.iter().map(Self::depth).max().unwrap_or(0)
            }
            Self::Not { filter } => 1 + filter.depth(),
        }
    }
}
