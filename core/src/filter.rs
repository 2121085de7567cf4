//! `Filter`: boolean predicate expressions over inventory records.
//!
//! Filters combine attribute predicates with AND/OR/NOT and can fall back
//! to opaque predicate functions. They are built with the [`attr`]
//! selector and the `&`, `|`, `!` operators:
//!
//! ```
//! use netsift::{attr, Filter, Host};
//!
//! let f: Filter<Host> =
//!     attr("vendor").eq("cisco") & !attr("site_code").eq("mel");
//! ```

use crate::{
    AttrValue, ContainsMatcher, EqMatcher, FilterTrace, GeMatcher, Inventory, InventoryError,
    LeMatcher, NeMatcher, OneOfMatcher, PatternMatcher, Record, ValueMatcher,
};
use std::fmt::Debug;
use std::ops;
use std::sync::Arc;

/// A leaf predicate: attribute name plus a [`ValueMatcher`].
///
/// Evaluation resolves the attribute through the record's group chain
/// ([`Inventory::resolve`]), then hands the value to the matcher.
///
/// # Absent attribute evaluates false
///
/// If resolution yields [`AttrValue::None`], the predicate evaluates to
/// `false`. A host missing an attribute is filtered out, never an error.
pub struct AttrPredicate {
    attr: String,
    matcher: Box<dyn ValueMatcher>,
}

impl AttrPredicate {
    /// Create a leaf predicate from an attribute name and a matcher.
    #[must_use]
    pub fn new(attr: impl Into<String>, matcher: Box<dyn ValueMatcher>) -> Self {
        Self {
            attr: attr.into(),
            matcher,
        }
    }

    /// The attribute name this predicate resolves.
    #[must_use]
    pub fn attr(&self) -> &str {
        &self.attr
    }

    /// The matcher applied to the resolved value.
    #[must_use]
    pub fn matcher(&self) -> &dyn ValueMatcher {
        &*self.matcher
    }

    /// Evaluate this predicate against a record.
    ///
    /// # Errors
    ///
    /// Resolution errors (unknown or cyclic group references) propagate.
    pub fn evaluate<R: Record>(
        &self,
        record: &R,
        inventory: &Inventory,
    ) -> Result<bool, InventoryError> {
        let value = inventory.resolve(record, &self.attr)?;
        match value {
            AttrValue::None => Ok(false),
            value => Ok(self.matcher.matches(&value)),
        }
    }

    /// Evaluate with a full trace of the resolved value and matcher.
    pub fn evaluate_with_trace<R: Record>(
        &self,
        record: &R,
        inventory: &Inventory,
    ) -> Result<FilterTrace, InventoryError> {
        let value = inventory.resolve(record, &self.attr)?;
        let matched = match &value {
            AttrValue::None => false,
            value => self.matcher.matches(value),
        };
        Ok(FilterTrace::Attr {
            matched,
            attr: self.attr.clone(),
            value: format!("{value:?}"),
            matcher: format!("{:?}", self.matcher),
        })
    }
}

impl Debug for AttrPredicate {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AttrPredicate")
            .field("attr", &self.attr)
            .field("matcher", &self.matcher)
            .finish()
    }
}

/// A named opaque predicate function over a record type.
///
/// The escape hatch for conditions the expression vocabulary cannot
/// express. The name is carried for `Debug` output and traces; the
/// function itself never errors.
///
/// # Example
///
/// ```
/// use netsift::{CustomPredicate, Host};
///
/// let dual_homed = CustomPredicate::new("dual-homed", |h: &Host| h.groups().len() >= 2);
/// assert!(!dual_homed.evaluate(&Host::new("edge-01").with_group("ios")));
/// ```
pub struct CustomPredicate<T> {
    name: String,
    func: Arc<dyn Fn(&T) -> bool + Send + Sync>,
}

impl<T> CustomPredicate<T> {
    /// Wrap a predicate function under a diagnostic name.
    pub fn new(name: impl Into<String>, func: impl Fn(&T) -> bool + Send + Sync + 'static) -> Self {
        Self {
            name: name.into(),
            func: Arc::new(func),
        }
    }

    /// The diagnostic name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Apply the function.
    pub fn evaluate(&self, record: &T) -> bool {
        (self.func)(record)
    }
}

impl<T> Clone for CustomPredicate<T> {
    fn clone(&self) -> Self {
        Self {
            name: self.name.clone(),
            func: Arc::clone(&self.func),
        }
    }
}

impl<T> Debug for CustomPredicate<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CustomPredicate")
            .field("name", &self.name)
            .finish()
    }
}

/// Composite filter expression over records of type `T`.
///
/// # Variants
///
/// - `Attr` — a leaf attribute predicate
/// - `And` — all children must match (short-circuits on first `false`)
/// - `Or` — any child must match (short-circuits on first `true`)
/// - `Not` — inverts the inner filter
/// - `Custom` — an opaque predicate function
///
/// Short-circuiting is an optimization only: leaf evaluation has no side
/// effects, so order never affects which records match. Resolution
/// *errors*, however, always propagate; a filter over an inventory with a
/// dangling group reference fails rather than silently skipping the host.
pub enum Filter<T> {
    /// A leaf attribute predicate.
    Attr(AttrPredicate),

    /// All filters must match (logical AND).
    And(Vec<Filter<T>>),

    /// Any filter must match (logical OR).
    Or(Vec<Filter<T>>),

    /// Inverts the inner filter (logical NOT).
    Not(Box<Filter<T>>),

    /// An opaque predicate function.
    Custom(CustomPredicate<T>),
}

impl<T: Record> Filter<T> {
    /// A filter matching every record.
    ///
    /// Useful as the `catch_all` for [`from_all`](Self::from_all) /
    /// [`from_any`](Self::from_any) when a clause list may be empty.
    #[must_use]
    pub fn match_all() -> Self {
        Self::Custom(CustomPredicate::new("match-all", |_| true))
    }

    /// Wrap a predicate function under a diagnostic name.
    pub fn custom(
        name: impl Into<String>,
        func: impl Fn(&T) -> bool + Send + Sync + 'static,
    ) -> Self {
        Self::Custom(CustomPredicate::new(name, func))
    }

    /// Evaluate this filter against a record.
    ///
    /// Empty `And` is vacuously true; empty `Or` is false.
    ///
    /// # Errors
    ///
    /// Attribute-resolution errors propagate from any leaf.
    pub fn evaluate(&self, record: &T, inventory: &Inventory) -> Result<bool, InventoryError> {
        match self {
            Self::Attr(p) => p.evaluate(record, inventory),
            Self::And(filters) => {
                for f in filters {
                    if !f.evaluate(record, inventory)? {
                        return Ok(false);
                    }
                }
                Ok(true)
            }
            Self::Or(filters) => {
                for f in filters {
                    if f.evaluate(record, inventory)? {
                        return Ok(true);
                    }
                }
                Ok(false)
            }
            Self::Not(f) => Ok(!f.evaluate(record, inventory)?),
            Self::Custom(p) => Ok(p.evaluate(record)),
        }
    }

    /// Evaluate with a full trace for debugging.
    ///
    /// Unlike [`evaluate()`](Self::evaluate), this does NOT short-circuit
    /// And/Or: every child is evaluated for maximum visibility. The
    /// `matched` result is still identical to `evaluate()`.
    ///
    /// # Errors
    ///
    /// Same contract as [`evaluate()`](Self::evaluate).
    pub fn evaluate_with_trace(
        &self,
        record: &T,
        inventory: &Inventory,
    ) -> Result<FilterTrace, InventoryError> {
        match self {
            Self::Attr(p) => p.evaluate_with_trace(record, inventory),
            Self::And(filters) => {
                let children = filters
                    .iter()
                    .map(|f| f.evaluate_with_trace(record, inventory))
                    .collect::<Result<Vec<_>, _>>()?;
                let matched = children.iter().all(FilterTrace::matched);
                Ok(FilterTrace::And { matched, children })
            }
            Self::Or(filters) => {
                let children = filters
                    .iter()
                    .map(|f| f.evaluate_with_trace(record, inventory))
                    .collect::<Result<Vec<_>, _>>()?;
                let matched = children.iter().any(FilterTrace::matched);
                Ok(FilterTrace::Or { matched, children })
            }
            Self::Not(f) => {
                let inner = f.evaluate_with_trace(record, inventory)?;
                Ok(FilterTrace::Not {
                    matched: !inner.matched(),
                    inner: Box::new(inner),
                })
            }
            Self::Custom(p) => Ok(FilterTrace::Custom {
                matched: p.evaluate(record),
                name: p.name().to_string(),
            }),
        }
    }

    /// Compose filters with AND semantics, optimizing for common cases.
    ///
    /// - Empty → `catch_all` (no conditions = match everything)
    /// - Single → unwrapped (no wrapping overhead)
    /// - Multiple → `And(filters)`
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // unwrap guarded by len() == 1
    pub fn from_all(filters: Vec<Self>, catch_all: Self) -> Self {
        match filters.len() {
            0 => catch_all,
            1 => filters.into_iter().next().unwrap(),
            _ => Self::And(filters),
        }
    }

    /// Compose filters with OR semantics, optimizing for common cases.
    ///
    /// Symmetric with [`from_all`](Self::from_all).
    #[must_use]
    #[allow(clippy::missing_panics_doc)] // unwrap guarded by len() == 1
    pub fn from_any(filters: Vec<Self>, catch_all: Self) -> Self {
        match filters.len() {
            0 => catch_all,
            1 => filters.into_iter().next().unwrap(),
            _ => Self::Or(filters),
        }
    }

    /// Returns `true` if this is an `Attr` leaf.
    #[must_use]
    pub fn is_attr(&self) -> bool {
        matches!(self, Self::Attr(_))
    }

    /// Returns `true` if this is an `And` filter.
    #[must_use]
    pub fn is_and(&self) -> bool {
        matches!(self, Self::And(_))
    }

    /// Returns `true` if this is an `Or` filter.
    #[must_use]
    pub fn is_or(&self) -> bool {
        matches!(self, Self::Or(_))
    }

    /// Returns `true` if this is a `Not` filter.
    #[must_use]
    pub fn is_not(&self) -> bool {
        matches!(self, Self::Not(_))
    }

    /// Calculate the depth of this filter tree.
    ///
    /// Used for the config-time depth limit ([`MAX_DEPTH`](crate::MAX_DEPTH)).
    #[must_use]
    pub fn depth(&self) -> usize {
        match self {
            Self::Attr(_) | Self::Custom(_) => 1,
            Self::And(fs) | Self::Or(fs) => 1 + fs.iter().map(Filter::depth).max().unwrap_or(0),
            Self::Not(f) => 1 + f.depth(),
        }
    }
}

impl<T> Debug for Filter<T> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Attr(p) => f.debug_tuple("Attr").field(p).finish(),
            Self::And(fs) => f.debug_tuple("And").field(&fs.len()).finish(),
            Self::Or(fs) => f.debug_tuple("Or").field(&fs.len()).finish(),
            Self::Not(_) => f.debug_tuple("Not").finish(),
            Self::Custom(p) => f.debug_tuple("Custom").field(&p.name()).finish(),
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Operator composition: f & g, f | g, !f
// ═══════════════════════════════════════════════════════════════════════════════

impl<T> ops::BitAnd for Filter<T> {
    type Output = Filter<T>;

    /// `f & g`: both must match. Adjacent `And`s are flattened.
    fn bitand(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::And(mut left), Self::And(right)) => {
                left.extend(right);
                Self::And(left)
            }
            (Self::And(mut left), rhs) => {
                left.push(rhs);
                Self::And(left)
            }
            (lhs, Self::And(mut right)) => {
                right.insert(0, lhs);
                Self::And(right)
            }
            (lhs, rhs) => Self::And(vec![lhs, rhs]),
        }
    }
}

impl<T> ops::BitOr for Filter<T> {
    type Output = Filter<T>;

    /// `f | g`: either may match. Adjacent `Or`s are flattened.
    fn bitor(self, rhs: Self) -> Self::Output {
        match (self, rhs) {
            (Self::Or(mut left), Self::Or(right)) => {
                left.extend(right);
                Self::Or(left)
            }
            (Self::Or(mut left), rhs) => {
                left.push(rhs);
                Self::Or(left)
            }
            (lhs, Self::Or(mut right)) => {
                right.insert(0, lhs);
                Self::Or(right)
            }
            (lhs, rhs) => Self::Or(vec![lhs, rhs]),
        }
    }
}

impl<T> ops::Not for Filter<T> {
    type Output = Filter<T>;

    /// `!f`: inverts the filter.
    fn not(self) -> Self::Output {
        Self::Not(Box::new(self))
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Builder: attr("vendor").eq("cisco")
// ═══════════════════════════════════════════════════════════════════════════════

/// Start building a leaf predicate on the named attribute.
///
/// # Example
///
/// ```
/// use netsift::{attr, Filter, Host};
///
/// let f: Filter<Host> = attr("site_code").one_of(["mel", "chc"]);
/// ```
pub fn attr(name: impl Into<String>) -> AttrSelector {
    AttrSelector { name: name.into() }
}

/// Intermediate builder state holding the attribute name; see [`attr`].
#[derive(Debug, Clone)]
pub struct AttrSelector {
    name: String,
}

impl AttrSelector {
    /// Attribute equals the value (type-strict).
    #[must_use]
    pub fn eq<T>(self, value: impl Into<AttrValue>) -> Filter<T> {
        Filter::Attr(AttrPredicate::new(
            self.name,
            Box::new(EqMatcher::new(value)),
        ))
    }

    /// Attribute is present and differs from the value.
    ///
    /// Distinct from `!attr(..).eq(..)`: the leaf form excludes records
    /// that lack the attribute, the negated form includes them.
    #[must_use]
    pub fn ne<T>(self, value: impl Into<AttrValue>) -> Filter<T> {
        Filter::Attr(AttrPredicate::new(
            self.name,
            Box::new(NeMatcher::new(value)),
        ))
    }

    /// Numeric attribute is greater than or equal to the threshold.
    #[must_use]
    pub fn ge<T>(self, threshold: impl Into<f64>) -> Filter<T> {
        Filter::Attr(AttrPredicate::new(
            self.name,
            Box::new(GeMatcher::new(threshold)),
        ))
    }

    /// Numeric attribute is less than or equal to the threshold.
    #[must_use]
    pub fn le<T>(self, threshold: impl Into<f64>) -> Filter<T> {
        Filter::Attr(AttrPredicate::new(
            self.name,
            Box::new(LeMatcher::new(threshold)),
        ))
    }

    /// Attribute is one of the given choices.
    #[must_use]
    pub fn one_of<T, I, V>(self, choices: I) -> Filter<T>
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        Filter::Attr(AttrPredicate::new(
            self.name,
            Box::new(OneOfMatcher::new(choices)),
        ))
    }

    /// List attribute contains the element, or string attribute contains
    /// the substring.
    #[must_use]
    pub fn contains<T>(self, needle: impl Into<AttrValue>) -> Filter<T> {
        Filter::Attr(AttrPredicate::new(
            self.name,
            Box::new(ContainsMatcher::new(needle)),
        ))
    }

    /// String attribute matches the regex.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidPattern`] if the pattern does not
    /// compile.
    pub fn matches<T>(self, pattern: &str) -> Result<Filter<T>, InventoryError> {
        Ok(Filter::Attr(AttrPredicate::new(
            self.name,
            Box::new(PatternMatcher::new(pattern)?),
        )))
    }
}
