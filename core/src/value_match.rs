//! `ValueMatcher`: attribute-agnostic value matching.
//!
//! The `ValueMatcher` trait matches against type-erased [`AttrValue`]s.
//! It is intentionally **non-generic**: the same matcher works whether the
//! value was resolved from a host or from a group.
//!
//! # Available Matchers
//!
//! - [`EqMatcher`] — type-strict equality
//! - [`NeMatcher`] — present and not equal
//! - [`GeMatcher`] / [`LeMatcher`] — numeric ordering
//! - [`OneOfMatcher`] — value is one of a list of choices
//! - [`ContainsMatcher`] — list element / substring containment
//! - [`PatternMatcher`] — regex match on strings

use crate::{AttrValue, InventoryError};
use regex::Regex;
use std::fmt::Debug;

/// Matches against a type-erased [`AttrValue`].
///
/// All implementations must be `Send + Sync`, so filters can be shared
/// across threads if a caller wants to fan evaluation out.
///
/// # Example
///
/// ```
/// use netsift::{AttrValue, EqMatcher, ValueMatcher};
///
/// let matcher = EqMatcher::new("cisco");
/// assert!(matcher.matches(&AttrValue::String("cisco".to_string())));
/// assert!(!matcher.matches(&AttrValue::String("juniper".to_string())));
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` does not implement `ValueMatcher`",
    label = "this type cannot match against AttrValue",
    note = "use a built-in matcher (EqMatcher, OneOfMatcher, ContainsMatcher, ...) or implement the `matches(&self, &AttrValue) -> bool` method"
)]
pub trait ValueMatcher: Send + Sync + Debug {
    /// Check if the given value matches.
    ///
    /// Returns `false` if the value type is incompatible with this matcher.
    /// Matchers never error: a type mismatch is a non-match.
    fn matches(&self, value: &AttrValue) -> bool;
}

// Blanket implementation for boxed matchers
#[diagnostic::do_not_recommend]
impl ValueMatcher for Box<dyn ValueMatcher> {
    fn matches(&self, value: &AttrValue) -> bool {
        (**self).matches(value)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Equality
// ═══════════════════════════════════════════════════════════════════════════════

/// Type-strict equality matcher.
///
/// Matches when the resolved value equals the expected value, including
/// the type: `Int(80)` does not equal `Float(80.0)`, and a list-valued
/// attribute only equals a whole expected list. Element membership is
/// spelled [`ContainsMatcher`]; "one of N choices" is [`OneOfMatcher`].
///
/// # Example
///
/// ```
/// use netsift::{AttrValue, EqMatcher, ValueMatcher};
///
/// let matcher = EqMatcher::new("mel");
/// assert!(matcher.matches(&"mel".into()));
/// assert!(!matcher.matches(&"MEL".into())); // case-sensitive
/// ```
#[derive(Debug, Clone)]
pub struct EqMatcher {
    expected: AttrValue,
}

impl EqMatcher {
    /// Create a new equality matcher with the given expected value.
    pub fn new(expected: impl Into<AttrValue>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Returns the expected value.
    #[must_use]
    pub fn expected(&self) -> &AttrValue {
        &self.expected
    }
}

impl ValueMatcher for EqMatcher {
    fn matches(&self, value: &AttrValue) -> bool {
        !value.is_none() && *value == self.expected
    }
}

/// Present-and-not-equal matcher.
///
/// Matches when the attribute is present AND differs from the expected
/// value. This is a leaf operator, not sugar for `!eq`: an absent
/// attribute evaluates `false` here, while a negated equality would
/// evaluate `true`.
///
/// # Example
///
/// ```
/// use netsift::{AttrValue, NeMatcher, ValueMatcher};
///
/// let matcher = NeMatcher::new("mel");
/// assert!(matcher.matches(&"chc".into()));
/// assert!(!matcher.matches(&"mel".into()));
/// assert!(!matcher.matches(&AttrValue::None)); // absent is not "not equal"
/// ```
#[derive(Debug, Clone)]
pub struct NeMatcher {
    expected: AttrValue,
}

impl NeMatcher {
    /// Create a new inequality matcher.
    pub fn new(expected: impl Into<AttrValue>) -> Self {
        Self {
            expected: expected.into(),
        }
    }

    /// Returns the expected value.
    #[must_use]
    pub fn expected(&self) -> &AttrValue {
        &self.expected
    }
}

impl ValueMatcher for NeMatcher {
    fn matches(&self, value: &AttrValue) -> bool {
        !value.is_none() && *value != self.expected
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Numeric ordering
// ═══════════════════════════════════════════════════════════════════════════════

/// Greater-or-equal matcher over numeric values.
///
/// `Int` and `Float` attributes compare on the f64 number line. Ordering
/// a non-numeric or absent value is a non-match, never an error.
///
/// # Example
///
/// ```
/// use netsift::{AttrValue, GeMatcher, ValueMatcher};
///
/// let matcher = GeMatcher::new(80);
/// assert!(matcher.matches(&AttrValue::Int(90)));
/// assert!(matcher.matches(&AttrValue::Float(80.0)));
/// assert!(!matcher.matches(&AttrValue::Int(79)));
/// assert!(!matcher.matches(&AttrValue::String("90".to_string())));
/// ```
#[derive(Debug, Clone)]
pub struct GeMatcher {
    threshold: f64,
}

impl GeMatcher {
    /// Create a new greater-or-equal matcher.
    pub fn new(threshold: impl Into<f64>) -> Self {
        Self {
            threshold: threshold.into(),
        }
    }

    /// Returns the threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl ValueMatcher for GeMatcher {
    fn matches(&self, value: &AttrValue) -> bool {
        value.as_f64().is_some_and(|n| n >= self.threshold)
    }
}

/// Less-or-equal matcher over numeric values.
///
/// Symmetric with [`GeMatcher`].
#[derive(Debug, Clone)]
pub struct LeMatcher {
    threshold: f64,
}

impl LeMatcher {
    /// Create a new less-or-equal matcher.
    pub fn new(threshold: impl Into<f64>) -> Self {
        Self {
            threshold: threshold.into(),
        }
    }

    /// Returns the threshold.
    #[must_use]
    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}

impl ValueMatcher for LeMatcher {
    fn matches(&self, value: &AttrValue) -> bool {
        value.as_f64().is_some_and(|n| n <= self.threshold)
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Membership and containment
// ═══════════════════════════════════════════════════════════════════════════════

/// Set-membership matcher: the value is one of the given choices.
///
/// The choice list is treated as an unordered set; duplicate choices are
/// harmless and ignored.
///
/// # Example
///
/// ```
/// use netsift::{AttrValue, OneOfMatcher, ValueMatcher};
///
/// let matcher = OneOfMatcher::new(["mel", "chc"]);
/// assert!(matcher.matches(&"mel".into()));
/// assert!(!matcher.matches(&"ptl".into()));
/// ```
#[derive(Debug, Clone)]
pub struct OneOfMatcher {
    choices: Vec<AttrValue>,
}

impl OneOfMatcher {
    /// Create a new membership matcher from a list of choices.
    pub fn new<I, V>(choices: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        Self {
            choices: choices.into_iter().map(Into::into).collect(),
        }
    }

    /// Returns the choices.
    #[must_use]
    pub fn choices(&self) -> &[AttrValue] {
        &self.choices
    }
}

impl ValueMatcher for OneOfMatcher {
    fn matches(&self, value: &AttrValue) -> bool {
        !value.is_none() && self.choices.contains(value)
    }
}

/// Containment matcher.
///
/// - List-valued attribute: matches when any element equals the needle.
/// - String attribute with a string needle: substring containment.
///
/// Anything else is a non-match.
///
/// # Example
///
/// ```
/// use netsift::{AttrValue, ContainsMatcher, ValueMatcher};
///
/// let matcher = ContainsMatcher::new("southern");
/// let groups: AttrValue = ["mel", "southern"].into_iter().collect();
/// assert!(matcher.matches(&groups));
/// assert!(matcher.matches(&"southern-edge".into())); // substring
/// assert!(!matcher.matches(&"northern".into()));
/// ```
#[derive(Debug, Clone)]
pub struct ContainsMatcher {
    needle: AttrValue,
}

impl ContainsMatcher {
    /// Create a new containment matcher.
    pub fn new(needle: impl Into<AttrValue>) -> Self {
        Self {
            needle: needle.into(),
        }
    }

    /// Returns the needle.
    #[must_use]
    pub fn needle(&self) -> &AttrValue {
        &self.needle
    }
}

impl ValueMatcher for ContainsMatcher {
    fn matches(&self, value: &AttrValue) -> bool {
        match value {
            AttrValue::List(items) => items.contains(&self.needle),
            AttrValue::String(s) => self
                .needle
                .as_str()
                .is_some_and(|needle| s.contains(needle)),
            _ => false,
        }
    }
}

// ═══════════════════════════════════════════════════════════════════════════════
// Regex
// ═══════════════════════════════════════════════════════════════════════════════

/// Regex matcher over string values.
///
/// Unanchored: anchor the pattern with `^`/`$` for whole-value matching.
/// Construction fails on an invalid pattern; evaluation never fails.
///
/// # Example
///
/// ```
/// use netsift::{AttrValue, PatternMatcher, ValueMatcher};
///
/// let matcher = PatternMatcher::new(r"^lab-.*-01$").unwrap();
/// assert!(matcher.matches(&"lab-csr-01".into()));
/// assert!(!matcher.matches(&"lab-csr-02".into()));
/// ```
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    regex: Regex,
}

impl PatternMatcher {
    /// Compile a new regex matcher.
    ///
    /// # Errors
    ///
    /// Returns [`InventoryError::InvalidPattern`] if the pattern does not
    /// compile.
    pub fn new(pattern: &str) -> Result<Self, InventoryError> {
        let regex = Regex::new(pattern).map_err(|e| InventoryError::InvalidPattern {
            pattern: pattern.to_string(),
            source: e.to_string(),
        })?;
        Ok(Self { regex })
    }

    /// Returns the pattern source.
    #[must_use]
    pub fn pattern(&self) -> &str {
        self.regex.as_str()
    }
}

impl ValueMatcher for PatternMatcher {
    fn matches(&self, value: &AttrValue) -> bool {
        value.as_str().is_some_and(|s| self.regex.is_match(s))
    }
}
