//! `AttrValue`: the type-erased attribute value that flows between
//! attribute resolution and `ValueMatcher`s.
//!
//! Inventory records carry heterogeneous attribute maps (vendor strings,
//! SLA numbers, production flags, group lists). Resolution produces an
//! `AttrValue`, and matchers consume it. This keeps `ValueMatcher`
//! non-generic and shareable between host and group filtering.

/// A single attribute value on a host or group.
///
/// # Variants
///
/// - `None` — attribute absent (resolution found nothing)
/// - `String` — the common case: vendor, platform, site codes
/// - `Int` / `Float` — numeric attributes such as SLA targets
/// - `Bool` — flags such as `production`
/// - `List` — list-valued attributes such as group memberships
///
/// # Absent values
///
/// When resolution produces `AttrValue::None`, every leaf predicate
/// evaluates to `false`. A malformed or sparse record never aborts a
/// filter run over the rest of the inventory.
///
/// # Example
///
/// ```
/// use netsift::AttrValue;
///
/// let value = AttrValue::String("cisco".to_string());
/// assert_eq!(value.as_str(), Some("cisco"));
/// assert!(!value.is_none());
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    /// Attribute absent (resolution found nothing).
    None,

    /// String data, e.g. `vendor: cisco`.
    String(String),

    /// Integer data, e.g. `sla: 90`.
    Int(i64),

    /// Floating-point data.
    Float(f64),

    /// Boolean data, e.g. `production: true`.
    Bool(bool),

    /// List data, e.g. resolved group memberships.
    List(Vec<AttrValue>),
}

impl AttrValue {
    /// Returns `true` if this is the `None` variant.
    #[inline]
    #[must_use]
    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }

    /// Returns `true` if this is the `String` variant.
    #[inline]
    #[must_use]
    pub fn is_string(&self) -> bool {
        matches!(self, Self::String(_))
    }

    /// Returns `true` if this is a numeric (`Int` or `Float`) variant.
    #[inline]
    #[must_use]
    pub fn is_numeric(&self) -> bool {
        matches!(self, Self::Int(_) | Self::Float(_))
    }

    /// Returns `true` if this is the `Bool` variant.
    #[inline]
    #[must_use]
    pub fn is_bool(&self) -> bool {
        matches!(self, Self::Bool(_))
    }

    /// Returns `true` if this is the `List` variant.
    #[inline]
    #[must_use]
    pub fn is_list(&self) -> bool {
        matches!(self, Self::List(_))
    }

    /// Try to get the value as a string slice.
    ///
    /// # Example
    ///
    /// ```
    /// use netsift::AttrValue;
    ///
    /// assert_eq!(AttrValue::String("mel".into()).as_str(), Some("mel"));
    /// assert_eq!(AttrValue::Int(42).as_str(), None);
    /// ```
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s.as_str()),
            _ => Option::None,
        }
    }

    /// Try to get the value as an integer.
    #[inline]
    #[must_use]
    pub fn as_int(&self) -> Option<i64> {
        match self {
            Self::Int(i) => Some(*i),
            _ => Option::None,
        }
    }

    /// Try to get the value as a float, widening `Int`.
    ///
    /// This is the accessor ordering comparisons go through: both `Int`
    /// and `Float` attributes compare on the f64 number line.
    #[inline]
    #[must_use]
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Self::Int(i) => Some(*i as f64),
            Self::Float(f) => Some(*f),
            _ => Option::None,
        }
    }

    /// Try to get the value as a boolean.
    #[inline]
    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Bool(b) => Some(*b),
            _ => Option::None,
        }
    }

    /// Try to get the value as a list slice.
    #[inline]
    #[must_use]
    pub fn as_list(&self) -> Option<&[AttrValue]> {
        match self {
            Self::List(items) => Some(items.as_slice()),
            _ => Option::None,
        }
    }

    /// Returns a string describing the type of this value.
    ///
    /// Used in traces and error messages.
    #[must_use]
    pub fn type_name(&self) -> &'static str {
        match self {
            Self::None => "none",
            Self::String(_) => "string",
            Self::Int(_) => "int",
            Self::Float(_) => "float",
            Self::Bool(_) => "bool",
            Self::List(_) => "list",
        }
    }
}

impl Default for AttrValue {
    fn default() -> Self {
        Self::None
    }
}

impl From<String> for AttrValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<&str> for AttrValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<i64> for AttrValue {
    fn from(i: i64) -> Self {
        Self::Int(i)
    }
}

impl From<i32> for AttrValue {
    fn from(i: i32) -> Self {
        Self::Int(i64::from(i))
    }
}

impl From<f64> for AttrValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<bool> for AttrValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<Vec<AttrValue>> for AttrValue {
    fn from(items: Vec<AttrValue>) -> Self {
        Self::List(items)
    }
}

impl<T> From<Option<T>> for AttrValue
where
    T: Into<AttrValue>,
{
    fn from(opt: Option<T>) -> Self {
        match opt {
            Some(v) => v.into(),
            Option::None => Self::None,
        }
    }
}

impl<T> FromIterator<T> for AttrValue
where
    T: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        Self::List(iter.into_iter().map(Into::into).collect())
    }
}
