//! Evaluation traces for debugging filter behavior.
//!
//! [`FilterTrace`] mirrors the [`Filter`](crate::Filter) tree but captures
//! evaluation results instead of inputs. Use
//! [`Filter::evaluate_with_trace`](crate::Filter::evaluate_with_trace) to
//! see exactly which sub-expression admitted or rejected a record.
//!
//! In And/Or, ALL children are evaluated (no short-circuit) for maximum
//! debugging value. The `matched` result is still correct.

use std::fmt;

/// Trace of one filter evaluation.
pub enum FilterTrace {
    /// A leaf attribute predicate evaluation.
    Attr {
        /// Whether this predicate matched.
        matched: bool,
        /// The attribute name that was resolved.
        attr: String,
        /// The resolved value (Debug format; `None` when absent).
        value: String,
        /// Debug description of the matcher (e.g. `EqMatcher { .. }`).
        matcher: String,
    },
    /// AND: all children must match.
    And {
        /// Whether all children matched.
        matched: bool,
        /// Trace of each child (all evaluated, no short-circuit).
        children: Vec<FilterTrace>,
    },
    /// OR: any child must match.
    Or {
        /// Whether any child matched.
        matched: bool,
        /// Trace of each child (all evaluated, no short-circuit).
        children: Vec<FilterTrace>,
    },
    /// NOT: inverts the inner result.
    Not {
        /// Whether the NOT filter matched (i.e. inner did NOT match).
        matched: bool,
        /// Trace of the inner filter.
        inner: Box<FilterTrace>,
    },
    /// An opaque predicate function.
    Custom {
        /// Whether the function returned `true`.
        matched: bool,
        /// The predicate's diagnostic name.
        name: String,
    },
}

impl FilterTrace {
    /// Get the overall match result of this trace node.
    #[must_use]
    pub fn matched(&self) -> bool {
        match self {
            Self::Attr { matched, .. }
            | Self::And { matched, .. }
            | Self::Or { matched, .. }
            | Self::Not { matched, .. }
            | Self::Custom { matched, .. } => *matched,
        }
    }
}

impl fmt::Debug for FilterTrace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Attr {
                matched,
                attr,
                value,
                matcher,
            } => f
                .debug_struct("Attr")
                .field("matched", matched)
                .field("attr", attr)
                .field("value", value)
                .field("matcher", matcher)
                .finish(),
            Self::And { matched, children } => f
                .debug_struct("And")
                .field("matched", matched)
                .field("children", children)
                .finish(),
            Self::Or { matched, children } => f
                .debug_struct("Or")
                .field("matched", matched)
                .field("children", children)
                .finish(),
            Self::Not { matched, inner } => f
                .debug_struct("Not")
                .field("matched", matched)
                .field("inner", inner)
                .finish(),
            Self::Custom { matched, name } => f
                .debug_struct("Custom")
                .field("matched", matched)
                .field("name", name)
                .finish(),
        }
    }
}
