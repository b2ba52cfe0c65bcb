//! Triple patterns a tab can watch.
//!
//! A pattern component is either a concrete term value or a wildcard. The
//! wildcard is its own variant: no term value, including the empty string,
//! is ever mistaken for it.

use serde::{Deserialize, Serialize};
use shared_types::Quad;
use std::fmt;

/// One position (subject, predicate or object) of a watched pattern.
///
/// Serializes as the term value, or `null` for the wildcard.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "Option<String>", into = "Option<String>")]
pub enum PatternComponent {
    /// Matches exactly this term value.
    Concrete(String),
    /// Matches any term value.
    #[default]
    Wildcard,
}

impl PatternComponent {
    /// Component matching exactly `value`.
    pub fn concrete(value: impl Into<String>) -> Self {
        Self::Concrete(value.into())
    }

    /// Component built from an optional request parameter.
    ///
    /// Absent and empty parameters both mean "any value".
    pub fn from_param(value: Option<&str>) -> Self {
        match value {
            Some(v) if !v.is_empty() => Self::Concrete(v.to_string()),
            _ => Self::Wildcard,
        }
    }

    #[must_use]
    pub fn is_wildcard(&self) -> bool {
        matches!(self, Self::Wildcard)
    }

    /// The concrete value, `None` for the wildcard.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        match self {
            Self::Concrete(v) => Some(v),
            Self::Wildcard => None,
        }
    }

    /// Whether a term value satisfies this component.
    #[must_use]
    pub fn matches(&self, term: &str) -> bool {
        match self {
            Self::Concrete(v) => v == term,
            Self::Wildcard => true,
        }
    }
}

impl From<Option<String>> for PatternComponent {
    fn from(value: Option<String>) -> Self {
        match value {
            Some(v) => Self::Concrete(v),
            None => Self::Wildcard,
        }
    }
}

impl From<PatternComponent> for Option<String> {
    fn from(component: PatternComponent) -> Self {
        match component {
            PatternComponent::Concrete(v) => Some(v),
            PatternComponent::Wildcard => None,
        }
    }
}

impl fmt::Display for PatternComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Concrete(v) => write!(f, "<{v}>"),
            Self::Wildcard => f.write_str("*"),
        }
    }
}

/// A watched subject/predicate/object pattern.
///
/// Immutable once built; two keys are equal iff all three components are.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PatternKey {
    #[serde(default)]
    subject: PatternComponent,
    #[serde(default)]
    predicate: PatternComponent,
    #[serde(default)]
    object: PatternComponent,
}

impl PatternKey {
    pub fn new(
        subject: PatternComponent,
        predicate: PatternComponent,
        object: PatternComponent,
    ) -> Self {
        Self {
            subject,
            predicate,
            object,
        }
    }

    /// The all-wildcard pattern, matching every quad.
    #[must_use]
    pub fn any() -> Self {
        Self::default()
    }

    /// Build a pattern from optional request parameters.
    pub fn from_params(
        subject: Option<&str>,
        predicate: Option<&str>,
        object: Option<&str>,
    ) -> Self {
        Self::new(
            PatternComponent::from_param(subject),
            PatternComponent::from_param(predicate),
            PatternComponent::from_param(object),
        )
    }

    #[must_use]
    pub fn subject(&self) -> &PatternComponent {
        &self.subject
    }

    #[must_use]
    pub fn predicate(&self) -> &PatternComponent {
        &self.predicate
    }

    #[must_use]
    pub fn object(&self) -> &PatternComponent {
        &self.object
    }

    /// Number of wildcard positions (0..=3).
    #[must_use]
    pub fn wildcard_count(&self) -> usize {
        [&self.subject, &self.predicate, &self.object]
            .iter()
            .filter(|c| c.is_wildcard())
            .count()
    }

    /// Whether `quad` satisfies this pattern.
    ///
    /// The index never calls this; it resolves matches by descending the
    /// trie. Kept as the reference definition of a match.
    #[must_use]
    pub fn matches(&self, quad: &Quad) -> bool {
        self.subject.matches(&quad.subject)
            && self.predicate.matches(&quad.predicate)
            && self.object.matches(&quad.object)
    }
}

impl fmt::Display for PatternKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {}, {})", self.subject, self.predicate, self.object)
    }
}
