//! # Core Domain Entities
//!
//! Defines the entities that flow between the monitor subsystems.
//!
//! ## Clusters
//!
//! - **Watchers**: `TabId`
//! - **Changes**: `Quad`, `Delta`

use serde::{Deserialize, Serialize};
use std::fmt;

// =============================================================================
// CLUSTER A: WATCHERS
// =============================================================================

/// Identifier of a watching tab.
///
/// Opaque to the monitor. In practice it is the URI the frontend received
/// from the identifier service, and it is written back as `push:target`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TabId(String);

impl TabId {
    /// Wrap a raw identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the raw identifier.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TabId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<String> for TabId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for TabId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

// =============================================================================
// CLUSTER B: CHANGES
// =============================================================================

/// A changed triple as reported by the delta source.
///
/// The graph is not part of matching and is therefore not carried.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Quad {
    /// Subject term value.
    pub subject: String,
    /// Predicate term value.
    pub predicate: String,
    /// Object term value.
    pub object: String,
}

impl Quad {
    /// Create a quad from its three term values.
    pub fn new(
        subject: impl Into<String>,
        predicate: impl Into<String>,
        object: impl Into<String>,
    ) -> Self {
        Self {
            subject: subject.into(),
            predicate: predicate.into(),
            object: object.into(),
        }
    }
}

/// One entry of a delta batch.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Delta {
    /// Quads that appeared.
    pub inserts: Vec<Quad>,
    /// Quads that disappeared.
    pub deletes: Vec<Quad>,
}

impl Delta {
    /// Create a delta from inserted and deleted quads.
    pub fn new(inserts: Vec<Quad>, deletes: Vec<Quad>) -> Self {
        Self { inserts, deletes }
    }

    /// Number of quads carried by this entry.
    #[must_use]
    pub fn len(&self) -> usize {
        self.inserts.len() + self.deletes.len()
    }

    /// Whether this entry carries no quad at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.inserts.is_empty() && self.deletes.is_empty()
    }

    /// All quads of this entry, inserts first.
    ///
    /// The operation is not reported: watchers are told that a triple
    /// changed, not how.
    pub fn quads(&self) -> impl Iterator<Item = &Quad> {
        self.inserts.iter().chain(self.deletes.iter())
    }
}
