//! # RM-01 Subscription Index
//!
//! Keeps track of which tabs watch which subject/predicate/object patterns,
//! and answers "who cares about this quad, and through which pattern?".
//!
//! ## Architecture
//!
//! This crate follows Hexagonal Architecture (Ports & Adapters):
//!
//! - **Domain Layer** (`domain/`): Pure business logic, no I/O
//!   - `PatternComponent`: a concrete term value or the wildcard
//!   - `PatternKey`: subject/predicate/object pattern
//!   - `SubscriptionIndex`: tab → patterns and pattern trie → tabs
//!
//! - **Ports Layer** (`ports/`): Trait definitions
//!   - `SubscriptionApi`: register / unregister (driving port)
//!   - `PatternLookup`: quad matching (driving port, used by rm-02)
//!
//! - **Service Layer** (`service`): Synchronization
//!   - `SubscriptionRegistry`: the index behind a single `RwLock`
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: A subscription is in the tab view iff it is in the
//!   pattern trie.
//! - **INVARIANT-2**: Empty trie branches are pruned on every removal.
//! - **INVARIANT-3**: The wildcard is a dedicated variant; no term value
//!   matches as a wildcard.
//!
//! ## Usage Example
//!
//! ```
//! use rm_01_subscription_index::{PatternKey, PatternLookup, SubscriptionApi, SubscriptionRegistry};
//! use shared_types::{Quad, TabId};
//!
//! let registry = SubscriptionRegistry::new();
//! registry.register(
//!     TabId::new("http://mu.semte.ch/tabs/1"),
//!     PatternKey::from_params(None, Some("http://xmlns.com/foaf/0.1/knows"), None),
//! );
//!
//! let matches = registry.match_quad(&Quad::new(
//!     "http://ex/alice",
//!     "http://xmlns.com/foaf/0.1/knows",
//!     "http://ex/bob",
//! ));
//! assert_eq!(matches.len(), 1);
//! ```

pub mod domain;
pub mod ports;
pub mod service;

// Re-exports for convenience
pub use domain::{IndexStats, PatternComponent, PatternKey, PatternMatch, SubscriptionIndex};
pub use ports::{PatternLookup, SubscriptionApi};
pub use service::SubscriptionRegistry;
