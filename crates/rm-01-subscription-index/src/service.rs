//! Subscription Registry Service
//!
//! Owns the process-wide `SubscriptionIndex` and serializes access to it.
//!
//! ## Concurrency
//!
//! The index is one resource behind one `RwLock`: registration takes the
//! write lock, matching takes the read lock. A batch handed to
//! `match_quads` is resolved under a single read guard, so it observes
//! either all or none of a concurrent registration change.

use parking_lot::RwLock;
use shared_types::{Quad, TabId};
use tracing::debug;

use crate::domain::{IndexStats, PatternKey, PatternMatch, SubscriptionIndex};
use crate::ports::{PatternLookup, SubscriptionApi};

/// Thread-safe handle on the subscription index.
///
/// Created empty at startup and shared by reference (`Arc`) with every
/// request handler. Nothing is persisted; tabs re-register after a restart.
#[derive(Default)]
pub struct SubscriptionRegistry {
    index: RwLock<SubscriptionIndex>,
}

impl SubscriptionRegistry {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `tab_id` currently watches `pattern`.
    #[must_use]
    pub fn is_registered(&self, tab_id: &TabId, pattern: &PatternKey) -> bool {
        self.index.read().is_registered(tab_id, pattern)
    }
}

impl SubscriptionApi for SubscriptionRegistry {
    fn register(&self, tab_id: TabId, pattern: PatternKey) -> bool {
        let mut index = self.index.write();
        let created = index.register(tab_id.clone(), pattern.clone());
        debug!(
            tab_id = %tab_id,
            pattern = %pattern,
            created,
            "Registered subscription"
        );
        created
    }

    fn unregister(&self, tab_id: &TabId, pattern: &PatternKey) -> bool {
        let mut index = self.index.write();
        let removed = index.unregister(tab_id, pattern);
        debug!(
            tab_id = %tab_id,
            pattern = %pattern,
            removed,
            "Unregistered subscription"
        );
        removed
    }

    fn unregister_all(&self, tab_id: &TabId) -> usize {
        let removed = self.index.write().unregister_all(tab_id);
        debug!(tab_id = %tab_id, removed, "Removed all subscriptions for tab");
        removed
    }

    fn patterns_for(&self, tab_id: &TabId) -> Vec<PatternKey> {
        self.index.read().patterns_for(tab_id)
    }

    fn subscription_count(&self) -> usize {
        self.index.read().subscription_count()
    }

    fn stats(&self) -> IndexStats {
        self.index.read().stats()
    }
}

impl PatternLookup for SubscriptionRegistry {
    fn match_quad(&self, quad: &Quad) -> Vec<PatternMatch> {
        self.index.read().match_quad(quad)
    }

    fn match_quads(&self, quads: &[&Quad]) -> Vec<Vec<PatternMatch>> {
        let index = self.index.read();
        quads.iter().map(|quad| index.match_quad(quad)).collect()
    }
}
