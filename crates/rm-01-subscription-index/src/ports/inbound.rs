//! Inbound Ports (Driving Ports)
//!
//! These traits define the API that external components use to interact
//! with the subscription index.

use shared_types::{Quad, TabId};

use crate::domain::{IndexStats, PatternKey, PatternMatch};

/// Registration side of the index (Driving Port)
///
/// None of these operations can fail: they are in-memory updates over
/// well-formed inputs. Validation of tab ids happens at the boundary.
pub trait SubscriptionApi: Send + Sync {
    /// Start watching `pattern` for `tab_id`.
    ///
    /// Returns `false` if the subscription already existed.
    fn register(&self, tab_id: TabId, pattern: PatternKey) -> bool;

    /// Stop watching `pattern` for `tab_id`.
    ///
    /// Returns `false` if there was nothing to remove.
    fn unregister(&self, tab_id: &TabId, pattern: &PatternKey) -> bool;

    /// Drop every subscription of `tab_id`, returning how many there were.
    fn unregister_all(&self, tab_id: &TabId) -> usize;

    /// Patterns currently watched by `tab_id`.
    fn patterns_for(&self, tab_id: &TabId) -> Vec<PatternKey>;

    /// Number of live subscriptions. Constant time.
    fn subscription_count(&self) -> usize;

    /// Current size of the index. Walks the whole trie.
    fn stats(&self) -> IndexStats;
}

/// Matching side of the index (Driving Port)
pub trait PatternLookup: Send + Sync {
    /// Tabs interested in `quad`, one entry per matching registered pattern.
    fn match_quad(&self, quad: &Quad) -> Vec<PatternMatch>;

    /// Match a whole batch, one result per input quad, in input order.
    ///
    /// Implementations backed by shared state should resolve the batch
    /// against a single view of the index.
    fn match_quads(&self, quads: &[&Quad]) -> Vec<Vec<PatternMatch>> {
        quads.iter().map(|quad| self.match_quad(quad)).collect()
    }
}
