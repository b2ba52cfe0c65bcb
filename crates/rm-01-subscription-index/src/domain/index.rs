//! The subscription index.
//!
//! Two views over the same set of subscriptions:
//!
//! ```text
//! by_tab:      TabId ──► {PatternKey}
//!
//! by_pattern:  subject ──► predicate ──► object ──► {TabId}
//!              (each level keyed by PatternComponent)
//! ```
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: `(tab, pattern)` is in `by_tab` iff `tab` is in the
//!   `by_pattern` leaf for `pattern`.
//! - **INVARIANT-2**: No empty set or empty map is ever left behind, in
//!   either view.
//!
//! Matching a quad descends at most 2 × 2 × 2 branches (the quad's value
//! and the wildcard at each level), independent of the number of tabs.

use super::pattern::{PatternComponent, PatternKey};
use serde::Serialize;
use shared_types::{Quad, TabId};
use std::collections::{HashMap, HashSet};

type TabSet = HashSet<TabId>;
type ObjectBranch = HashMap<PatternComponent, TabSet>;
type PredicateBranch = HashMap<PatternComponent, ObjectBranch>;

/// A tab interested in a quad, and the registered pattern that made it so.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PatternMatch {
    /// The pattern as registered (wildcards where the tab asked for any).
    pub pattern: PatternKey,
    /// The interested tab.
    pub tab_id: TabId,
}

/// Size of the index.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IndexStats {
    /// Tabs with at least one subscription.
    pub tabs: usize,
    /// Live (tab, pattern) pairs.
    pub subscriptions: usize,
    /// Keys across all three trie levels.
    pub trie_nodes: usize,
}

/// In-memory, non-persistent index of who watches what.
#[derive(Debug, Default)]
pub struct SubscriptionIndex {
    by_tab: HashMap<TabId, HashSet<PatternKey>>,
    by_pattern: HashMap<PatternComponent, PredicateBranch>,
    /// Live (tab, pattern) pairs, kept in step with `by_tab`.
    subscriptions: usize,
}

impl SubscriptionIndex {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a subscription.
    ///
    /// Returns `false` if it already existed, in which case nothing changes.
    pub fn register(&mut self, tab_id: TabId, pattern: PatternKey) -> bool {
        let patterns = self.by_tab.entry(tab_id.clone()).or_default();
        if !patterns.insert(pattern.clone()) {
            return false;
        }

        self.by_pattern
            .entry(pattern.subject().clone())
            .or_default()
            .entry(pattern.predicate().clone())
            .or_default()
            .entry(pattern.object().clone())
            .or_default()
            .insert(tab_id);

        self.subscriptions += 1;
        true
    }

    /// Remove a subscription.
    ///
    /// Returns `false` if it did not exist. Removing an unknown
    /// subscription is not an error.
    pub fn unregister(&mut self, tab_id: &TabId, pattern: &PatternKey) -> bool {
        let Some(patterns) = self.by_tab.get_mut(tab_id) else {
            return false;
        };
        if !patterns.remove(pattern) {
            return false;
        }
        if patterns.is_empty() {
            self.by_tab.remove(tab_id);
        }

        self.remove_leaf(tab_id, pattern);
        self.subscriptions -= 1;
        true
    }

    /// Remove every subscription of a tab. Returns how many were removed.
    pub fn unregister_all(&mut self, tab_id: &TabId) -> usize {
        let Some(patterns) = self.by_tab.remove(tab_id) else {
            return 0;
        };
        for pattern in &patterns {
            self.remove_leaf(tab_id, pattern);
        }
        self.subscriptions -= patterns.len();
        patterns.len()
    }

    /// Every (pattern, tab) pair whose registered pattern matches `quad`.
    ///
    /// A tab holding two patterns that both match appears twice, once per
    /// pattern. Order is unspecified.
    #[must_use]
    pub fn match_quad(&self, quad: &Quad) -> Vec<PatternMatch> {
        let subjects = candidates(&quad.subject);
        let predicates = candidates(&quad.predicate);
        let objects = candidates(&quad.object);

        let mut matches = Vec::new();
        for s in &subjects {
            let Some(by_predicate) = self.by_pattern.get(s) else {
                continue;
            };
            for p in &predicates {
                let Some(by_object) = by_predicate.get(p) else {
                    continue;
                };
                for o in &objects {
                    let Some(tabs) = by_object.get(o) else {
                        continue;
                    };
                    let pattern = PatternKey::new(s.clone(), p.clone(), o.clone());
                    matches.extend(tabs.iter().map(|tab_id| PatternMatch {
                        pattern: pattern.clone(),
                        tab_id: tab_id.clone(),
                    }));
                }
            }
        }
        matches
    }

    /// Whether `tab_id` currently watches `pattern`.
    #[must_use]
    pub fn is_registered(&self, tab_id: &TabId, pattern: &PatternKey) -> bool {
        self.by_tab
            .get(tab_id)
            .is_some_and(|patterns| patterns.contains(pattern))
    }

    /// Patterns watched by a tab, sorted. Empty for unknown tabs.
    #[must_use]
    pub fn patterns_for(&self, tab_id: &TabId) -> Vec<PatternKey> {
        let mut patterns: Vec<PatternKey> = self
            .by_tab
            .get(tab_id)
            .map(|set| set.iter().cloned().collect())
            .unwrap_or_default();
        patterns.sort();
        patterns
    }

    #[must_use]
    pub fn contains_tab(&self, tab_id: &TabId) -> bool {
        self.by_tab.contains_key(tab_id)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tab.is_empty()
    }

    /// Number of live (tab, pattern) pairs. Constant time.
    #[must_use]
    pub fn subscription_count(&self) -> usize {
        self.subscriptions
    }

    /// Size of the index. Walks the trie to count nodes.
    #[must_use]
    pub fn stats(&self) -> IndexStats {
        let trie_nodes = self
            .by_pattern
            .values()
            .map(|by_predicate| {
                1 + by_predicate
                    .values()
                    .map(|by_object| 1 + by_object.len())
                    .sum::<usize>()
            })
            .sum();

        IndexStats {
            tabs: self.by_tab.len(),
            subscriptions: self.subscriptions,
            trie_nodes,
        }
    }

    /// Check INVARIANT-1 and INVARIANT-2.
    ///
    /// Walks both views completely; meant for tests and debug assertions.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        let mut leaves = 0usize;
        for (s, by_predicate) in &self.by_pattern {
            if by_predicate.is_empty() {
                return false;
            }
            for (p, by_object) in by_predicate {
                if by_object.is_empty() {
                    return false;
                }
                for (o, tabs) in by_object {
                    if tabs.is_empty() {
                        return false;
                    }
                    let pattern = PatternKey::new(s.clone(), p.clone(), o.clone());
                    if !tabs.iter().all(|tab| self.is_registered(tab, &pattern)) {
                        return false;
                    }
                    leaves += tabs.len();
                }
            }
        }

        let no_empty_tabs = self.by_tab.values().all(|patterns| !patterns.is_empty());
        let by_tab: usize = self.by_tab.values().map(HashSet::len).sum();
        no_empty_tabs && leaves == by_tab && by_tab == self.subscriptions
    }

    /// Drop `tab_id` from the leaf of `pattern`, pruning emptied levels.
    fn remove_leaf(&mut self, tab_id: &TabId, pattern: &PatternKey) {
        let Some(by_predicate) = self.by_pattern.get_mut(pattern.subject()) else {
            return;
        };

        if let Some(by_object) = by_predicate.get_mut(pattern.predicate()) {
            if let Some(tabs) = by_object.get_mut(pattern.object()) {
                tabs.remove(tab_id);
                if tabs.is_empty() {
                    by_object.remove(pattern.object());
                }
            }
            if by_object.is_empty() {
                by_predicate.remove(pattern.predicate());
            }
        }

        if by_predicate.is_empty() {
            self.by_pattern.remove(pattern.subject());
        }
    }
}

/// The two keys worth probing at one trie level.
fn candidates(term: &str) -> [PatternComponent; 2] {
    [PatternComponent::concrete(term), PatternComponent::Wildcard]
}
