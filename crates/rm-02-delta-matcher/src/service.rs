//! Delta Matcher Service
//!
//! Flattens a delta batch into quads, resolves them against the
//! subscription index in one pass and groups the hits per tab.

use rm_01_subscription_index::PatternLookup;
use shared_types::{Delta, Quad};
use std::sync::Arc;
use tracing::debug;

use crate::domain::{NotificationBatch, NotificationRecord};
use crate::ports::DeltaMatcherApi;

/// Delta Matcher implementation
///
/// Read-only with respect to the index; keeps no state between batches.
pub struct DeltaMatcher<L: PatternLookup> {
    /// Subscription index (driving port of rm-01)
    lookup: Arc<L>,
}

impl<L: PatternLookup> DeltaMatcher<L> {
    /// Create a matcher over the given index
    pub fn new(lookup: Arc<L>) -> Self {
        Self { lookup }
    }
}

impl<L: PatternLookup> DeltaMatcherApi for DeltaMatcher<L> {
    fn process_delta(&self, batch: &[Delta]) -> NotificationBatch {
        let quads: Vec<&Quad> = batch.iter().flat_map(Delta::quads).collect();
        let mut notifications = NotificationBatch::new();

        if quads.is_empty() {
            debug!(entries = batch.len(), "Delta batch carries no quads");
            return notifications;
        }

        let matches = self.lookup.match_quads(&quads);
        for (quad, hits) in quads.iter().zip(matches) {
            for hit in hits {
                notifications.push(NotificationRecord {
                    tab_id: hit.tab_id,
                    matched_pattern: hit.pattern,
                    quad: (*quad).clone(),
                });
            }
        }

        debug!(
            entries = batch.len(),
            quads = quads.len(),
            records = notifications.record_count(),
            tabs = notifications.tab_count(),
            "Processed delta batch"
        );
        notifications
    }
}
