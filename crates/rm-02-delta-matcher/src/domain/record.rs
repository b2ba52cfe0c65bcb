//! Notification records produced by matching.

use rm_01_subscription_index::PatternKey;
use serde::Serialize;
use shared_types::{Quad, TabId};
use std::collections::btree_map;
use std::collections::BTreeMap;

/// One tab to notify about one quad, through one of its patterns.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationRecord {
    /// Tab to notify.
    pub tab_id: TabId,
    /// The registered pattern that matched.
    pub matched_pattern: PatternKey,
    /// The changed quad.
    pub quad: Quad,
}

/// Records of one delta batch, grouped by tab.
///
/// Within a tab, records keep the order in which their quads appeared in
/// the batch. Tabs iterate in identifier order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NotificationBatch {
    by_tab: BTreeMap<TabId, Vec<NotificationRecord>>,
}

impl NotificationBatch {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a record to its tab's sequence.
    pub fn push(&mut self, record: NotificationRecord) {
        self.by_tab
            .entry(record.tab_id.clone())
            .or_default()
            .push(record);
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.by_tab.is_empty()
    }

    /// Number of distinct tabs with at least one record.
    #[must_use]
    pub fn tab_count(&self) -> usize {
        self.by_tab.len()
    }

    /// Total number of records across all tabs.
    #[must_use]
    pub fn record_count(&self) -> usize {
        self.by_tab.values().map(Vec::len).sum()
    }

    /// Records for one tab.
    #[must_use]
    pub fn get(&self, tab_id: &TabId) -> Option<&[NotificationRecord]> {
        self.by_tab.get(tab_id).map(Vec::as_slice)
    }

    /// Iterate tabs and their records.
    pub fn iter(&self) -> btree_map::Iter<'_, TabId, Vec<NotificationRecord>> {
        self.by_tab.iter()
    }

    /// Iterate every record, tab by tab.
    pub fn records(&self) -> impl Iterator<Item = &NotificationRecord> {
        self.by_tab.values().flatten()
    }
}

impl<'a> IntoIterator for &'a NotificationBatch {
    type Item = (&'a TabId, &'a Vec<NotificationRecord>);
    type IntoIter = btree_map::Iter<'a, TabId, Vec<NotificationRecord>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
