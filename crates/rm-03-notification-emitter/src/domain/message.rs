//! Push messages delivered to a watching tab.

use rm_01_subscription_index::PatternKey;
use rm_02_delta_matcher::NotificationRecord;
use shared_types::TabId;
use uuid::Uuid;

/// One `push:Update` addressed to one tab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PushMessage {
    /// Correlation identifier, fresh for every message.
    pub id: Uuid,
    /// Tab the update is pushed to.
    pub target: TabId,
    /// JSON body: the pattern that matched, wildcards as `null`.
    pub payload: String,
}

impl PushMessage {
    /// Build the message for a single notification record.
    ///
    /// The frontend only learns which of its patterns fired; it refetches
    /// what it needs.
    pub fn from_record(record: &NotificationRecord) -> Result<Self, serde_json::Error> {
        Self::for_pattern(record.tab_id.clone(), &record.matched_pattern)
    }

    /// Build a message announcing that `pattern` fired for `target`.
    pub fn for_pattern(target: TabId, pattern: &PatternKey) -> Result<Self, serde_json::Error> {
        Ok(Self {
            id: Uuid::new_v4(),
            target,
            payload: serde_json::to_string(pattern)?,
        })
    }
}
