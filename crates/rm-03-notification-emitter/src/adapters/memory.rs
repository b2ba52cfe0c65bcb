//! In-memory sink for tests and local runs.

use async_trait::async_trait;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::domain::{PushMessage, RequestContext};
use crate::error::SinkError;
use crate::ports::NotificationSink;

/// Records every write; can be told to fail.
#[derive(Debug, Default)]
pub struct InMemorySink {
    writes: Mutex<Vec<(RequestContext, Vec<PushMessage>)>>,
    failing: AtomicBool,
}

impl InMemorySink {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Make subsequent writes fail (or succeed again).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// All successful writes, oldest first.
    #[must_use]
    pub fn writes(&self) -> Vec<Vec<PushMessage>> {
        self.writes
            .lock()
            .iter()
            .map(|(_, messages)| messages.clone())
            .collect()
    }

    /// Request context of each successful write, oldest first.
    #[must_use]
    pub fn contexts(&self) -> Vec<RequestContext> {
        self.writes
            .lock()
            .iter()
            .map(|(context, _)| context.clone())
            .collect()
    }

    /// Number of successful writes.
    #[must_use]
    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }

    /// Every message across all writes.
    #[must_use]
    pub fn messages(&self) -> Vec<PushMessage> {
        self.writes
            .lock()
            .iter()
            .flat_map(|(_, messages)| messages.iter().cloned())
            .collect()
    }
}

#[async_trait]
impl NotificationSink for InMemorySink {
    async fn write_batch(
        &self,
        messages: &[PushMessage],
        context: &RequestContext,
    ) -> Result<(), SinkError> {
        if self.failing.load(Ordering::SeqCst) {
            return Err(SinkError::Unavailable("in-memory sink set to fail".into()));
        }
        self.writes.lock().push((context.clone(), messages.to_vec()));
        Ok(())
    }
}
