//! Notification Emitter Service
//!
//! Turns a notification batch into push messages and hands them to the
//! sink in one write.

use rm_02_delta_matcher::NotificationBatch;
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::domain::{PushMessage, RequestContext};
use crate::error::EmitError;
use crate::ports::NotificationSink;

/// Result of a successful emission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    /// The batch was empty; the sink was not touched.
    NothingToSend,
    /// One write carrying this many messages succeeded.
    Sent { messages: usize },
}

/// Notification Emitter implementation
pub struct NotificationEmitter {
    sink: Arc<dyn NotificationSink>,
}

impl NotificationEmitter {
    pub fn new(sink: Arc<dyn NotificationSink>) -> Self {
        Self { sink }
    }

    /// Write every record of `batch` to the sink atomically.
    ///
    /// One message per record, so a tab with several matching patterns
    /// receives several messages. An empty batch performs no write.
    pub async fn emit(&self, batch: &NotificationBatch) -> Result<EmitOutcome, EmitError> {
        self.emit_with_context(batch, &RequestContext::default())
            .await
    }

    /// [`emit`](Self::emit), writing on behalf of the request in `context`.
    pub async fn emit_with_context(
        &self,
        batch: &NotificationBatch,
        context: &RequestContext,
    ) -> Result<EmitOutcome, EmitError> {
        if batch.is_empty() {
            debug!("No notifications to emit");
            return Ok(EmitOutcome::NothingToSend);
        }

        let messages = batch
            .records()
            .map(PushMessage::from_record)
            .collect::<Result<Vec<_>, _>>()?;
        let count = messages.len();

        match self.sink.write_batch(&messages, context).await {
            Ok(()) => {
                info!(
                    messages = count,
                    tabs = batch.tab_count(),
                    "Emitted notifications"
                );
                Ok(EmitOutcome::Sent { messages: count })
            }
            Err(source) => {
                warn!(messages = count, error = %source, "Failed to emit notifications");
                Err(EmitError::Sink {
                    messages: count,
                    source,
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::InMemorySink;
    use crate::error::SinkError;
    use rm_01_subscription_index::PatternKey;
    use rm_02_delta_matcher::NotificationRecord;
    use shared_types::{Quad, TabId};

    fn record(tab: &str, pattern: PatternKey) -> NotificationRecord {
        NotificationRecord {
            tab_id: TabId::new(tab),
            matched_pattern: pattern,
            quad: Quad::new("s", "p", "o"),
        }
    }

    fn emitter() -> (Arc<InMemorySink>, NotificationEmitter) {
        let sink = Arc::new(InMemorySink::new());
        let emitter = NotificationEmitter::new(sink.clone());
        (sink, emitter)
    }

    #[tokio::test]
    async fn test_empty_batch_performs_no_write() {
        let (sink, emitter) = emitter();

        let outcome = emitter.emit(&NotificationBatch::new()).await.unwrap();

        assert_eq!(outcome, EmitOutcome::NothingToSend);
        assert_eq!(sink.write_count(), 0);
    }

    #[tokio::test]
    async fn test_empty_batch_ignores_failing_sink() {
        let (sink, emitter) = emitter();
        sink.set_failing(true);

        assert!(emitter.emit(&NotificationBatch::new()).await.is_ok());
    }

    #[tokio::test]
    async fn test_all_records_in_one_write() {
        let (sink, emitter) = emitter();
        let mut batch = NotificationBatch::new();
        batch.push(record("A", PatternKey::any()));
        batch.push(record("A", PatternKey::from_params(Some("s"), None, None)));
        batch.push(record("B", PatternKey::any()));

        let outcome = emitter.emit(&batch).await.unwrap();

        assert_eq!(outcome, EmitOutcome::Sent { messages: 3 });
        assert_eq!(sink.write_count(), 1);
        let targets: Vec<_> = sink
            .messages()
            .iter()
            .map(|m| m.target.as_str().to_string())
            .collect();
        assert_eq!(targets, vec!["A", "A", "B"]);
    }

    #[tokio::test]
    async fn test_sink_failure_is_reported() {
        let (sink, emitter) = emitter();
        sink.set_failing(true);
        let mut batch = NotificationBatch::new();
        batch.push(record("A", PatternKey::any()));

        let err = emitter.emit(&batch).await.unwrap_err();

        assert!(matches!(
            err,
            EmitError::Sink {
                messages: 1,
                source: SinkError::Unavailable(_)
            }
        ));
        assert_eq!(sink.write_count(), 0);
    }

    #[tokio::test]
    async fn test_context_reaches_sink() {
        let (sink, emitter) = emitter();
        let mut batch = NotificationBatch::new();
        batch.push(record("A", PatternKey::any()));
        let context = RequestContext::new(Some("http://sessions/1".into()), Some("7".into()));

        emitter.emit_with_context(&batch, &context).await.unwrap();

        assert_eq!(sink.contexts(), vec![context]);
    }
}
