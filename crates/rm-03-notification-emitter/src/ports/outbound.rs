//! Outbound ports (driven adapters) for the Notification Emitter

use async_trait::async_trait;

use crate::domain::{PushMessage, RequestContext};
use crate::error::SinkError;

/// Destination of push messages.
///
/// A call to `write_batch` is one atomic write: either every message is
/// stored or none is. Callers never invoke it with an empty slice.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    /// Store all messages in a single write, on behalf of `context`.
    async fn write_batch(
        &self,
        messages: &[PushMessage],
        context: &RequestContext,
    ) -> Result<(), SinkError>;
}
