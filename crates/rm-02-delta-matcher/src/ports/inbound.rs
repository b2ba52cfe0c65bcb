//! Inbound Ports (Driving Ports)

use shared_types::Delta;

use crate::domain::NotificationBatch;

/// Delta matching API (Driving Port)
pub trait DeltaMatcherApi: Send + Sync {
    /// Match every quad of `batch` against the subscription index.
    ///
    /// Inserted and deleted quads are treated alike. An empty result means
    /// nothing needs to be emitted.
    fn process_delta(&self, batch: &[Delta]) -> NotificationBatch;
}
