//! Ports layer for the Notification Emitter

pub mod outbound;

pub use outbound::NotificationSink;
