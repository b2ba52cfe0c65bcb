//! Domain Layer - Pure business logic
//!
//! - `NotificationRecord`: one (tab, matched pattern, quad) hit
//! - `NotificationBatch`: records of one delta batch, grouped by tab
//!
//! RULES:
//! - No I/O operations
//! - No async code

pub mod record;

pub use record::{NotificationBatch, NotificationRecord};
