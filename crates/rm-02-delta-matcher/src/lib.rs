//! # RM-02 Delta Matcher
//!
//! Turns a batch of triple-store changes into per-tab notification records.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `NotificationRecord`, `NotificationBatch`
//! - **Ports Layer** (`ports/`): `DeltaMatcherApi` (driving port)
//! - **Service Layer** (`service`): `DeltaMatcher`, generic over rm-01's
//!   `PatternLookup`
//!
//! ## Behaviour
//!
//! - Inserted and deleted quads of every entry are flattened, in batch
//!   order, into one stream. The operation is not carried further.
//! - Each quad yields one record per (tab, matching registered pattern).
//!   A tab watching two patterns that both match gets two records.
//! - A batch with no quads, or with no hits, yields an empty
//!   `NotificationBatch` and nothing downstream should be emitted.

pub mod domain;
pub mod ports;
pub mod service;

pub use domain::{NotificationBatch, NotificationRecord};
pub use ports::DeltaMatcherApi;
pub use service::DeltaMatcher;
