//! Domain Layer - Pure business logic
//!
//! This layer contains:
//! - Pattern value types (`PatternComponent`, `PatternKey`)
//! - The wildcard-aware subscription trie (`SubscriptionIndex`)
//!
//! RULES:
//! - No I/O operations
//! - No async code
//! - No locking; the service layer owns synchronization

pub mod index;
pub mod pattern;

pub use index::{IndexStats, PatternMatch, SubscriptionIndex};
pub use pattern::{PatternComponent, PatternKey};
