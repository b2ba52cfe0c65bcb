//! Ports Layer
//!
//! Defines the driving ports through which registration handlers and the
//! delta matcher reach the index.

pub mod inbound;

pub use inbound::{PatternLookup, SubscriptionApi};
