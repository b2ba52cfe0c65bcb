//! Ports Layer
//!
//! Driving port used by the delta transport.

pub mod inbound;

pub use inbound::DeltaMatcherApi;
