//! # Shared Types Crate
//!
//! This crate contains the entities every monitor subsystem agrees on.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `TabId`, `Quad` and `Delta` are defined here
//!   and nowhere else.
//! - **Transport Agnostic**: Nothing in this crate knows about HTTP or SPARQL;
//!   wire formats live in the gateway and sink adapters.

pub mod entities;

pub use entities::*;
