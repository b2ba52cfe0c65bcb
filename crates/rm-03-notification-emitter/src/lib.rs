//! # RM-03 Notification Emitter
//!
//! Delivers matched notifications to the tabs that asked for them by
//! writing `push:Update` resources into the triple store.
//!
//! ## Architecture
//!
//! - **Domain Layer** (`domain/`): `PushMessage`, SPARQL encoding
//! - **Ports Layer** (`ports/`): `NotificationSink` (driven port)
//! - **Adapters Layer** (`adapters/`):
//!   - `SparqlUpdateSink`: form POST of one `INSERT DATA` to the endpoint
//!   - `InMemorySink`: records writes, for tests and local runs
//! - **Service Layer** (`service`): `NotificationEmitter`
//!
//! ## Invariants
//!
//! - **INVARIANT-1**: One emission is one sink write. Either all messages
//!   of a batch are stored or none are.
//! - **INVARIANT-2**: An empty batch never reaches the sink.

pub mod adapters;
pub mod domain;
pub mod error;
pub mod ports;
pub mod service;

pub use adapters::{InMemorySink, SparqlSinkConfig, SparqlUpdateSink, DEFAULT_SPARQL_ENDPOINT};
pub use domain::{
    PushMessage, RequestContext, MU_CALL_ID_HEADER, MU_SESSION_ID_HEADER, PUSH_CHANNEL,
};
pub use error::{EmitError, SinkError};
pub use ports::NotificationSink;
pub use service::{EmitOutcome, NotificationEmitter};
