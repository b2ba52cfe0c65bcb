//! Domain layer for the Notification Emitter
//!
//! Push messages, their SPARQL encoding and the request context they are
//! written under. No I/O.

pub mod context;
pub mod message;
pub mod sparql;

pub use context::{RequestContext, MU_CALL_ID_HEADER, MU_SESSION_ID_HEADER};
pub use message::PushMessage;
pub use sparql::{escape_string, escape_uri, insert_push_updates, PUSH_CHANNEL};
