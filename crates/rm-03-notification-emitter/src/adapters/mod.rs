//! Sink adapters

pub mod memory;
pub mod sparql;

pub use memory::InMemorySink;
pub use sparql::{SparqlSinkConfig, SparqlUpdateSink, DEFAULT_SPARQL_ENDPOINT};
