//! Delta notification wire format.
//!
//! The delta notifier posts a JSON array of change sets:
//!
//! ```json
//! [{
//!   "inserts": [{
//!     "subject":   { "type": "uri", "value": "http://ex/alice" },
//!     "predicate": { "type": "uri", "value": "http://xmlns.com/foaf/0.1/knows" },
//!     "object":    { "type": "uri", "value": "http://ex/bob" },
//!     "graph":     { "type": "uri", "value": "http://mu.semte.ch/graphs/public" }
//!   }],
//!   "deletes": []
//! }]
//! ```
//!
//! Only the term values take part in matching.

use serde::Deserialize;
use shared_types::{Delta, Quad};

/// An RDF term as serialized by the delta notifier.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireTerm {
    /// `uri`, `literal`, `typed-literal`, ...
    #[serde(rename = "type", default)]
    pub kind: Option<String>,
    pub value: String,
    #[serde(default)]
    pub datatype: Option<String>,
    #[serde(rename = "xml:lang", default)]
    pub lang: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct WireQuad {
    pub subject: WireTerm,
    pub predicate: WireTerm,
    pub object: WireTerm,
    #[serde(default)]
    pub graph: Option<WireTerm>,
}

/// One change set; both sides must be present, possibly empty.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct WireDelta {
    pub inserts: Vec<WireQuad>,
    pub deletes: Vec<WireQuad>,
}

impl From<WireQuad> for Quad {
    fn from(quad: WireQuad) -> Self {
        Quad::new(quad.subject.value, quad.predicate.value, quad.object.value)
    }
}

impl From<WireDelta> for Delta {
    fn from(delta: WireDelta) -> Self {
        Delta::new(
            delta.inserts.into_iter().map(Quad::from).collect(),
            delta.deletes.into_iter().map(Quad::from).collect(),
        )
    }
}

/// Decode a delta request body.
pub fn parse_delta_body(body: &[u8]) -> Result<Vec<Delta>, serde_json::Error> {
    let deltas: Vec<WireDelta> = serde_json::from_slice(body)?;
    Ok(deltas.into_iter().map(Delta::from).collect())
}
