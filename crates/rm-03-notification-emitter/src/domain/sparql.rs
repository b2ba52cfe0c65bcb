//! SPARQL encoding of push updates.
//!
//! All messages of one emission go into a single `INSERT DATA` so the
//! triple store applies them atomically.

use super::message::PushMessage;

/// Default `push:channel` of updates written by this service.
pub const PUSH_CHANNEL: &str = "http://services.semantic.works/resource-monitor";

const PREFIXES: &str = "PREFIX push: <http://mu.semte.ch/vocabularies/push/>\n\
                        PREFIX mu: <http://mu.semte.ch/vocabularies/core/>\n";

/// Encode `value` as an IRI reference.
///
/// Characters that would terminate or break the reference are
/// backslash-escaped.
#[must_use]
pub fn escape_uri(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 2);
    out.push('<');
    for c in value.chars() {
        if matches!(c, '\\' | '"' | '<' | '>') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push('>');
    out
}

/// Encode `value` as a long (triple-quoted) string literal.
#[must_use]
pub fn escape_string(value: &str) -> String {
    let mut out = String::with_capacity(value.len() + 6);
    out.push_str("\"\"\"");
    for c in value.chars() {
        if matches!(c, '\\' | '"') {
            out.push('\\');
        }
        out.push(c);
    }
    out.push_str("\"\"\"");
    out
}

/// Build one `INSERT DATA` update holding a `push:Update` per message.
///
/// Each update resource is `<channel>/<id>`.
#[must_use]
pub fn insert_push_updates(channel: &str, messages: &[PushMessage]) -> String {
    let channel_uri = escape_uri(channel);
    let mut query = String::from(PREFIXES);
    query.push_str("INSERT DATA {\n");

    for message in messages {
        let id = message.id.to_string();
        query.push_str(&format!(
            "  {} a push:Update ;\n    mu:uuid {} ;\n    push:channel {} ;\n    push:target {} ;\n    push:message {} .\n",
            escape_uri(&format!("{channel}/{id}")),
            escape_string(&id),
            channel_uri,
            escape_uri(message.target.as_str()),
            escape_string(&message.payload),
        ));
    }

    query.push('}');
    query
}
