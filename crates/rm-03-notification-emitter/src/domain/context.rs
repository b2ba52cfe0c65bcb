//! mu request context carried from the delta request to the store write.

/// Header identifying the user session of a mu request.
pub const MU_SESSION_ID_HEADER: &str = "mu-session-id";
/// Header identifying one call chain through the mu stack.
pub const MU_CALL_ID_HEADER: &str = "mu-call-id";

/// Identifiers of the request that caused an emission.
///
/// Forwarded on the SPARQL write so the authorization layer and the delta
/// notifier can attribute the push updates to their origin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestContext {
    pub session_id: Option<String>,
    pub call_id: Option<String>,
}

impl RequestContext {
    #[must_use]
    pub fn new(session_id: Option<String>, call_id: Option<String>) -> Self {
        Self {
            session_id,
            call_id,
        }
    }

    /// Build from a header lookup. Empty values count as absent.
    pub fn from_headers<'a>(lookup: impl Fn(&str) -> Option<&'a str>) -> Self {
        let value = |name: &str| {
            lookup(name)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        };
        Self::new(value(MU_SESSION_ID_HEADER), value(MU_CALL_ID_HEADER))
    }

    /// Headers to send, skipping absent values.
    pub fn headers(&self) -> impl Iterator<Item = (&'static str, &str)> {
        [
            (MU_SESSION_ID_HEADER, self.session_id.as_deref()),
            (MU_CALL_ID_HEADER, self.call_id.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, value)| value.map(|value| (name, value)))
    }
}
