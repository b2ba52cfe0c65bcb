//! SPARQL Update sink
//!
//! Posts the push updates to the triple store's SPARQL endpoint as a form
//! encoded `update`.

use async_trait::async_trait;
use reqwest::{header, Client};
use std::time::Duration;
use tracing::{debug, warn};

use crate::domain::{insert_push_updates, PushMessage, RequestContext, PUSH_CHANNEL};
use crate::error::SinkError;
use crate::ports::NotificationSink;

/// Default SPARQL endpoint inside a mu stack.
pub const DEFAULT_SPARQL_ENDPOINT: &str = "http://database:8890/sparql";

/// Configuration for [`SparqlUpdateSink`].
#[derive(Debug, Clone)]
pub struct SparqlSinkConfig {
    /// SPARQL endpoint URL.
    pub endpoint: String,
    /// `push:channel` written on every update.
    pub channel: String,
    /// Total request timeout.
    pub timeout: Duration,
    /// Connection timeout.
    pub connect_timeout: Duration,
}

impl Default for SparqlSinkConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_SPARQL_ENDPOINT.to_string(),
            channel: PUSH_CHANNEL.to_string(),
            timeout: Duration::from_secs(30),
            connect_timeout: Duration::from_secs(5),
        }
    }
}

/// Writes push updates with SPARQL `INSERT DATA`.
pub struct SparqlUpdateSink {
    client: Client,
    config: SparqlSinkConfig,
}

impl SparqlUpdateSink {
    /// Create a sink with its own HTTP client.
    pub fn new(config: SparqlSinkConfig) -> Result<Self, SinkError> {
        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.connect_timeout)
            .build()
            .map_err(SinkError::Http)?;

        Ok(Self { client, config })
    }

    #[must_use]
    pub fn config(&self) -> &SparqlSinkConfig {
        &self.config
    }
}

#[async_trait]
impl NotificationSink for SparqlUpdateSink {
    async fn write_batch(
        &self,
        messages: &[PushMessage],
        context: &RequestContext,
    ) -> Result<(), SinkError> {
        let query = insert_push_updates(&self.config.channel, messages);

        let mut request = self
            .client
            .post(&self.config.endpoint)
            .header(header::ACCEPT, "application/sparql-results+json");
        for (name, value) in context.headers() {
            request = request.header(name, value);
        }

        let response = request
            .form(&[("update", query.as_str())])
            .send()
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    SinkError::Timeout(self.config.timeout)
                } else {
                    SinkError::Http(e)
                }
            })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(
                endpoint = %self.config.endpoint,
                status = status.as_u16(),
                "SPARQL endpoint rejected push updates"
            );
            return Err(SinkError::Rejected {
                status: status.as_u16(),
                body,
            });
        }

        debug!(
            endpoint = %self.config.endpoint,
            messages = messages.len(),
            "Stored push updates"
        );
        Ok(())
    }
}
