//! # End-to-End HTTP Tests
//!
//! The gateway runs on a real socket and writes into a fake SPARQL store,
//! also on a real socket. Requests are made with `reqwest`, as the
//! identifier service and the delta notifier would.

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::extract::{Form, State};
    use axum::http::StatusCode;
    use axum::routing::post;
    use axum::Router;
    use parking_lot::Mutex;
    use reqwest::Client;
    use tokio::net::TcpListener;
    use tokio::sync::oneshot;

    use rm_03_notification_emitter::{SparqlSinkConfig, SparqlUpdateSink, PUSH_CHANNEL};
    use rm_04_api_gateway::{ApiGatewayService, AppState, GatewayConfig};

    const KNOWS: &str = "http://xmlns.com/foaf/0.1/knows";
    const TAB: &str = "http://mu.semte.ch/tabs/8a1c";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    #[derive(Clone, Default)]
    struct FakeStore {
        updates: Arc<Mutex<Vec<String>>>,
        failing: Arc<Mutex<bool>>,
    }

    async fn sparql(
        State(store): State<FakeStore>,
        Form(form): Form<HashMap<String, String>>,
    ) -> StatusCode {
        if *store.failing.lock() {
            return StatusCode::SERVICE_UNAVAILABLE;
        }
        if let Some(update) = form.get("update") {
            store.updates.lock().push(update.clone());
        }
        StatusCode::OK
    }

    async fn spawn_store() -> (String, FakeStore) {
        let store = FakeStore::default();
        let app = Router::new()
            .route("/sparql", post(sparql))
            .with_state(store.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}/sparql"), store)
    }

    struct Harness {
        base: String,
        client: Client,
        store: FakeStore,
        shutdown: Option<oneshot::Sender<()>>,
    }

    impl Harness {
        async fn start() -> Self {
            let (endpoint, store) = spawn_store().await;
            let sink = SparqlUpdateSink::new(SparqlSinkConfig {
                endpoint,
                timeout: Duration::from_secs(5),
                connect_timeout: Duration::from_secs(1),
                ..Default::default()
            })
            .unwrap();

            let service =
                ApiGatewayService::new(GatewayConfig::default(), AppState::with_sink(Arc::new(sink)))
                    .unwrap();
            let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
            let addr = listener.local_addr().unwrap();
            let (tx, rx) = oneshot::channel::<()>();
            tokio::spawn(service.serve(listener, async {
                let _ = rx.await;
            }));

            Self {
                base: format!("http://{addr}"),
                client: Client::new(),
                store,
                shutdown: Some(tx),
            }
        }

        async fn watch(&self, params: &[(&str, &str)]) -> reqwest::StatusCode {
            self.client
                .post(format!("{}/monitor", self.base))
                .header("MU-TAB-ID", TAB)
                .query(params)
                .send()
                .await
                .unwrap()
                .status()
        }

        async fn delta(&self, body: serde_json::Value) -> reqwest::StatusCode {
            self.client
                .post(format!("{}/.mu/delta", self.base))
                .json(&body)
                .send()
                .await
                .unwrap()
                .status()
        }
    }

    impl Drop for Harness {
        fn drop(&mut self) {
            if let Some(tx) = self.shutdown.take() {
                let _ = tx.send(());
            }
        }
    }

    fn knows_delta() -> serde_json::Value {
        serde_json::json!([{
            "inserts": [{
                "subject": {"type": "uri", "value": "http://ex/alice"},
                "predicate": {"type": "uri", "value": KNOWS},
                "object": {"type": "uri", "value": "http://ex/bob"},
                "graph": {"type": "uri", "value": "http://mu.semte.ch/graphs/public"}
            }],
            "deletes": []
        }])
    }

    // =============================================================================
    // END-TO-END FLOWS
    // =============================================================================

    #[tokio::test]
    async fn test_watch_then_delta_writes_push_update() {
        let harness = Harness::start().await;

        assert_eq!(harness.watch(&[("predicate", KNOWS)]).await, 201);
        assert_eq!(harness.delta(knows_delta()).await, 200);

        let updates = harness.store.updates.lock().clone();
        assert_eq!(updates.len(), 1);
        let update = &updates[0];
        assert!(update.contains("PREFIX push: <http://mu.semte.ch/vocabularies/push/>"));
        assert!(update.contains("INSERT DATA"));
        assert!(update.contains(&format!("push:channel <{PUSH_CHANNEL}>")));
        assert!(update.contains(&format!("push:target <{TAB}>")));
        assert!(update.contains(&format!(
            r#"push:message """{{\"subject\":null,\"predicate\":\"{KNOWS}\",\"object\":null}}""""#
        )));
    }

    #[tokio::test]
    async fn test_unmatched_delta_contacts_no_store() {
        let harness = Harness::start().await;

        assert_eq!(harness.watch(&[("subject", "http://ex/carol")]).await, 201);
        assert_eq!(harness.delta(knows_delta()).await, 200);

        assert!(harness.store.updates.lock().is_empty());
    }

    #[tokio::test]
    async fn test_store_failure_is_server_error() {
        let harness = Harness::start().await;
        *harness.store.failing.lock() = true;

        harness.watch(&[]).await;
        assert_eq!(harness.delta(knows_delta()).await, 500);
    }

    #[tokio::test]
    async fn test_bad_requests_rejected_at_the_edge() {
        let harness = Harness::start().await;

        let status = harness
            .client
            .post(format!("{}/monitor", harness.base))
            .send()
            .await
            .unwrap()
            .status();
        assert_eq!(status, 400);

        let status = harness
            .delta(serde_json::json!([{"inserts": []}]))
            .await;
        assert_eq!(status, 400);
        assert!(harness.store.updates.lock().is_empty());
    }
}
