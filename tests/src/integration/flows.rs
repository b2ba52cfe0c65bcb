//! # Integration Test Flows
//!
//! Registration, matching and emission wired together in process, the way
//! the gateway drives them:
//!
//! 1. **Registry (01) → Matcher (02)**: a delta sees every registration made
//!    before it
//! 2. **Matcher (02) → Emitter (03)**: one sink write per batch with
//!    matches, none otherwise
//! 3. **Failure**: a failing sink fails the batch as a whole

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use rm_01_subscription_index::{PatternKey, SubscriptionApi, SubscriptionRegistry};
    use rm_02_delta_matcher::{DeltaMatcher, DeltaMatcherApi};
    use rm_03_notification_emitter::{
        EmitError, EmitOutcome, InMemorySink, NotificationEmitter,
    };
    use shared_types::{Delta, Quad, TabId};

    const KNOWS: &str = "http://ex/knows";

    // =============================================================================
    // TEST FIXTURES
    // =============================================================================

    struct Monitor {
        registry: Arc<SubscriptionRegistry>,
        matcher: DeltaMatcher<SubscriptionRegistry>,
        emitter: NotificationEmitter,
        sink: Arc<InMemorySink>,
    }

    impl Monitor {
        fn new() -> Self {
            let registry = Arc::new(SubscriptionRegistry::new());
            let matcher = DeltaMatcher::new(Arc::clone(&registry));
            let sink = Arc::new(InMemorySink::new());
            let emitter = NotificationEmitter::new(sink.clone());
            Self {
                registry,
                matcher,
                emitter,
                sink,
            }
        }

        async fn deliver(&self, deltas: &[Delta]) -> Result<EmitOutcome, EmitError> {
            let batch = self.matcher.process_delta(deltas);
            self.emitter.emit(&batch).await
        }
    }

    fn insert(subject: &str, predicate: &str, object: &str) -> Delta {
        Delta::new(vec![Quad::new(subject, predicate, object)], vec![])
    }

    fn payload(message: &rm_03_notification_emitter::PushMessage) -> serde_json::Value {
        serde_json::from_str(&message.payload).unwrap()
    }

    // =============================================================================
    // REGISTRY → MATCHER → EMITTER
    // =============================================================================

    #[tokio::test]
    async fn test_knows_scenario_single_message_to_watcher() {
        let monitor = Monitor::new();
        monitor.registry.register(
            TabId::new("A"),
            PatternKey::from_params(None, Some(KNOWS), None),
        );

        let outcome = monitor
            .deliver(&[insert("http://ex/alice", KNOWS, "http://ex/bob")])
            .await
            .unwrap();

        assert_eq!(outcome, EmitOutcome::Sent { messages: 1 });
        let writes = monitor.sink.writes();
        assert_eq!(writes.len(), 1);
        assert_eq!(writes[0].len(), 1);
        assert_eq!(writes[0][0].target, TabId::new("A"));
        assert_eq!(
            payload(&writes[0][0]),
            serde_json::json!({"subject": null, "predicate": KNOWS, "object": null})
        );
    }

    #[tokio::test]
    async fn test_unregistered_pattern_no_longer_notifies() {
        let monitor = Monitor::new();
        let tab = TabId::new("A");
        let pattern = PatternKey::from_params(Some("s1"), None, None);
        monitor.registry.register(tab.clone(), pattern.clone());
        monitor.registry.unregister(&tab, &pattern);

        let outcome = monitor.deliver(&[insert("s1", "p", "o")]).await.unwrap();

        assert_eq!(outcome, EmitOutcome::NothingToSend);
        assert_eq!(monitor.sink.write_count(), 0);
        assert!(monitor.registry.patterns_for(&tab).is_empty());
    }

    #[tokio::test]
    async fn test_fan_out_keeps_duplicates_in_one_write() {
        let monitor = Monitor::new();
        let a = TabId::new("A");
        monitor
            .registry
            .register(a.clone(), PatternKey::from_params(Some("s1"), None, None));
        monitor
            .registry
            .register(a.clone(), PatternKey::from_params(None, Some("p1"), None));
        monitor.registry.register(TabId::new("B"), PatternKey::any());
        monitor.registry.register(
            TabId::new("C"),
            PatternKey::from_params(Some("other"), None, None),
        );

        let outcome = monitor
            .deliver(&[Delta::new(
                vec![Quad::new("s1", "p1", "o1")],
                vec![Quad::new("s2", "p2", "o2")],
            )])
            .await
            .unwrap();

        // A: two patterns hit the insert. B: the insert and the delete.
        assert_eq!(outcome, EmitOutcome::Sent { messages: 4 });
        assert_eq!(monitor.sink.write_count(), 1);
        let targets: Vec<_> = monitor
            .sink
            .messages()
            .iter()
            .map(|m| m.target.as_str().to_string())
            .collect();
        assert_eq!(targets, vec!["A", "A", "B", "B"]);
    }

    #[tokio::test]
    async fn test_empty_and_unmatched_batches_never_write() {
        let monitor = Monitor::new();
        monitor.registry.register(
            TabId::new("A"),
            PatternKey::from_params(Some("s1"), Some("p1"), Some("o1")),
        );

        assert_eq!(
            monitor.deliver(&[]).await.unwrap(),
            EmitOutcome::NothingToSend
        );
        assert_eq!(
            monitor.deliver(&[Delta::default()]).await.unwrap(),
            EmitOutcome::NothingToSend
        );
        assert_eq!(
            monitor.deliver(&[insert("s1", "p1", "o2")]).await.unwrap(),
            EmitOutcome::NothingToSend
        );
        assert_eq!(monitor.sink.write_count(), 0);
    }

    #[tokio::test]
    async fn test_tab_closed_cleans_up_everything() {
        let monitor = Monitor::new();
        let tab = TabId::new("A");
        monitor.registry.register(tab.clone(), PatternKey::any());
        monitor
            .registry
            .register(tab.clone(), PatternKey::from_params(None, None, Some("o")));

        assert_eq!(monitor.registry.unregister_all(&tab), 2);

        let stats = monitor.registry.stats();
        assert_eq!(stats.subscriptions, 0);
        assert_eq!(stats.trie_nodes, 0);
        assert_eq!(
            monitor.deliver(&[insert("s", "p", "o")]).await.unwrap(),
            EmitOutcome::NothingToSend
        );
    }

    // =============================================================================
    // FAILURE HANDLING
    // =============================================================================

    #[tokio::test]
    async fn test_sink_failure_fails_whole_batch_then_recovers() {
        let monitor = Monitor::new();
        monitor.registry.register(TabId::new("A"), PatternKey::any());
        monitor.registry.register(TabId::new("B"), PatternKey::any());

        monitor.sink.set_failing(true);
        let err = monitor.deliver(&[insert("s", "p", "o")]).await.unwrap_err();
        assert!(matches!(err, EmitError::Sink { messages: 2, .. }));
        assert_eq!(monitor.sink.write_count(), 0);

        monitor.sink.set_failing(false);
        let outcome = monitor.deliver(&[insert("s", "p", "o")]).await.unwrap();
        assert_eq!(outcome, EmitOutcome::Sent { messages: 2 });
    }

    // =============================================================================
    // CONCURRENCY
    // =============================================================================

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_registration_and_matching() {
        let monitor = Arc::new(Monitor::new());

        let mut handles = Vec::new();
        for i in 0..4 {
            let monitor = Arc::clone(&monitor);
            handles.push(tokio::spawn(async move {
                let tab = TabId::new(format!("tab-{i}"));
                for j in 0..100 {
                    let subject = format!("s{j}");
                    monitor
                        .registry
                        .register(tab.clone(), PatternKey::from_params(Some(&subject), None, None));
                    tokio::task::yield_now().await;
                }
            }));
        }
        for _ in 0..4 {
            let monitor = Arc::clone(&monitor);
            handles.push(tokio::spawn(async move {
                for j in 0..100 {
                    let subject = format!("s{j}");
                    monitor.deliver(&[insert(&subject, "p", "o")]).await.unwrap();
                }
            }));
        }
        for handle in handles {
            handle.await.unwrap();
        }

        // Every registration is visible to a delta processed afterwards.
        let outcome = monitor.deliver(&[insert("s99", "p", "o")]).await.unwrap();
        assert_eq!(outcome, EmitOutcome::Sent { messages: 4 });
        assert_eq!(monitor.registry.stats().subscriptions, 400);
    }
}
