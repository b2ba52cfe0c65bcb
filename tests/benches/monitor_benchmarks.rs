//! # Resource Monitor Benchmarks
//!
//! | Operation | Expectation |
//! |-----------|-------------|
//! | `match_quad` | flat in the number of subscriptions (8 hash descents) |
//! | `register` / `unregister` | O(1) amortized |
//! | `process_delta` | linear in quads, one read lock per batch |

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::Rng;
use std::sync::Arc;
use std::time::Duration;

use rm_01_subscription_index::{PatternKey, PatternLookup, SubscriptionApi, SubscriptionRegistry};
use rm_02_delta_matcher::{DeltaMatcher, DeltaMatcherApi};
use shared_types::{Delta, Quad, TabId};

/// Registry with `count` random subscriptions over a small vocabulary so
/// that hits actually happen.
fn populated_registry(count: usize) -> SubscriptionRegistry {
    let mut rng = rand::thread_rng();
    let registry = SubscriptionRegistry::new();

    for i in 0..count {
        let subject = format!("http://ex/s{}", rng.gen_range(0..1_000));
        let predicate = format!("http://ex/p{}", rng.gen_range(0..20));
        let object = format!("http://ex/o{}", rng.gen_range(0..1_000));
        let pattern = match rng.gen_range(0..4) {
            0 => PatternKey::from_params(Some(&subject), None, None),
            1 => PatternKey::from_params(None, Some(&predicate), None),
            2 => PatternKey::from_params(Some(&subject), Some(&predicate), None),
            _ => PatternKey::from_params(Some(&subject), Some(&predicate), Some(&object)),
        };
        registry.register(TabId::new(format!("http://tabs/{}", i % 500)), pattern);
    }

    registry
}

fn random_quad(rng: &mut impl Rng) -> Quad {
    Quad::new(
        format!("http://ex/s{}", rng.gen_range(0..1_000)),
        format!("http://ex/p{}", rng.gen_range(0..20)),
        format!("http://ex/o{}", rng.gen_range(0..1_000)),
    )
}

fn bench_match_quad(c: &mut Criterion) {
    let mut group = c.benchmark_group("rm-01-match-quad");
    group.measurement_time(Duration::from_secs(5));

    for size in [1_000, 10_000, 100_000] {
        let registry = populated_registry(size);
        let mut rng = rand::thread_rng();
        let quads: Vec<Quad> = (0..256).map(|_| random_quad(&mut rng)).collect();

        group.bench_with_input(BenchmarkId::new("subscriptions", size), &quads, |b, quads| {
            let mut i = 0;
            b.iter(|| {
                i = (i + 1) % quads.len();
                black_box(registry.match_quad(&quads[i]))
            })
        });
    }

    group.finish();
}

fn bench_register_unregister(c: &mut Criterion) {
    let mut group = c.benchmark_group("rm-01-register");
    let registry = populated_registry(10_000);
    let tab = TabId::new("http://tabs/bench");
    let pattern = PatternKey::from_params(Some("http://ex/bench"), Some("http://ex/p0"), None);

    group.bench_function("register_then_unregister", |b| {
        b.iter(|| {
            registry.register(tab.clone(), pattern.clone());
            black_box(registry.unregister(&tab, &pattern))
        })
    });

    group.finish();
}

fn bench_process_delta(c: &mut Criterion) {
    let mut group = c.benchmark_group("rm-02-process-delta");
    let registry = Arc::new(populated_registry(10_000));
    let matcher = DeltaMatcher::new(Arc::clone(&registry));
    let mut rng = rand::thread_rng();

    for quads in [10, 100, 1_000] {
        let batch = vec![Delta::new(
            (0..quads).map(|_| random_quad(&mut rng)).collect(),
            (0..quads / 2).map(|_| random_quad(&mut rng)).collect(),
        )];
        let total = batch[0].len() as u64;

        group.throughput(Throughput::Elements(total));
        group.bench_with_input(BenchmarkId::new("quads", total), &batch, |b, batch| {
            b.iter(|| black_box(matcher.process_delta(batch)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_match_quad,
    bench_register_unregister,
    bench_process_delta
);
criterion_main!(benches);
