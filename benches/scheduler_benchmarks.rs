//! Scheduler Benchmarks
//!
//! Measures baseline performance of spawning and driving actors end to end:
//! - Single actor spawn latency on the cooperative driver
//! - Batch actor spawn (10 actors)
//! - Message dispatch throughput through a live mailbox

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::time::Duration;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use rtactor::{Actor, ActorContext, Behavior, BehaviorBuilder};
use rtactor::pattern::{Pattern, Slot};
use rtactor::payload::Tuple;
use rtactor::{ActorSystem, SystemConfig};

/// An actor that does the least possible work per message, so the
/// benchmarks isolate dispatch overhead rather than handler cost.
struct CounterActor;

impl Actor for CounterActor {
    fn init(&mut self, _ctx: &mut ActorContext<Self>) -> Behavior<Self, ActorContext<Self>> {
        BehaviorBuilder::new()
            .on(Pattern::new(vec![Slot::typed::<i32>()]).unwrap(), |_a, _ctx, _p, _m| {})
            .build()
    }
}

/// Benchmark: spawn a single cooperative actor (registration, mailbox
/// allocation, initial `init` dispatch, and driver-task creation).
fn actor_spawn_single(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("actor_spawn_single", |b| {
        b.to_async(&rt).iter(|| async {
            let system = ActorSystem::new(SystemConfig::default());
            let handle = system.spawn(CounterActor).unwrap();
            black_box(handle);
        });
    });
}

/// Benchmark: spawn 10 cooperative actors in batch on the same system.
fn actor_spawn_batch_small(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("actor_spawn_batch_small", |b| {
        b.to_async(&rt).iter(|| async {
            let system = ActorSystem::new(SystemConfig::default());
            let mut handles = Vec::with_capacity(10);
            for _ in 0..10 {
                handles.push(system.spawn(CounterActor).unwrap());
            }
            black_box(handles);
        });
    });
}

/// Benchmark: fire-and-forget send throughput against one already-spawned
/// actor's mailbox, letting the cooperative driver drain them.
fn actor_message_throughput(c: &mut Criterion) {
    let rt = tokio::runtime::Runtime::new().unwrap();

    c.bench_function("actor_message_throughput", |b| {
        b.to_async(&rt).iter(|| async {
            let system = ActorSystem::new(SystemConfig::default());
            let handle = system.spawn(CounterActor).unwrap();

            for i in 0..100i32 {
                system.send(&handle, Tuple::from_static((i,))).unwrap();
            }
            // Give the cooperative driver a chance to drain the batch
            // before the mailbox (and its actor) drop out of scope.
            tokio::task::yield_now().await;
            black_box(&handle);
        });
    });
}

fn configure_criterion() -> Criterion {
    Criterion::default()
        .sample_size(30) // Reduced for resource constraints
        .measurement_time(Duration::from_secs(5)) // Shorter measurement
        .warm_up_time(Duration::from_secs(2)) // Shorter warm-up
        .without_plots() // Save disk I/O
}

criterion_group! {
    name = benches;
    config = configure_criterion();
    targets =
        actor_spawn_single,
        actor_spawn_batch_small,
        actor_message_throughput
}

criterion_main!(benches);
