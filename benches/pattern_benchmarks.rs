//! Pattern Matching Benchmarks
//!
//! Measures baseline performance of the dispatch matcher (§4.3):
//! - The five wildcard-topology strategies in isolation
//! - Match-cache candidate lookup, cold vs. warm

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

// Layer 1: Standard library imports
use std::hint::black_box;
use std::time::Duration;

// Layer 2: Third-party crate imports
use criterion::{criterion_group, criterion_main, Criterion};

// Layer 3: Internal module imports
use rtactor::pattern::{matcher, MatchCache, Pattern, Slot};
use rtactor::payload::{Tuple, TupleElement};

fn dyn_tuple(n: usize) -> Tuple {
    Tuple::from_dynamic((0..n).map(|i| TupleElement::new(i as i32)).collect())
}

/// Benchmark: `WildcardTopology::None`, an exact-arity match against a
/// statically typed two-element tuple.
fn match_none_topology(c: &mut Criterion) {
    let pattern = Pattern::new(vec![Slot::typed::<i32>(), Slot::typed::<i32>()]).unwrap();
    let tuple = Tuple::from_static((1i32, 2i32));

    c.bench_function("match_none_topology", |b| {
        b.iter(|| black_box(matcher::try_match(&pattern, &tuple)));
    });
}

/// Benchmark: `WildcardTopology::Trailing`, a fixed prefix against an
/// eight-element tuple.
fn match_trailing_topology(c: &mut Criterion) {
    let pattern = Pattern::new(vec![Slot::typed::<i32>(), Slot::any_many()]).unwrap();
    let tuple = dyn_tuple(8);

    c.bench_function("match_trailing_topology", |b| {
        b.iter(|| black_box(matcher::try_match(&pattern, &tuple)));
    });
}

/// Benchmark: `WildcardTopology::Multiple`, two variadic wildcards forcing
/// the middle-run scan over an eight-element tuple.
fn match_multiple_topology(c: &mut Criterion) {
    let pattern = Pattern::new(vec![
        Slot::any_many(),
        Slot::typed_value(5i32),
        Slot::any_many(),
    ])
    .unwrap();
    let tuple = dyn_tuple(8);

    c.bench_function("match_multiple_topology", |b| {
        b.iter(|| black_box(matcher::try_match(&pattern, &tuple)));
    });
}

/// Benchmark: match-cache candidate lookup, cold (first lookup for a
/// token, computing the candidate list) vs. the warm, already-cached path.
fn match_cache_lookup(c: &mut Criterion) {
    let patterns = vec![
        Pattern::new(vec![Slot::typed::<i32>()]).unwrap(),
        Pattern::new(vec![Slot::typed::<String>()]).unwrap(),
        Pattern::new(vec![Slot::any()]).unwrap(),
    ];
    let token = Tuple::from_static((1i32,)).type_token().unwrap();

    c.bench_function("match_cache_cold_lookup", |b| {
        b.iter(|| {
            let mut cache = MatchCache::new();
            black_box(cache.candidates(token, &patterns));
        });
    });

    c.bench_function("match_cache_warm_lookup", |b| {
        let mut cache = MatchCache::new();
        cache.candidates(token, &patterns);
        b.iter(|| black_box(cache.candidates(token, &patterns)));
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
        match_none_topology,
        match_trailing_topology,
        match_multiple_topology,
        match_cache_lookup
}

criterion_main!(benches);
