//! Benchmarks for the static analysis pipeline
//!
//! Run with: cargo bench -p hybrid-sa

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use hybrid_ir::{Circuit, Param, RawObservable, Wire};
use hybrid_sa::{TypeContext, analyze, group_measurements, resolve_measurements};

/// A ladder of `pairs` qumode/qubit pairs, each coupled by one hybrid gate,
/// with one homodyne and one qubit readout per pair plus a Fock readout on
/// every tenth qumode.
fn ladder(pairs: u32) -> Circuit {
    let mut circuit = Circuit::new("ladder");
    for i in 0..pairs {
        let (m, q) = (Wire::Index(2 * i), Wire::Index(2 * i + 1));
        circuit
            .standard("Hadamard", [q.clone()], [])
            .unwrap()
            .hybrid("ConditionalDisplacement", [m.clone(), q.clone()], 1, [Param::Real(0.5)])
            .unwrap()
            .measure(&RawObservable::named("QuadX", [m.clone()]))
            .unwrap()
            .measure(&RawObservable::named("PauliZ", [q]))
            .unwrap();
        if i % 10 == 0 {
            circuit
                .measure(&RawObservable::named("NumberOperator", [m]))
                .unwrap();
        }
    }
    circuit
}

/// Benchmark the full analysis
fn bench_analyze(c: &mut Criterion) {
    let mut group = c.benchmark_group("analyze");

    for pairs in &[100u32, 1_000, 5_000] {
        let circuit = ladder(*pairs);
        group.bench_with_input(BenchmarkId::new("ladder", pairs * 2), &circuit, |b, circuit| {
            b.iter(|| analyze(black_box(circuit)).unwrap());
        });
    }

    group.finish();
}

/// Benchmark grouping alone on pre-resolved schemas
fn bench_grouping(c: &mut Criterion) {
    let mut group = c.benchmark_group("grouping");

    let circuit = ladder(5_000);
    let schemas = {
        let mut ctx = TypeContext::new(&circuit);
        resolve_measurements(&circuit, &mut ctx).unwrap()
    };
    group.bench_function("ladder_10k_wires", |b| {
        b.iter(|| group_measurements(black_box(&schemas)));
    });

    group.finish();
}

criterion_group!(benches, bench_analyze, bench_grouping);
criterion_main!(benches);
