// ─────────────────────────────────────────────────────────────────────
// Director-Class AI — SyncNet Dynamics Benchmarks
// ─────────────────────────────────────────────────────────────────────
//! Criterion benchmarks for the phase integrator:
//!   - Single solver step (Euler, RK4) on a 256-oscillator grid
//!   - Order metrics
//!   - Full run to convergence

use criterion::{black_box, criterion_group, criterion_main, Criterion};

use syncnet_dynamics::{global_order, local_order, DynamicsEngine};
use syncnet_types::{InitialPhases, SimulationConfig, SolverKind, Topology};

const N: usize = 256;

// ── Helpers ───────────────────────────────────────────────────────────

fn make_engine(topology: Topology) -> DynamicsEngine {
    let cfg = SimulationConfig {
        initial_phases: InitialPhases::Equipartition,
        ..Default::default()
    };
    DynamicsEngine::with_topology(N, topology, cfg).unwrap()
}

// ── Step benchmarks ───────────────────────────────────────────────────

fn bench_step(c: &mut Criterion) {
    for kind in [SolverKind::Euler, SolverKind::Rk4] {
        let mut engine = make_engine(Topology::GridEight);
        c.bench_function(&format!("step_{kind}_grid_eight_256"), |b| {
            b.iter(|| engine.simulate_static(black_box(1), kind, false))
        });
    }
}

// ── Metric benchmarks ─────────────────────────────────────────────────

fn bench_order(c: &mut Criterion) {
    let engine = make_engine(Topology::GridEight);
    c.bench_function("global_order_256", |b| {
        b.iter(|| global_order(black_box(engine.phases())))
    });
    c.bench_function("local_order_grid_eight_256", |b| {
        b.iter(|| local_order(black_box(engine.phases()), engine.neighbors()))
    });
}

// ── Full run ──────────────────────────────────────────────────────────

fn bench_run(c: &mut Criterion) {
    c.bench_function("run_all_to_all_256", |b| {
        b.iter(|| {
            let mut engine = make_engine(Topology::AllToAll);
            engine.simulate(black_box(0.99), SolverKind::Euler, false)
        })
    });
}

criterion_group!(benches, bench_step, bench_order, bench_run);
criterion_main!(benches);
