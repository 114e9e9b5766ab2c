//! Benchmarks for tracer advection tendencies.
//!
//! Run with: `cargo bench --bench tendency_bench`
//!
//! Compares the standard and monotonic schemes and the individual flux
//! stages on doubly periodic grids of increasing size.

use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use tracer_advection::flux::{AdvectionOrder, high_order_fluxes, low_order_fluxes};
use tracer_advection::solver::{ReconstructionParams, limit_fluxes};
use tracer_advection::{
    AdvectionConfig, AdvectionEngine, AdvectionInputs, CellField, ColumnMesh, EdgeField,
    TracerField, TracerIndex,
};

const N_LAYERS: usize = 20;
const N_TRACERS: usize = 2;

struct Problem {
    mesh: ColumnMesh,
    tracers: TracerField,
    uh: EdgeField,
    w: CellField,
    h: CellField,
}

/// Periodic grid with a smooth tracer and a sheared flow.
fn setup_problem(n: usize) -> Problem {
    let mesh = ColumnMesh::periodic_grid(n, n, 1000.0, N_LAYERS);
    let n_cells = mesh.n_cells();
    let tracers = TracerField::from_fn(N_TRACERS, n_cells, N_LAYERS, |t, c, k| {
        let x = (c.get() % n) as f64 / n as f64;
        let y = (c.get() / n) as f64 / n as f64;
        10.0 + t.get() as f64 + (6.0 * x).sin() * (4.0 * y).cos() - 0.2 * k as f64
    });
    let uh = EdgeField::from_fn(mesh.n_edges(), N_LAYERS, |e, k| {
        let phase = e.get() as f64 * 0.01;
        (0.3 + 0.1 * phase.sin()) * (1.0 - k as f64 / N_LAYERS as f64)
    });
    let w = CellField::from_fn(n_cells, N_LAYERS + 1, |c, i| {
        if i == 0 || i == N_LAYERS {
            0.0
        } else {
            1e-4 * ((c.get() as f64) * 0.05).cos()
        }
    });
    let h = CellField::uniform(n_cells, N_LAYERS, 10.0);
    Problem {
        mesh,
        tracers,
        uh,
        w,
        h,
    }
}

/// Benchmark the full engine call for both schemes.
fn bench_compute_tendency(c: &mut Criterion) {
    let mut group = c.benchmark_group("compute_tendency");

    for n in [16, 32, 64] {
        let p = setup_problem(n);
        let inputs = AdvectionInputs::new(&p.tracers, &p.uh, &p.w, &p.h, 60.0);

        for (name, monotonic) in [("standard", false), ("monotonic", true)] {
            let engine =
                AdvectionEngine::initialize(AdvectionConfig::default().with_monotonic(monotonic))
                    .expect("valid configuration");
            group.bench_with_input(
                BenchmarkId::new(name, format!("{}_cells", n * n)),
                &n,
                |b, _| {
                    let mut tendency = TracerField::new(N_TRACERS, n * n, N_LAYERS);
                    b.iter(|| {
                        engine.compute_tendency(
                            black_box(&p.mesh),
                            black_box(&inputs),
                            "bench",
                            &mut tendency,
                        )
                    });
                },
            );
        }
    }

    group.finish();
}

/// Benchmark the individual flux stages of one tracer.
fn bench_flux_stages(c: &mut Criterion) {
    let mut group = c.benchmark_group("flux_stages");
    let params = ReconstructionParams {
        horizontal_order: AdvectionOrder::Third,
        vertical_order: AdvectionOrder::Third,
        coef_3rd_order: 0.25,
        w_to_upward: 1.0,
    };

    for n in [16, 32, 64] {
        let p = setup_problem(n);
        let inputs = AdvectionInputs::new(&p.tracers, &p.uh, &p.w, &p.h, 60.0);
        let tracer = p.tracers.tracer(TracerIndex::new(0));
        let label = format!("{}_cells", n * n);

        group.bench_with_input(BenchmarkId::new("high_order", &label), &n, |b, _| {
            b.iter(|| high_order_fluxes(black_box(&p.mesh), tracer, &inputs, &params));
        });

        group.bench_with_input(BenchmarkId::new("low_order", &label), &n, |b, _| {
            b.iter(|| low_order_fluxes(black_box(&p.mesh), tracer, &inputs, 1.0));
        });

        let high = high_order_fluxes(&p.mesh, tracer, &inputs, &params);
        let low = low_order_fluxes(&p.mesh, tracer, &inputs, 1.0);
        group.bench_with_input(BenchmarkId::new("fct_limit", &label), &n, |b, _| {
            b.iter(|| {
                limit_fluxes(
                    black_box(&p.mesh),
                    tracer,
                    black_box(&high),
                    black_box(&low),
                    &p.h,
                    60.0,
                )
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_compute_tendency, bench_flux_stages);
criterion_main!(benches);
