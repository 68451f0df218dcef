/*
 * Boid Backdrop Benchmark
 *
 * Measures one simulation tick for several flock sizes, with and without
 * particle trails. Every run is seeded and warmed up past the fade-in so the
 * whole flock is steering.
 */

use criterion::{black_box, criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};

use boid_backdrop::{Bounds, Simulation, SimulationParams};

const FRAME_MS: f64 = 1000.0 / 60.0;

// A running simulation with every boid fully faded in
fn warmed_up(num_boids: usize, emit_particles: bool) -> (Simulation, f64) {
    let params = SimulationParams {
        num_boids,
        fade_in_stagger_ms: 0.0,
        emit_particles,
        seed: Some(0xB01D),
        ..SimulationParams::default()
    };
    let mut simulation = Simulation::from_params(params, Bounds::new(1280.0, 800.0));
    simulation.start(0.0);

    let mut now = 0.0;
    while now <= 1300.0 {
        simulation.tick(now);
        now += FRAME_MS;
    }
    (simulation, now)
}

fn bench_tick(c: &mut Criterion) {
    let mut group = c.benchmark_group("tick");

    for emit_particles in [false, true] {
        let label = if emit_particles { "particles" } else { "plain" };

        for num_boids in [50, 200, 500] {
            group.bench_with_input(BenchmarkId::new(label, num_boids), &num_boids, |b, &n| {
                b.iter_batched(
                    || warmed_up(n, emit_particles),
                    |(mut simulation, now)| black_box(simulation.tick(now)),
                    BatchSize::LargeInput,
                );
            });
        }
    }

    group.finish();
}

// Benchmark the flocking force on its own
fn bench_flocking_force(c: &mut Criterion) {
    let mut group = c.benchmark_group("flocking_force");

    for num_boids in [50, 200, 500] {
        let (simulation, _) = warmed_up(num_boids, false);
        group.bench_with_input(BenchmarkId::from_parameter(num_boids), &simulation, |b, sim| {
            b.iter(|| {
                let boids = sim.boids();
                boids
                    .iter()
                    .map(|boid| boid.flocking_force(boids, sim.params()))
                    .fold(0.0, |acc, force| acc + force.length())
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_tick, bench_flocking_force);
criterion_main!(benches);
