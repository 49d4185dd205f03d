mod common;

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use rand::rngs::StdRng;
use rand::SeedableRng;
use structure_scatter::sampling::poisson_disk::PoissonDiskSampling;
use structure_scatter::sampling::region::RegionSampling;
use structure_scatter::sampling::{PlacementRequest, PlacementSampling};
use structure_scatter::world::{WorldBounds, YRange};

const FILL_RATES: [f32; 3] = [0.25, 0.5, 0.9];
const REGION_SIZES: [u32; 4] = [32, 16, 8, 4];
const MIN_DISTANCES: [f32; 5] = [64.0, 32.0, 16.0, 8.0, 4.0];

fn request() -> PlacementRequest {
    PlacementRequest::new(WorldBounds::new(1024, 1024), YRange::new(0, 255), 1)
}

fn sampling_region_benches(c: &mut Criterion) {
    let req = request();

    for &fill_rate in &FILL_RATES {
        let mut group = c.benchmark_group(format!("sampling/region/fill_{fill_rate:.2}"));

        for &size in &REGION_SIZES {
            let strategy = RegionSampling::new(size, fill_rate);
            let mut rng_est = StdRng::seed_from_u64(0xA11CE_u64 ^ size as u64);
            let expected = strategy
                .sample(&req, &mut rng_est, &mut ())
                .map(|p| p.len())
                .unwrap_or_default();
            group.throughput(common::elements_throughput(expected));

            let mut rng = StdRng::seed_from_u64(0xA11CE_u64 ^ ((size as u64) << 1));

            group.bench_with_input(BenchmarkId::from_parameter(size), &size, |b, _| {
                b.iter(|| {
                    let placements = strategy.sample(&req, &mut rng, &mut ());
                    black_box(placements.map(|p| p.len()).unwrap_or_default());
                });
            });
        }

        group.finish();
    }
}

fn sampling_poisson_benches(c: &mut Criterion) {
    let req = request();
    let mut group = c.benchmark_group("sampling/poisson_disk");

    for &min_distance in &MIN_DISTANCES {
        let strategy = PoissonDiskSampling::new(min_distance);
        let mut rng_est = StdRng::seed_from_u64(0xBEEF_u64 ^ (min_distance as u64));
        let expected = strategy
            .sample_points(req.bounds, &mut rng_est)
            .len();
        group.throughput(common::elements_throughput(expected));

        let mut rng = StdRng::seed_from_u64(0xC0FFEE_u64 ^ (min_distance as u64));

        group.bench_with_input(
            BenchmarkId::from_parameter(min_distance),
            &min_distance,
            |b, _| {
                b.iter(|| {
                    let placements = strategy.sample(&req, &mut rng, &mut ());
                    black_box(placements.map(|p| p.len()).unwrap_or_default());
                });
            },
        );
    }

    group.finish();
}

criterion_group! {
    name = benches;
    config = common::default_criterion();
    targets = sampling_region_benches, sampling_poisson_benches
}
criterion_main!(benches);
