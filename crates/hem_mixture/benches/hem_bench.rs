//! Benchmarks for the eigensolver, the neighbor index and one reduction step.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use glam::{Mat3, Quat, Vec3};
use hem_mixture::{reduce_level, Component, FeatureVector, HemConfig, SpatialHashIndex, SymMat3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random flat splats on a noisy sphere shell.
fn splat_cloud(n: usize, parent_probability: f64, seed: u64) -> Vec<Component> {
  let mut rng = StdRng::seed_from_u64(seed);
  (0..n)
    .map(|_| {
      let dir = Vec3::new(
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
        rng.random_range(-1.0..1.0),
      )
      .normalize_or(Vec3::Y);
      let mean = dir * (10.0 + rng.random_range(-0.05..0.05));

      // Flat along the sphere normal.
      let rotation = Mat3::from_quat(Quat::from_rotation_arc(Vec3::Z, dir));
      let variances = Vec3::new(0.01, 0.01, 0.0001);
      let cov = SymMat3::from_mat3(&(rotation * Mat3::from_diagonal(variances) * rotation.transpose()));

      let mut c = Component::new(mean, Vec3::splat(0.5), cov, 1.0, FeatureVector::zeros(16));
      c.is_parent = rng.random_bool(parent_probability);
      c
    })
    .collect()
}

fn bench_eigensystem(c: &mut Criterion) {
  let covariances: Vec<SymMat3> = splat_cloud(1024, 0.0, 1)
    .into_iter()
    .map(|c| c.covariance)
    .collect();

  c.bench_function("covariance::eigensystem (1024 splats)", |b| {
    b.iter(|| {
      for cov in &covariances {
        black_box(black_box(cov).eigensystem());
      }
    })
  });
}

fn bench_radius_search(c: &mut Criterion) {
  let components = splat_cloud(50_000, 0.0, 2);
  let means: Vec<Vec3> = components.iter().map(|c| c.mean).collect();
  let index = SpatialHashIndex::new(&means, 0.3).unwrap();

  c.bench_function("spatial::radius_search_all (50k points, r=0.3)", |b| {
    b.iter(|| black_box(index.radius_search_all(black_box(&means[..4096]), 0.3)))
  });
}

fn bench_reduce_level(c: &mut Criterion) {
  let mut group = c.benchmark_group("hem::reduce_level");
  group.sample_size(20);

  let config = HemConfig::default();
  for n in [10_000usize, 50_000] {
    let components = splat_cloud(n, config.parent_probability(), 3);
    group.bench_with_input(BenchmarkId::from_parameter(n), &components, |b, components| {
      b.iter(|| black_box(reduce_level(black_box(components), &config)))
    });
  }

  group.finish();
}

criterion_group!(benches, bench_eigensystem, bench_radius_search, bench_reduce_level);
criterion_main!(benches);
