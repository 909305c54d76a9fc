//! Fixture generators for reduction tests.

use glam::{Mat3, Quat, Vec3};
use rand::Rng;

use crate::covariance::SymMat3;
use crate::mixture::{Component, FeatureVector, MixtureLevel};

// =============================================================================
// Single components
// =============================================================================

/// Isotropic splat with shared color, opacity and features.
pub fn splat(mean: Vec3, variance: f32) -> Component {
  Component::new(
    mean,
    Vec3::new(0.5, 0.5, 0.5),
    SymMat3::isotropic(variance),
    0.8,
    FeatureVector::from(vec![0.1, 0.2, 0.3]),
  )
}

pub fn parent(mut component: Component) -> Component {
  component.is_parent = true;
  component
}

// =============================================================================
// Point sets
// =============================================================================

/// Corners of the unit cube `[0, 1]³`, none flagged.
pub fn unit_cube(variance: f32) -> Vec<Component> {
  (0..8)
    .map(|i| {
      let corner = Vec3::new((i & 1) as f32, ((i >> 1) & 1) as f32, ((i >> 2) & 1) as f32);
      splat(corner, variance)
    })
    .collect()
}

/// Random anisotropic splats in `[-extent, extent]³` with random colors and
/// parent flags drawn with `parent_probability`.
pub fn random_cloud<R: Rng>(
  rng: &mut R,
  n: usize,
  extent: f32,
  parent_probability: f64,
) -> Vec<Component> {
  (0..n)
    .map(|_| {
      let mean = Vec3::new(
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
        rng.random_range(-extent..extent),
      );
      let color = Vec3::new(rng.random(), rng.random(), rng.random());
      let mut c = Component::new(
        mean,
        color,
        random_covariance(rng),
        rng.random_range(0.1..1.0),
        FeatureVector::from(vec![rng.random::<f32>(), rng.random::<f32>()]),
      );
      c.is_parent = rng.random_bool(parent_probability);
      c
    })
    .collect()
}

/// Rotated diagonal covariance with variances in `[0.01, 0.1]`.
pub fn random_covariance<R: Rng>(rng: &mut R) -> SymMat3 {
  let axis = Vec3::new(
    rng.random_range(-1.0..1.0),
    rng.random_range(-1.0..1.0),
    rng.random_range(-1.0..1.0),
  )
  .normalize_or(Vec3::Z);
  let rotation = Mat3::from_quat(Quat::from_axis_angle(axis, rng.random_range(0.0..std::f32::consts::PI)));
  let variances = Vec3::new(
    rng.random_range(0.01..0.1),
    rng.random_range(0.01..0.1),
    rng.random_range(0.01..0.1),
  );
  SymMat3::from_mat3(&(rotation * Mat3::from_diagonal(variances) * rotation.transpose()))
}

/// Public level holding `components`.
pub fn level_of(components: &[Component]) -> MixtureLevel {
  MixtureLevel::from_components(components)
}

/// Sum of component weights.
pub fn total_weight(components: &[Component]) -> f32 {
  components.iter().map(|c| c.weight).sum()
}
