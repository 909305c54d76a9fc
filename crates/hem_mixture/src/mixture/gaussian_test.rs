use glam::Vec3;

use super::*;
use crate::mixture::FeatureVector;

fn component(mean: Vec3, covariance: SymMat3) -> Component {
  Component::new(mean, Vec3::ZERO, covariance, 1.0, FeatureVector::zeros(0))
}

// =========================================================================
// Distances
// =========================================================================

#[test]
fn test_mahalanobis_identity_is_squared_distance() {
  let d = squared_mahalanobis(Vec3::new(1.0, 2.0, 2.0), Vec3::ZERO, &SymMat3::IDENTITY);
  assert!((d - 9.0).abs() < 1e-6);
}

#[test]
fn test_mahalanobis_scales_with_variance() {
  let cov = SymMat3::diag(Vec3::new(4.0, 1.0, 1.0));
  let d = squared_mahalanobis(Vec3::X * 2.0, Vec3::ZERO, &cov);
  assert!((d - 1.0).abs() < 1e-6);
}

#[test]
fn test_color_delta_is_euclidean() {
  let mut a = component(Vec3::ZERO, SymMat3::IDENTITY);
  let mut b = a.clone();
  a.color = Vec3::new(0.0, 0.0, 0.0);
  b.color = Vec3::new(0.3, 0.4, 0.0);
  assert!((color_delta(&a, &b) - 0.5).abs() < 1e-6);
  assert_eq!(color_delta(&a, &b), color_delta(&b, &a));
}

// =========================================================================
// KL divergence
// =========================================================================

#[test]
fn test_kld_of_identical_is_zero() {
  let c = component(Vec3::ONE, SymMat3::new(2.0, 0.3, 0.1, 1.0, 0.2, 0.5));
  assert!(kl_divergence(&c, &c).abs() < 1e-5);
}

#[test]
fn test_kld_shifted_mean() {
  let parent = component(Vec3::ZERO, SymMat3::isotropic(0.25));
  let child = component(Vec3::X, SymMat3::isotropic(0.25));
  // 0.5 · d² / σ² = 0.5 · 1 / 0.25
  assert!((kl_divergence(&child, &parent) - 2.0).abs() < 1e-5);
}

#[test]
fn test_kld_scaled_covariance() {
  let s: f32 = 2.0;
  let parent = component(Vec3::ZERO, SymMat3::IDENTITY);
  let child = component(Vec3::ZERO, SymMat3::isotropic(s));
  let expected = 0.5 * (3.0 * s - 3.0 - 3.0 * s.ln());
  assert!((kl_divergence(&child, &parent) - expected).abs() < 1e-5);
}

#[test]
fn test_kld_is_asymmetric() {
  let a = component(Vec3::ZERO, SymMat3::IDENTITY);
  let b = component(Vec3::ZERO, SymMat3::isotropic(4.0));
  assert!((kl_divergence(&a, &b) - kl_divergence(&b, &a)).abs() > 0.1);
}

#[test]
fn test_kld_singular_parent_is_not_finite() {
  let parent = component(Vec3::ZERO, SymMat3::diag(Vec3::new(1.0, 1.0, 0.0)));
  let child = component(Vec3::X, SymMat3::IDENTITY);
  assert!(!kl_divergence(&child, &parent).is_finite());
}

// =========================================================================
// Likelihoods
// =========================================================================

#[test]
fn test_default_policy_is_opacity() {
  assert_eq!(Likelihood::default(), Likelihood::Opacity);
}

#[test]
fn test_opacity_likelihood() {
  let mut c = component(Vec3::ZERO, SymMat3::diag(Vec3::new(4.0, 1.0, 1.0)));
  c.opacity = 0.5;
  assert!((opacity_likelihood(&c) - 1.0).abs() < 1e-6);
  assert_eq!(Likelihood::Opacity.evaluate(&c, &c), opacity_likelihood(&c));
}

#[test]
fn test_gaussian_likelihood_identical_unit() {
  let c = component(Vec3::ZERO, SymMat3::IDENTITY);
  let expected = 0.063_493_636 * (-1.5f32).exp();
  assert!((gaussian_likelihood(&c, &c) - expected).abs() < 1e-7);
}

#[test]
fn test_gaussian_likelihood_raised_to_weight() {
  let parent = component(Vec3::ZERO, SymMat3::IDENTITY);
  let mut child = parent.clone();
  let single = gaussian_likelihood(&parent, &child);
  child.weight = 3.0;
  let triple = gaussian_likelihood(&parent, &child);
  assert!((triple - single.powi(3)).abs() < 1e-9);
}

#[test]
fn test_gaussian_likelihood_decreases_with_distance() {
  let parent = component(Vec3::ZERO, SymMat3::IDENTITY);
  let near = component(Vec3::X * 0.5, SymMat3::IDENTITY);
  let far = component(Vec3::X * 2.0, SymMat3::IDENTITY);
  assert!(gaussian_likelihood(&parent, &near) > gaussian_likelihood(&parent, &far));
}

#[test]
fn test_weighted_clamps() {
  let mut parent = component(Vec3::ZERO, SymMat3::IDENTITY);
  parent.weight = 2.0;

  let mut transparent = parent.clone();
  transparent.opacity = 0.0;
  assert_eq!(
    Likelihood::Opacity.weighted(&parent, &transparent),
    2.0 * MIN_LIKELIHOOD
  );

  let mut huge = parent.clone();
  huge.opacity = 1e12;
  assert_eq!(Likelihood::Opacity.weighted(&parent, &huge), 2.0 * MAX_LIKELIHOOD);
}

#[test]
fn test_weighted_nan_counts_as_minimum() {
  let parent = component(Vec3::ZERO, SymMat3::IDENTITY);
  // Negative determinant: sqrt is NaN.
  let child = component(Vec3::ZERO, SymMat3::diag(Vec3::new(-1.0, 1.0, 1.0)));
  assert!(opacity_likelihood(&child).is_nan());
  assert_eq!(Likelihood::Opacity.weighted(&parent, &child), MIN_LIKELIHOOD);
}
