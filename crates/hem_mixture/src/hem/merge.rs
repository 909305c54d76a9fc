//! Weighted merge of a parent's claimed children into one component.

use glam::Vec3;

use super::claims::{LevelClaims, ParentClaim};
use crate::covariance::SymMat3;
use crate::mixture::{Component, FeatureVector};

/// Directional mean of child normals.
///
/// Children are flipped into the hemisphere of the parent normal. The merged
/// spread is the mean child spread plus the circular dispersion
/// `-2·ln(R̄)` of the flipped unit normals.
#[derive(Clone, Copy, Debug)]
pub struct NormalAccumulator {
  reference: Vec3,
  resultant: Vec3,
  spread: f32,
  weight: f32,
  directed_weight: f32,
}

impl NormalAccumulator {
  /// Accumulator flipping towards `reference` (need not be unit length).
  pub fn new(reference: Vec3) -> Self {
    Self {
      reference,
      resultant: Vec3::ZERO,
      spread: 0.0,
      weight: 0.0,
      directed_weight: 0.0,
    }
  }

  /// Add one child's normal-variance vector with merge weight `w`.
  pub fn add(&mut self, normal_variance: Vec3, w: f32) {
    let spread = normal_variance.length();
    self.spread += w * spread;
    self.weight += w;

    // A zero vector carries spread but no direction.
    if spread > 0.0 {
      let mut normal = normal_variance / spread;
      if normal.dot(self.reference) < 0.0 {
        normal = -normal;
      }
      self.resultant += normal * w;
      self.directed_weight += w;
    }
  }

  /// Merged normal-variance vector.
  ///
  /// Falls back to `fallback` (a unit direction or zero) when the resultant
  /// vanishes.
  pub fn finish(&self, fallback: Vec3) -> Vec3 {
    if !(self.weight > 0.0) {
      return Vec3::ZERO;
    }
    let mean_spread = self.spread / self.weight;
    let length = self.resultant.length();
    if !(length > 0.0) {
      return fallback * mean_spread;
    }

    let mean_resultant = (length / self.directed_weight).min(1.0);
    let dispersion = -2.0 * mean_resultant.ln();
    self.resultant / length * (mean_spread + dispersion)
  }
}

/// Merge the children of `claim`, weighting each by `r(s, i) · weight_i`.
///
/// The covariance is accumulated relative to the parent mean and re-centered
/// on the merged mean. It is not conditioned. Returns `None` when the total
/// merge weight is not a positive finite number.
pub fn merge_claim(
  components: &[Component],
  claims: &LevelClaims,
  claim: &ParentClaim,
) -> Option<Component> {
  let parent = &components[claim.parent];

  let mut total = 0.0f32;
  let mut mean = Vec3::ZERO;
  let mut color = Vec3::ZERO;
  let mut covariance = SymMat3::ZERO;
  let mut opacity = 0.0f32;
  let mut features = FeatureVector::zeros(parent.features.len());
  let mut normals = NormalAccumulator::new(parent.normal_variance);

  for (k, &i) in claim.children.iter().enumerate() {
    let child = &components[i];
    let w = claims.responsibility(claim, k) * child.weight;

    total += w;
    mean += child.mean * w;
    color += child.color * w;
    covariance += (child.covariance + SymMat3::outer(child.mean - parent.mean)) * w;
    opacity += child.opacity * w;
    features.add_scaled(&child.features, w);
    normals.add(child.normal_variance, w);
  }

  if !(total > 0.0 && total.is_finite()) {
    return None;
  }

  let inv = 1.0 / total;
  let mean = mean * inv;
  features.scale(inv);

  Some(Component {
    mean,
    color: color * inv,
    covariance: covariance * inv - SymMat3::outer(mean - parent.mean),
    opacity: opacity * inv,
    weight: total,
    normal_variance: normals.finish(parent.normal()),
    features,
    is_parent: false,
  })
}
