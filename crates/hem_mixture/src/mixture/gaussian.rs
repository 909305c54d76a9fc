//! Pairwise measures between Gaussians: distances, divergence, likelihoods.

use glam::Vec3;

use super::Component;
use crate::covariance::SymMat3;

/// `(2π)^(-3/2)`, normalization of the trivariate Gaussian.
const GAUSSIAN_NORM_3D: f32 = 0.063_493_636;

/// Lower clamp of a single likelihood term.
pub const MIN_LIKELIHOOD: f32 = f32::MIN_POSITIVE;
/// Upper clamp of a single likelihood term.
pub const MAX_LIKELIHOOD: f32 = 1e8;

/// Squared Mahalanobis distance between `x` and `y` under `covariance`.
#[inline]
pub fn squared_mahalanobis(x: Vec3, y: Vec3, covariance: &SymMat3) -> f32 {
  covariance.inverse().quadratic_form(x - y)
}

/// `KL(child ‖ parent)` in closed form.
///
/// Non-finite when either covariance is singular.
pub fn kl_divergence(child: &Component, parent: &Component) -> f32 {
  let parent_inv = parent.covariance.inverse();
  let smd = parent_inv.quadratic_form(child.mean - parent.mean);
  let trace = parent_inv.product_trace(&child.covariance);
  let log_det_ratio = (child.covariance.determinant() / parent.covariance.determinant()).ln();
  0.5 * (smd + trace - 3.0 - log_det_ratio)
}

/// Euclidean distance between the two colors.
#[inline]
pub fn color_delta(child: &Component, parent: &Component) -> f32 {
  child.color.distance(parent.color)
}

/// Weighting policy for parent/child pairs.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(rename_all = "snake_case")
)]
pub enum Likelihood {
  /// `opacity_i · sqrt(det Σi)`. Cheap and independent of the parent.
  #[default]
  Opacity,
  /// Expected Gaussian likelihood of the child under the parent, raised to the
  /// child weight.
  Gaussian,
}

impl Likelihood {
  /// Unclamped likelihood of `child` under `parent`.
  pub fn evaluate(self, parent: &Component, child: &Component) -> f32 {
    match self {
      Likelihood::Opacity => opacity_likelihood(child),
      Likelihood::Gaussian => gaussian_likelihood(parent, child),
    }
  }

  /// `weight_parent · clamp(L, MIN_LIKELIHOOD, MAX_LIKELIHOOD)`.
  ///
  /// A NaN likelihood counts as the minimum.
  pub fn weighted(self, parent: &Component, child: &Component) -> f32 {
    let l = self.evaluate(parent, child);
    let l = if l.is_nan() {
      MIN_LIKELIHOOD
    } else {
      l.clamp(MIN_LIKELIHOOD, MAX_LIKELIHOOD)
    };
    parent.weight * l
  }
}

/// `opacity · sqrt(det Σ)` of `child`.
#[inline]
pub fn opacity_likelihood(child: &Component) -> f32 {
  child.opacity * child.covariance.determinant().sqrt()
}

/// `[N(μc; μp, Σp) · exp(-tr(Σp⁻¹Σc)/2)]^weight_c`.
pub fn gaussian_likelihood(parent: &Component, child: &Component) -> f32 {
  let parent_inv = parent.covariance.inverse();
  let smd = parent_inv.quadratic_form(parent.mean - child.mean);
  let trace = parent_inv.product_trace(&child.covariance);

  let exponent = -0.5 * (smd + trace);
  let f = GAUSSIAN_NORM_3D * parent_inv.determinant().sqrt() * exponent.exp();
  f.powf(child.weight)
}

#[cfg(test)]
#[path = "gaussian_test.rs"]
mod gaussian_test;
