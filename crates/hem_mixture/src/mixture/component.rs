//! A single Gaussian primitive with its merge bookkeeping.

use glam::Vec3;

use super::FeatureVector;
use crate::covariance::SymMat3;
use crate::error::{MixtureError, Result};

/// Length of the normal-variance vector given to input components.
///
/// The variance is encoded in the vector length, so it cannot be zero.
pub const INITIAL_NORMAL_VARIANCE: f32 = 0.001;

/// One Gaussian of a mixture level.
#[derive(Clone, Debug, PartialEq)]
pub struct Component {
  pub mean: Vec3,
  pub color: Vec3,
  /// Kept positive semi-definite by the producer. Merged covariances are not
  /// force-conditioned.
  pub covariance: SymMat3,
  pub opacity: f32,
  /// Number of input points this component summarizes (fractional).
  pub weight: f32,
  /// Surface normal scaled by the circular variance of its estimate.
  pub normal_variance: Vec3,
  pub features: FeatureVector,
  /// Whether this component may absorb neighbors in the next reduction step.
  pub is_parent: bool,
}

impl Component {
  /// Input component with unit weight and the initial normal estimate taken
  /// from the minor covariance axis.
  pub fn new(
    mean: Vec3,
    color: Vec3,
    covariance: SymMat3,
    opacity: f32,
    features: FeatureVector,
  ) -> Self {
    Self {
      mean,
      color,
      covariance,
      opacity,
      weight: 1.0,
      normal_variance: initial_normal_variance(&covariance),
      features,
      is_parent: false,
    }
  }

  /// Unit normal, or zero when no estimate is stored.
  #[inline]
  pub fn normal(&self) -> Vec3 {
    self.normal_variance.normalize_or_zero()
  }

  /// Circular variance of the normal estimate.
  #[inline]
  pub fn normal_spread(&self) -> f32 {
    self.normal_variance.length()
  }

  /// Conservative search radius `distance_delta · sqrt(λmax)`.
  ///
  /// NaN for non-finite or indefinite covariances.
  #[inline]
  pub fn merge_radius(&self, distance_delta: f32) -> f32 {
    distance_delta * self.covariance.eigenvalues().z.sqrt()
  }
}

/// `INITIAL_NORMAL_VARIANCE · v0` with `v0` the minor eigenvector of `covariance`.
pub fn initial_normal_variance(covariance: &SymMat3) -> Vec3 {
  covariance.eigensystem().minor_axis() * INITIAL_NORMAL_VARIANCE
}

/// Feature length shared by all `components`.
///
/// Fails on an empty slice or on the first component whose feature vector
/// differs in length from the first one.
pub fn common_feature_len(components: &[Component]) -> Result<usize> {
  let first = components
    .first()
    .ok_or(MixtureError::EmptyInput("no components"))?;
  let expected = first.features.len();
  match components
    .iter()
    .position(|c| c.features.len() != expected)
  {
    Some(index) => Err(MixtureError::FeatureLengthMismatch {
      index,
      expected,
      found: components[index].features.len(),
    }),
    None => Ok(expected),
  }
}

/// Check components handed in directly before any reduction runs.
///
/// Every component needs the common feature length, a finite mean and
/// covariance and a finite weight > 0. Returns the feature length.
pub fn validate_components(components: &[Component]) -> Result<usize> {
  let feature_len = common_feature_len(components)?;
  for (index, c) in components.iter().enumerate() {
    if !c.mean.is_finite() {
      return Err(MixtureError::NonFinitePosition(index));
    }
    if !c.covariance.is_finite() {
      return Err(MixtureError::NonFiniteCovariance(index));
    }
    if !(c.weight > 0.0 && c.weight.is_finite()) {
      return Err(MixtureError::InvalidWeight {
        index,
        weight: c.weight,
      });
    }
  }
  Ok(feature_len)
}
