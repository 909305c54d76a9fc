//! HemConfig - parameters of one hierarchical reduction run.

use crate::error::{MixtureError, Result};
use crate::mixture::Likelihood;

/// Parameters shared by every reduction step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct HemConfig {
  /// Expected shrink factor per level. Each component becomes a parent with
  /// probability `1 / hem_reduction_factor`. Must be > 1.
  pub hem_reduction_factor: f32,

  /// Merge gate in standard deviations. Scales the parent search radius
  /// (`distance_delta · sqrt(λmax)`) and bounds the KL divergence
  /// (`distance_delta² / 2`).
  pub distance_delta: f32,

  /// Color gate. A child whose color lies further than `color_delta² / 2`
  /// from the parent's is not merged.
  pub color_delta: f32,

  /// Likelihood policy for responsibilities.
  pub likelihood: Likelihood,
}

impl HemConfig {
  /// Probability of a component being drawn as a parent.
  #[inline]
  pub fn parent_probability(&self) -> f64 {
    1.0 / self.hem_reduction_factor as f64
  }

  /// Upper bound on `KL(child ‖ parent)` for admission.
  #[inline]
  pub fn max_divergence(&self) -> f32 {
    self.distance_delta * self.distance_delta * 0.5
  }

  /// Upper bound on the color distance for admission.
  #[inline]
  pub fn max_color_delta(&self) -> f32 {
    self.color_delta * self.color_delta * 0.5
  }

  pub fn with_hem_reduction_factor(mut self, factor: f32) -> Self {
    self.hem_reduction_factor = factor;
    self
  }

  pub fn with_distance_delta(mut self, delta: f32) -> Self {
    self.distance_delta = delta;
    self
  }

  pub fn with_color_delta(mut self, delta: f32) -> Self {
    self.color_delta = delta;
    self
  }

  pub fn with_likelihood(mut self, likelihood: Likelihood) -> Self {
    self.likelihood = likelihood;
    self
  }

  /// Reject out-of-range parameters before any level is processed.
  pub fn validate(&self) -> Result<()> {
    // Written to also reject NaN.
    if !(self.hem_reduction_factor > 1.0 && self.hem_reduction_factor.is_finite()) {
      return Err(MixtureError::InvalidParameter {
        name: "hem_reduction_factor",
        value: self.hem_reduction_factor,
        reason: "must be finite and > 1",
      });
    }
    for (name, value) in [
      ("distance_delta", self.distance_delta),
      ("color_delta", self.color_delta),
    ] {
      if !(value >= 0.0 && value.is_finite()) {
        return Err(MixtureError::InvalidParameter {
          name,
          value,
          reason: "must be finite and >= 0",
        });
      }
    }
    Ok(())
  }
}

impl Default for HemConfig {
  fn default() -> Self {
    Self {
      hem_reduction_factor: 3.0,
      distance_delta: 2.5,
      color_delta: 2.5,
      likelihood: Likelihood::default(),
    }
  }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;
