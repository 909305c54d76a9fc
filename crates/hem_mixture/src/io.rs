//! JSON request/response layer.
//!
//! A request is one mixture level plus reduction parameters:
//!
//! ```json
//! {
//!   "xyz": [[0, 0, 0], ...],
//!   "colors": [[0.5, 0.5, 0.5], ...],
//!   "covariance": [[e00, e01, e02, e11, e12, e22], ...],
//!   "opacities": [1.0, ...],
//!   "features": [[...], ...],
//!   "cluster_level": 4,
//!   "hem_reduction": 3.0,
//!   "distance_delta": 2.5,
//!   "color_delta": 2.5
//! }
//! ```
//!
//! The response is a JSON array of levels in the same format. The initial
//! level is dropped unless `keep_initial` is set.

use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::{Deserialize, Serialize};

use crate::assemble::LevelSelection;
use crate::error::Result;
use crate::hem::{build_mixture_levels, HemConfig};
use crate::mixture::{Likelihood, MixtureLevel};

/// Reduction request with its initial level.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct MixtureRequest {
  #[serde(flatten)]
  pub level: MixtureLevel,
  /// Number of reduction steps.
  pub cluster_level: usize,
  pub hem_reduction: f32,
  pub distance_delta: f32,
  pub color_delta: f32,
  /// Seed for the parent draws. Drawn from the OS when absent.
  #[serde(default)]
  pub seed: Option<u64>,
  #[serde(default)]
  pub keep_initial: bool,
  #[serde(default)]
  pub likelihood: Likelihood,
}

impl MixtureRequest {
  pub fn config(&self) -> HemConfig {
    HemConfig::default()
      .with_hem_reduction_factor(self.hem_reduction)
      .with_distance_delta(self.distance_delta)
      .with_color_delta(self.color_delta)
      .with_likelihood(self.likelihood)
  }

  pub fn selection(&self) -> LevelSelection {
    LevelSelection::keep_initial(self.keep_initial)
  }

  /// Build the requested levels.
  pub fn run(&self) -> Result<Vec<MixtureLevel>> {
    let rng = match self.seed {
      Some(seed) => StdRng::seed_from_u64(seed),
      None => StdRng::from_os_rng(),
    };
    build_mixture_levels(
      &self.level,
      self.cluster_level,
      self.config(),
      rng,
      self.selection(),
    )
  }
}

/// Parse a request, run it and serialize the resulting levels.
pub fn run_request_json(json: &str) -> Result<String> {
  let request: MixtureRequest = serde_json::from_str(json)?;
  let levels = request.run()?;
  Ok(serde_json::to_string(&levels)?)
}

#[cfg(test)]
#[path = "io_test.rs"]
mod io_test;
