//! Parent selection and child admission for one reduction step.
//!
//! Every flagged parent searches its own radius and admits the children that
//! pass the color and divergence gates. A parent always admits itself and
//! never admits another parent. Claims are gathered in parallel and combined
//! sequentially in parent order, so the per-child likelihood sums do not
//! depend on thread scheduling.

use glam::Vec3;
use rayon::prelude::*;

use super::HemConfig;
use crate::mixture::{color_delta, kl_divergence, Component};
use crate::spatial::{Aabb3, SpatialHashIndex};

/// Lower bound of the index cell size relative to the extent of the means.
const MIN_CELL_FRACTION: f32 = 1e-6;

/// Children admitted by one parent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ParentClaim {
  /// Index of the parent in the input level.
  pub parent: usize,
  /// Admitted children, starting with the parent itself.
  pub children: Vec<usize>,
  /// `wL(s, i)` for each entry of `children`.
  pub weighted_likelihoods: Vec<f32>,
}

/// All claims of a level plus the per-child normalization.
#[derive(Clone, Debug, Default)]
pub struct LevelClaims {
  /// One claim per participating parent, in input order.
  pub claims: Vec<ParentClaim>,
  /// `sumLw(i)` per input component. Zero marks an orphan unless the
  /// component is a participating parent.
  pub likelihood_sums: Vec<f32>,
  /// Whether each input component took part as a parent.
  pub participating: Vec<bool>,
  /// Largest parent search radius, used as the index cell size.
  pub search_radius: f32,
  /// Flagged parents skipped for a non-finite search radius.
  pub demoted_parents: usize,
}

impl LevelClaims {
  pub fn gather(components: &[Component], config: &HemConfig) -> Self {
    let parents = select_parents(components, config.distance_delta);
    let flagged = components.iter().filter(|c| c.is_parent).count();
    let search_radius = parents.iter().map(|&(_, r)| r).fold(0.0, f32::max);

    let mut participating = vec![false; components.len()];
    for &(s, _) in &parents {
      participating[s] = true;
    }

    let means: Vec<Vec3> = components.iter().map(|c| c.mean).collect();
    let index = build_index(&means, search_radius);

    let claims: Vec<ParentClaim> = parents
      .par_iter()
      .map(|&(s, radius)| claim_children(components, &participating, index.as_ref(), s, radius, config))
      .collect();

    let mut likelihood_sums = vec![0.0f32; components.len()];
    for claim in &claims {
      for (&i, &wl) in claim.children.iter().zip(&claim.weighted_likelihoods) {
        likelihood_sums[i] += wl;
      }
    }

    Self {
      claims,
      likelihood_sums,
      participating,
      search_radius,
      demoted_parents: flagged - parents.len(),
    }
  }

  /// `r(s, i) = wL(s, i) / sumLw(i)` for the `k`-th child of `claim`.
  #[inline]
  pub fn responsibility(&self, claim: &ParentClaim, k: usize) -> f32 {
    let sum = self.likelihood_sums[claim.children[k]];
    if sum > 0.0 {
      claim.weighted_likelihoods[k] / sum
    } else {
      0.0
    }
  }

  /// Claimed by no parent. A participating parent always claims itself, even
  /// when its own likelihood sum vanished.
  #[inline]
  pub fn is_orphan(&self, i: usize) -> bool {
    !self.participating[i] && self.likelihood_sums[i] == 0.0
  }

  /// Unclaimed components in index order.
  pub fn orphans(&self) -> impl Iterator<Item = usize> + '_ {
    (0..self.likelihood_sums.len()).filter(|&i| self.is_orphan(i))
  }
}

/// Flagged parents with a finite search radius, in index order.
fn select_parents(components: &[Component], distance_delta: f32) -> Vec<(usize, f32)> {
  components
    .par_iter()
    .enumerate()
    .filter(|(_, c)| c.is_parent)
    .filter_map(|(s, c)| {
      let radius = c.merge_radius(distance_delta);
      if radius.is_finite() {
        Some((s, radius))
      } else {
        tracing::warn!(parent = s, radius, "demoting parent with non-finite search radius");
        None
      }
    })
    .collect()
}

fn build_index(means: &[Vec3], search_radius: f32) -> Option<SpatialHashIndex<'_>> {
  if !(search_radius > 0.0) {
    return None;
  }
  let extent = Aabb3::from_points(means)?.size().max_element();
  let cell_size = search_radius.max(extent * MIN_CELL_FRACTION);
  match SpatialHashIndex::new(means, cell_size) {
    Ok(index) => Some(index),
    Err(err) => {
      tracing::warn!(%err, "neighbor index unavailable, parents only keep themselves");
      None
    }
  }
}

fn claim_children(
  components: &[Component],
  is_parent: &[bool],
  index: Option<&SpatialHashIndex<'_>>,
  s: usize,
  radius: f32,
  config: &HemConfig,
) -> ParentClaim {
  let parent = &components[s];
  let mut claim = ParentClaim {
    parent: s,
    children: vec![s],
    weighted_likelihoods: vec![config.likelihood.weighted(parent, parent)],
  };

  let Some(index) = index else {
    return claim;
  };

  let max_color = config.max_color_delta();
  let max_divergence = config.max_divergence();

  for i in index.radius_search(parent.mean, radius) {
    if i == s || is_parent[i] {
      continue;
    }
    let child = &components[i];
    if color_delta(child, parent) > max_color {
      continue;
    }
    // NaN divergence (singular covariance) rejects.
    if !(kl_divergence(child, parent) <= max_divergence) {
      continue;
    }
    claim.children.push(i);
    claim
      .weighted_likelihoods
      .push(config.likelihood.weighted(parent, child));
  }

  claim
}

#[cfg(test)]
#[path = "claims_test.rs"]
mod claims_test;
