//! One HEM reduction step: claims, merge, orphan pass-through.

use rayon::prelude::*;
use web_time::Instant;

use super::claims::LevelClaims;
use super::merge::merge_claim;
use super::{HemConfig, LevelStats};
use crate::mixture::Component;

/// Output of [`reduce_level`].
#[derive(Clone, Debug, Default)]
pub struct LevelReduction {
  /// Merged components in parent order, then orphans in input order. No
  /// component is flagged as a parent.
  pub components: Vec<Component>,
  pub stats: LevelStats,
}

/// Reduce `components` into the next coarser level.
///
/// Components flagged `is_parent` absorb their admitted neighbors. Every
/// component claimed by no parent is carried forward unchanged, and so is a
/// parent whose merge weight vanished. The output never holds more components
/// than the input. A level without parents passes through as is. Parent flags
/// of the output are left cleared for the caller to redraw.
#[tracing::instrument(skip_all, name = "hem::reduce_level", fields(components = components.len()))]
pub fn reduce_level(components: &[Component], config: &HemConfig) -> LevelReduction {
  let start = Instant::now();

  let claims = {
    let _span = tracing::info_span!("gather_claims").entered();
    LevelClaims::gather(components, config)
  };

  let merges: Vec<Option<Component>> = {
    let _span = tracing::info_span!("merge_parents").entered();
    claims
      .claims
      .par_iter()
      .map(|claim| merge_claim(components, &claims, claim))
      .collect()
  };

  let mut output = Vec::with_capacity(components.len());
  let mut unmerged_parents = 0;
  for (claim, merged) in claims.claims.iter().zip(merges) {
    match merged {
      Some(component) => output.push(component),
      None => {
        tracing::warn!(
          parent = claim.parent,
          "merge weight vanished, keeping parent unchanged"
        );
        unmerged_parents += 1;
        output.push(unflagged(&components[claim.parent]));
      }
    }
  }
  let parent_outputs = output.len();

  // Participating parents are never orphans, so nothing is emitted twice.
  output.extend(claims.orphans().map(|i| unflagged(&components[i])));
  let orphan_count = output.len() - parent_outputs;

  let stats = LevelStats {
    level: 0,
    input_count: components.len(),
    parent_count: claims.claims.len(),
    demoted_parents: claims.demoted_parents,
    merged_count: parent_outputs - unmerged_parents,
    unmerged_parents,
    orphan_count,
    output_count: output.len(),
    search_radius: claims.search_radius,
    elapsed_us: start.elapsed().as_micros() as u64,
  };

  tracing::debug!(
    input = stats.input_count,
    parents = stats.parent_count,
    orphans = stats.orphan_count,
    unmerged = stats.unmerged_parents,
    output = stats.output_count,
    radius = stats.search_radius,
    "reduced level"
  );

  LevelReduction {
    components: output,
    stats,
  }
}

fn unflagged(component: &Component) -> Component {
  Component {
    is_parent: false,
    ..component.clone()
  }
}

#[cfg(test)]
#[path = "step_test.rs"]
mod step_test;
