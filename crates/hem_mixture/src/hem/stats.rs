//! Per-level reduction statistics.

use std::fmt;

/// What one reduction step did.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct LevelStats {
  /// Index of the produced level (the initial level is 0).
  pub level: usize,
  /// Components in the input level.
  pub input_count: usize,
  /// Flagged parents that took part in the step.
  pub parent_count: usize,
  /// Flagged parents skipped because their search radius was not finite.
  pub demoted_parents: usize,
  /// Parents whose children were merged into a new component.
  pub merged_count: usize,
  /// Parents carried forward unchanged because their merge weight vanished.
  /// Together with `merged_count` this is one output per parent.
  pub unmerged_parents: usize,
  /// Input components claimed by no parent.
  pub orphan_count: usize,
  /// Components in the output level.
  pub output_count: usize,
  /// Cell size of the neighbor index (largest parent search radius).
  pub search_radius: f32,
  /// Wall time of the step in microseconds.
  pub elapsed_us: u64,
}

impl LevelStats {
  /// `input_count / output_count`, or 1 for an empty output.
  pub fn reduction_ratio(&self) -> f32 {
    if self.output_count == 0 {
      return 1.0;
    }
    self.input_count as f32 / self.output_count as f32
  }
}

impl fmt::Display for LevelStats {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(
      f,
      "level {}: {} -> {} components ({} parents, {} orphans",
      self.level, self.input_count, self.output_count, self.parent_count, self.orphan_count,
    )?;
    if self.unmerged_parents > 0 {
      write!(f, ", {} unmerged", self.unmerged_parents)?;
    }
    write!(
      f,
      ", x{:.2}) in {:.2}ms",
      self.reduction_ratio(),
      self.elapsed_us as f64 / 1000.0
    )
  }
}
