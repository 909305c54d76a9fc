//! HemMixture - level-by-level reduction driver.

use rand::Rng;

use super::step::reduce_level;
use super::{HemConfig, LevelStats};
use crate::assemble::{assemble_levels, LevelSelection};
use crate::error::Result;
use crate::mixture::{validate_components, Component, MixtureLevel};

/// Owns the sequence of levels produced from one initial mixture.
///
/// Level 0 is the initial level. Each call to [`reduce_once`](Self::reduce_once)
/// appends a coarser level built from the last one. Parent flags are drawn
/// from the engine's own generator, so a seeded `R` gives reproducible
/// hierarchies.
pub struct HemMixture<R: Rng> {
  config: HemConfig,
  rng: R,
  feature_len: usize,
  levels: Vec<Vec<Component>>,
  stats: Vec<LevelStats>,
}

impl<R: Rng> HemMixture<R> {
  /// Validate `config` and `initial`, convert to components and draw the
  /// initial parent flags.
  pub fn new(initial: &MixtureLevel, config: HemConfig, mut rng: R) -> Result<Self> {
    config.validate()?;
    let mut components = initial.to_components()?;
    draw_parents(&mut components, config.parent_probability(), &mut rng);
    Self::from_components(components, config, rng)
  }

  /// Start from components that already carry weights, normals and parent
  /// flags.
  ///
  /// Fails on a shared-length violation, a non-finite mean or covariance, or
  /// a weight that is not finite and positive.
  pub fn from_components(components: Vec<Component>, config: HemConfig, rng: R) -> Result<Self> {
    config.validate()?;
    let feature_len = validate_components(&components)?;
    Ok(Self {
      config,
      rng,
      feature_len,
      levels: vec![components],
      stats: Vec::new(),
    })
  }

  #[inline]
  pub fn config(&self) -> &HemConfig {
    &self.config
  }

  /// Feature length shared by every component.
  #[inline]
  pub fn feature_len(&self) -> usize {
    self.feature_len
  }

  /// All levels so far, the initial one first.
  #[inline]
  pub fn levels(&self) -> &[Vec<Component>] {
    &self.levels
  }

  /// The coarsest level so far.
  #[inline]
  pub fn current(&self) -> &[Component] {
    self.levels.last().map(Vec::as_slice).unwrap_or_default()
  }

  /// Statistics of every reduction step, `stats()[k]` produced level `k + 1`.
  #[inline]
  pub fn stats(&self) -> &[LevelStats] {
    &self.stats
  }

  /// Append one coarser level and redraw its parent flags.
  pub fn reduce_once(&mut self) -> &LevelStats {
    let level = self.levels.len();
    let _span = tracing::info_span!("hem_level", level).entered();

    let reduction = reduce_level(self.current(), &self.config);
    let mut components = reduction.components;
    draw_parents(&mut components, self.config.parent_probability(), &mut self.rng);

    self.levels.push(components);
    self.stats.push(LevelStats {
      level,
      ..reduction.stats
    });
    &self.stats[self.stats.len() - 1]
  }

  /// Discard reduced levels and build `count` new ones from level 0.
  ///
  /// The initial parent flags are reused. The generator continues its stream.
  pub fn create_levels(&mut self, count: usize) -> &[LevelStats] {
    self.levels.truncate(1);
    self.stats.clear();
    for _ in 0..count {
      self.reduce_once();
    }
    &self.stats
  }

  /// Public levels of the current hierarchy.
  pub fn result(&self, selection: LevelSelection) -> Vec<MixtureLevel> {
    assemble_levels(&self.levels, selection)
  }
}

/// Build `count` reduced levels from `initial` in one call.
///
/// Returns `count + 1` levels with [`LevelSelection::All`] and `count` with
/// [`LevelSelection::SkipInitial`].
pub fn build_mixture_levels<R: Rng>(
  initial: &MixtureLevel,
  count: usize,
  config: HemConfig,
  rng: R,
  selection: LevelSelection,
) -> Result<Vec<MixtureLevel>> {
  let mut mixture = HemMixture::new(initial, config, rng)?;
  mixture.create_levels(count);
  Ok(mixture.result(selection))
}

/// Bernoulli(`probability`) parent flag for every component.
fn draw_parents<R: Rng>(components: &mut [Component], probability: f64, rng: &mut R) {
  for c in components {
    c.is_parent = rng.random_bool(probability);
  }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;
