//! Conversion of internal component sets into public levels.

use crate::mixture::{Component, MixtureLevel};

/// Which levels to return.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum LevelSelection {
  /// Every level, the initial one first.
  #[default]
  All,
  /// Every reduced level, dropping the initial one.
  SkipInitial,
}

impl LevelSelection {
  /// `SkipInitial` when `keep_initial` is false.
  pub fn keep_initial(keep_initial: bool) -> Self {
    if keep_initial {
      LevelSelection::All
    } else {
      LevelSelection::SkipInitial
    }
  }

  #[inline]
  fn skip(self) -> usize {
    match self {
      LevelSelection::All => 0,
      LevelSelection::SkipInitial => 1,
    }
  }
}

/// Public levels in creation order (finest first).
pub fn assemble_levels<L: AsRef<[Component]>>(
  levels: &[L],
  selection: LevelSelection,
) -> Vec<MixtureLevel> {
  levels
    .iter()
    .skip(selection.skip())
    .map(|components| MixtureLevel::from_components(components.as_ref()))
    .collect()
}
