//! Hierarchical EM clustering.
//!
//! - [`config`]: `HemConfig` reduction parameters
//! - [`claims`]: parent selection and child admission
//! - [`merge`]: weighted statistics of a parent's children
//! - [`step`]: one full reduction step
//! - [`engine`]: `HemMixture`, the level-by-level driver

pub mod claims;
pub mod config;
pub mod engine;
pub mod merge;
pub mod stats;
pub mod step;

#[cfg(test)]
pub(crate) mod test_utils;

pub use claims::{LevelClaims, ParentClaim};
pub use config::HemConfig;
pub use engine::{build_mixture_levels, HemMixture};
pub use merge::{merge_claim, NormalAccumulator};
pub use stats::LevelStats;
pub use step::{reduce_level, LevelReduction};
