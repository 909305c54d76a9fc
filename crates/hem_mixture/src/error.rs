//! Error types for mixture construction and reduction.

use thiserror::Error;

/// Result alias used throughout `hem_mixture`.
pub type Result<T> = std::result::Result<T, MixtureError>;

/// Configuration and input errors.
///
/// All of these are raised before any level is processed. Numerical
/// degeneracies inside a reduction step are recovered locally and never
/// surface here.
#[derive(Debug, Error)]
pub enum MixtureError {
  /// The initial level (or a point set handed to the index) has no entries.
  #[error("empty input: {0}")]
  EmptyInput(&'static str),

  /// One of the parallel attribute arrays has a different length.
  #[error("attribute `{field}` has {found} entries, expected {expected}")]
  LengthMismatch {
    field: &'static str,
    expected: usize,
    found: usize,
  },

  /// A feature vector length differs from the first component's.
  #[error("feature vector {index} has length {found}, expected {expected}")]
  FeatureLengthMismatch {
    index: usize,
    expected: usize,
    found: usize,
  },

  /// A reduction parameter is out of range.
  #[error("invalid parameter `{name}` = {value}: {reason}")]
  InvalidParameter {
    name: &'static str,
    value: f32,
    reason: &'static str,
  },

  /// Grid cell size must be finite and positive.
  #[error("invalid cell size {0}: must be finite and > 0")]
  InvalidCellSize(f32),

  /// Grid would need more cells per axis than integer coordinates allow.
  #[error("cell size {cell_size} is too small for an extent of {extent}")]
  CellSizeTooSmall { cell_size: f32, extent: f32 },

  /// A position is NaN or infinite.
  #[error("position {0} is not finite")]
  NonFinitePosition(usize),

  /// A component weight is zero, negative or not finite.
  #[error("component {index} has weight {weight}, expected a finite value > 0")]
  InvalidWeight { index: usize, weight: f32 },

  /// A covariance has a NaN or infinite entry.
  #[error("covariance {0} is not finite")]
  NonFiniteCovariance(usize),

  /// Batch query slices do not line up.
  #[error("batch query has {points} points but {radii} radii")]
  QueryMismatch { points: usize, radii: usize },

  /// JSON (de)serialization failure.
  #[cfg(feature = "serde")]
  #[error("json: {0}")]
  Json(#[from] serde_json::Error),
}
