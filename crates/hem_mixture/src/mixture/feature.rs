//! Fixed-length auxiliary attribute vectors.

/// Per-component feature coefficients (e.g. spherical harmonics).
///
/// Every component of a level carries a vector of the same length. Merging
/// uses the same weighted average as color.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(transparent)
)]
pub struct FeatureVector(Vec<f32>);

impl FeatureVector {
  /// All-zero vector of `len` entries.
  pub fn zeros(len: usize) -> Self {
    Self(vec![0.0; len])
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.0.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.0.is_empty()
  }

  #[inline]
  pub fn as_slice(&self) -> &[f32] {
    &self.0
  }

  #[inline]
  pub fn into_inner(self) -> Vec<f32> {
    self.0
  }

  /// `self += weight * other`.
  pub fn add_scaled(&mut self, other: &FeatureVector, weight: f32) {
    debug_assert_eq!(self.len(), other.len(), "feature length mismatch");
    for (a, b) in self.0.iter_mut().zip(&other.0) {
      *a += weight * b;
    }
  }

  /// `self *= factor`.
  pub fn scale(&mut self, factor: f32) {
    for a in &mut self.0 {
      *a *= factor;
    }
  }

  pub fn is_finite(&self) -> bool {
    self.0.iter().all(|v| v.is_finite())
  }
}

impl From<Vec<f32>> for FeatureVector {
  fn from(values: Vec<f32>) -> Self {
    Self(values)
  }
}

impl From<&[f32]> for FeatureVector {
  fn from(values: &[f32]) -> Self {
    Self(values.to_vec())
  }
}

impl AsRef<[f32]> for FeatureVector {
  fn as_ref(&self) -> &[f32] {
    &self.0
  }
}
