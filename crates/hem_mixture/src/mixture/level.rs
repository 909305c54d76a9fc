//! Public structure-of-arrays form of one level of detail.

use glam::Vec3;

use super::{Component, FeatureVector};
use crate::covariance::SymMat3;
use crate::error::{MixtureError, Result};

/// One level of detail as parallel attribute arrays.
///
/// Serialized field names match the JSON interchange format: `xyz`, `colors`,
/// `covariance` (six upper-triangle entries each), `opacities`, `features`.
#[derive(Clone, Debug, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MixtureLevel {
  #[cfg_attr(feature = "serde", serde(rename = "xyz"))]
  pub positions: Vec<Vec3>,
  pub colors: Vec<Vec3>,
  #[cfg_attr(feature = "serde", serde(rename = "covariance"))]
  pub covariances: Vec<SymMat3>,
  pub opacities: Vec<f32>,
  pub features: Vec<FeatureVector>,
}

impl MixtureLevel {
  #[inline]
  pub fn len(&self) -> usize {
    self.positions.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.positions.is_empty()
  }

  /// Check that the level is non-empty, all arrays have the same length, all
  /// feature vectors share one length, and all positions and covariances are
  /// finite.
  ///
  /// Returns the common feature length.
  pub fn validate(&self) -> Result<usize> {
    let n = self.len();
    if n == 0 {
      return Err(MixtureError::EmptyInput("initial level has no positions"));
    }

    let lengths = [
      ("colors", self.colors.len()),
      ("covariance", self.covariances.len()),
      ("opacities", self.opacities.len()),
      ("features", self.features.len()),
    ];
    for (field, found) in lengths {
      if found != n {
        return Err(MixtureError::LengthMismatch {
          field,
          expected: n,
          found,
        });
      }
    }

    let feature_len = self.features[0].len();
    if let Some((index, f)) = self
      .features
      .iter()
      .enumerate()
      .find(|(_, f)| f.len() != feature_len)
    {
      return Err(MixtureError::FeatureLengthMismatch {
        index,
        expected: feature_len,
        found: f.len(),
      });
    }

    if let Some(index) = self.positions.iter().position(|p| !p.is_finite()) {
      return Err(MixtureError::NonFinitePosition(index));
    }
    if let Some(index) = self.covariances.iter().position(|c| !c.is_finite()) {
      return Err(MixtureError::NonFiniteCovariance(index));
    }

    Ok(feature_len)
  }

  /// Validated conversion into input components (unit weight, initial normal
  /// estimate, no parent flag).
  pub fn to_components(&self) -> Result<Vec<Component>> {
    self.validate()?;
    Ok(
      (0..self.len())
        .map(|i| {
          Component::new(
            self.positions[i],
            self.colors[i],
            self.covariances[i],
            self.opacities[i],
            self.features[i].clone(),
          )
        })
        .collect(),
    )
  }

  /// Gather the public attributes of `components`.
  pub fn from_components(components: &[Component]) -> Self {
    let mut level = Self::with_capacity(components.len());
    for c in components {
      level.push(c);
    }
    level
  }

  pub fn with_capacity(capacity: usize) -> Self {
    Self {
      positions: Vec::with_capacity(capacity),
      colors: Vec::with_capacity(capacity),
      covariances: Vec::with_capacity(capacity),
      opacities: Vec::with_capacity(capacity),
      features: Vec::with_capacity(capacity),
    }
  }

  /// Append the public attributes of one component.
  pub fn push(&mut self, component: &Component) {
    self.positions.push(component.mean);
    self.colors.push(component.color);
    self.covariances.push(component.covariance);
    self.opacities.push(component.opacity);
    self.features.push(component.features.clone());
  }
}

#[cfg(test)]
#[path = "level_test.rs"]
mod level_test;
