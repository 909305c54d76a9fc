//! Six-entry symmetric 3×3 matrix.
//!
//! Stores only the upper triangle:
//!
//! ```text
//! | e00 e01 e02 |
//! | e01 e11 e12 |
//! | e02 e12 e22 |
//! ```

use std::ops::{Add, AddAssign, Div, Mul, Neg, Sub};

use glam::{Mat3, Vec3};

/// Symmetric 3×3 matrix, typically a covariance.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
#[cfg_attr(
  feature = "serde",
  derive(serde::Serialize, serde::Deserialize),
  serde(from = "[f32; 6]", into = "[f32; 6]")
)]
pub struct SymMat3 {
  pub e00: f32,
  pub e01: f32,
  pub e02: f32,
  pub e11: f32,
  pub e12: f32,
  pub e22: f32,
}

impl SymMat3 {
  pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0, 0.0, 0.0);
  pub const IDENTITY: Self = Self::new(1.0, 0.0, 0.0, 1.0, 0.0, 1.0);

  /// Create from upper-triangle entries (row-major).
  #[inline]
  pub const fn new(e00: f32, e01: f32, e02: f32, e11: f32, e12: f32, e22: f32) -> Self {
    Self {
      e00,
      e01,
      e02,
      e11,
      e12,
      e22,
    }
  }

  /// Diagonal matrix with `v` on the diagonal.
  #[inline]
  pub fn diag(v: Vec3) -> Self {
    Self::new(v.x, 0.0, 0.0, v.y, 0.0, v.z)
  }

  /// Isotropic matrix `s * I`.
  #[inline]
  pub fn isotropic(s: f32) -> Self {
    Self::new(s, 0.0, 0.0, s, 0.0, s)
  }

  /// Outer product `v * vᵀ`.
  #[inline]
  pub fn outer(v: Vec3) -> Self {
    Self::new(
      v.x * v.x,
      v.x * v.y,
      v.x * v.z,
      v.y * v.y,
      v.y * v.z,
      v.z * v.z,
    )
  }

  /// Symmetric part `(m + mᵀ) / 2` of a general matrix.
  pub fn from_mat3(m: &Mat3) -> Self {
    let r = m.transpose();
    let s = (*m + r) * 0.5;
    Self::new(
      s.x_axis.x, s.y_axis.x, s.z_axis.x, s.y_axis.y, s.z_axis.y, s.z_axis.z,
    )
  }

  /// Expand to a full glam matrix.
  #[inline]
  pub fn to_mat3(&self) -> Mat3 {
    // Symmetric: columns equal rows.
    Mat3::from_cols(self.row(0), self.row(1), self.row(2))
  }

  #[inline]
  pub fn to_array(&self) -> [f32; 6] {
    [self.e00, self.e01, self.e02, self.e11, self.e12, self.e22]
  }

  /// Row (equivalently column) `i` as a vector.
  #[inline]
  pub fn row(&self, i: usize) -> Vec3 {
    match i {
      0 => Vec3::new(self.e00, self.e01, self.e02),
      1 => Vec3::new(self.e01, self.e11, self.e12),
      _ => Vec3::new(self.e02, self.e12, self.e22),
    }
  }

  #[inline]
  pub fn diagonal(&self) -> Vec3 {
    Vec3::new(self.e00, self.e11, self.e22)
  }

  #[inline]
  pub fn trace(&self) -> f32 {
    self.e00 + self.e11 + self.e22
  }

  /// `tr(self · other)` without forming the product.
  #[inline]
  pub fn product_trace(&self, other: &SymMat3) -> f32 {
    self.e00 * other.e00
      + self.e11 * other.e11
      + self.e22 * other.e22
      + 2.0 * (self.e01 * other.e01 + self.e02 * other.e02 + self.e12 * other.e12)
  }

  #[inline]
  pub fn determinant(&self) -> f32 {
    -self.e02 * self.e02 * self.e11 + 2.0 * self.e01 * self.e02 * self.e12
      - self.e00 * self.e12 * self.e12
      - self.e01 * self.e01 * self.e22
      + self.e00 * self.e11 * self.e22
  }

  /// Inverse via the adjugate.
  ///
  /// Like `glam::Mat3::inverse`, a singular matrix yields non-finite entries;
  /// callers that care check `is_finite`.
  #[inline]
  pub fn inverse(&self) -> Self {
    let adj = Self::new(
      self.e11 * self.e22 - self.e12 * self.e12,
      self.e02 * self.e12 - self.e01 * self.e22,
      self.e01 * self.e12 - self.e02 * self.e11,
      self.e00 * self.e22 - self.e02 * self.e02,
      self.e02 * self.e01 - self.e00 * self.e12,
      self.e00 * self.e11 - self.e01 * self.e01,
    );
    adj / self.determinant()
  }

  /// `vᵀ M v`.
  #[inline]
  pub fn quadratic_form(&self, v: Vec3) -> f32 {
    v.dot(*self * v)
  }

  /// Largest absolute entry.
  pub fn max_abs_element(&self) -> f32 {
    self
      .to_array()
      .iter()
      .fold(0.0f32, |acc, e| acc.max(e.abs()))
  }

  pub fn is_finite(&self) -> bool {
    self.to_array().iter().all(|e| e.is_finite())
  }

  /// Component-wise comparison within `tolerance`.
  pub fn abs_diff_eq(&self, other: &Self, tolerance: f32) -> bool {
    self
      .to_array()
      .iter()
      .zip(other.to_array().iter())
      .all(|(a, b)| (a - b).abs() <= tolerance)
  }
}

impl From<[f32; 6]> for SymMat3 {
  fn from(e: [f32; 6]) -> Self {
    Self::new(e[0], e[1], e[2], e[3], e[4], e[5])
  }
}

impl From<SymMat3> for [f32; 6] {
  fn from(m: SymMat3) -> Self {
    m.to_array()
  }
}

impl Add for SymMat3 {
  type Output = Self;

  #[inline]
  fn add(self, c: Self) -> Self {
    Self::new(
      self.e00 + c.e00,
      self.e01 + c.e01,
      self.e02 + c.e02,
      self.e11 + c.e11,
      self.e12 + c.e12,
      self.e22 + c.e22,
    )
  }
}

impl Sub for SymMat3 {
  type Output = Self;

  #[inline]
  fn sub(self, c: Self) -> Self {
    Self::new(
      self.e00 - c.e00,
      self.e01 - c.e01,
      self.e02 - c.e02,
      self.e11 - c.e11,
      self.e12 - c.e12,
      self.e22 - c.e22,
    )
  }
}

impl AddAssign for SymMat3 {
  #[inline]
  fn add_assign(&mut self, c: Self) {
    *self = *self + c;
  }
}

impl Neg for SymMat3 {
  type Output = Self;

  #[inline]
  fn neg(self) -> Self {
    self * -1.0
  }
}

impl Mul<f32> for SymMat3 {
  type Output = Self;

  #[inline]
  fn mul(self, s: f32) -> Self {
    Self::new(
      self.e00 * s,
      self.e01 * s,
      self.e02 * s,
      self.e11 * s,
      self.e12 * s,
      self.e22 * s,
    )
  }
}

impl Mul<SymMat3> for f32 {
  type Output = SymMat3;

  #[inline]
  fn mul(self, m: SymMat3) -> SymMat3 {
    m * self
  }
}

impl Div<f32> for SymMat3 {
  type Output = Self;

  #[inline]
  fn div(self, s: f32) -> Self {
    self * s.recip()
  }
}

impl Mul<Vec3> for SymMat3 {
  type Output = Vec3;

  #[inline]
  fn mul(self, v: Vec3) -> Vec3 {
    Vec3::new(self.row(0).dot(v), self.row(1).dot(v), self.row(2).dot(v))
  }
}

/// Product of two symmetric matrices (not symmetric in general).
impl Mul<SymMat3> for SymMat3 {
  type Output = Mat3;

  #[inline]
  fn mul(self, c: SymMat3) -> Mat3 {
    self.to_mat3() * c.to_mat3()
  }
}

#[cfg(test)]
#[path = "sym_mat3_test.rs"]
mod sym_mat3_test;
