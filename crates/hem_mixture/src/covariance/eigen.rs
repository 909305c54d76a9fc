//! Closed-form eigendecomposition of symmetric 3×3 matrices.
//!
//! Eigenvalues come from the trigonometric solution of the characteristic
//! cubic. Eigenvectors are recovered by row-reducing `A - λI` and branching on
//! its numerical rank:
//!
//! ```text
//! rank(A - λ0 I)
//!   0 ─► λ0 = λ1 = λ2         standard basis
//!   1 ─► λ0 = λ1 < λ2         complement of the single independent row
//!   2 ─► λ0 < λ1              cross of two rows, then repeat for λ1:
//!          rank(A - λ1 I)
//!            1 ─► λ1 = λ2     complement of v0
//!            2 ─► λ1 < λ2     cross of two rows, v2 = v0 × v1
//! ```
//!
//! All work happens in f64 on a copy normalized by the largest-magnitude
//! entry, then scales back.

use glam::{DVec3, Vec3};

use super::SymMat3;

/// Pivot tolerance for rank estimation on the normalized matrix.
///
/// With a zero tolerance, rounding noise quickly produces a false rank and bad
/// eigenvectors.
pub const RANK_EPSILON: f64 = 2.0 * f32::MIN_POSITIVE as f64;

/// Roots of the normalized cubic closer than this are treated as equal.
///
/// The trigonometric solution loses roughly half its digits near a double
/// root, so the rank test alone misclassifies those matrices.
pub const ROOT_GAP_EPSILON: f64 = 1e-6;

const INV3: f64 = 1.0 / 3.0;
const ROOT3: f64 = 1.732_050_807_568_877_2;

/// Eigenvalues in ascending order with their unit eigenvectors.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Eigensystem {
  /// `x <= y <= z`.
  pub values: Vec3,
  /// `vectors[k]` belongs to eigenvalue `k`. Orthonormal and right-handed.
  pub vectors: [Vec3; 3],
}

impl Eigensystem {
  /// Eigenvector of the smallest eigenvalue (surface normal for flat splats).
  #[inline]
  pub fn minor_axis(&self) -> Vec3 {
    self.vectors[0]
  }

  /// Eigenvector of the largest eigenvalue.
  #[inline]
  pub fn major_axis(&self) -> Vec3 {
    self.vectors[2]
  }

  /// `V · diag(λ) · Vᵀ`.
  pub fn reconstruct(&self) -> SymMat3 {
    let values = self.values.to_array();
    self
      .vectors
      .iter()
      .zip(values)
      .fold(SymMat3::ZERO, |acc, (v, l)| acc + SymMat3::outer(*v) * l)
  }
}

/// Eigenvalues of `m` in ascending order.
///
/// Never NaN for finite input. A zero matrix yields zeros; non-finite input
/// yields NaN.
pub fn eigenvalues(m: &SymMat3) -> Vec3 {
  if !m.is_finite() {
    return Vec3::NAN;
  }
  let scale = m.max_abs_element() as f64;
  if scale == 0.0 {
    return Vec3::ZERO;
  }
  let roots = cubic_roots(&normalized(m, scale));
  to_vec3(roots, scale)
}

/// Full eigendecomposition of `m`.
///
/// Non-finite input returns NaN eigenvalues with the standard basis.
pub fn eigensystem(m: &SymMat3) -> Eigensystem {
  let standard = [Vec3::X, Vec3::Y, Vec3::Z];
  if !m.is_finite() {
    return Eigensystem {
      values: Vec3::NAN,
      vectors: standard,
    };
  }
  let scale = m.max_abs_element() as f64;
  if scale == 0.0 {
    return Eigensystem {
      values: Vec3::ZERO,
      vectors: standard,
    };
  }

  let a = normalized(m, scale);
  let roots = cubic_roots(&a);
  let [l0, l1, l2] = roots;

  let mut reduced = deflate(&a, l0);
  let rank0 = compute_rank(&mut reduced, RANK_EPSILON);

  let vectors = if rank0 == 0 || l2 - l0 <= ROOT_GAP_EPSILON {
    [DVec3::X, DVec3::Y, DVec3::Z]
  } else if rank0 == 1 || l1 - l0 <= ROOT_GAP_EPSILON {
    // Remaining row spans the eigenspace of λ2.
    let (v0, v1) = complement_basis(row(&reduced, 0));
    [v0, v1, v0.cross(v1)]
  } else {
    let v0 = row(&reduced, 0)
      .normalize()
      .cross(row(&reduced, 1).normalize())
      .normalize();

    let mut reduced1 = deflate(&a, l1);
    let rank1 = compute_rank(&mut reduced1, RANK_EPSILON);
    if rank1 <= 1 || l2 - l1 <= ROOT_GAP_EPSILON {
      let (v1, v2) = complement_basis(v0);
      [v0, v1, v2]
    } else {
      let v1 = row(&reduced1, 0).cross(row(&reduced1, 1));
      // Gram-Schmidt against v0 keeps the basis orthonormal under rounding.
      let v1 = (v1 - v0 * v0.dot(v1)).normalize();
      [v0, v1, v0.cross(v1)]
    }
  };

  Eigensystem {
    values: to_vec3(roots, scale),
    vectors: vectors.map(|v| v.as_vec3()),
  }
}

impl SymMat3 {
  /// Eigenvalues in ascending order. See [`eigenvalues`].
  #[inline]
  pub fn eigenvalues(&self) -> Vec3 {
    eigenvalues(self)
  }

  /// Eigenvalues and eigenvectors. See [`eigensystem`].
  #[inline]
  pub fn eigensystem(&self) -> Eigensystem {
    eigensystem(self)
  }
}

fn normalized(m: &SymMat3, scale: f64) -> [f64; 6] {
  m.to_array().map(|e| e as f64 / scale)
}

fn to_vec3(roots: [f64; 3], scale: f64) -> Vec3 {
  Vec3::new(
    (roots[0] * scale) as f32,
    (roots[1] * scale) as f32,
    (roots[2] * scale) as f32,
  )
}

/// Real roots of `det(A - λI) = 0`, ascending.
fn cubic_roots(a: &[f64; 6]) -> [f64; 3] {
  let [e00, e01, e02, e11, e12, e22] = *a;

  let c0 = e00 * e11 * e22 + 2.0 * e01 * e02 * e12
    - e00 * e12 * e12
    - e11 * e02 * e02
    - e22 * e01 * e01;
  let c1 = e00 * e11 - e01 * e01 + e00 * e22 - e02 * e02 + e11 * e22 - e12 * e12;
  let c2 = e00 + e11 + e22;

  let c2_div3 = c2 * INV3;
  let a_div3 = (c1 * INV3 - c2_div3 * c2_div3).min(0.0);
  let mb_div2 = 0.5 * c0 + c2_div3 * c2_div3 * c2_div3 - 0.5 * c2_div3 * c1;
  // Inexact for near-multiple roots; clamped to the real branch.
  let q = (mb_div2 * mb_div2 + a_div3 * a_div3 * a_div3).min(0.0);

  let magnitude = (-a_div3).sqrt();
  let mut angle = (-q).sqrt().atan2(mb_div2) * INV3;
  if angle.is_nan() {
    // q == 0 && mb_div2 == 0: triple root.
    angle = 0.0;
  }
  let (sn, cs) = angle.sin_cos();

  let mut roots = [
    c2_div3 + 2.0 * magnitude * cs,
    c2_div3 - magnitude * (cs + ROOT3 * sn),
    c2_div3 - magnitude * (cs - ROOT3 * sn),
  ];
  roots.sort_by(|x, y| x.total_cmp(y));
  roots
}

/// `A - λI` as a full row-major matrix.
fn deflate(a: &[f64; 6], lambda: f64) -> [[f64; 3]; 3] {
  let [e00, e01, e02, e11, e12, e22] = *a;
  [
    [e00 - lambda, e01, e02],
    [e01, e11 - lambda, e12],
    [e02, e12, e22 - lambda],
  ]
}

#[inline]
fn row(m: &[[f64; 3]; 3], i: usize) -> DVec3 {
  DVec3::from_array(m[i])
}

/// Numerical rank of a symmetric matrix by partial Gaussian elimination.
///
/// On return, row 0 (and row 1 for rank 2) hold the pivot rows with a unit
/// pivot.
fn compute_rank(m: &mut [[f64; 3]; 3], epsilon: f64) -> usize {
  // Largest entry of the upper triangle.
  let mut max = -1.0;
  let (mut max_row, mut max_col) = (0, 0);
  for r in 0..3 {
    for c in r..3 {
      let abs = m[r][c].abs();
      if abs > max {
        max = abs;
        max_row = r;
        max_col = c;
      }
    }
  }
  if max < epsilon {
    return 0;
  }

  m.swap(0, max_row);
  let inv = 1.0 / m[0][max_col];
  for c in 0..3 {
    m[0][c] *= inv;
  }

  for r in 1..3 {
    let factor = m[r][max_col];
    for c in 0..3 {
      m[r][c] -= factor * m[0][c];
    }
    m[r][max_col] = 0.0;
  }

  // Largest entry of the two remaining rows.
  max = -1.0;
  max_row = 1;
  max_col = 0;
  for r in 1..3 {
    for c in 0..3 {
      let abs = m[r][c].abs();
      if abs > max {
        max = abs;
        max_row = r;
        max_col = c;
      }
    }
  }
  if max < epsilon {
    return 1;
  }

  if max_row == 2 {
    m.swap(1, 2);
  }
  let inv = 1.0 / m[1][max_col];
  for c in 0..3 {
    m[1][c] *= inv;
  }

  2
}

/// Two unit vectors completing `u` to a right-handed orthonormal basis.
fn complement_basis(u: DVec3) -> (DVec3, DVec3) {
  let u = u.normalize();
  let v = if u.x.abs() >= u.y.abs() {
    let inv_len = 1.0 / (u.x * u.x + u.z * u.z).sqrt();
    DVec3::new(-u.z * inv_len, 0.0, u.x * inv_len)
  } else {
    let inv_len = 1.0 / (u.y * u.y + u.z * u.z).sqrt();
    DVec3::new(0.0, u.z * inv_len, -u.y * inv_len)
  };
  (v, u.cross(v))
}

#[cfg(test)]
#[path = "eigen_test.rs"]
mod eigen_test;
