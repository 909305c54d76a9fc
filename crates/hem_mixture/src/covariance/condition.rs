//! Covariance conditioning by off-diagonal dampening.

use glam::Vec3;

use super::SymMat3;

/// Default lower bound for diagonal entries.
pub const DEFAULT_CONDITION_EPSILON: f32 = 1e-10;

/// Correlation limits tried, in hundredths, from 0.99 down to 0.
const RHO_STEPS: u32 = 99;

/// Result of [`condition`].
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Conditioned {
  /// Conditioned matrix. Not guaranteed positive definite, see
  /// [`Conditioned::is_positive_definite`].
  pub covariance: SymMat3,
  /// Eigenvalues of `covariance`, ascending.
  pub eigenvalues: Vec3,
  /// Correlation limit `ρ` applied to the off-diagonals, or `None` when the
  /// input was already positive definite and returned untouched.
  pub correlation_limit: Option<f32>,
}

impl Conditioned {
  #[inline]
  pub fn is_positive_definite(&self) -> bool {
    self.eigenvalues.x > 0.0
  }
}

/// Condition `cov` towards positive definiteness.
///
/// Diagonal entries are clamped to at least `|epsilon|`. Off-diagonals are
/// then clamped to `±ρ·σi·σj` for the largest `ρ ∈ {0.99, 0.98, …, 0}` that
/// yields a positive smallest eigenvalue. If no `ρ` works the last candidate
/// is returned and a warning is logged.
pub fn condition(cov: &SymMat3, epsilon: f32) -> Conditioned {
  if !cov.is_finite() {
    tracing::warn!(?cov, "cannot condition non-finite covariance");
    return Conditioned {
      covariance: *cov,
      eigenvalues: Vec3::NAN,
      correlation_limit: None,
    };
  }

  let eps = epsilon.abs();
  let diagonal = cov.diagonal().max(Vec3::splat(eps));

  if diagonal == cov.diagonal() {
    let eigenvalues = cov.eigenvalues();
    if eigenvalues.x > 0.0 {
      return Conditioned {
        covariance: *cov,
        eigenvalues,
        correlation_limit: None,
      };
    }
  }

  let (sx, sy, sz) = (diagonal.x.sqrt(), diagonal.y.sqrt(), diagonal.z.sqrt());
  let mut candidate = SymMat3 {
    e00: diagonal.x,
    e11: diagonal.y,
    e22: diagonal.z,
    ..*cov
  };
  let mut eigenvalues = Vec3::ZERO;
  let mut rho = 0.0;

  for step in (0..=RHO_STEPS).rev() {
    rho = step as f32 * 0.01;
    let rxy = rho * sx * sy;
    let rxz = rho * sx * sz;
    let ryz = rho * sy * sz;
    candidate.e01 = cov.e01.clamp(-rxy, rxy);
    candidate.e02 = cov.e02.clamp(-rxz, rxz);
    candidate.e12 = cov.e12.clamp(-ryz, ryz);

    eigenvalues = candidate.eigenvalues();
    if eigenvalues.x > 0.0 {
      break;
    }
  }

  if eigenvalues.x <= 0.0 {
    tracing::warn!(
      det = candidate.determinant(),
      ?candidate,
      ?eigenvalues,
      "covariance still not positive definite after conditioning"
    );
  }

  Conditioned {
    covariance: candidate,
    eigenvalues,
    correlation_limit: Some(rho),
  }
}

impl SymMat3 {
  /// Conditioned copy of this matrix. See [`condition`].
  #[inline]
  pub fn conditioned(&self, epsilon: f32) -> SymMat3 {
    condition(self, epsilon).covariance
  }
}
