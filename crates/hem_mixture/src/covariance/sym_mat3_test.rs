use glam::{Mat3, Vec3};

use super::*;

fn sample() -> SymMat3 {
  SymMat3::new(4.0, 1.0, 0.5, 3.0, -0.25, 2.0)
}

#[test]
fn test_to_mat3_is_symmetric() {
  let m = sample().to_mat3();
  assert_eq!(m, m.transpose());
  assert_eq!(m.x_axis, Vec3::new(4.0, 1.0, 0.5));
}

#[test]
fn test_determinant_matches_glam() {
  let s = sample();
  let expected = s.to_mat3().determinant();
  assert!((s.determinant() - expected).abs() < 1e-5);
}

#[test]
fn test_inverse_matches_glam() {
  let s = sample();
  let inv = s.inverse();
  let expected = SymMat3::from_mat3(&s.to_mat3().inverse());
  assert!(inv.abs_diff_eq(&expected, 1e-5), "{inv:?} vs {expected:?}");

  let product = s * inv;
  assert!(product.abs_diff_eq(Mat3::IDENTITY, 1e-5));
}

#[test]
fn test_singular_inverse_is_not_finite() {
  let s = SymMat3::new(1.0, 1.0, 0.0, 1.0, 0.0, 0.0);
  assert_eq!(s.determinant(), 0.0);
  assert!(!s.inverse().is_finite());
}

#[test]
fn test_trace() {
  assert_eq!(sample().trace(), 9.0);
  assert_eq!(SymMat3::IDENTITY.trace(), 3.0);
}

#[test]
fn test_product_trace_matches_full_product() {
  let a = sample();
  let b = SymMat3::new(1.0, -0.5, 0.25, 2.0, 0.75, 3.0);
  let full = a * b;
  let expected = full.x_axis.x + full.y_axis.y + full.z_axis.z;
  assert!((a.product_trace(&b) - expected).abs() < 1e-5);
}

#[test]
fn test_outer_product() {
  let v = Vec3::new(1.0, 2.0, 3.0);
  let o = SymMat3::outer(v);
  assert_eq!(o.to_array(), [1.0, 2.0, 3.0, 4.0, 6.0, 9.0]);
  // Rank one: v is an eigenvector with eigenvalue |v|².
  assert!((o * v - v * 14.0).length() < 1e-5);
}

#[test]
fn test_quadratic_form() {
  let s = SymMat3::diag(Vec3::new(1.0, 2.0, 3.0));
  assert_eq!(s.quadratic_form(Vec3::new(1.0, 1.0, 1.0)), 6.0);
  assert_eq!(s.quadratic_form(Vec3::Z), 3.0);
}

#[test]
fn test_arithmetic() {
  let a = sample();
  let b = SymMat3::IDENTITY;

  assert_eq!((a + b).e00, 5.0);
  assert_eq!((a - b).e11, 2.0);
  assert_eq!((a * 2.0).e12, -0.5);
  assert_eq!((2.0 * a), a * 2.0);
  assert_eq!((a / 2.0).e22, 1.0);
  assert_eq!(-a + a, SymMat3::ZERO);

  let mut acc = SymMat3::ZERO;
  acc += a;
  acc += a;
  assert_eq!(acc, a * 2.0);
}

#[test]
fn test_from_mat3_symmetrizes() {
  let m = Mat3::from_cols(
    Vec3::new(1.0, 2.0, 0.0),
    Vec3::new(4.0, 1.0, 0.0),
    Vec3::new(0.0, 0.0, 1.0),
  );
  let s = SymMat3::from_mat3(&m);
  assert_eq!(s.e01, 3.0);
  assert_eq!(s.e00, 1.0);
}

#[test]
fn test_array_roundtrip_order() {
  let s = sample();
  let arr: [f32; 6] = s.into();
  assert_eq!(arr, [4.0, 1.0, 0.5, 3.0, -0.25, 2.0]);
  assert_eq!(SymMat3::from(arr), s);
}

#[test]
fn test_max_abs_element() {
  assert_eq!(sample().max_abs_element(), 4.0);
  assert_eq!(SymMat3::new(0.0, -7.0, 0.0, 1.0, 0.0, 1.0).max_abs_element(), 7.0);
}
