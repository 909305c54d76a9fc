use glam::Vec3;

use super::*;

fn level(n: usize, feature_len: usize) -> MixtureLevel {
  MixtureLevel {
    positions: (0..n).map(|i| Vec3::splat(i as f32)).collect(),
    colors: vec![Vec3::new(0.2, 0.4, 0.6); n],
    covariances: vec![SymMat3::isotropic(0.1); n],
    opacities: vec![0.8; n],
    features: vec![FeatureVector::zeros(feature_len); n],
  }
}

#[test]
fn test_valid_level_reports_feature_len() {
  assert_eq!(level(5, 16).validate().unwrap(), 16);
  assert_eq!(level(1, 0).validate().unwrap(), 0);
}

#[test]
fn test_empty_level_is_rejected() {
  assert!(matches!(
    MixtureLevel::default().validate(),
    Err(MixtureError::EmptyInput(_))
  ));
}

#[test]
fn test_length_mismatch_names_field() {
  let mut l = level(4, 3);
  l.opacities.pop();
  match l.validate() {
    Err(MixtureError::LengthMismatch {
      field,
      expected,
      found,
    }) => {
      assert_eq!(field, "opacities");
      assert_eq!(expected, 4);
      assert_eq!(found, 3);
    }
    other => panic!("expected length mismatch, got {other:?}"),
  }
}

#[test]
fn test_feature_length_mismatch() {
  let mut l = level(4, 3);
  l.features[2] = FeatureVector::zeros(5);
  assert!(matches!(
    l.validate(),
    Err(MixtureError::FeatureLengthMismatch {
      index: 2,
      expected: 3,
      found: 5
    })
  ));
}

#[test]
fn test_non_finite_position() {
  let mut l = level(3, 1);
  l.positions[1].y = f32::INFINITY;
  assert!(matches!(l.validate(), Err(MixtureError::NonFinitePosition(1))));
}

#[test]
fn test_non_finite_covariance() {
  let mut l = level(3, 1);
  l.covariances[2].e01 = f32::NAN;
  assert!(matches!(l.validate(), Err(MixtureError::NonFiniteCovariance(2))));
}

#[test]
fn test_components_roundtrip_public_fields() {
  let l = level(6, 2);
  let components = l.to_components().unwrap();

  assert_eq!(components.len(), 6);
  assert!(components.iter().all(|c| c.weight == 1.0 && !c.is_parent));
  assert_eq!(MixtureLevel::from_components(&components), l);
}

#[test]
fn test_to_components_fails_fast() {
  let mut l = level(3, 2);
  l.features[0] = FeatureVector::zeros(1);
  assert!(l.to_components().is_err());
}
