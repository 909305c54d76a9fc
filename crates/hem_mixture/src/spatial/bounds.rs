//! Axis-aligned bounding box over point sets.

use glam::{IVec3, Vec3};

/// Single-precision axis-aligned bounding box.
///
/// Used to lay out the uniform grid of a [`SpatialHashIndex`](super::SpatialHashIndex).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb3 {
  /// Minimum corner (inclusive).
  pub min: Vec3,
  /// Maximum corner (inclusive).
  pub max: Vec3,
}

impl Aabb3 {
  /// Inverted box that any point encapsulates into.
  pub const EMPTY: Self = Self {
    min: Vec3::splat(f32::MAX),
    max: Vec3::splat(-f32::MAX),
  };

  /// Create a new AABB from min and max corners.
  ///
  /// # Panics
  /// Debug-asserts that min <= max on all axes.
  pub fn new(min: Vec3, max: Vec3) -> Self {
    debug_assert!(
      min.cmple(max).all(),
      "AABB min must be <= max on all axes"
    );
    Self { min, max }
  }

  /// Create a new AABB from center and half-extents.
  pub fn from_center_half_extents(center: Vec3, half_extents: Vec3) -> Self {
    Self {
      min: center - half_extents,
      max: center + half_extents,
    }
  }

  /// Tight bounds of `points`, or `None` for an empty slice.
  pub fn from_points(points: &[Vec3]) -> Option<Self> {
    if points.is_empty() {
      return None;
    }
    let mut aabb = Self::EMPTY;
    for &p in points {
      aabb.encapsulate(p);
    }
    Some(aabb)
  }

  /// Grow to include `point`.
  #[inline]
  pub fn encapsulate(&mut self, point: Vec3) {
    self.min = self.min.min(point);
    self.max = self.max.max(point);
  }

  /// Check if this AABB contains a point.
  #[inline]
  pub fn contains_point(&self, point: Vec3) -> bool {
    point.cmpge(self.min).all() && point.cmple(self.max).all()
  }

  /// Get the size of the AABB (max - min).
  #[inline]
  pub fn size(&self) -> Vec3 {
    self.max - self.min
  }

  /// Get the center of the AABB.
  #[inline]
  pub fn center(&self) -> Vec3 {
    (self.min + self.max) * 0.5
  }

  /// Number of whole cells of `cell_size` covering this box, plus one per
  /// axis so the extent always fits.
  #[inline]
  pub fn grid_size(&self, cell_size: f32) -> IVec3 {
    (self.size() / cell_size).floor().as_ivec3() + IVec3::ONE
  }

  /// Box grown to exactly `grid_size(cell_size)` cells, keeping the center.
  pub fn snapped_to_grid(&self, cell_size: f32) -> (Self, IVec3) {
    let grid_size = self.grid_size(cell_size);
    let half = grid_size.as_vec3() * cell_size * 0.5;
    (Self::from_center_half_extents(self.center(), half), grid_size)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_from_points() {
    let aabb = Aabb3::from_points(&[
      Vec3::new(1.0, -2.0, 0.0),
      Vec3::new(-1.0, 2.0, 3.0),
      Vec3::new(0.0, 0.0, -3.0),
    ])
    .unwrap();
    assert_eq!(aabb.min, Vec3::new(-1.0, -2.0, -3.0));
    assert_eq!(aabb.max, Vec3::new(1.0, 2.0, 3.0));
  }

  #[test]
  fn test_from_points_empty() {
    assert_eq!(Aabb3::from_points(&[]), None);
  }

  #[test]
  fn test_single_point_has_zero_size() {
    let aabb = Aabb3::from_points(&[Vec3::splat(4.0)]).unwrap();
    assert_eq!(aabb.size(), Vec3::ZERO);
    assert!(aabb.contains_point(Vec3::splat(4.0)));
  }

  #[test]
  fn test_contains_point() {
    let aabb = Aabb3::new(Vec3::ZERO, Vec3::splat(10.0));

    // Inside
    assert!(aabb.contains_point(Vec3::splat(5.0)));

    // On boundary
    assert!(aabb.contains_point(Vec3::ZERO));
    assert!(aabb.contains_point(Vec3::splat(10.0)));

    // Outside
    assert!(!aabb.contains_point(Vec3::splat(-1.0)));
    assert!(!aabb.contains_point(Vec3::new(5.0, 11.0, 5.0)));
  }

  #[test]
  fn test_center() {
    let aabb = Aabb3::new(Vec3::new(-1.0, -2.0, -3.0), Vec3::new(1.0, 2.0, 3.0));
    assert_eq!(aabb.center(), Vec3::ZERO);
  }

  #[test]
  fn test_grid_size_adds_one_cell() {
    let aabb = Aabb3::new(Vec3::ZERO, Vec3::new(10.0, 4.0, 0.0));
    assert_eq!(aabb.grid_size(2.0), IVec3::new(6, 3, 1));
  }

  #[test]
  fn test_snapped_to_grid_keeps_center() {
    let aabb = Aabb3::new(Vec3::ZERO, Vec3::new(10.0, 4.0, 0.0));
    let (snapped, grid) = aabb.snapped_to_grid(2.0);

    assert_eq!(grid, IVec3::new(6, 3, 1));
    assert_eq!(snapped.center(), aabb.center());
    assert_eq!(snapped.size(), Vec3::new(12.0, 6.0, 2.0));
    assert!(snapped.contains_point(aabb.min) && snapped.contains_point(aabb.max));
  }
}
