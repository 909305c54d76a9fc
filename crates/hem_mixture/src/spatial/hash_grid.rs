//! Uniform hash grid for fixed- and variable-radius neighbor queries.
//!
//! Points are bucketed by integer cell coordinate. A query only visits the
//! 3×3×3 block of cells around the query point, so the search radius must
//! not exceed the cell size chosen at construction.

use std::collections::HashMap;

use glam::{IVec3, Vec3};
use rayon::prelude::*;
use smallvec::SmallVec;

use super::Aabb3;
use crate::error::{MixtureError, Result};

/// Largest per-axis cell count accepted by [`SpatialHashIndex::new`].
pub const MAX_CELLS_PER_AXIS: f32 = (1 << 30) as f32;

/// Worst-case distance between two points in adjacent cells, in cell units.
const KNN_RADIUS_SCALE: f32 = 3.464_101_6; // sqrt(12)

/// Offsets of the 27 cells around (and including) a cell.
const NEIGHBOR_OFFSETS: [IVec3; 27] = {
  let mut offsets = [IVec3::ZERO; 27];
  let mut i = 0;
  while i < 27 {
    offsets[i] = IVec3::new(
      (i % 3) as i32 - 1,
      ((i / 3) % 3) as i32 - 1,
      (i / 9) as i32 - 1,
    );
    i += 1;
  }
  offsets
};

type Bucket = SmallVec<[u32; 8]>;

/// Spatial hash over a borrowed, immutable point set.
pub struct SpatialHashIndex<'a> {
  points: &'a [Vec3],
  bounds: Aabb3,
  cell_size: f32,
  grid_size: IVec3,
  cells: HashMap<IVec3, Bucket>,
}

impl<'a> SpatialHashIndex<'a> {
  /// Build an index over `points` with cubic cells of `cell_size`.
  ///
  /// The bounding box is grown to a whole number of cells around its center.
  /// Buckets list point indices in ascending order.
  pub fn new(points: &'a [Vec3], cell_size: f32) -> Result<Self> {
    if !(cell_size.is_finite() && cell_size > 0.0) {
      return Err(MixtureError::InvalidCellSize(cell_size));
    }
    if let Some(index) = points.iter().position(|p| !p.is_finite()) {
      return Err(MixtureError::NonFinitePosition(index));
    }
    let tight = Aabb3::from_points(points).ok_or(MixtureError::EmptyInput("index points"))?;
    let extent = tight.size().max_element();
    if extent / cell_size >= MAX_CELLS_PER_AXIS {
      return Err(MixtureError::CellSizeTooSmall { cell_size, extent });
    }

    let (bounds, grid_size) = tight.snapped_to_grid(cell_size);
    let mut index = Self {
      points,
      bounds,
      cell_size,
      grid_size,
      cells: HashMap::new(),
    };

    for (i, &p) in points.iter().enumerate() {
      let coord = index.grid_coord(p).clamp(IVec3::ZERO, grid_size - IVec3::ONE);
      index.cells.entry(coord).or_default().push(i as u32);
    }

    Ok(index)
  }

  #[inline]
  pub fn len(&self) -> usize {
    self.points.len()
  }

  #[inline]
  pub fn is_empty(&self) -> bool {
    self.points.is_empty()
  }

  /// Cell edge length, also the largest legal query radius.
  #[inline]
  pub fn cell_size(&self) -> f32 {
    self.cell_size
  }

  /// Grid-aligned bounds of the indexed points.
  #[inline]
  pub fn bounds(&self) -> Aabb3 {
    self.bounds
  }

  /// Number of cells per axis.
  #[inline]
  pub fn grid_size(&self) -> IVec3 {
    self.grid_size
  }

  /// Number of non-empty cells.
  #[inline]
  pub fn occupied_cells(&self) -> usize {
    self.cells.len()
  }

  /// Integer cell containing `point`. Not clamped to the grid.
  #[inline]
  pub fn grid_coord(&self, point: Vec3) -> IVec3 {
    ((point - self.bounds.min) / self.cell_size)
      .floor()
      .as_ivec3()
  }

  /// Indices of all points with distance `< radius` to `query`.
  ///
  /// `radius` must not exceed [`cell_size`](Self::cell_size).
  pub fn radius_search(&self, query: Vec3, radius: f32) -> Vec<usize> {
    let mut out = Vec::new();
    self.radius_search_into(query, radius, &mut out);
    out
  }

  /// [`radius_search`](Self::radius_search) into a reusable buffer.
  pub fn radius_search_into(&self, query: Vec3, radius: f32, out: &mut Vec<usize>) {
    debug_assert!(
      radius <= self.cell_size * (1.0 + 1e-5),
      "query radius {radius} exceeds cell size {}",
      self.cell_size
    );
    out.clear();
    self.visit_neighborhood(query, radius, out);
  }

  /// Up to `k` nearest points found within `sqrt(12)·cell_size`.
  ///
  /// Only the 27 surrounding cells are scanned, so closer points further out
  /// can be missed when the neighborhood holds fewer than `k` points.
  pub fn approximate_knn(&self, query: Vec3, k: usize) -> Vec<usize> {
    let mut out = Vec::new();
    self.visit_neighborhood(query, KNN_RADIUS_SCALE * self.cell_size, &mut out);
    out.sort_by(|&a, &b| {
      let da = query.distance_squared(self.points[a]);
      let db = query.distance_squared(self.points[b]);
      da.total_cmp(&db).then(a.cmp(&b))
    });
    out.truncate(k);
    out
  }

  /// Radius search for every query with one shared radius.
  pub fn radius_search_all(&self, queries: &[Vec3], radius: f32) -> Vec<Vec<usize>> {
    queries
      .par_iter()
      .map(|&q| self.radius_search(q, radius))
      .collect()
  }

  /// Radius search for every query with its own radius.
  pub fn radius_search_each(&self, queries: &[Vec3], radii: &[f32]) -> Result<Vec<Vec<usize>>> {
    if queries.len() != radii.len() {
      return Err(MixtureError::QueryMismatch {
        points: queries.len(),
        radii: radii.len(),
      });
    }
    Ok(
      queries
        .par_iter()
        .zip(radii.par_iter())
        .map(|(&q, &r)| self.radius_search(q, r))
        .collect(),
    )
  }

  fn visit_neighborhood(&self, query: Vec3, radius: f32, out: &mut Vec<usize>) {
    // Anything beyond one cell outside the grid has an empty neighborhood.
    let center = self
      .grid_coord(query)
      .clamp(IVec3::NEG_ONE, self.grid_size);
    let radius_sq = radius * radius;

    for offset in NEIGHBOR_OFFSETS {
      let Some(bucket) = self.cells.get(&(center + offset)) else {
        continue;
      };
      out.extend(
        bucket
          .iter()
          .map(|&i| i as usize)
          .filter(|&i| query.distance_squared(self.points[i]) < radius_sq),
      );
    }
  }
}

#[cfg(test)]
#[path = "hash_grid_test.rs"]
mod hash_grid_test;
