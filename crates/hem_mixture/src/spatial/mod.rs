//! Spatial indexing of component means.

pub mod bounds;
pub mod hash_grid;

pub use bounds::Aabb3;
pub use hash_grid::SpatialHashIndex;
