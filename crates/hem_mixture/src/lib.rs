//! hem_mixture - Level-of-detail reduction of Gaussian splat mixtures
//!
//! This crate reduces a large set of anisotropic Gaussians (position, color,
//! covariance, opacity, normal estimate and a feature vector per component)
//! into a hierarchy of progressively coarser mixtures using Hierarchical
//! Expectation-Maximization. Each level approximates the previous one with
//! fewer, statistically merged components.
//!
//! # Features
//!
//! - **Closed-form covariance algebra**: trigonometric eigenvalues,
//!   rank-based eigenvectors and off-diagonal conditioning for symmetric 3×3
//!   matrices
//! - **Spatial hash index**: uniform grid with fixed- and variable-radius
//!   queries and approximate kNN
//! - **HEM reduction**: random parent selection, KL divergence and color
//!   gating, responsibility-weighted merging with directional normal
//!   statistics, parallelized with rayon
//! - **Reproducible**: parent flags come from a caller-supplied generator
//! - **JSON interchange** (`serde` feature): request/response format for
//!   mixture levels
//!
//! # Example
//!
//! ```ignore
//! use hem_mixture::{build_mixture_levels, HemConfig, LevelSelection, MixtureLevel};
//! use rand::{rngs::StdRng, SeedableRng};
//!
//! let initial: MixtureLevel = load_splats();
//! let config = HemConfig::default().with_hem_reduction_factor(3.0);
//!
//! let levels = build_mixture_levels(
//!     &initial,
//!     4,
//!     config,
//!     StdRng::seed_from_u64(0),
//!     LevelSelection::All,
//! )?;
//!
//! for (lod, level) in levels.iter().enumerate() {
//!     println!("LOD {lod}: {} splats", level.len());
//! }
//! ```

pub mod error;
pub use error::{MixtureError, Result};

// Symmetric 3x3 covariance algebra
pub mod covariance;
pub use covariance::{Eigensystem, SymMat3};

// Uniform-grid neighbor queries
pub mod spatial;
pub use spatial::{Aabb3, SpatialHashIndex};

// Components and public levels
pub mod mixture;
pub use mixture::{Component, FeatureVector, Likelihood, MixtureLevel};

// Hierarchical EM reduction
pub mod hem;
pub use hem::{build_mixture_levels, reduce_level, HemConfig, HemMixture, LevelStats};

pub mod assemble;
pub use assemble::{assemble_levels, LevelSelection};

#[cfg(feature = "serde")]
pub mod io;
#[cfg(feature = "serde")]
pub use io::{run_request_json, MixtureRequest};
