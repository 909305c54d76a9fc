//! Covariance algebra for 3D Gaussians.
//!
//! - [`sym_mat3`]: `SymMat3` - six-entry symmetric matrix with closed-form
//!   determinant, inverse and trace
//! - [`eigen`]: trigonometric eigenvalues and rank-based eigenvectors
//! - [`condition`]: off-diagonal dampening towards positive definiteness

pub mod condition;
pub mod eigen;
pub mod sym_mat3;

pub use condition::{condition, Conditioned, DEFAULT_CONDITION_EPSILON};
pub use eigen::{eigensystem, eigenvalues, Eigensystem};
pub use sym_mat3::SymMat3;
