//! Mixture data model: components, feature vectors and public levels.

pub mod component;
pub mod feature;
pub mod gaussian;
pub mod level;

pub use component::{
  common_feature_len, initial_normal_variance, validate_components, Component,
  INITIAL_NORMAL_VARIANCE,
};
pub use feature::FeatureVector;
pub use gaussian::{color_delta, kl_divergence, squared_mahalanobis, Likelihood};
pub use level::MixtureLevel;
