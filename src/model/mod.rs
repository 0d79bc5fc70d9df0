//! The gradient-boosted regression-tree model and its configuration.

pub mod boosting;
pub mod params;
mod tree;

pub use boosting::GradientBoostedTrees;
pub use params::TrainingParameters;
