//! Logistic blend of the baseline and several underlying scorers.
//!
//! Training goes through explicit states:
//! [`BlendTrainer`] → [`BlendTrainer::cache_features`] produces a [`FeatureCache`] →
//! [`BlendTrainer::train`] runs the epochs and returns the frozen [`LogisticModel`].

pub mod features;
pub mod loss;
pub mod model;
pub mod scorer;
pub mod trainer;

pub use self::features::{FeatureCache, FeatureExtractor};
pub use self::model::LogisticModel;
pub use self::scorer::BlendScorer;
pub use self::trainer::BlendTrainer;
