//! Rating prediction core: neighborhood collaborative filtering
//! and a logistic blend of several rating predictors.
//!
//! Models are built once from a [`RatingStore`] and then shared read-only
//! by the scorers. Every scorer implements [`ItemScorer`], so any of them may
//! be fed into the [`BlendTrainer`] as a blending feature.

pub mod baseline;
pub mod blend;
pub mod error;
pub mod helpers;
pub mod item_item;
pub mod math;
pub mod means;
pub mod models;
pub mod neighborhood;
pub mod opts;
pub mod prelude;
pub mod profile;
pub mod scorer;
pub mod store;
pub mod summary;
pub mod user_user;

pub use baseline::{BiasModel, UserItemBiasModel};
pub use blend::{BlendScorer, BlendTrainer, FeatureCache, FeatureExtractor, LogisticModel};
pub use error::ScoringError;
pub use item_item::{ItemItemModel, ItemItemScorer};
pub use means::{ItemMeanModel, ItemMeanScorer};
pub use models::{ItemId, Rating, UserId};
pub use opts::Opts;
pub use prelude::Result;
pub use profile::{
    ContentScorer, ProfileBuilder, TagVector, TagVectorModel, ThresholdProfileBuilder,
    WeightedProfileBuilder,
};
pub use scorer::ItemScorer;
pub use store::{InMemoryRatingStore, RatingStore};
pub use summary::RatingSummary;
pub use user_user::UserUserScorer;
