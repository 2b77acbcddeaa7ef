use crate::helpers::average::Average;
use crate::math::vector::add_scaled;
use crate::prelude::*;
use crate::profile::{ProfileBuilder, TagVector, TagVectorModel};

/// Sums the tag vectors weighted by the rating's deviation from the user's mean,
/// so that below-mean ratings pull the profile away from their tags.
pub struct WeightedProfileBuilder<M> {
    model: M,
}

impl<M: TagVectorModel> WeightedProfileBuilder<M> {
    pub fn new(model: M) -> Self {
        Self { model }
    }
}

impl<M: TagVectorModel> ProfileBuilder for WeightedProfileBuilder<M> {
    /// Fails with [`crate::ScoringError::EmptyRatings`] on an empty list.
    fn build_profile(&self, ratings: &[Rating]) -> Result<TagVector> {
        let mean = ratings
            .iter()
            .map(|rating| rating.value)
            .collect::<Average>()
            .average()
            .context("cannot build a weighted profile without ratings")?;
        let mut profile = TagVector::default();
        for rating in ratings {
            if let Some(tags) = self.model.tag_vector(rating.item_id) {
                add_scaled(&mut profile, tags, rating.value - mean);
            }
        }
        Ok(profile)
    }
}
