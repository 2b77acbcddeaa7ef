use crate::math::vector::cosine_similarity;
use crate::prelude::*;
use crate::profile::{ProfileBuilder, TagVectorModel};
use crate::scorer::ItemScorer;
use crate::store::RatingStore;

/// Scores items by the cosine similarity between the user's profile and the item's tags.
pub struct ContentScorer<S: ?Sized, B, M> {
    store: Arc<S>,
    builder: B,
    model: M,
}

impl<S, B, M> ContentScorer<S, B, M>
where
    S: RatingStore + ?Sized,
    B: ProfileBuilder,
    M: TagVectorModel,
{
    pub fn new(store: Arc<S>, builder: B, model: M) -> Self {
        Self {
            store,
            builder,
            model,
        }
    }
}

impl<S, B, M> ItemScorer for ContentScorer<S, B, M>
where
    S: RatingStore + ?Sized,
    B: ProfileBuilder,
    M: TagVectorModel,
{
    #[instrument(level = "debug", skip_all, fields(user_id = user_id, n_items = items.len()))]
    fn score_items(&self, user_id: UserId, items: &[ItemId]) -> Result<AHashMap<ItemId, f64>> {
        let ratings = self.store.user_ratings(user_id)?;
        if ratings.is_empty() {
            debug!("no ratings, nothing to score");
            return Ok(AHashMap::default());
        }
        let profile = self.builder.build_profile(&ratings)?;
        Ok(items
            .iter()
            .filter_map(|item_id| {
                self.model
                    .tag_vector(*item_id)
                    .map(|tags| (*item_id, cosine_similarity(&profile, tags)))
            })
            .collect())
    }
}
