use crate::item_item::ItemItemModel;
use crate::math::vector;
use crate::neighborhood::{sort_by_similarity, Aggregate};
use crate::opts::ItemItemOpts;
use crate::prelude::*;
use crate::scorer::ItemScorer;
use crate::store::RatingStore;

/// Predicts `item mean + weighted average of the user's normalized ratings`
/// over the most similar items the user has rated.
pub struct ItemItemScorer<S: ?Sized> {
    model: Arc<ItemItemModel>,
    store: Arc<S>,
    opts: ItemItemOpts,
}

impl<S: RatingStore + ?Sized> ItemItemScorer<S> {
    pub fn new(model: Arc<ItemItemModel>, store: Arc<S>, opts: ItemItemOpts) -> Result<Self> {
        opts.validate()?;
        Ok(Self { model, store, opts })
    }

    /// User's ratings minus the item means. Items unknown to the model are dropped.
    fn normalized_ratings(&self, user_id: UserId) -> Result<AHashMap<ItemId, f64>> {
        let ratings = self.store.user_ratings(user_id)?;
        let mut ratings = vector::from_ratings(&ratings, |rating| rating.item_id);
        ratings.retain(|item_id, rating| match self.model.mean(*item_id) {
            Some(mean) => {
                *rating -= mean;
                true
            }
            None => false,
        });
        Ok(ratings)
    }
}

impl<S: RatingStore + ?Sized> ItemScorer for ItemItemScorer<S> {
    #[instrument(level = "debug", skip_all, fields(user_id = user_id, n_items = items.len()))]
    fn score_items(&self, user_id: UserId, items: &[ItemId]) -> Result<AHashMap<ItemId, f64>> {
        let ratings = self.normalized_ratings(user_id)?;

        let mut scores = AHashMap::default();
        for item_id in items {
            let model = &self.model;
            let (mean, neighbors) = match (model.mean(*item_id), model.neighbors(*item_id)) {
                (Some(mean), Some(neighbors)) => (mean, neighbors),
                _ => {
                    trace!(item_id, "unknown item");
                    continue;
                }
            };
            let neighbors = neighbors.iter().map(|(id, similarity)| (*id, *similarity));
            let aggregate: Aggregate = sort_by_similarity(neighbors)
                .into_iter()
                .filter(|(_, similarity)| *similarity > 0.0)
                .filter_map(|(neighbor_id, similarity)| {
                    ratings.get(&neighbor_id).map(|rating| (similarity, *rating))
                })
                .take(self.opts.neighborhood_size)
                .collect();
            match aggregate.offset(self.opts.min_neighbors) {
                Some(offset) => {
                    scores.insert(*item_id, mean + offset);
                }
                None => {
                    let n_neighbors = aggregate.n_neighbors();
                    trace!(item_id, n_neighbors, "not enough neighbors");
                }
            }
        }

        debug!(n_scored = scores.len());
        Ok(scores)
    }
}
