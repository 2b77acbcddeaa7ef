use rayon::prelude::*;

use crate::math::vector::{self, cosine_similarity, SparseVector};
use crate::prelude::*;
use crate::store::RatingStore;

/// Item means and positive item-to-item similarities.
#[derive(Debug, Clone, Default)]
pub struct ItemItemModel {
    means: AHashMap<ItemId, f64>,
    neighbors: AHashMap<ItemId, AHashMap<ItemId, f64>>,
}

impl ItemItemModel {
    /// Builds the model from all the ratings.
    ///
    /// Compares every pair of items, which is `O(I² × R)` where `I` is the number of items
    /// and `R` is the average number of ratings per item. This dominates the cost.
    /// The pairs are computed in parallel; each item's neighbors depend only on the
    /// immutable centered vectors, so the result does not depend on the scheduling.
    #[instrument(skip_all)]
    pub fn build<S: RatingStore + ?Sized>(store: &S) -> Result<Self> {
        let start_instant = Instant::now();

        let mut means = AHashMap::default();
        let mut vectors = Vec::new();
        for (item_id, ratings) in store.ratings_by_item()? {
            let mut ratings = vector::from_ratings(&ratings, |rating| rating.user_id);
            let mean = vector::mean(&ratings)
                .with_context(|| format!("item #{} has no ratings", item_id))?;
            vector::mean_center(&mut ratings, mean);
            means.insert(item_id, mean);
            vectors.push((item_id, ratings));
        }
        info!(n_items = vectors.len(), elapsed = %start_instant.elapsed(), "centered the item vectors");

        let neighbors: AHashMap<_, _> = vectors
            .par_iter()
            .map(|(item_id, vector)| (*item_id, positive_similarities(*item_id, vector, &vectors)))
            .collect();
        let n_pairs: usize = neighbors.values().map(|similarities| similarities.len()).sum();
        info!(n_pairs, elapsed = %start_instant.elapsed(), "computed the similarities");

        Ok(Self { means, neighbors })
    }

    #[must_use]
    pub fn mean(&self, item_id: ItemId) -> Option<f64> {
        self.means.get(&item_id).copied()
    }

    /// Positively similar items, the item itself excluded.
    #[must_use]
    pub fn neighbors(&self, item_id: ItemId) -> Option<&AHashMap<ItemId, f64>> {
        self.neighbors.get(&item_id)
    }

    #[must_use]
    pub fn n_items(&self) -> usize {
        self.means.len()
    }
}

fn positive_similarities(
    item_id: ItemId,
    vector: &SparseVector<UserId>,
    others: &[(ItemId, SparseVector<UserId>)],
) -> AHashMap<ItemId, f64> {
    others
        .iter()
        .filter(|(other_id, _)| *other_id != item_id)
        .filter_map(|(other_id, other)| {
            let similarity = cosine_similarity(vector, other);
            (similarity > 0.0).then_some((*other_id, similarity))
        })
        .collect()
}
