use crate::helpers::average::Average;
use crate::prelude::*;
use crate::store::RatingStore;

/// Global rating statistics and per-item rating counts.
#[derive(Debug, Clone, Default)]
pub struct RatingSummary {
    global_mean: f64,
    n_ratings: usize,
    item_counts: AHashMap<ItemId, usize>,
}

impl RatingSummary {
    #[instrument(skip_all)]
    pub fn build<S: RatingStore + ?Sized>(store: &S) -> Result<Self> {
        let ratings = store.all_ratings()?;
        let mut global = Average::default();
        let mut item_counts = AHashMap::default();
        for rating in &ratings {
            global.push(rating.value);
            *item_counts.entry(rating.item_id).or_insert(0) += 1;
        }
        let global_mean = if global.count() != 0 { global.average()? } else { 0.0 };
        info!(n_ratings = global.count(), n_items = item_counts.len(), global_mean);
        Ok(Self {
            global_mean,
            n_ratings: global.count(),
            item_counts,
        })
    }

    /// Mean of all ratings, `0` for an empty store.
    #[must_use]
    pub const fn global_mean(&self) -> f64 {
        self.global_mean
    }

    #[must_use]
    pub const fn n_ratings(&self) -> usize {
        self.n_ratings
    }

    #[must_use]
    pub fn item_rating_count(&self, item_id: ItemId) -> usize {
        self.item_counts.get(&item_id).copied().unwrap_or_default()
    }
}
