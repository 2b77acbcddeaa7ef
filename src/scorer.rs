use crate::prelude::*;

/// Predicts ratings of a user for candidate items.
pub trait ItemScorer {
    /// Scores the candidate items.
    ///
    /// Only the items that satisfy the scorer's minimum-support policy are present in the
    /// result, an item is never scored with `NaN` or infinity.
    fn score_items(&self, user_id: UserId, items: &[ItemId]) -> Result<AHashMap<ItemId, f64>>;

    /// Scores a single item, `None` when the scorer has no prediction for it.
    fn score(&self, user_id: UserId, item_id: ItemId) -> Result<Option<f64>> {
        Ok(self.score_items(user_id, &[item_id])?.get(&item_id).copied())
    }
}

impl<T: ItemScorer + ?Sized> ItemScorer for Arc<T> {
    fn score_items(&self, user_id: UserId, items: &[ItemId]) -> Result<AHashMap<ItemId, f64>> {
        (**self).score_items(user_id, items)
    }

    fn score(&self, user_id: UserId, item_id: ItemId) -> Result<Option<f64>> {
        (**self).score(user_id, item_id)
    }
}
