//! Read-only access to the rating data.

use std::collections::BTreeSet;

use itertools::Itertools;

use crate::prelude::*;

/// Rating data source.
///
/// Every method may be called any number of times, the core reads the full rating set
/// more than once. Errors are propagated to the caller unmodified.
pub trait RatingStore {
    fn all_ratings(&self) -> Result<Vec<Rating>>;

    /// Ratings grouped by item, every group is non-empty.
    fn ratings_by_item(&self) -> Result<Vec<(ItemId, Vec<Rating>)>>;

    fn user_ratings(&self, user_id: UserId) -> Result<Vec<Rating>>;

    fn user_ids(&self) -> Result<BTreeSet<UserId>>;
}

impl<S: RatingStore + ?Sized> RatingStore for Arc<S> {
    fn all_ratings(&self) -> Result<Vec<Rating>> {
        (**self).all_ratings()
    }

    fn ratings_by_item(&self) -> Result<Vec<(ItemId, Vec<Rating>)>> {
        (**self).ratings_by_item()
    }

    fn user_ratings(&self, user_id: UserId) -> Result<Vec<Rating>> {
        (**self).user_ratings(user_id)
    }

    fn user_ids(&self) -> Result<BTreeSet<UserId>> {
        (**self).user_ids()
    }
}

/// Rating store backed by a vector, with a per-user index.
#[derive(Default)]
pub struct InMemoryRatingStore {
    ratings: Vec<Rating>,
    by_user: AHashMap<UserId, Vec<Rating>>,
}

impl InMemoryRatingStore {
    #[must_use]
    pub fn new(ratings: Vec<Rating>) -> Self {
        let by_user = ratings
            .iter()
            .map(|rating| (rating.user_id, *rating))
            .into_group_map()
            .into_iter()
            .collect();
        Self { ratings, by_user }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.ratings.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.ratings.is_empty()
    }
}

impl FromIterator<Rating> for InMemoryRatingStore {
    fn from_iter<I: IntoIterator<Item = Rating>>(iter: I) -> Self {
        Self::new(iter.into_iter().collect())
    }
}

impl RatingStore for InMemoryRatingStore {
    fn all_ratings(&self) -> Result<Vec<Rating>> {
        Ok(self.ratings.clone())
    }

    fn ratings_by_item(&self) -> Result<Vec<(ItemId, Vec<Rating>)>> {
        let groups = self
            .ratings
            .iter()
            .map(|rating| (rating.item_id, *rating))
            .into_group_map()
            .into_iter()
            .sorted_by_key(|(item_id, _)| *item_id)
            .collect();
        Ok(groups)
    }

    fn user_ratings(&self, user_id: UserId) -> Result<Vec<Rating>> {
        Ok(self.by_user.get(&user_id).cloned().unwrap_or_default())
    }

    fn user_ids(&self) -> Result<BTreeSet<UserId>> {
        Ok(self.by_user.keys().copied().collect())
    }
}
