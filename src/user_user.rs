//! User-based collaborative filtering.

use rayon::prelude::*;

use crate::math::vector::{self, cosine_similarity, SparseVector};
use crate::neighborhood::{sort_by_similarity, Aggregate};
use crate::opts::UserUserOpts;
use crate::prelude::*;
use crate::scorer::ItemScorer;
use crate::store::RatingStore;

/// Predicts `user mean + weighted average of the neighbors' normalized ratings`.
///
/// Nothing is pre-computed: every call reads all the users' ratings and compares the
/// target user with every other user.
pub struct UserUserScorer<S: ?Sized> {
    store: Arc<S>,
    opts: UserUserOpts,
}

struct UserVector {
    mean: f64,
    centered: SparseVector<ItemId>,
}

impl<S: RatingStore + ?Sized> UserUserScorer<S> {
    pub fn new(store: Arc<S>, opts: UserUserOpts) -> Result<Self> {
        opts.validate()?;
        Ok(Self { store, opts })
    }

    fn user_vectors(&self) -> Result<AHashMap<UserId, UserVector>> {
        let mut vectors = AHashMap::default();
        for user_id in self.store.user_ids()? {
            let ratings = self.store.user_ratings(user_id)?;
            let mut centered = vector::from_ratings(&ratings, |rating| rating.item_id);
            if centered.is_empty() {
                continue;
            }
            let mean = vector::mean(&centered)?;
            vector::mean_center(&mut centered, mean);
            vectors.insert(user_id, UserVector { mean, centered });
        }
        Ok(vectors)
    }
}

impl<S: RatingStore + ?Sized> ItemScorer for UserUserScorer<S> {
    #[instrument(level = "debug", skip_all, fields(user_id = user_id, n_items = items.len()))]
    fn score_items(&self, user_id: UserId, items: &[ItemId]) -> Result<AHashMap<ItemId, f64>> {
        let start_instant = Instant::now();
        let vectors = self.user_vectors()?;
        let target = match vectors.get(&user_id) {
            Some(target) => target,
            None => {
                debug!("the user has no ratings");
                return Ok(AHashMap::default());
            }
        };

        let similarities: Vec<(UserId, f64)> = vectors
            .par_iter()
            .filter(|(other_id, _)| **other_id != user_id)
            .map(|(other_id, other)| {
                (*other_id, cosine_similarity(&target.centered, &other.centered))
            })
            .collect();
        let neighbors = sort_by_similarity(similarities);
        debug!(
            n_users = vectors.len(),
            elapsed = %start_instant.elapsed(),
            "computed the similarities",
        );

        let mut scores = AHashMap::default();
        for item_id in items {
            let aggregate: Aggregate = neighbors
                .iter()
                .filter(|(_, similarity)| *similarity > 0.0)
                .filter_map(|(neighbor_id, similarity)| {
                    vectors[neighbor_id]
                        .centered
                        .get(item_id)
                        .map(|rating| (*similarity, *rating))
                })
                .take(self.opts.neighborhood_size)
                .collect();
            if let Some(offset) = aggregate.offset(self.opts.min_neighbors) {
                scores.insert(*item_id, target.mean + offset);
            } else {
                trace!(item_id, n_neighbors = aggregate.n_neighbors(), "not enough neighbors");
            }
        }

        debug!(n_scored = scores.len(), elapsed = %start_instant.elapsed());
        Ok(scores)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;
    use crate::store::InMemoryRatingStore;

    fn scorer(
        ratings: &[Rating],
        opts: UserUserOpts,
    ) -> Result<UserUserScorer<InMemoryRatingStore>> {
        UserUserScorer::new(Arc::new(ratings.iter().copied().collect()), opts)
    }

    /// Users #2 and #3 agree with user #1, user #4 disagrees.
    fn ratings() -> Vec<Rating> {
        vec![
            Rating::new(1, 1, 5.0),
            Rating::new(1, 2, 1.0),
            Rating::new(2, 1, 4.0),
            Rating::new(2, 2, 2.0),
            Rating::new(2, 3, 5.0),
            Rating::new(3, 1, 5.0),
            Rating::new(3, 2, 1.0),
            Rating::new(3, 3, 4.0),
            Rating::new(4, 1, 1.0),
            Rating::new(4, 2, 5.0),
            Rating::new(4, 3, 1.0),
        ]
    }

    #[test]
    fn score_items_ok() -> Result {
        let scores = scorer(&ratings(), UserUserOpts::default())?.score_items(1, &[3])?;

        // User #1 is centered to (2, -2). User #2 has mean 11/3 and item #3 offset 4/3,
        // user #3 has mean 10/3 and offset 2/3. User #4 is negatively similar.
        let sim_2 = {
            let x = [2.0, -2.0];
            let y = [4.0 - 11.0 / 3.0, 2.0 - 11.0 / 3.0, 5.0 - 11.0 / 3.0];
            (x[0] * y[0] + x[1] * y[1])
                / (8.0_f64.sqrt() * y.iter().map(|yi| yi * yi).sum::<f64>().sqrt())
        };
        let sim_3 = {
            let x = [2.0, -2.0];
            let y = [5.0 - 10.0 / 3.0, 1.0 - 10.0 / 3.0, 4.0 - 10.0 / 3.0];
            (x[0] * y[0] + x[1] * y[1])
                / (8.0_f64.sqrt() * y.iter().map(|yi| yi * yi).sum::<f64>().sqrt())
        };
        let expected = 3.0 + (sim_2 * (4.0 / 3.0) + sim_3 * (2.0 / 3.0)) / (sim_2 + sim_3);
        assert!((scores[&3] - expected).abs() < 1e-9);
        Ok(())
    }

    #[test]
    fn single_neighbor_is_not_enough_ok() -> Result {
        let ratings = ratings()
            .into_iter()
            .filter(|rating| rating.user_id != 3)
            .collect::<Vec<_>>();
        let scorer = scorer(&ratings, UserUserOpts::default())?;
        assert!(scorer.score_items(1, &[3])?.is_empty());

        let opts = UserUserOpts {
            neighborhood_size: 30,
            min_neighbors: 1,
        };
        let scorer = self::scorer(&ratings, opts)?;
        assert_eq!(scorer.score_items(1, &[3])?.len(), 1);
        Ok(())
    }

    #[test]
    fn neighborhood_size_limits_used_neighbors_ok() -> Result {
        // User #3 is closer to user #1 than user #2, and both rated item #3.
        let opts = UserUserOpts {
            neighborhood_size: 1,
            min_neighbors: 1,
        };
        let closest_only = scorer(&ratings(), opts)?.score_items(1, &[3])?;
        assert!((closest_only[&3] - (3.0 + 2.0 / 3.0)).abs() < 1e-12);

        let both = scorer(&ratings(), UserUserOpts::default())?.score_items(1, &[3])?;
        assert!(both[&3] > closest_only[&3]);
        Ok(())
    }

    #[test]
    fn negative_neighbors_are_skipped_ok() -> Result {
        // Only user #4 rated item #4, and user #4 disagrees with user #1.
        let mut ratings = ratings();
        ratings.push(Rating::new(4, 4, 5.0));
        let opts = UserUserOpts {
            neighborhood_size: 30,
            min_neighbors: 1,
        };
        assert!(scorer(&ratings, opts)?.score_items(1, &[4])?.is_empty());
        Ok(())
    }

    #[test]
    fn lonely_user_gets_no_scores_ok() -> Result {
        let mut ratings = ratings();
        ratings.push(Rating::new(9, 42, 4.0));
        let scorer = scorer(&ratings, UserUserOpts::default())?;
        assert!(scorer.score_items(9, &[1, 2, 3])?.is_empty());
        assert!(scorer.score_items(100, &[1, 2, 3])?.is_empty());
        Ok(())
    }

    #[test]
    fn invalid_opts_are_rejected() {
        let opts = UserUserOpts {
            neighborhood_size: 30,
            min_neighbors: 0,
        };
        let error = scorer(&ratings(), opts).err().unwrap();
        assert!(matches!(
            error.downcast_ref::<ScoringError>(),
            Some(ScoringError::InvalidParameter { name: "min_neighbors", .. })
        ));
    }
}
