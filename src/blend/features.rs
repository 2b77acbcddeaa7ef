use std::collections::BTreeMap;

use itertools::Itertools;

use crate::baseline::BiasModel;
use crate::prelude::*;
use crate::scorer::ItemScorer;
use crate::summary::RatingSummary;

/// Builds the blend feature vector of a (user, item) pair:
///
/// `[bias, log10(item rating count), score_1 - bias, …, score_k - bias]`.
///
/// A scorer without a prediction for the pair contributes `0`. An item unknown to the
/// rating summary is counted as rated once, which gives the count feature `0`.
pub struct FeatureExtractor<B: ?Sized> {
    baseline: Arc<B>,
    summary: Arc<RatingSummary>,
    scorers: Vec<Box<dyn ItemScorer>>,
}

impl<B: BiasModel + ?Sized> FeatureExtractor<B> {
    pub fn new(
        baseline: Arc<B>,
        summary: Arc<RatingSummary>,
        scorers: Vec<Box<dyn ItemScorer>>,
    ) -> Self {
        Self {
            baseline,
            summary,
            scorers,
        }
    }

    #[must_use]
    pub fn n_features(&self) -> usize {
        2 + self.scorers.len()
    }

    /// Feature vectors of the user's candidate items, in the order of `items`.
    pub fn extract(&self, user_id: UserId, items: &[ItemId]) -> Result<Vec<(ItemId, Vec<f64>)>> {
        let scores = self
            .scorers
            .iter()
            .map(|scorer| scorer.score_items(user_id, items))
            .collect::<Result<Vec<_>>>()?;
        let features = items
            .iter()
            .map(|item_id| {
                let bias = self.baseline.bias(user_id, *item_id);
                let n_ratings = self.summary.item_rating_count(*item_id).max(1);
                let mut features = Vec::with_capacity(self.n_features());
                features.push(bias);
                features.push((n_ratings as f64).log10());
                features.extend(scores.iter().map(|scores| {
                    scores.get(item_id).map_or(0.0, |score| score - bias)
                }));
                (*item_id, features)
            })
            .collect();
        Ok(features)
    }

    /// Computes the features of every training rating once.
    ///
    /// Costs `O(N × K)` scorer calls for `N` ratings and `K` scorers, regardless of the
    /// number of epochs. The scorers are queried once per user for all the user's items.
    #[instrument(skip_all, fields(n_ratings = ratings.len(), n_scorers = self.scorers.len()))]
    pub fn cache(&self, ratings: &[Rating]) -> Result<FeatureCache> {
        let start_instant = Instant::now();

        let mut by_user = BTreeMap::<UserId, Vec<ItemId>>::new();
        for rating in ratings {
            by_user.entry(rating.user_id).or_default().push(rating.item_id);
        }

        let mut features = Vec::new();
        let mut index = AHashMap::default();
        for (user_id, items) in by_user {
            let items = items.into_iter().unique().collect_vec();
            for (item_id, item_features) in self.extract(user_id, &items)? {
                index.insert((user_id, item_id), features.len());
                features.push(item_features);
            }
        }

        let mut samples = Vec::with_capacity(ratings.len());
        for rating in ratings {
            let feature_index = index
                .get(&(rating.user_id, rating.item_id))
                .copied()
                .ok_or_else(|| anyhow!("no features for rating {:?}", rating))?;
            samples.push(Sample {
                label: rating.value,
                feature_index,
            });
        }

        info!(n_pairs = features.len(), elapsed = %start_instant.elapsed(), "cached the features");
        Ok(FeatureCache {
            n_features: self.n_features(),
            features,
            index,
            samples,
        })
    }
}

/// Training sample: the rating value and its cached feature vector.
#[derive(Copy, Clone, Debug)]
pub(crate) struct Sample {
    pub label: f64,
    pub feature_index: usize,
}

/// Feature vectors of all the training ratings, computed before the training loop.
pub struct FeatureCache {
    pub(crate) n_features: usize,
    pub(crate) features: Vec<Vec<f64>>,
    pub(crate) samples: Vec<Sample>,
    index: AHashMap<(UserId, ItemId), usize>,
}

impl FeatureCache {
    #[must_use]
    pub const fn n_features(&self) -> usize {
        self.n_features
    }

    /// Number of training samples.
    #[must_use]
    pub fn len(&self) -> usize {
        self.samples.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    #[must_use]
    pub fn features(&self, user_id: UserId, item_id: ItemId) -> Option<&[f64]> {
        self.index
            .get(&(user_id, item_id))
            .map(|index| self.features[*index].as_slice())
    }
}
