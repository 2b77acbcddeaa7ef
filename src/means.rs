//! Non-personalized item means.

use crate::helpers::average::Average;
use crate::opts::BaselineOpts;
use crate::prelude::*;
use crate::scorer::ItemScorer;
use crate::store::RatingStore;

/// Item id → mean rating.
#[derive(Debug, Clone, Default)]
pub struct ItemMeanModel {
    means: AHashMap<ItemId, f64>,
}

impl ItemMeanModel {
    /// Plain per-item means.
    #[instrument(skip_all)]
    pub fn build<S: RatingStore + ?Sized>(store: &S) -> Result<Self> {
        let (_, items) = accumulate(&store.all_ratings()?);
        let means = items
            .into_iter()
            .map(|(item_id, average)| Ok((item_id, average.average()?)))
            .collect::<Result<AHashMap<_, _>>>()?;
        info!(n_items = means.len(), "computed the item means");
        Ok(Self { means })
    }

    /// Bayesian-damped means: every item gets `damping` imaginary ratings equal to the
    /// global mean.
    #[instrument(skip_all, fields(damping = opts.damping))]
    pub fn build_damped<S: RatingStore + ?Sized>(store: &S, opts: &BaselineOpts) -> Result<Self> {
        opts.validate()?;
        let damping = opts.damping;
        let (global, items) = accumulate(&store.all_ratings()?);
        if global.count() == 0 {
            return Ok(Self::default());
        }
        let global_mean = global.average()?;
        let means = items
            .into_iter()
            .map(|(item_id, average)| {
                let mean = (average.sum() + damping * global_mean)
                    / (average.count() as f64 + damping);
                (item_id, mean)
            })
            .collect::<AHashMap<_, _>>();
        info!(n_items = means.len(), global_mean, "computed the damped item means");
        Ok(Self { means })
    }

    #[must_use]
    pub fn get(&self, item_id: ItemId) -> Option<f64> {
        self.means.get(&item_id).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.means.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.means.is_empty()
    }
}

fn accumulate(ratings: &[Rating]) -> (Average, AHashMap<ItemId, Average>) {
    let mut global = Average::default();
    let mut items = AHashMap::<ItemId, Average>::default();
    for rating in ratings {
        global.push(rating.value);
        items.entry(rating.item_id).or_default().push(rating.value);
    }
    (global, items)
}

/// Scores every item with a known mean by that mean, regardless of the user.
pub struct ItemMeanScorer {
    model: Arc<ItemMeanModel>,
}

impl ItemMeanScorer {
    #[must_use]
    pub fn new(model: Arc<ItemMeanModel>) -> Self {
        Self { model }
    }
}

impl ItemScorer for ItemMeanScorer {
    fn score_items(&self, _user_id: UserId, items: &[ItemId]) -> Result<AHashMap<ItemId, f64>> {
        Ok(items
            .iter()
            .filter_map(|item_id| self.model.get(*item_id).map(|mean| (*item_id, mean)))
            .collect())
    }
}
