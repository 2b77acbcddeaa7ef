//! Bias baseline: global mean plus damped user and item offsets.

use crate::helpers::average::Average;
use crate::opts::BaselineOpts;
use crate::prelude::*;
use crate::store::RatingStore;

/// Baseline predictor `intercept + user bias + item bias`.
pub trait BiasModel {
    fn intercept(&self) -> f64;

    /// `0` for an unknown user.
    fn user_bias(&self, user_id: UserId) -> f64;

    /// `0` for an unknown item.
    fn item_bias(&self, item_id: ItemId) -> f64;

    fn bias(&self, user_id: UserId, item_id: ItemId) -> f64 {
        self.intercept() + self.user_bias(user_id) + self.item_bias(item_id)
    }
}

#[derive(Debug, Clone, Default)]
pub struct UserItemBiasModel {
    intercept: f64,
    user_biases: AHashMap<UserId, f64>,
    item_biases: AHashMap<ItemId, f64>,
}

impl UserItemBiasModel {
    /// Item biases are damped means of `rating - intercept`,
    /// user biases are damped means of `rating - intercept - item bias`.
    #[instrument(skip_all, fields(damping = opts.damping))]
    pub fn build<S: RatingStore + ?Sized>(store: &S, opts: &BaselineOpts) -> Result<Self> {
        opts.validate()?;
        let damping = opts.damping;
        let ratings = store.all_ratings()?;
        if ratings.is_empty() {
            return Ok(Self::default());
        }
        let intercept = ratings.iter().map(|rating| rating.value).collect::<Average>().average()?;

        let mut item_offsets = AHashMap::<ItemId, Average>::default();
        for rating in &ratings {
            item_offsets.entry(rating.item_id).or_default().push(rating.value - intercept);
        }
        let item_biases: AHashMap<_, _> = item_offsets
            .into_iter()
            .map(|(item_id, offsets)| (item_id, damped_mean(&offsets, damping)))
            .collect();

        let mut user_offsets = AHashMap::<UserId, Average>::default();
        for rating in &ratings {
            let item_bias = item_biases.get(&rating.item_id).copied().unwrap_or_default();
            user_offsets
                .entry(rating.user_id)
                .or_default()
                .push(rating.value - intercept - item_bias);
        }
        let user_biases: AHashMap<_, _> = user_offsets
            .into_iter()
            .map(|(user_id, offsets)| (user_id, damped_mean(&offsets, damping)))
            .collect();

        info!(intercept, n_users = user_biases.len(), n_items = item_biases.len(), "built");
        Ok(Self {
            intercept,
            user_biases,
            item_biases,
        })
    }
}

/// Mean of the offsets with `damping` imaginary zero offsets.
fn damped_mean(offsets: &Average, damping: f64) -> f64 {
    let denominator = offsets.count() as f64 + damping;
    if denominator == 0.0 {
        return 0.0;
    }
    offsets.sum() / denominator
}

impl BiasModel for UserItemBiasModel {
    fn intercept(&self) -> f64 {
        self.intercept
    }

    fn user_bias(&self, user_id: UserId) -> f64 {
        self.user_biases.get(&user_id).copied().unwrap_or_default()
    }

    fn item_bias(&self, item_id: ItemId) -> f64 {
        self.item_biases.get(&item_id).copied().unwrap_or_default()
    }
}
