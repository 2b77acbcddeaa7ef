use crate::baseline::BiasModel;
use crate::blend::features::FeatureExtractor;
use crate::blend::model::LogisticModel;
use crate::error::ScoringError;
use crate::prelude::*;
use crate::scorer::ItemScorer;

/// Scores every candidate item with `σ(intercept + coefficients · features)`.
pub struct BlendScorer<B: ?Sized> {
    model: LogisticModel,
    extractor: FeatureExtractor<B>,
}

impl<B: BiasModel + ?Sized> BlendScorer<B> {
    /// Fails when the model was trained on a different set of features.
    pub fn new(model: LogisticModel, extractor: FeatureExtractor<B>) -> Result<Self> {
        let n_coefficients = model.coefficients().len();
        if n_coefficients != extractor.n_features() {
            return Err(ScoringError::invalid_parameter(
                "coefficients",
                "one per feature",
                n_coefficients,
            )
            .into());
        }
        Ok(Self { model, extractor })
    }

    #[must_use]
    pub const fn model(&self) -> &LogisticModel {
        &self.model
    }
}

impl<B: BiasModel + ?Sized> ItemScorer for BlendScorer<B> {
    #[instrument(level = "debug", skip_all, fields(user_id = user_id, n_items = items.len()))]
    fn score_items(&self, user_id: UserId, items: &[ItemId]) -> Result<AHashMap<ItemId, f64>> {
        Ok(self
            .extractor
            .extract(user_id, items)?
            .into_iter()
            .map(|(item_id, features)| (item_id, self.model.evaluate(1.0, &features)))
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::baseline::UserItemBiasModel;
    use crate::blend::fixtures::{self, NoScores};
    use crate::blend::BlendTrainer;
    use crate::math::sigmoid;
    use crate::opts::{BaselineOpts, BlendOpts};
    use crate::store::RatingStore;
    use crate::summary::RatingSummary;

    fn extractor() -> Result<FeatureExtractor<UserItemBiasModel>> {
        let store = fixtures::store();
        Ok(FeatureExtractor::new(
            Arc::new(UserItemBiasModel::build(&store, &BaselineOpts::default())?),
            Arc::new(RatingSummary::build(&store)?),
            vec![Box::new(NoScores)],
        ))
    }

    #[test]
    fn score_items_ok() -> Result {
        let extractor = extractor()?;
        let features = extractor.extract(1, &[10])?;
        let model = LogisticModel::new(0.25, vec![0.5, -1.0, 2.0]);
        let expected = sigmoid(0.25 + 0.5 * features[0].1[0] - features[0].1[1]);

        let scorer = BlendScorer::new(model, extractor)?;
        let scores = scorer.score_items(1, &[10, 42])?;
        assert_eq!(scores.len(), 2);
        assert!((scores[&10] - expected).abs() < 1e-12);
        assert!(scores.values().all(|score| (0.0..=1.0).contains(score)));
        Ok(())
    }

    #[test]
    fn trained_model_ok() -> Result {
        let store = fixtures::store();
        let opts = BlendOpts {
            learning_rate: 0.001,
            n_iterations: 5,
        };
        let trainer = BlendTrainer::new(extractor()?, opts)?;
        let model = trainer.fit(&store.all_ratings()?, &mut StdRng::seed_from_u64(1))?;
        let scorer = BlendScorer::new(model, trainer.into_extractor())?;
        assert!(scorer.score(3, 20)?.is_some());
        Ok(())
    }

    #[test]
    fn coefficient_count_mismatch_is_rejected() -> Result {
        let model = LogisticModel::new(0.0, vec![1.0]);
        let error = BlendScorer::new(model, extractor()?).err().unwrap();
        assert!(matches!(
            error.downcast_ref::<ScoringError>(),
            Some(ScoringError::InvalidParameter { name: "coefficients", .. })
        ));
        Ok(())
    }
}
