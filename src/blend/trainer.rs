use rand::seq::SliceRandom;
use rand::Rng;

use crate::baseline::BiasModel;
use crate::blend::features::{FeatureCache, FeatureExtractor};
use crate::blend::loss::LogisticLoss;
use crate::blend::model::LogisticModel;
use crate::opts::BlendOpts;
use crate::prelude::*;

/// Fits the blend weights with stochastic gradient descent on the logistic loss.
pub struct BlendTrainer<B: ?Sized> {
    opts: BlendOpts,
    extractor: FeatureExtractor<B>,
}

impl<B: BiasModel + ?Sized> BlendTrainer<B> {
    pub fn new(extractor: FeatureExtractor<B>, opts: BlendOpts) -> Result<Self> {
        opts.validate()?;
        Ok(Self { opts, extractor })
    }

    #[must_use]
    pub const fn extractor(&self) -> &FeatureExtractor<B> {
        &self.extractor
    }

    /// Hands the extractor over to a [`crate::blend::BlendScorer`].
    #[must_use]
    pub fn into_extractor(self) -> FeatureExtractor<B> {
        self.extractor
    }

    pub fn cache_features(&self, ratings: &[Rating]) -> Result<FeatureCache> {
        self.extractor.cache(ratings)
    }

    /// Runs exactly `n_iterations` epochs over the cached samples.
    ///
    /// Every epoch visits the samples in a fresh order drawn from `rng`, so the same seed
    /// gives the same model. Each sample with label `y` and features `x` applies
    /// `g = learning_rate × y × σ(-y × prediction)`, `intercept += g`, `w += g × x`.
    #[instrument(skip_all, fields(n_samples = cache.len(), n_iterations = self.opts.n_iterations))]
    pub fn train<R: Rng + ?Sized>(&self, cache: &FeatureCache, rng: &mut R) -> LogisticModel {
        let start_instant = Instant::now();
        let mut model = LogisticModel::new(0.0, vec![0.0; cache.n_features()]);
        if cache.is_empty() {
            warn!("no training samples, returning the zero model");
            return model;
        }

        let mut samples = cache.samples.clone();
        for epoch in 1..=self.opts.n_iterations {
            samples.shuffle(rng);
            let mut loss = LogisticLoss::default();
            for sample in &samples {
                let features = &cache.features[sample.feature_index];
                loss.push_sample(sample.label, model.linear_predictor(features));
                let gradient =
                    self.opts.learning_rate * sample.label * model.evaluate(-sample.label, features);
                model.step(gradient, features);
            }
            debug!(epoch, loss = loss.finalise());
        }

        info!(
            intercept = model.intercept(),
            coefficients = ?model.coefficients(),
            elapsed = %start_instant.elapsed(),
            "trained",
        );
        model
    }

    /// Caches the features of the ratings and trains on them.
    pub fn fit<R: Rng + ?Sized>(&self, ratings: &[Rating], rng: &mut R) -> Result<LogisticModel> {
        let cache = self.cache_features(ratings)?;
        Ok(self.train(&cache, rng))
    }
}
