use crate::math::vector::add_scaled;
use crate::opts::ProfileOpts;
use crate::prelude::*;
use crate::profile::{ProfileBuilder, TagVector, TagVectorModel};

/// Sums the tag vectors of the items rated at least at the threshold.
pub struct ThresholdProfileBuilder<M> {
    model: M,
    threshold: f64,
}

impl<M: TagVectorModel> ThresholdProfileBuilder<M> {
    /// Uses the default threshold of `3.5`.
    pub fn new(model: M) -> Self {
        Self {
            model,
            threshold: ProfileOpts::default().threshold,
        }
    }

    pub fn with_opts(model: M, opts: ProfileOpts) -> Result<Self> {
        opts.validate()?;
        Ok(Self {
            model,
            threshold: opts.threshold,
        })
    }
}

impl<M: TagVectorModel> ProfileBuilder for ThresholdProfileBuilder<M> {
    fn build_profile(&self, ratings: &[Rating]) -> Result<TagVector> {
        let mut profile = TagVector::default();
        for rating in ratings.iter().filter(|rating| rating.value >= self.threshold) {
            if let Some(tags) = self.model.tag_vector(rating.item_id) {
                add_scaled(&mut profile, tags, 1.0);
            }
        }
        Ok(profile)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScoringError;
    use crate::profile::fixtures::{tag_model, tags};

    #[test]
    fn build_profile_ok() -> Result {
        let builder = ThresholdProfileBuilder::new(tag_model());
        let profile = builder.build_profile(&[
            Rating::new(1, 1, 4.0),
            Rating::new(1, 2, 3.5),
            Rating::new(1, 3, 2.0),
        ])?;
        assert_eq!(profile, tags(&[("space", 1.5), ("robots", 0.5), ("romance", 1.0)]));
        Ok(())
    }

    #[test]
    fn sub_threshold_ratings_are_ignored_ok() -> Result {
        let builder = ThresholdProfileBuilder::new(tag_model());
        let ratings = [Rating::new(1, 1, 5.0)];
        let with_low = [Rating::new(1, 1, 5.0), Rating::new(1, 3, 3.0)];
        assert_eq!(builder.build_profile(&ratings)?, builder.build_profile(&with_low)?);
        Ok(())
    }

    #[test]
    fn empty_ratings_ok() -> Result {
        let builder = ThresholdProfileBuilder::new(tag_model());
        assert!(builder.build_profile(&[])?.is_empty());
        Ok(())
    }

    #[test]
    fn unknown_items_are_skipped_ok() -> Result {
        let opts = ProfileOpts { threshold: 1.0 };
        let builder = ThresholdProfileBuilder::with_opts(tag_model(), opts)?;
        assert!(builder.build_profile(&[Rating::new(1, 42, 5.0)])?.is_empty());
        Ok(())
    }

    #[test]
    fn custom_threshold_ok() -> Result {
        let opts = ProfileOpts { threshold: 4.5 };
        let builder = ThresholdProfileBuilder::with_opts(tag_model(), opts)?;
        let profile = builder.build_profile(&[Rating::new(1, 1, 4.0), Rating::new(1, 3, 5.0)])?;
        assert_eq!(profile, tags(&[("romance", 2.0)]));
        Ok(())
    }

    #[test]
    fn invalid_threshold_is_rejected() {
        let opts = ProfileOpts { threshold: f64::NAN };
        let error = ThresholdProfileBuilder::with_opts(tag_model(), opts).err().unwrap();
        assert!(matches!(
            error.downcast_ref::<ScoringError>(),
            Some(ScoringError::InvalidParameter { name: "threshold", .. })
        ));
    }
}
