//! Content-based user profiles over weighted item tags.

use crate::math::vector::SparseVector;
use crate::prelude::*;

pub mod scorer;
pub mod threshold;
pub mod weighted;

pub use self::scorer::ContentScorer;
pub use self::threshold::ThresholdProfileBuilder;
pub use self::weighted::WeightedProfileBuilder;

/// Tag → weight.
pub type TagVector = SparseVector<String>;

/// Per-item weighted tag vectors, for example TF-IDF.
pub trait TagVectorModel {
    /// `None` for an item without tags.
    fn tag_vector(&self, item_id: ItemId) -> Option<&TagVector>;
}

impl TagVectorModel for AHashMap<ItemId, TagVector> {
    fn tag_vector(&self, item_id: ItemId) -> Option<&TagVector> {
        self.get(&item_id)
    }
}

impl<M: TagVectorModel + ?Sized> TagVectorModel for Arc<M> {
    fn tag_vector(&self, item_id: ItemId) -> Option<&TagVector> {
        (**self).tag_vector(item_id)
    }
}

/// Builds a user profile from the user's ratings.
pub trait ProfileBuilder {
    fn build_profile(&self, ratings: &[Rating]) -> Result<TagVector>;
}

#[cfg(test)]
pub(crate) mod fixtures {
    use super::*;

    pub fn tag_model() -> AHashMap<ItemId, TagVector> {
        let mut model = AHashMap::default();
        model.insert(1, tags(&[("space", 1.0), ("robots", 0.5)]));
        model.insert(2, tags(&[("space", 0.5), ("romance", 1.0)]));
        model.insert(3, tags(&[("romance", 2.0)]));
        model
    }

    pub fn tags(entries: &[(&str, f64)]) -> TagVector {
        entries.iter().map(|(tag, weight)| (tag.to_string(), *weight)).collect()
    }
}
