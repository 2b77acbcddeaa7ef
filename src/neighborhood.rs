//! Neighbor ordering and weighted aggregation shared by the neighborhood scorers.

use std::cmp::Ordering;

/// Sorts the neighbors by descending similarity.
///
/// Equal similarities are ordered by the lower id first, so that the order is total
/// and distinct neighbors never collapse.
#[must_use]
pub fn sort_by_similarity(neighbors: impl IntoIterator<Item = (i64, f64)>) -> Vec<(i64, f64)> {
    let mut neighbors: Vec<_> = neighbors.into_iter().collect();
    neighbors.sort_unstable_by(compare_neighbors);
    neighbors
}

fn compare_neighbors((lhs_id, lhs): &(i64, f64), (rhs_id, rhs): &(i64, f64)) -> Ordering {
    rhs.total_cmp(lhs).then_with(|| lhs_id.cmp(rhs_id))
}

/// Similarity-weighted sum of normalized ratings.
#[derive(Default, Copy, Clone, Debug)]
pub struct Aggregate {
    weighted_sum: f64,
    weight_sum: f64,
    n_neighbors: usize,
}

impl Aggregate {
    pub fn push(&mut self, similarity: f64, normalized_rating: f64) {
        self.weighted_sum += similarity * normalized_rating;
        self.weight_sum += similarity;
        self.n_neighbors += 1;
    }

    #[must_use]
    pub const fn n_neighbors(&self) -> usize {
        self.n_neighbors
    }

    /// Weighted average of the normalized ratings.
    ///
    /// `None` when fewer than `min_neighbors` contributed or the average is not finite.
    #[must_use]
    pub fn offset(&self, min_neighbors: usize) -> Option<f64> {
        if self.n_neighbors == 0 || self.n_neighbors < min_neighbors {
            return None;
        }
        let offset = self.weighted_sum / self.weight_sum;
        offset.is_finite().then_some(offset)
    }
}

impl FromIterator<(f64, f64)> for Aggregate {
    /// Collects `(similarity, normalized rating)` pairs.
    fn from_iter<I: IntoIterator<Item = (f64, f64)>>(iter: I) -> Self {
        let mut aggregate = Self::default();
        for (similarity, rating) in iter {
            aggregate.push(similarity, rating);
        }
        aggregate
    }
}
