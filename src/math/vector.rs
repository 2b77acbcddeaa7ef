//! Sparse vectors keyed by an id or a tag.
//!
//! Missing entries are implicit zeros.

use std::hash::Hash;

use crate::helpers::average::Average;
use crate::prelude::*;

pub type SparseVector<K> = AHashMap<K, f64>;

/// Collects the ratings into a vector keyed by the given id.
/// A repeated key keeps the last value.
pub fn from_ratings<'a, K, F>(ratings: impl IntoIterator<Item = &'a Rating>, key: F) -> SparseVector<K>
where
    K: Eq + Hash,
    F: Fn(&Rating) -> K,
{
    ratings
        .into_iter()
        .map(|rating| (key(rating), rating.value))
        .collect()
}

/// Mean of the stored entries. Fails on an empty vector.
pub fn mean<K>(x: &SparseVector<K>) -> Result<f64> {
    x.values().copied().collect::<Average>().average()
}

/// Subtracts the mean from every stored entry in place.
pub fn mean_center<K>(x: &mut SparseVector<K>, mean: f64) {
    for value in x.values_mut() {
        *value -= mean;
    }
}

#[must_use]
pub fn norm<K>(x: &SparseVector<K>) -> f64 {
    x.values().map(|xi| xi * xi).sum::<f64>().sqrt()
}

/// Dot product over the key union, which reduces to the key intersection.
#[must_use]
pub fn dot<K: Eq + Hash>(x: &SparseVector<K>, y: &SparseVector<K>) -> f64 {
    let (shorter, longer) = if x.len() <= y.len() { (x, y) } else { (y, x) };
    shorter
        .iter()
        .filter_map(|(key, xi)| longer.get(key).map(|yi| xi * yi))
        .sum()
}

/// Cosine similarity, defined as `0` when either vector has zero norm.
#[must_use]
pub fn cosine_similarity<K: Eq + Hash>(x: &SparseVector<K>, y: &SparseVector<K>) -> f64 {
    let denominator = norm(x) * norm(y);
    if denominator == 0.0 {
        return 0.0;
    }
    dot(x, y) / denominator
}

/// Adds `scaling * rhs` to the vector in place.
pub fn add_scaled<K: Eq + Hash + Clone>(x: &mut SparseVector<K>, rhs: &SparseVector<K>, scaling: f64) {
    for (key, value) in rhs {
        *x.entry(key.clone()).or_insert(0.0) += scaling * value;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vector(entries: &[(i64, f64)]) -> SparseVector<i64> {
        entries.iter().copied().collect()
    }

    #[test]
    fn cosine_similarity_ok() {
        let vector_1 = vector(&[(1, 1.0), (2, 2.0), (3, 3.0)]);
        let vector_2 = vector(&[(1, 3.0), (2, 5.0), (3, 7.0)]);
        let similarity = cosine_similarity(&vector_1, &vector_2);
        assert!((similarity - 0.9974149030430578).abs() < 1e-12);
    }

    #[test]
    fn cosine_similarity_disjoint_keys_ok() {
        let vector_1 = vector(&[(1, 1.0), (2, -1.0)]);
        let vector_2 = vector(&[(3, 2.0)]);
        assert_eq!(cosine_similarity(&vector_1, &vector_2), 0.0);
    }

    #[test]
    fn cosine_similarity_zero_norm_ok() {
        let zero = vector(&[(1, 0.0), (2, 0.0)]);
        let other = vector(&[(1, 1.0), (2, 2.0)]);
        assert_eq!(cosine_similarity(&zero, &other), 0.0);
        assert_eq!(cosine_similarity(&zero, &zero), 0.0);
        assert_eq!(cosine_similarity(&SparseVector::<i64>::default(), &other), 0.0);
    }

    #[test]
    fn cosine_similarity_symmetric_ok() {
        let vector_1 = vector(&[(1, 0.3), (2, -1.2), (5, 2.5), (7, 0.1)]);
        let vector_2 = vector(&[(1, -0.7), (5, 1.5), (8, 3.0)]);
        let forward = cosine_similarity(&vector_1, &vector_2);
        let backward = cosine_similarity(&vector_2, &vector_1);
        assert!((forward - backward).abs() < 1e-12);
    }

    #[test]
    fn mean_center_ok() -> Result {
        let mut x = vector(&[(1, 5.0), (2, 4.0), (3, 1.0)]);
        let mean = mean(&x)?;
        mean_center(&mut x, mean);
        assert!(x.values().sum::<f64>().abs() < 1e-12);
        assert!((x[&1] - (5.0 - 10.0 / 3.0)).abs() < 1e-12);
        Ok(())
    }

    #[test]
    fn mean_of_empty_vector_is_error() {
        assert!(mean(&SparseVector::<i64>::default()).is_err());
    }

    #[test]
    fn add_scaled_ok() {
        let mut x = vector(&[(1, 1.0)]);
        add_scaled(&mut x, &vector(&[(1, 2.0), (2, 4.0)]), -0.5);
        assert_eq!(x, vector(&[(1, 0.0), (2, -2.0)]));
    }
}
