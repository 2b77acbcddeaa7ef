pub mod vector;

#[must_use]
#[inline]
pub fn dot(x: &[f64], y: &[f64]) -> f64 {
    debug_assert_eq!(x.len(), y.len());
    x.iter().zip(y).fold(0.0, |dot, (xi, yi)| dot + xi * yi)
}

/// Logistic function `1 / (1 + e^(-x))`.
#[must_use]
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    statrs::function::logistic::logistic(x)
}
