use serde::{Deserialize, Serialize};

use crate::math::{dot, sigmoid};

/// Trained blend weights.
///
/// The coefficients follow the feature order of [`crate::blend::FeatureExtractor`].
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LogisticModel {
    intercept: f64,
    coefficients: Vec<f64>,
}

impl LogisticModel {
    #[must_use]
    pub fn new(intercept: f64, coefficients: Vec<f64>) -> Self {
        Self {
            intercept,
            coefficients,
        }
    }

    #[must_use]
    pub const fn intercept(&self) -> f64 {
        self.intercept
    }

    #[must_use]
    pub fn coefficients(&self) -> &[f64] {
        &self.coefficients
    }

    /// `intercept + coefficients · features`.
    #[must_use]
    pub fn linear_predictor(&self, features: &[f64]) -> f64 {
        self.intercept + dot(&self.coefficients, features)
    }

    /// Moves the weights along `features`: `intercept += gradient`, `w += gradient × features`.
    pub(crate) fn step(&mut self, gradient: f64, features: &[f64]) {
        self.intercept += gradient;
        for (coefficient, feature) in self.coefficients.iter_mut().zip(features) {
            *coefficient += gradient * feature;
        }
    }

    /// `σ(label × linear predictor)`.
    #[must_use]
    pub fn evaluate(&self, label: f64, features: &[f64]) -> f64 {
        sigmoid(label * self.linear_predictor(features))
    }
}
