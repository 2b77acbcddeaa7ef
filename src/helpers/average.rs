use crate::error::ScoringError;
use crate::prelude::*;

/// Running arithmetic mean.
#[derive(Default, Copy, Clone)]
pub struct Average {
    sum: f64,
    count: usize,
}

impl Average {
    pub fn push(&mut self, value: f64) {
        self.count += 1;
        self.sum += value;
    }

    #[must_use]
    pub const fn count(&self) -> usize {
        self.count
    }

    #[must_use]
    pub const fn sum(&self) -> f64 {
        self.sum
    }

    /// Fails on an empty sample instead of returning `NaN`.
    pub fn average(&self) -> Result<f64> {
        if self.count == 0 {
            return Err(ScoringError::EmptyRatings.into());
        }
        Ok(self.sum / self.count as f64)
    }
}

impl FromIterator<f64> for Average {
    fn from_iter<I: IntoIterator<Item = f64>>(iter: I) -> Self {
        let mut average = Self::default();
        for value in iter {
            average.push(value);
        }
        average
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn average_ok() -> Result {
        let average: Average = [5.0, 4.0, 3.0].into_iter().collect();
        assert_eq!(average.count(), 3);
        assert!((average.average()? - 4.0).abs() < f64::EPSILON);
        Ok(())
    }

    #[test]
    fn empty_average_is_error() {
        let error = Average::default().average().unwrap_err();
        assert_eq!(error.downcast_ref::<ScoringError>(), Some(&ScoringError::EmptyRatings));
    }
}
