use thiserror::Error;

/// Failures the caller may want to tell apart from the store errors.
#[derive(Debug, Error, PartialEq)]
pub enum ScoringError {
    #[error("cannot average an empty rating list")]
    EmptyRatings,

    #[error("`{name}` must be {expected}, got {value}")]
    InvalidParameter {
        name: &'static str,
        expected: &'static str,
        value: String,
    },
}

impl ScoringError {
    pub fn invalid_parameter(
        name: &'static str,
        expected: &'static str,
        value: impl ToString,
    ) -> Self {
        Self::InvalidParameter {
            name,
            expected,
            value: value.to_string(),
        }
    }
}
