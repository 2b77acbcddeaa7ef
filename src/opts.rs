//! Tuning options.
//!
//! Every group can be parsed from the command line or the environment by a host
//! application, or built by hand. Constructors call `validate()` in both cases.

use clap::{Args, Parser};

use crate::error::ScoringError;
use crate::prelude::*;

pub mod parsers;

#[derive(Parser, Debug, Clone, Default)]
#[command(author, version, about)]
pub struct Opts {
    #[command(flatten)]
    pub item_item: ItemItemOpts,

    #[command(flatten)]
    pub user_user: UserUserOpts,

    #[command(flatten)]
    pub blend: BlendOpts,

    #[command(flatten)]
    pub profile: ProfileOpts,

    #[command(flatten)]
    pub baseline: BaselineOpts,
}

impl Opts {
    pub fn validate(&self) -> Result {
        self.item_item.validate()?;
        self.user_user.validate()?;
        self.blend.validate()?;
        self.profile.validate()?;
        self.baseline.validate()
    }
}

/// Item-based scorer
#[derive(Args, Debug, Clone, Copy)]
pub struct ItemItemOpts {
    /// Maximum number of rated neighbor items used for a prediction
    #[arg(
        id = "item_neighborhood_size",
        long = "item-neighborhood-size",
        env = "ITEM_NEIGHBORHOOD_SIZE",
        default_value_t = 20,
        value_parser = parsers::non_zero_usize
    )]
    pub neighborhood_size: usize,

    /// Minimum number of rated neighbor items required to emit a prediction
    #[arg(
        id = "item_min_neighbors",
        long = "item-min-neighbors",
        env = "ITEM_MIN_NEIGHBORS",
        default_value_t = 1,
        value_parser = parsers::non_zero_usize
    )]
    pub min_neighbors: usize,
}

impl Default for ItemItemOpts {
    fn default() -> Self {
        Self {
            neighborhood_size: 20,
            min_neighbors: 1,
        }
    }
}

impl ItemItemOpts {
    pub fn validate(&self) -> Result {
        validate_neighborhood(self.neighborhood_size, self.min_neighbors)
    }
}

/// User-based scorer
#[derive(Args, Debug, Clone, Copy)]
pub struct UserUserOpts {
    /// Maximum number of neighbor users used for a prediction
    #[arg(
        id = "user_neighborhood_size",
        long = "user-neighborhood-size",
        env = "USER_NEIGHBORHOOD_SIZE",
        default_value_t = 30,
        value_parser = parsers::non_zero_usize
    )]
    pub neighborhood_size: usize,

    /// Minimum number of neighbor users required to emit a prediction
    #[arg(
        id = "user_min_neighbors",
        long = "user-min-neighbors",
        env = "USER_MIN_NEIGHBORS",
        default_value_t = 2,
        value_parser = parsers::non_zero_usize
    )]
    pub min_neighbors: usize,
}

impl Default for UserUserOpts {
    fn default() -> Self {
        Self {
            neighborhood_size: 30,
            min_neighbors: 2,
        }
    }
}

impl UserUserOpts {
    pub fn validate(&self) -> Result {
        validate_neighborhood(self.neighborhood_size, self.min_neighbors)
    }
}

fn validate_neighborhood(neighborhood_size: usize, min_neighbors: usize) -> Result {
    if neighborhood_size == 0 {
        return Err(ScoringError::invalid_parameter("neighborhood_size", "positive", 0).into());
    }
    if min_neighbors == 0 || min_neighbors > neighborhood_size {
        return Err(ScoringError::invalid_parameter(
            "min_neighbors",
            "within 1..=neighborhood_size",
            min_neighbors,
        )
        .into());
    }
    Ok(())
}

/// Logistic blend training
#[derive(Args, Debug, Clone, Copy)]
pub struct BlendOpts {
    /// SGD learning rate
    #[arg(
        long = "blend-learning-rate",
        env = "BLEND_LEARNING_RATE",
        default_value_t = 0.00005,
        value_parser = parsers::positive_f64
    )]
    pub learning_rate: f64,

    /// Number of training epochs, each one is a full pass over the shuffled ratings
    #[arg(
        long = "blend-n-iterations",
        env = "BLEND_N_ITERATIONS",
        default_value_t = 100,
        value_parser = parsers::non_zero_usize
    )]
    pub n_iterations: usize,
}

impl Default for BlendOpts {
    fn default() -> Self {
        Self {
            learning_rate: 0.00005,
            n_iterations: 100,
        }
    }
}

impl BlendOpts {
    pub fn validate(&self) -> Result {
        if !(self.learning_rate.is_finite() && self.learning_rate > 0.0) {
            return Err(ScoringError::invalid_parameter(
                "learning_rate",
                "positive and finite",
                self.learning_rate,
            )
            .into());
        }
        if self.n_iterations == 0 {
            return Err(ScoringError::invalid_parameter("n_iterations", "positive", 0).into());
        }
        Ok(())
    }
}

/// Content-based profiles
#[derive(Args, Debug, Clone, Copy)]
pub struct ProfileOpts {
    /// Lowest rating that adds an item to a threshold profile
    #[arg(
        long = "profile-threshold",
        env = "PROFILE_THRESHOLD",
        default_value_t = 3.5,
        allow_negative_numbers = true
    )]
    pub threshold: f64,
}

impl Default for ProfileOpts {
    fn default() -> Self {
        Self { threshold: 3.5 }
    }
}

impl ProfileOpts {
    pub fn validate(&self) -> Result {
        if !self.threshold.is_finite() {
            return Err(
                ScoringError::invalid_parameter("threshold", "finite", self.threshold).into()
            );
        }
        Ok(())
    }
}

/// Damped means and biases
#[derive(Args, Debug, Clone, Copy)]
pub struct BaselineOpts {
    /// Number of imaginary global-mean ratings added to every item and user
    #[arg(
        long = "damping",
        env = "DAMPING",
        default_value_t = 5.0,
        value_parser = parsers::non_negative_f64
    )]
    pub damping: f64,
}

impl Default for BaselineOpts {
    fn default() -> Self {
        Self { damping: 5.0 }
    }
}

impl BaselineOpts {
    pub fn validate(&self) -> Result {
        if !(self.damping.is_finite() && self.damping >= 0.0) {
            return Err(ScoringError::invalid_parameter(
                "damping",
                "non-negative and finite",
                self.damping,
            )
            .into());
        }
        Ok(())
    }
}
