use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::prelude::*;

/// Initialises tracing for a host application.
///
/// The filter is read from `RATING_RECOMMENDER_LOG` and falls back to the `info` level
/// for this crate.
pub fn init() -> Result {
    subscriber()?
        .try_init()
        .context("failed to install the tracing subscriber")?;
    Ok(())
}

/// Formatting subscriber with the environment filter, not installed anywhere.
pub fn subscriber() -> Result<impl ::tracing::Subscriber + Send + Sync + 'static> {
    let format_filter = EnvFilter::try_from_env("RATING_RECOMMENDER_LOG")
        .or_else(|_| EnvFilter::try_new("rating_recommender=info"))?;
    let format_layer = tracing_subscriber::fmt::layer()
        .without_time()
        .with_filter(format_filter);
    Ok(tracing_subscriber::Registry::default().with(format_layer))
}

#[cfg(test)]
mod tests {
    use ::tracing::Level;

    use super::*;

    #[test]
    fn default_filter_ok() -> Result {
        ::tracing::subscriber::with_default(subscriber()?, || {
            assert!(::tracing::enabled!(Level::INFO));
            assert!(!::tracing::enabled!(Level::DEBUG));
        });
        Ok(())
    }
}
