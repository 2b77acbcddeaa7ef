pub use std::result::Result as StdResult;
pub use std::sync::Arc;

pub use anyhow::{anyhow, Context, Error};
pub use tracing::{debug, info, instrument, trace, warn};

pub use crate::helpers::Instant;
pub use crate::models::{ItemId, Rating, UserId};

pub type AHashMap<K, V> = std::collections::HashMap<K, V, ahash::RandomState>;
pub type AHashSet<T> = std::collections::HashSet<T, ahash::RandomState>;
pub type Result<T = (), E = anyhow::Error> = std::result::Result<T, E>;
