//! Item-based collaborative filtering.

pub mod model;
pub mod scorer;

pub use self::model::ItemItemModel;
pub use self::scorer::ItemItemScorer;
