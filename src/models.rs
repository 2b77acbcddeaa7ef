use serde::{Deserialize, Serialize};

pub type UserId = i64;
pub type ItemId = i64;

/// Single observed rating.
#[derive(Serialize, Deserialize, Debug, Copy, Clone, PartialEq)]
pub struct Rating {
    pub user_id: UserId,
    pub item_id: ItemId,
    pub value: f64,
}

impl Rating {
    #[must_use]
    pub const fn new(user_id: UserId, item_id: ItemId, value: f64) -> Self {
        Self {
            user_id,
            item_id,
            value,
        }
    }
}
