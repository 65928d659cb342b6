//! [`Room`] read model definitions.

use common::Money;

use crate::domain::{room_type, Room, RoomType};

/// [`Room`] read together with its [`RoomType`].
#[derive(Clone, Debug)]
pub struct Listing {
    /// Listed [`Room`].
    pub room: Room,

    /// [`RoomType`] of the listed [`Room`].
    pub room_type: RoomType,
}

impl Listing {
    /// Returns the nightly price of the listed [`Room`].
    #[must_use]
    pub fn nightly_price(&self) -> Money {
        self.room_type.base_price
    }

    /// Returns the [`room_type::Capacity`] of the listed [`Room`].
    #[must_use]
    pub fn capacity(&self) -> room_type::Capacity {
        self.room_type.capacity
    }
}
