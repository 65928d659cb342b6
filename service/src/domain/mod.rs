//! Domain definitions.

pub mod guest;
pub mod reservation;
pub mod room;
pub mod room_type;

pub use self::{
    guest::Guest, reservation::Reservation, room::Room, room_type::RoomType,
};
