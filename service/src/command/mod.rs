//! [`Command`] definition.

pub mod book_rooms;
pub mod create_room;
pub mod create_room_type;
pub mod register_guest;
pub mod set_room_status;
pub mod transit_reservation;

/// [`Command`] of the [`Service`].
///
/// [`Service`]: crate::Service
pub use common::Handler as Command;

pub use self::{
    book_rooms::BookRooms,
    create_room::CreateRoom,
    create_room_type::CreateRoomType,
    register_guest::RegisterGuest,
    set_room_status::SetRoomStatus,
    transit_reservation::{
        CancelReservation, CompleteReservation, TransitReservation,
    },
};
