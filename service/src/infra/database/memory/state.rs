//! [`State`] definitions.

use std::{collections::HashMap, future::Future};

use tracerr::Traced;

use crate::{
    domain::{
        guest, reservation, room, room_type, Guest, Reservation, Room,
        RoomType,
    },
    infra::database::{self, memory},
};

/// Whole data kept by a [`Memory`] database.
///
/// [`Memory`]: super::Memory
#[derive(Clone, Debug, Default)]
pub struct State {
    /// All the [`RoomType`]s.
    pub room_types: HashMap<room_type::Id, RoomType>,

    /// All the [`Room`]s.
    pub rooms: HashMap<room::Id, Room>,

    /// All the [`Guest`]s.
    pub guests: HashMap<guest::Id, Guest>,

    /// All the [`Reservation`]s along with their [`Room`] links.
    pub reservations: HashMap<reservation::Id, Reservation>,
}

/// Generic access to a [`State`].
pub trait Storage {
    /// Reads the [`State`] with the provided function.
    ///
    /// # Errors
    ///
    /// If the [`State`] cannot be accessed anymore.
    fn read<F, R>(
        &self,
        f: F,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>
    where
        F: FnOnce(&State) -> R;

    /// Modifies the [`State`] with the provided function.
    ///
    /// The function must check all the constraints before modifying anything,
    /// so a failed modification leaves the [`State`] untouched.
    ///
    /// # Errors
    ///
    /// If the [`State`] cannot be accessed anymore, or the function fails.
    fn write<F, R>(
        &self,
        f: F,
    ) -> impl Future<Output = Result<R, Traced<database::Error>>>
    where
        F: FnOnce(&mut State) -> Result<R, memory::Error>;
}
