//! [`Command`] for booking [`Room`]s.

use std::collections::HashMap;

use common::operations::{
    By, Commit, Insert, Lock, Select, Transact, Transacted,
};
use derive_more::{Display, Error, From};
use itertools::Itertools as _;
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::reservation::Status;
use crate::{
    domain::{
        guest,
        reservation::{self, CheckInDate, CheckOutDate, Stay},
        room, Guest, Reservation, Room,
    },
    infra::{database, Database},
    read::{
        availability::{Occupied, Search},
        room::Listing,
    },
    Service,
};

use super::Command;

/// [`Command`] for booking [`Room`]s for a [`Guest`], creating a new
/// [`Status::Confirmed`] [`Reservation`].
///
/// Availability of the [`Room`]s is re-checked at the moment of booking, so
/// no two [`Status::Confirmed`] [`Reservation`]s of the same [`Room`] ever
/// overlap.
#[derive(Clone, Debug)]
pub struct BookRooms {
    /// ID of the [`Guest`] to book the [`Room`]s for.
    pub guest_id: guest::Id,

    /// IDs of the [`Room`]s to book.
    ///
    /// Duplicates are ignored.
    pub room_ids: Vec<room::Id>,

    /// [`CheckInDate`] of the stay.
    pub check_in: CheckInDate,

    /// [`CheckOutDate`] of the stay.
    pub check_out: CheckOutDate,
}

impl BookRooms {
    /// Creates a new [`BookRooms`] [`Command`] booking the provided [`Room`]s
    /// found by the [`Search`] for its stay.
    ///
    /// # Errors
    ///
    /// With [`RoomNotFound`] if any of the [`Room`]s wasn't found by the
    /// [`Search`].
    pub fn from_search(
        guest_id: guest::Id,
        search: &Search,
        room_ids: impl IntoIterator<Item = room::Id>,
    ) -> Result<Self, RoomNotFound> {
        let room_ids = room_ids
            .into_iter()
            .map(|id| search.contains(id).then_some(id).ok_or(RoomNotFound(id)))
            .collect::<Result<Vec<_>, _>>()?;
        let stay = search.stay();
        Ok(Self {
            guest_id,
            room_ids,
            check_in: stay.check_in(),
            check_out: stay.check_out(),
        })
    }
}

/// [`Room`] wasn't found by a [`Search`].
#[derive(Clone, Copy, Debug, Display, Error)]
#[display("`Room(id: {_0})` is not found by the search")]
pub struct RoomNotFound(#[error(not(source))] pub room::Id);

impl<Db> Command<BookRooms> for Service<Db>
where
    Db: Database<
            Select<By<Option<Guest>, guest::Id>>,
            Ok = Option<Guest>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Room, room::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<HashMap<room::Id, Listing>, Vec<room::Id>>>,
            Ok = HashMap<room::Id, Listing>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Vec<room::Id>, Occupied>>,
            Ok = Vec<room::Id>,
            Err = Traced<database::Error>,
        > + Database<Insert<Reservation>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: BookRooms) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let BookRooms {
            guest_id,
            room_ids,
            check_in,
            check_out,
        } = cmd;

        let stay = Stay::new(check_in, check_out)
            .ok_or(E::InvalidDateRange {
                check_in,
                check_out,
            })
            .map_err(tracerr::wrap!())?;

        // Locking in the same order avoids deadlocks between bookings.
        let room_ids = room_ids.into_iter().sorted().dedup().collect_vec();
        if room_ids.is_empty() {
            return Err(tracerr::new!(E::NoRooms));
        }

        self.database()
            .execute(Select(By::<Option<Guest>, _>::new(guest_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::GuestNotExists(guest_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Serialize concurrent bookings of the same `Room`s.
        for id in &room_ids {
            tx.execute(Lock(By::new(*id)))
                .await
                .map_err(tracerr::map_from_and_wrap!(=> E))
                .map(drop)?;
        }

        let listings = tx
            .execute(Select(By::new(room_ids.clone())))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let mut nightly = Vec::with_capacity(room_ids.len());
        for id in &room_ids {
            let listing = listings
                .get(id)
                .ok_or(E::RoomNotExists(*id))
                .map_err(tracerr::wrap!())?;
            if !listing.room.is_available() {
                return Err(tracerr::new!(E::RoomUnavailable(*id)));
            }
            nightly.push(listing.nightly_price());
        }

        let occupied = tx
            .execute(Select(By::new(Occupied {
                stay,
                room_ids: room_ids.clone(),
            })))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if let Some(id) = occupied.first() {
            return Err(tracerr::new!(E::RoomUnavailable(*id)));
        }

        if !nightly.iter().map(|p| p.currency).all_equal() {
            return Err(tracerr::new!(E::MixedCurrencies));
        }
        let total = stay
            .quote(nightly)
            .ok_or(E::TotalOverflow)
            .map_err(tracerr::wrap!())?;

        let reservation = Reservation {
            id: reservation::Id::new(),
            guest_id,
            stay,
            room_ids,
            total,
            status: reservation::Status::Confirmed,
        };
        tx.execute(Insert(reservation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!(
            "`Reservation(id: {})` booked {} room(s) for \
             `{check_in}..{check_out}`",
            reservation.id,
            reservation.room_ids.len(),
        );

        Ok(reservation)
    }
}

/// Error of [`BookRooms`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Guest`] with the provided ID does not exist.
    #[display("`Guest(id: {_0})` does not exist")]
    GuestNotExists(#[error(not(source))] guest::Id),

    /// [`CheckOutDate`] is not after the [`CheckInDate`].
    #[display("Check-out `{check_out}` is not after check-in `{check_in}`")]
    InvalidDateRange {
        /// Requested [`CheckInDate`].
        #[error(not(source))]
        check_in: CheckInDate,

        /// Requested [`CheckOutDate`].
        #[error(not(source))]
        check_out: CheckOutDate,
    },

    /// Nightly prices of the [`Room`]s are in different currencies.
    #[display("Nightly prices of the rooms are in different currencies")]
    MixedCurrencies,

    /// No [`Room`]s are requested.
    #[display("No rooms are requested")]
    NoRooms,

    /// [`Room`] with the provided ID does not exist.
    #[display("`Room(id: {_0})` does not exist")]
    RoomNotExists(#[error(not(source))] room::Id),

    /// [`Room`] is out of service or occupied for the requested stay.
    #[display("`Room(id: {_0})` is unavailable for the requested stay")]
    RoomUnavailable(#[error(not(source))] room::Id),

    /// Total price of the stay is too large to be represented.
    #[display("Total price of the stay overflows")]
    TotalOverflow,
}
