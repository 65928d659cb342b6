//! [`Reservation`]-related [`Database`] implementations.

use std::cmp::Reverse;

use common::operations::{By, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{reservation, Reservation},
    infra::{
        database::{
            self,
            memory::{self, State, Storage},
            Memory,
        },
        Database,
    },
    read::reservation::{Active, Overview},
};

/// Checks the [`Reservation`] to reference existing entities only.
fn check_references(
    state: &State,
    reservation: &Reservation,
) -> Result<(), memory::Error> {
    if !state.guests.contains_key(&reservation.guest_id) {
        return Err(memory::Error::ForeignKeyViolation(
            "reservations_guest_id_fkey",
        ));
    }
    if !reservation.room_ids.iter().all(|id| state.rooms.contains_key(id)) {
        return Err(memory::Error::ForeignKeyViolation(
            "reservation_rooms_room_id_fkey",
        ));
    }
    Ok(())
}

impl<C> Database<Select<By<Option<Reservation>, reservation::Id>>>
    for Memory<C>
where
    C: Storage,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.reservations.get(&id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Reservation>> for Memory<C>
where
    C: Storage,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(mut reservation): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        reservation.room_ids.sort();
        reservation.room_ids.dedup();
        self.write(|s| {
            check_references(s, &reservation)?;
            if s.reservations.contains_key(&reservation.id) {
                return Err(memory::Error::UniqueViolation(
                    "reservations_pkey",
                ));
            }
            _ = s.reservations.insert(reservation.id, reservation);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Reservation>> for Memory<C>
where
    C: Storage,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(reservation): Update<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| {
            // Room links are never changed after the insertion.
            if let Some(existing) = s.reservations.get_mut(&reservation.id) {
                existing.status = reservation.status;
                existing.total = reservation.total;
            }
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Lock<By<Reservation, reservation::Id>>> for Memory<C>
where
    C: Storage,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Reservation, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Transactions own the whole `State` exclusively already.
        Ok(())
    }
}

impl<C> Database<Select<By<Vec<Overview>, Active>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Vec<Overview>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Overview>, Active>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| {
            let mut overviews = s
                .reservations
                .values()
                .filter(|r| {
                    matches!(
                        r.status,
                        reservation::Status::Confirmed
                            | reservation::Status::Completed,
                    )
                })
                .filter_map(|r| {
                    let guest = s.guests.get(&r.guest_id)?;
                    let mut room_numbers = r
                        .room_ids
                        .iter()
                        .filter_map(|id| s.rooms.get(id))
                        .map(|room| room.number.clone())
                        .collect::<Vec<_>>();
                    room_numbers.sort();
                    Some(Overview {
                        reservation: r.clone(),
                        guest_first_name: guest.first_name.clone(),
                        guest_last_name: guest.last_name.clone(),
                        guest_email: guest.email.clone(),
                        room_numbers,
                    })
                })
                .collect::<Vec<_>>();
            overviews.sort_by_key(|o| {
                (Reverse(o.reservation.stay.check_in()), o.reservation.id)
            });
            overviews
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
