//! [`Command`] for transiting a [`Reservation`] to another
//! [`reservation::Status`].

use common::{
    operations::{By, Commit, Lock, Select, Transact, Transacted, Update},
    FromParam,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::Room;
use crate::{
    domain::{reservation, Reservation},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for cancelling a [`reservation::Status::Confirmed`]
/// [`Reservation`], releasing its [`Room`]s.
pub type CancelReservation =
    TransitReservation<{ reservation::Status::Cancelled.u8() }>;

/// [`Command`] for completing a [`reservation::Status::Confirmed`]
/// [`Reservation`] once the stay is over.
pub type CompleteReservation =
    TransitReservation<{ reservation::Status::Completed.u8() }>;

/// [`Command`] for transiting a [`Reservation`] to the
/// [`reservation::Status`] represented by `TO`.
#[derive(Clone, Copy, Debug)]
pub struct TransitReservation<const TO: u8> {
    /// ID of the [`Reservation`] to be transited.
    pub reservation_id: reservation::Id,
}

impl<Db, const TO: u8> Command<TransitReservation<TO>> for Service<Db>
where
    reservation::Status: FromParam<TO>,
    Db: Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<
            Lock<By<Reservation, reservation::Id>>,
            Err = Traced<database::Error>,
        > + Database<
            Select<By<Option<Reservation>, reservation::Id>>,
            Ok = Option<Reservation>,
            Err = Traced<database::Error>,
        > + Database<Update<Reservation>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Reservation;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: TransitReservation<TO>,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let TransitReservation { reservation_id } = cmd;
        let to = <reservation::Status as FromParam<TO>>::VALUE;

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        // Avoid concurrent transitions.
        tx.execute(Lock(By::new(reservation_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        let mut reservation = tx
            .execute(Select(By::<Option<Reservation>, _>::new(
                reservation_id,
            )))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::ReservationNotExists(reservation_id))
            .map_err(tracerr::wrap!())?;

        let from = reservation.status;
        if !from.can_transit_to(to) {
            return Err(tracerr::new!(E::InvalidStatusTransition {
                id: reservation_id,
                from,
                to,
            }));
        }

        reservation.status = to;
        tx.execute(Update(reservation.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Reservation(id: {reservation_id})` is `{to}` now");

        Ok(reservation)
    }
}

/// Error of [`TransitReservation`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`Reservation`] cannot be transited to the requested
    /// [`reservation::Status`].
    #[display("`Reservation(id: {id})` cannot be transited from `{from}` to \
               `{to}`")]
    InvalidStatusTransition {
        /// ID of the [`Reservation`].
        #[error(not(source))]
        id: reservation::Id,

        /// Current [`reservation::Status`] of the [`Reservation`].
        #[error(not(source))]
        from: reservation::Status,

        /// Requested [`reservation::Status`].
        #[error(not(source))]
        to: reservation::Status,
    },

    /// [`Reservation`] with the provided ID does not exist.
    #[display("`Reservation(id: {_0})` does not exist")]
    ReservationNotExists(#[error(not(source))] reservation::Id),
}
