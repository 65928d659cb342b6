//! [`Query`] for finding [`Room`]s available for a stay.

use common::operations::{By, Select};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::{reservation::Status, Reservation, Room};
use crate::{
    domain::reservation::{CheckInDate, CheckOutDate, Stay},
    infra::{database, Database},
    read::{
        availability::{Search, Vacant},
        room::Listing,
    },
    Service,
};

use super::Query;

/// [`Query`] for finding [`Room`]s available for a stay.
///
/// A [`Room`] is available if it's in service and no [`Status::Confirmed`]
/// [`Reservation`] of it overlaps the requested stay.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct FindAvailableRooms {
    /// [`CheckInDate`] of the requested stay.
    pub check_in: CheckInDate,

    /// [`CheckOutDate`] of the requested stay.
    pub check_out: CheckOutDate,
}

impl<Db> Query<FindAvailableRooms> for Service<Db>
where
    Db: Database<
        Select<By<Vec<Listing>, Vacant>>,
        Ok = Vec<Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Search;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        query: FindAvailableRooms,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let FindAvailableRooms {
            check_in,
            check_out,
        } = query;

        let stay = Stay::new(check_in, check_out)
            .ok_or(E::InvalidDateRange {
                check_in,
                check_out,
            })
            .map_err(tracerr::wrap!())?;

        let rooms = self
            .database()
            .execute(Select(By::new(Vacant(stay))))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        Ok(Search::new(stay, rooms))
    }
}

/// Error of [`FindAvailableRooms`] [`Query`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

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
}
