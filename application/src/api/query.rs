//! GraphQL [`Query`]s definitions.

use common::Date;
use juniper::graphql_object;
use service::{domain, query, read, Query as _};

use crate::{api, error, AsError, Context, Error};

/// Root of all GraphQL queries.
#[derive(Clone, Copy, Debug)]
pub struct Query;

impl Query {
    /// Name of the [`tracing::Span`] for the queries.
    pub(crate) const SPAN_NAME: &'static str = "GraphQL query";
}

#[graphql_object(context = Context)]
impl Query {
    /// Returns all the `Room`s available for booking, ordered by their
    /// numbers.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "availableRooms",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn available_rooms(
        ctx: &Context,
    ) -> Result<Vec<api::Room>, Error> {
        Ok(ctx
            .service()
            .execute(query::rooms::ByStatus::by(
                domain::room::Status::Available,
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Searches `Room`s available for booking for the whole stay between the
    /// provided `Date`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_DATE_RANGE` - `checkOut` is not after `checkIn`.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = %check_in,
            check_out = %check_out,
            gql.name = "searchAvailableRooms",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn search_available_rooms(
        check_in: Date,
        check_out: Date,
        ctx: &Context,
    ) -> Result<api::reservation::Search, Error> {
        ctx.service()
            .execute(query::FindAvailableRooms {
                check_in: check_in.coerce(),
                check_out: check_out.coerce(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns the `Room` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - the `Room` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "room",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn room(
        id: api::room::Id,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        ctx.service()
            .execute(query::room::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| error::RoomError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns all the `RoomType`s, ordered by their names.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "roomTypes",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn room_types(
        ctx: &Context,
    ) -> Result<Vec<api::room::Type>, Error> {
        Ok(ctx
            .service()
            .execute(query::room_types::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns all the `Guest`s, ordered by their last and first names.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "guests",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn guests(ctx: &Context) -> Result<Vec<api::Guest>, Error> {
        Ok(ctx
            .service()
            .execute(query::guests::All::by(()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns the `Guest` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `GUEST_NOT_EXISTS` - the `Guest` with the specified ID does not
    ///                        exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "guest",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn guest(
        id: api::guest::Id,
        ctx: &Context,
    ) -> Result<api::Guest, Error> {
        ctx.service()
            .execute(query::guest::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| error::GuestError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Returns overviews of the confirmed and completed `Reservation`s, the
    /// latest check-ins first.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "activeReservations",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn active_reservations(
        ctx: &Context,
    ) -> Result<Vec<api::reservation::Overview>, Error> {
        Ok(ctx
            .service()
            .execute(query::reservations::Active::by(
                read::reservation::Active,
            ))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_iter()
            .map(Into::into)
            .collect())
    }

    /// Returns the `Reservation` with the specified ID.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `RESERVATION_NOT_EXISTS` - the `Reservation` with the specified ID
    ///                              does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            id = %id,
            gql.name = "reservation",
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn reservation(
        id: api::reservation::Id,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        ctx.service()
            .execute(query::reservation::ById::by(id.into()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| error::ReservationError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }
}

impl AsError for query::find_available_rooms::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidDateRange { .. } => {
                Some(error::DateRangeError::Invalid.into())
            }
        }
    }
}
