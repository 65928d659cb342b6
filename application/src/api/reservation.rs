//! [`Reservation`]-related definitions.

use common::{Date, Money};
use derive_more::{Display, From, Into};
use itertools::Itertools as _;
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, query, read, Query as _};
use uuid::Uuid;

use crate::{api, error, AsError, Context, Error};

/// A reservation of hotel rooms.
#[derive(Clone, Debug, From)]
pub struct Reservation(domain::Reservation);

/// A reservation of hotel rooms.
#[graphql_object(context = Context)]
impl Reservation {
    /// Unique identifier of this `Reservation`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// `Guest` this `Reservation` is made for.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `GUEST_NOT_EXISTS` - the `Guest` does not exist anymore.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.guest",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn guest(&self, ctx: &Context) -> Result<api::Guest, Error> {
        ctx.service()
            .execute(query::guest::ById::by(self.0.guest_id))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .ok_or_else(|| error::GuestError::NotExists.into())
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// `Room`s reserved by this `Reservation`, ordered by their numbers.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Reservation.rooms",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub async fn rooms(&self, ctx: &Context) -> Result<Vec<api::Room>, Error> {
        Ok(ctx
            .service()
            .execute(query::rooms::ByIds::by(self.0.room_ids.clone()))
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?
            .into_values()
            .sorted_by(|a, b| a.room.number.cmp(&b.room.number))
            .map(Into::into)
            .collect())
    }

    /// `Date` of the check-in.
    pub fn check_in(&self) -> Date {
        self.0.stay.check_in().coerce()
    }

    /// `Date` of the check-out, not included into the stay.
    pub fn check_out(&self) -> Date {
        self.0.stay.check_out().coerce()
    }

    /// Number of nights of the stay.
    #[expect(clippy::cast_possible_wrap, reason = "stays are never so long")]
    pub fn nights(&self) -> i32 {
        self.0.stay.nights() as i32
    }

    /// Total price of this `Reservation`, fixed at the moment of booking.
    pub fn total(&self) -> Money {
        self.0.total
    }

    /// Status of this `Reservation`.
    pub fn status(&self) -> Status {
        self.0.status.into()
    }
}

/// Unique identifier of a `Reservation`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::reservation::Id)]
#[into(domain::reservation::Id)]
#[graphql(name = "ReservationId", transparent)]
pub struct Id(Uuid);

/// Status of a `Reservation`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "ReservationStatus")]
pub enum Status {
    /// `Reservation` holds its `Room`s.
    Confirmed,

    /// Stay of the `Reservation` is over.
    Completed,

    /// `Reservation` was called off, releasing its `Room`s.
    Cancelled,
}

impl From<domain::reservation::Status> for Status {
    fn from(status: domain::reservation::Status) -> Self {
        use domain::reservation::Status as S;
        match status {
            S::Confirmed => Self::Confirmed,
            S::Completed => Self::Completed,
            S::Cancelled => Self::Cancelled,
        }
    }
}

/// Overview of an active `Reservation`.
#[derive(Clone, Debug, From)]
pub struct Overview(read::reservation::Overview);

/// Overview of an active `Reservation`.
#[graphql_object(name = "ReservationOverview", context = Context)]
impl Overview {
    /// Overviewed `Reservation`.
    pub fn reservation(&self) -> Reservation {
        self.0.reservation.clone().into()
    }

    /// Full name of the `Guest` the `Reservation` is made for.
    pub fn guest_full_name(&self) -> String {
        self.0.guest_full_name()
    }

    /// Email of the `Guest` the `Reservation` is made for.
    pub fn guest_email(&self) -> api::guest::Email {
        self.0.guest_email.clone().into()
    }

    /// Numbers of the reserved `Room`s, sorted.
    pub fn room_numbers(&self) -> Vec<api::room::Number> {
        self.0.room_numbers.iter().cloned().map(Into::into).collect()
    }
}

/// Result of searching `Room`s available for a stay.
#[derive(Clone, Debug, From)]
pub struct Search(read::availability::Search);

/// Result of searching `Room`s available for a stay.
#[graphql_object(name = "AvailabilitySearch", context = Context)]
impl Search {
    /// `Date` of the check-in of the searched stay.
    pub fn check_in(&self) -> Date {
        self.0.stay().check_in().coerce()
    }

    /// `Date` of the check-out of the searched stay.
    pub fn check_out(&self) -> Date {
        self.0.stay().check_out().coerce()
    }

    /// Number of nights of the searched stay.
    #[expect(clippy::cast_possible_wrap, reason = "stays are never so long")]
    pub fn nights(&self) -> i32 {
        self.0.nights() as i32
    }

    /// Available `Room`s, ordered by their numbers.
    pub fn rooms(&self) -> Vec<api::Room> {
        self.0.rooms().iter().cloned().map(Into::into).collect()
    }

    /// Quotes the total price of booking the provided `Room`s for the
    /// searched stay.
    ///
    /// `null` is returned if any of the `Room`s is not available, or their
    /// prices are in different currencies.
    pub fn quote(&self, room_ids: Vec<api::room::Id>) -> Option<Money> {
        let room_ids = room_ids.into_iter().map(Into::into).collect_vec();
        self.0.quote(&room_ids)
    }
}
