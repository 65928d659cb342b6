//! GraphQL [`Mutation`]s definitions.

use common::{Date, Money};
use juniper::graphql_object;
use service::{command, domain, Command as _};

use crate::{api, define_error, error, AsError, Context, Error};

/// Root of all GraphQL mutations.
#[derive(Clone, Copy, Debug)]
pub struct Mutation;

impl Mutation {
    /// Name of the [`tracing::Span`] for the mutations.
    const SPAN_NAME: &'static str = "GraphQL mutation";
}

#[graphql_object(context = Context)]
impl Mutation {
    /// Registers a new `Guest` with the provided contact info.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `EMAIL_OCCUPIED` - provided `GuestEmail` is occupied by another
    ///                      `Guest`.
    #[tracing::instrument(
        skip_all,
        fields(
            email = %email,
            first_name = %first_name,
            gql.name = "registerGuest",
            last_name = %last_name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn register_guest(
        first_name: api::guest::Name,
        last_name: api::guest::Name,
        email: api::guest::Email,
        phone: api::guest::Phone,
        address: Option<api::guest::Address>,
        ctx: &Context,
    ) -> Result<api::Guest, Error> {
        ctx.service()
            .execute(command::RegisterGuest {
                first_name: first_name.into(),
                last_name: last_name.into(),
                email: email.into(),
                phone: phone.into(),
                address: address.map(Into::into),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `RoomType`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_CAPACITY` - provided `capacity` is not a positive number;
    /// - `NAME_OCCUPIED` - provided `RoomTypeName` is occupied by another
    ///                     `RoomType`;
    /// - `NEGATIVE_PRICE` - provided `basePrice` is below zero;
    /// - `PRICE_OUT_OF_RANGE` - provided `basePrice` has too many digits.
    #[tracing::instrument(
        skip_all,
        fields(
            base_price = %base_price,
            capacity = capacity,
            gql.name = "createRoomType",
            name = %name,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn create_room_type(
        name: api::room::TypeName,
        base_price: Money,
        capacity: i32,
        ctx: &Context,
    ) -> Result<api::room::Type, Error> {
        let capacity = i16::try_from(capacity)
            .ok()
            .and_then(domain::room_type::Capacity::new)
            .ok_or_else(|| CapacityError::Invalid.into())
            .map_err(ctx.error())?;

        ctx.service()
            .execute(command::CreateRoomType {
                name: name.into(),
                base_price,
                capacity,
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Creates a new `Room` of the specified `RoomType`.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_FLOOR` - provided `floor` is out of range;
    /// - `NUMBER_OCCUPIED` - provided `RoomNumber` is occupied by another
    ///                       `Room`;
    /// - `ROOM_TYPE_NOT_EXISTS` - `RoomType` with the specified ID does not
    ///                            exist.
    #[tracing::instrument(
        skip_all,
        fields(
            floor = floor,
            gql.name = "createRoom",
            number = %number,
            otel.name = Self::SPAN_NAME,
            room_type_id = %room_type_id,
            status = ?status,
        ),
    )]
    pub async fn create_room(
        number: api::room::Number,
        room_type_id: api::room::TypeId,
        floor: i32,
        status: Option<api::room::Status>,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        let floor = i16::try_from(floor)
            .map_err(|_| FloorError::Invalid.into())
            .map_err(ctx.error())?;

        let room = ctx
            .service()
            .execute(command::CreateRoom {
                number: number.into(),
                room_type_id: room_type_id.into(),
                floor: floor.into(),
                status: status.map_or(
                    domain::room::Status::Available,
                    Into::into,
                ),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        api::Query::room(room.id.into(), ctx).await
    }

    /// Sets the status of the specified `Room`, taking it out of service or
    /// returning it back.
    ///
    /// Existing `Reservation`s of the `Room` are left untouched.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `ROOM_NOT_EXISTS` - `Room` with the specified ID does not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "setRoomStatus",
            otel.name = Self::SPAN_NAME,
            room_id = %room_id,
            status = ?status,
        ),
    )]
    pub async fn set_room_status(
        room_id: api::room::Id,
        status: api::room::Status,
        ctx: &Context,
    ) -> Result<api::Room, Error> {
        let room = ctx
            .service()
            .execute(command::SetRoomStatus {
                room_id: room_id.into(),
                status: status.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())?;

        api::Query::room(room.id.into(), ctx).await
    }

    /// Books the specified `Room`s for the `Guest` for the whole stay
    /// between the provided `Date`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `GUEST_NOT_EXISTS` - `Guest` with the specified ID does not exist;
    /// - `INVALID_DATE_RANGE` - `checkOut` is not after `checkIn`;
    /// - `MIXED_CURRENCIES` - `Room`s are priced in different currencies;
    /// - `NO_ROOMS` - no `Room`s are specified;
    /// - `ROOM_NOT_EXISTS` - any of the `Room`s does not exist;
    /// - `ROOM_UNAVAILABLE` - any of the `Room`s is out of service or
    ///                        already reserved for the stay;
    /// - `TOTAL_OVERFLOW` - total price of the stay is too large.
    #[tracing::instrument(
        skip_all,
        fields(
            check_in = %check_in,
            check_out = %check_out,
            gql.name = "bookRooms",
            guest_id = %guest_id,
            otel.name = Self::SPAN_NAME,
            room_ids = ?room_ids,
        ),
    )]
    pub async fn book_rooms(
        guest_id: api::guest::Id,
        room_ids: Vec<api::room::Id>,
        check_in: Date,
        check_out: Date,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        ctx.service()
            .execute(command::BookRooms {
                guest_id: guest_id.into(),
                room_ids: room_ids.into_iter().map(Into::into).collect(),
                check_in: check_in.coerce(),
                check_out: check_out.coerce(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Cancels the specified confirmed `Reservation`, releasing its `Room`s.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_STATUS_TRANSITION` - `Reservation` is not confirmed;
    /// - `RESERVATION_NOT_EXISTS` - `Reservation` with the specified ID does
    ///                              not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "cancelReservation",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn cancel_reservation(
        id: api::reservation::Id,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        ctx.service()
            .execute(command::CancelReservation {
                reservation_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }

    /// Completes the specified confirmed `Reservation` once its stay is over.
    ///
    /// # Errors
    ///
    /// Possible error codes:
    /// - `INVALID_STATUS_TRANSITION` - `Reservation` is not confirmed;
    /// - `RESERVATION_NOT_EXISTS` - `Reservation` with the specified ID does
    ///                              not exist.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "completeReservation",
            id = %id,
            otel.name = Self::SPAN_NAME,
        ),
    )]
    pub async fn complete_reservation(
        id: api::reservation::Id,
        ctx: &Context,
    ) -> Result<api::Reservation, Error> {
        ctx.service()
            .execute(command::CompleteReservation {
                reservation_id: id.into(),
            })
            .await
            .map_err(AsError::into_error)
            .map_err(ctx.error())
            .map(Into::into)
    }
}

define_error! {
    enum CapacityError {
        #[code = "INVALID_CAPACITY"]
        #[status = BAD_REQUEST]
        #[message = "`capacity` must be a positive number"]
        Invalid,
    }
}

define_error! {
    enum FloorError {
        #[code = "INVALID_FLOOR"]
        #[status = BAD_REQUEST]
        #[message = "`floor` is out of range"]
        Invalid,
    }
}

impl AsError for command::register_guest::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "EMAIL_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`GuestEmail` is occupied by another `Guest`"]
                EmailOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::EmailOccupied(_) => Some(Error::EmailOccupied.into()),
        }
    }
}

impl AsError for command::create_room_type::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NAME_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`RoomTypeName` is occupied by another \
                             `RoomType`"]
                NameOccupied,

                #[code = "NEGATIVE_PRICE"]
                #[status = BAD_REQUEST]
                #[message = "`basePrice` must not be below zero"]
                NegativePrice,

                #[code = "PRICE_OUT_OF_RANGE"]
                #[status = BAD_REQUEST]
                #[message = "`basePrice` must have at most 15 integer and 4 \
                             fractional digits"]
                PriceOutOfRange,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NameOccupied(_) => Some(Error::NameOccupied.into()),
            Self::NegativePrice(_) => Some(Error::NegativePrice.into()),
            Self::PriceOutOfRange(_) => Some(Error::PriceOutOfRange.into()),
        }
    }
}

impl AsError for command::create_room::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "NUMBER_OCCUPIED"]
                #[status = CONFLICT]
                #[message = "`RoomNumber` is occupied by another `Room`"]
                NumberOccupied,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::NumberOccupied(_) => Some(Error::NumberOccupied.into()),
            Self::RoomTypeNotExists(_) => {
                Some(error::RoomTypeError::NotExists.into())
            }
        }
    }
}

impl AsError for command::set_room_status::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        match self {
            Self::Db(e) => e.try_as_error(),
            Self::RoomNotExists(_) => {
                Some(error::RoomError::NotExists.into())
            }
        }
    }
}

impl AsError for command::book_rooms::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "MIXED_CURRENCIES"]
                #[status = BAD_REQUEST]
                #[message = "`Room`s are priced in different currencies"]
                MixedCurrencies,

                #[code = "NO_ROOMS"]
                #[status = BAD_REQUEST]
                #[message = "At least one `Room` must be specified"]
                NoRooms,

                #[code = "ROOM_UNAVAILABLE"]
                #[status = CONFLICT]
                #[message = "`Room` is out of service or already reserved \
                             for the stay"]
                RoomUnavailable,

                #[code = "TOTAL_OVERFLOW"]
                #[status = BAD_REQUEST]
                #[message = "Total price of the stay is too large"]
                TotalOverflow,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::GuestNotExists(_) => {
                Some(error::GuestError::NotExists.into())
            }
            Self::InvalidDateRange { .. } => {
                Some(error::DateRangeError::Invalid.into())
            }
            Self::MixedCurrencies => Some(Error::MixedCurrencies.into()),
            Self::NoRooms => Some(Error::NoRooms.into()),
            Self::RoomNotExists(_) => {
                Some(error::RoomError::NotExists.into())
            }
            Self::RoomUnavailable(_) => Some(Error::RoomUnavailable.into()),
            Self::TotalOverflow => Some(Error::TotalOverflow.into()),
        }
    }
}

impl AsError for command::transit_reservation::ExecutionError {
    fn try_as_error(&self) -> Option<Error> {
        define_error! {
            enum Error {
                #[code = "INVALID_STATUS_TRANSITION"]
                #[status = CONFLICT]
                #[message = "Only a confirmed `Reservation` may be cancelled \
                             or completed"]
                InvalidStatusTransition,
            }
        }

        match self {
            Self::Db(e) => e.try_as_error(),
            Self::InvalidStatusTransition { .. } => {
                Some(Error::InvalidStatusTransition.into())
            }
            Self::ReservationNotExists(_) => {
                Some(error::ReservationError::NotExists.into())
            }
        }
    }
}
