//! [`Room`]-related definitions.

use common::Money;
use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLEnum, GraphQLScalar};
use service::{domain, read};
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A hotel room.
#[derive(Clone, Debug, From)]
pub struct Room(read::room::Listing);

/// A hotel room.
#[graphql_object(context = Context)]
impl Room {
    /// Unique identifier of this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.room.id.into()
    }

    /// Number of this `Room` shown to guests.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.number",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn number(&self) -> Number {
        self.0.room.number.clone().into()
    }

    /// Floor this `Room` is located on.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.floor",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn floor(&self) -> i32 {
        i16::from(self.0.room.floor).into()
    }

    /// Status of this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.status",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn status(&self) -> Status {
        self.0.room.status.into()
    }

    /// Type of this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.type",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    #[graphql(name = "type")]
    pub fn room_type(&self) -> Type {
        self.0.room_type.clone().into()
    }

    /// Price of a single night in this `Room`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Room.nightlyPrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn nightly_price(&self) -> Money {
        self.0.nightly_price()
    }
}

/// Unique identifier of a `Room`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::room::Id)]
#[into(domain::room::Id)]
#[graphql(name = "RoomId", transparent)]
pub struct Id(Uuid);

/// Number of a `Room`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RoomNumber",
    with = scalar::Via::<domain::room::Number>,
)]
pub struct Number(domain::room::Number);

/// Status of a `Room`.
#[derive(Clone, Copy, Debug, GraphQLEnum)]
#[graphql(name = "RoomStatus")]
pub enum Status {
    /// `Room` may be booked.
    Available,

    /// `Room` is out of service and cannot be booked.
    OutOfService,
}

impl From<domain::room::Status> for Status {
    fn from(status: domain::room::Status) -> Self {
        use domain::room::Status as S;
        match status {
            S::Available => Self::Available,
            S::OutOfService => Self::OutOfService,
        }
    }
}

impl From<Status> for domain::room::Status {
    fn from(status: Status) -> Self {
        match status {
            Status::Available => Self::Available,
            Status::OutOfService => Self::OutOfService,
        }
    }
}

/// A type of hotel rooms.
#[derive(Clone, Debug, From)]
pub struct Type(domain::RoomType);

/// A type of hotel rooms.
#[graphql_object(name = "RoomType", context = Context)]
impl Type {
    /// Unique identifier of this `RoomType`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RoomType.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> TypeId {
        self.0.id.into()
    }

    /// Name of this `RoomType`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RoomType.name",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn name(&self) -> TypeName {
        self.0.name.clone().into()
    }

    /// Price of a single night in a `Room` of this `RoomType`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RoomType.basePrice",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn base_price(&self) -> Money {
        self.0.base_price
    }

    /// Maximum number of guests hosted by a `Room` of this `RoomType`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "RoomType.capacity",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn capacity(&self) -> i32 {
        i16::from(self.0.capacity).into()
    }
}

/// Unique identifier of a `RoomType`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::room_type::Id)]
#[into(domain::room_type::Id)]
#[graphql(name = "RoomTypeId", transparent)]
pub struct TypeId(Uuid);

/// Name of a `RoomType`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "RoomTypeName",
    with = scalar::Via::<domain::room_type::Name>,
)]
pub struct TypeName(domain::room_type::Name);
