//! [`Guest`]-related definitions.

use derive_more::{AsRef, Display, From, Into};
use juniper::{graphql_object, GraphQLScalar};
use service::domain;
use uuid::Uuid;

use crate::{api, api::scalar, Context};

/// A hotel guest.
#[derive(Clone, Debug, From)]
pub struct Guest(domain::Guest);

/// A hotel guest.
#[graphql_object(context = Context)]
impl Guest {
    /// Unique identifier of this `Guest`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Guest.id",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn id(&self) -> Id {
        self.0.id.into()
    }

    /// First name of this `Guest`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Guest.firstName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn first_name(&self) -> Name {
        self.0.first_name.clone().into()
    }

    /// Last name of this `Guest`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Guest.lastName",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn last_name(&self) -> Name {
        self.0.last_name.clone().into()
    }

    /// Full name of this `Guest`, as it's shown in listings.
    pub fn full_name(&self) -> String {
        self.0.full_name()
    }

    /// Email of this `Guest`, unique across all `Guest`s.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Guest.email",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn email(&self) -> Email {
        self.0.email.clone().into()
    }

    /// Phone of this `Guest`.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Guest.phone",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn phone(&self) -> Phone {
        self.0.phone.clone().into()
    }

    /// Postal address of this `Guest`, if known.
    #[tracing::instrument(
        skip_all,
        fields(
            gql.name = "Guest.address",
            otel.name = api::Query::SPAN_NAME,
        ),
    )]
    pub fn address(&self) -> Option<Address> {
        self.0.address.clone().map(Into::into)
    }
}

/// Unique identifier of a `Guest`.
#[derive(
    Clone, Copy, Debug, Display, Eq, From, GraphQLScalar, Into, PartialEq,
)]
#[from(domain::guest::Id)]
#[into(domain::guest::Id)]
#[graphql(name = "GuestId", transparent)]
pub struct Id(Uuid);

/// First or last name of a `Guest`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "GuestName",
    with = scalar::Via::<domain::guest::Name>,
)]
pub struct Name(domain::guest::Name);

/// Email of a `Guest`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "GuestEmail",
    with = scalar::Via::<domain::guest::Email>,
)]
pub struct Email(domain::guest::Email);

/// Phone of a `Guest`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "GuestPhone",
    with = scalar::Via::<domain::guest::Phone>,
)]
pub struct Phone(domain::guest::Phone);

/// Postal address of a `Guest`.
#[derive(AsRef, Clone, Debug, Display, From, GraphQLScalar, Into)]
#[graphql(
    name = "GuestAddress",
    with = scalar::Via::<domain::guest::Address>,
)]
pub struct Address(domain::guest::Address);
