//! GraphQL API definitions.

pub mod guest;
mod mutation;
mod query;
pub mod reservation;
pub mod room;
pub mod scalar;

use juniper::EmptySubscription;

use crate::Context;

pub use self::{
    guest::Guest, mutation::Mutation, query::Query,
    reservation::Reservation, room::Room,
};

/// GraphQL schema.
pub type Schema =
    juniper::RootNode<'static, Query, Mutation, EmptySubscription<Context>>;
