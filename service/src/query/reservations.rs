//! [`Query`] collection related to the multiple [`Reservation`]s.

use common::operations::By;

use crate::read;
#[cfg(doc)]
use crate::{
    domain::{reservation::Status, Reservation},
    Query,
};

use super::DatabaseQuery;

/// Queries [`read::reservation::Overview`]s of the [`Status::Confirmed`] and
/// [`Status::Completed`] [`Reservation`]s, the latest check-ins first.
pub type Active = DatabaseQuery<
    By<Vec<read::reservation::Overview>, read::reservation::Active>,
>;
