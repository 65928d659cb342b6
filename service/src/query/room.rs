//! [`Query`] collection related to a single [`Room`].

use common::operations::By;

use crate::{domain::room, read::room::Listing};
#[cfg(doc)]
use crate::{domain::Room, Query};

use super::DatabaseQuery;

/// Queries a [`Listing`] of a [`Room`] by its [`room::Id`].
pub type ById = DatabaseQuery<By<Option<Listing>, room::Id>>;
