//! [`Query`] collection related to the multiple [`Room`]s.

use std::collections::HashMap;

use common::operations::By;

use crate::{domain::room, read::room::Listing};
#[cfg(doc)]
use crate::{domain::Room, Query};

use super::DatabaseQuery;

/// Queries [`Listing`]s of all the [`Room`]s having the provided
/// [`room::Status`], ordered by their [`room::Number`]s.
pub type ByStatus = DatabaseQuery<By<Vec<Listing>, room::Status>>;

/// Queries [`Listing`]s of the [`Room`]s with the provided [`room::Id`]s.
///
/// Non-existent [`Room`]s are omitted.
pub type ByIds = DatabaseQuery<By<HashMap<room::Id, Listing>, Vec<room::Id>>>;
