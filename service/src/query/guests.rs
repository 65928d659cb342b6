//! [`Query`] collection related to the multiple [`Guest`]s.

use common::operations::By;

use crate::domain::Guest;
#[cfg(doc)]
use crate::{domain::guest, Query};

use super::DatabaseQuery;

/// Queries all the [`Guest`]s, ordered by their last and first
/// [`guest::Name`]s.
pub type All = DatabaseQuery<By<Vec<Guest>, ()>>;
