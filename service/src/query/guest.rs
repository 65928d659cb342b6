//! [`Query`] collection related to a single [`Guest`].

use common::operations::By;

use crate::domain::{guest, Guest};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries a [`Guest`] by its [`guest::Id`].
pub type ById = DatabaseQuery<By<Option<Guest>, guest::Id>>;
