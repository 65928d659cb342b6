//! [`Query`] collection related to [`RoomType`]s.

use common::operations::By;

use crate::domain::{room_type, RoomType};
#[cfg(doc)]
use crate::Query;

use super::DatabaseQuery;

/// Queries all the [`RoomType`]s, ordered by their [`room_type::Name`]s.
pub type All = DatabaseQuery<By<Vec<RoomType>, ()>>;

/// Queries a [`RoomType`] by its [`room_type::Id`].
pub type ById = DatabaseQuery<By<Option<RoomType>, room_type::Id>>;
