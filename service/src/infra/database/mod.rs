//! [`Database`]-related implementations.

#[cfg(feature = "memory")]
pub mod memory;
#[cfg(feature = "postgres")]
pub mod postgres;

use derive_more::{Display, Error as StdError, From};

#[cfg(feature = "memory")]
pub use self::memory::Memory;
#[cfg(feature = "postgres")]
pub use self::postgres::Postgres;

/// Database operation.
pub use common::Handler as Database;

pub mod constraint {
    //! Names of the uniqueness constraints every [`Database`] enforces.
    //!
    //! [`Database`]: super::Database

    /// Unique [`RoomType`] name.
    ///
    /// [`RoomType`]: crate::domain::RoomType
    pub const ROOM_TYPE_NAME: &str = "room_types_name_key";

    /// Unique [`Room`] number.
    ///
    /// [`Room`]: crate::domain::Room
    pub const ROOM_NUMBER: &str = "rooms_room_number_key";

    /// Unique [`Guest`] email.
    ///
    /// [`Guest`]: crate::domain::Guest
    pub const GUEST_EMAIL: &str = "guests_email_key";
}

/// [`Database`] error.
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    #[cfg(feature = "memory")]
    /// [`Memory`] error.
    Memory(memory::Error),

    #[cfg(feature = "postgres")]
    /// [`Postgres`] error.
    Postgres(postgres::Error),
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    ///
    /// Any unique violation matches if no `constraint` is specified.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(e) => e.is_unique_violation(constraint),
            #[cfg(feature = "postgres")]
            Self::Postgres(e) => e.is_unique_violation(constraint),
        }
    }

    /// Checks if the error means the database can't be reached at the moment,
    /// so the operation may succeed if retried later.
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            #[cfg(feature = "memory")]
            Self::Memory(e) => e.is_unavailable(),
            #[cfg(feature = "postgres")]
            Self::Postgres(e) => e.is_unavailable(),
        }
    }
}
