//! In-memory [`Database`] implementation.
//!
//! Keeps everything in the process memory, so is intended for tests and
//! local runs only.

pub mod client;
mod impls;
pub mod state;

use derive_more::{Deref, Display, Error as StdError};

#[cfg(doc)]
use crate::infra::Database;

pub use self::{
    client::{NonTx, Tx},
    state::{State, Storage},
};

/// In-memory [`Database`] client.
///
/// [`Tx`] clients are serializable: a transaction owns the whole [`State`]
/// exclusively until it's committed or dropped.
#[derive(Clone, Debug, Default, Deref)]
pub struct Memory<T = NonTx>(T);

impl Memory {
    /// Creates a new empty [`Memory`] client.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

/// In-memory database [`Error`].
#[derive(Clone, Copy, Debug, Display, StdError)]
pub enum Error {
    /// Uniqueness constraint is violated.
    #[display("`{_0}` unique constraint is violated")]
    UniqueViolation(#[error(not(source))] &'static str),

    /// Referenced entity does not exist.
    #[display("`{_0}` foreign key constraint is violated")]
    ForeignKeyViolation(#[error(not(source))] &'static str),

    /// [`Tx`] is used after being committed.
    #[display("Transaction is already committed")]
    TxFinished,
}

impl Error {
    /// Checks if the error is a unique violation of the specified constraint.
    #[must_use]
    pub fn is_unique_violation(&self, constraint: Option<&str>) -> bool {
        match self {
            Self::UniqueViolation(c) => constraint.map_or(true, |n| n == *c),
            Self::ForeignKeyViolation(_) | Self::TxFinished => false,
        }
    }

    /// Checks if the error means the database can't be reached at the moment.
    ///
    /// Never the case for the in-memory [`Database`].
    ///
    /// [`Database`]: super::Database
    #[must_use]
    pub fn is_unavailable(&self) -> bool {
        match self {
            Self::UniqueViolation(_)
            | Self::ForeignKeyViolation(_)
            | Self::TxFinished => false,
        }
    }
}
