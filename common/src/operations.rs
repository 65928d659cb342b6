//! Operations executed by the booking core and its storages.
//!
//! Every command, query and storage call is a [`Handler`] of some arguments,
//! so a storage is described by the set of operations it handles, e.g. a
//! [`Lock`] of a room row followed by a [`Select`] of its reservations.

use std::{future::Future, marker::PhantomData};

/// Something executing an operation of `Args`.
pub trait Handler<Args = ()> {
    /// Result of a successful execution.
    type Ok;

    /// Error of a failed execution.
    type Err;

    /// Executes the operation described by `args`.
    fn execute(
        &self,
        args: Args,
    ) -> impl Future<Output = Result<Self::Ok, Self::Err>>;
}

/// Stores a new record.
#[derive(Clone, Copy, Debug)]
pub struct Insert<T>(pub T);

/// Overwrites an existing record.
#[derive(Clone, Copy, Debug)]
pub struct Update<T>(pub T);

/// Reads records.
#[derive(Clone, Copy, Debug)]
pub struct Select<T>(pub T);

/// Locks a record until the current transaction ends, so concurrent
/// bookings of the same room are serialized.
#[derive(Clone, Copy, Debug)]
pub struct Lock<T>(pub T);

/// Opens a transaction.
///
/// Dropping an uncommitted transaction discards all its changes.
#[derive(Clone, Copy, Debug)]
pub struct Transact;

/// Handler of the operations inside a transaction opened by `T`.
pub type Transacted<T> = <T as Handler<Transact>>::Ok;

/// Publishes the changes of a transaction.
#[derive(Clone, Copy, Debug)]
pub struct Commit;

/// Criteria `B` to look up a `W` by, like a room ID for its listing or a
/// stay for the rooms occupied during it.
#[derive(Clone, Copy, Debug)]
pub struct By<W, B> {
    /// Looked up type.
    _what: PhantomData<W>,

    /// Lookup criteria.
    by: B,
}

impl<W, B> By<W, B> {
    /// Looks up a `W` by the provided criteria.
    #[must_use]
    pub fn new(by: B) -> Self {
        Self {
            _what: PhantomData,
            by,
        }
    }

    /// Unwraps the lookup criteria.
    #[must_use]
    pub fn into_inner(self) -> B {
        self.by
    }
}
