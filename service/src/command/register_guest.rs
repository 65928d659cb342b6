//! [`Command`] for registering a new [`Guest`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

#[cfg(doc)]
use crate::domain::guest::{Address, Email, Name, Phone};
use crate::{
    domain::{guest, Guest},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for registering a new [`Guest`].
#[derive(Clone, Debug)]
pub struct RegisterGuest {
    /// First [`Name`] of a new [`Guest`].
    pub first_name: guest::Name,

    /// Last [`Name`] of a new [`Guest`].
    pub last_name: guest::Name,

    /// [`Email`] of a new [`Guest`].
    pub email: guest::Email,

    /// [`Phone`] of a new [`Guest`].
    pub phone: guest::Phone,

    /// [`Address`] of a new [`Guest`], if any.
    pub address: Option<guest::Address>,
}

impl<Db> Command<RegisterGuest> for Service<Db>
where
    Db: for<'l> Database<
            Select<By<Option<Guest>, &'l guest::Email>>,
            Ok = Option<Guest>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Guest>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Guest;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: RegisterGuest) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let RegisterGuest {
            first_name,
            last_name,
            email,
            phone,
            address,
        } = cmd;

        let existing = self
            .database()
            .execute(Select(By::new(&email)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::EmailOccupied(email)));
        }

        let guest = Guest {
            id: guest::Id::new(),
            first_name,
            last_name,
            email,
            phone,
            address,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let inserted = tx.execute(Insert(guest.clone())).await;
        // Concurrent registration may occupy the `Email` after the check.
        if inserted.as_ref().is_err_and(|e| {
            e.as_ref()
                .is_unique_violation(Some(database::constraint::GUEST_EMAIL))
        }) {
            return Err(tracerr::new!(E::EmailOccupied(guest.email)));
        }
        inserted
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        log::info!("`Guest(id: {})` registered", guest.id);

        Ok(guest)
    }
}

/// Error of [`RegisterGuest`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`guest::Email`] is already occupied by another [`Guest`].
    #[display("`{_0}` email is occupied")]
    EmailOccupied(#[error(not(source))] guest::Email),
}
