//! [`Guest`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tracerr::Traced;

use crate::{
    domain::{guest, Guest},
    infra::{
        database::{
            self, constraint,
            memory::{self, Storage},
            Memory,
        },
        Database,
    },
};

impl<C> Database<Select<By<Vec<Guest>, ()>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Vec<Guest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Guest>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| {
            let mut guests = s.guests.values().cloned().collect::<Vec<_>>();
            guests.sort_by(|a, b| {
                a.last_name
                    .cmp(&b.last_name)
                    .then_with(|| a.first_name.cmp(&b.first_name))
                    .then(a.id.cmp(&b.id))
            });
            guests
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<Guest>, guest::Id>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Option<Guest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Guest>, guest::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.guests.get(&id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<'l, C> Database<Select<By<Option<Guest>, &'l guest::Email>>>
    for Memory<C>
where
    C: Storage,
{
    type Ok = Option<Guest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Guest>, &'l guest::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();
        self.read(|s| s.guests.values().find(|g| g.email == *email).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Guest>> for Memory<C>
where
    C: Storage,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(guest): Insert<Guest>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| {
            if s
                .guests
                .values()
                .any(|g| g.email == guest.email && g.id != guest.id)
            {
                return Err(memory::Error::UniqueViolation(
                    constraint::GUEST_EMAIL,
                ));
            }
            _ = s.guests.insert(guest.id, guest);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
