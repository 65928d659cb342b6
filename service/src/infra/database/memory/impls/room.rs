//! [`Room`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::operations::{By, Insert, Lock, Select, Update};
use tracerr::Traced;

use crate::{
    domain::{room, room_type, Room, RoomType},
    infra::{
        database::{
            self, constraint,
            memory::{self, State, Storage},
            Memory,
        },
        Database,
    },
    read::{
        availability::{Occupied, Vacant},
        room::Listing,
    },
};

/// Reads the [`Listing`] of the provided [`Room`] from the [`State`].
fn listing(state: &State, room: &Room) -> Option<Listing> {
    state.room_types.get(&room.room_type_id).map(|t| Listing {
        room: room.clone(),
        room_type: t.clone(),
    })
}

/// Sorts the provided [`Listing`]s by their [`room::Number`]s.
fn sorted(mut listings: Vec<Listing>) -> Vec<Listing> {
    listings.sort_by(|a, b| a.room.number.cmp(&b.room.number));
    listings
}

impl<C> Database<Select<By<Vec<RoomType>, ()>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Vec<RoomType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<RoomType>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.read(|s| {
            let mut types = s.room_types.values().cloned().collect::<Vec<_>>();
            types.sort_by(|a, b| a.name.cmp(&b.name).then(a.id.cmp(&b.id)));
            types
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<RoomType>, room_type::Id>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Option<RoomType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RoomType>, room_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.room_types.get(&id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<'l, C> Database<Select<By<Option<RoomType>, &'l room_type::Name>>>
    for Memory<C>
where
    C: Storage,
{
    type Ok = Option<RoomType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RoomType>, &'l room_type::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();
        self.read(|s| s.room_types.values().find(|t| t.name == *name).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<RoomType>> for Memory<C>
where
    C: Storage,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(room_type): Insert<RoomType>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| {
            if s
                .room_types
                .values()
                .any(|t| t.name == room_type.name && t.id != room_type.id)
            {
                return Err(memory::Error::UniqueViolation(
                    constraint::ROOM_TYPE_NAME,
                ));
            }
            _ = s.room_types.insert(room_type.id, room_type);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<Listing>, room::Status>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, room::Status>>,
    ) -> Result<Self::Ok, Self::Err> {
        let status = by.into_inner();
        self.read(|s| {
            sorted(
                s.rooms
                    .values()
                    .filter(|r| r.status == status)
                    .filter_map(|r| listing(s, r))
                    .collect(),
            )
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C, IDs> Database<Select<By<HashMap<room::Id, Listing>, IDs>>>
    for Memory<C>
where
    C: Storage,
    IDs: AsRef<[room::Id]>,
{
    type Ok = HashMap<room::Id, Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<room::Id, Listing>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        self.read(|s| {
            ids.as_ref()
                .iter()
                .filter_map(|id| s.rooms.get(id))
                .filter_map(|r| listing(s, r).map(|l| (r.id, l)))
                .collect()
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<Listing>, room::Id>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.rooms.get(&id).and_then(|r| listing(s, r)))
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Option<Room>, room::Id>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        self.read(|s| s.rooms.get(&id).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<'l, C> Database<Select<By<Option<Room>, &'l room::Number>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, &'l room::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();
        self.read(|s| s.rooms.values().find(|r| r.number == *number).cloned())
            .await
            .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Insert<Room>> for Memory<C>
where
    C: Storage,
    Self: Database<Update<Room>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(room): Insert<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        self.execute(Update(room)).await.map_err(tracerr::wrap!())
    }
}

impl<C> Database<Update<Room>> for Memory<C>
where
    C: Storage,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(room): Update<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        self.write(|s| {
            if !s.room_types.contains_key(&room.room_type_id) {
                return Err(memory::Error::ForeignKeyViolation(
                    "rooms_room_type_id_fkey",
                ));
            }
            if s
                .rooms
                .values()
                .any(|r| r.number == room.number && r.id != room.id)
            {
                return Err(memory::Error::UniqueViolation(
                    constraint::ROOM_NUMBER,
                ));
            }
            _ = s.rooms.insert(room.id, room);
            Ok(())
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Lock<By<Room, room::Id>>> for Memory<C>
where
    C: Storage,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Lock<By<Room, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Transactions own the whole `State` exclusively already.
        Ok(())
    }
}

impl<C> Database<Select<By<Vec<Listing>, Vacant>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Vacant>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Vacant(stay) = by.into_inner();
        self.read(|s| {
            sorted(
                s.rooms
                    .values()
                    .filter(|r| r.is_available())
                    .filter(|r| {
                        !s.reservations
                            .values()
                            .any(|res| res.occupies(r.id, &stay))
                    })
                    .filter_map(|r| listing(s, r))
                    .collect(),
            )
        })
        .await
        .map_err(tracerr::wrap!())
    }
}

impl<C> Database<Select<By<Vec<room::Id>, Occupied>>> for Memory<C>
where
    C: Storage,
{
    type Ok = Vec<room::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<room::Id>, Occupied>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Occupied { stay, mut room_ids } = by.into_inner();
        room_ids.sort();
        room_ids.dedup();
        self.read(|s| {
            room_ids.retain(|id| {
                s.reservations.values().any(|res| res.occupies(*id, &stay))
            });
            room_ids
        })
        .await
        .map_err(tracerr::wrap!())
    }
}
