//! [`Room`]-related [`Database`] implementations.

use std::collections::HashMap;

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{reservation, room, room_type, Room, RoomType},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::{
        availability::{Occupied, Vacant},
        room::Listing,
    },
};

/// Columns of a [`Listing`] row, joining `rooms AS r` with
/// `room_types AS t`.
const LISTING_COLUMNS: &str = "\
    r.id, r.room_number, r.room_type_id, r.floor, r.status, \
    t.name AS type_name, \
    t.base_price, t.base_price_currency, \
    t.capacity";

/// Parses a [`RoomType`] out of the provided [`Row`], having its ID and name
/// in the specified columns.
fn room_type(row: &Row, id: &str, name: &str) -> RoomType {
    RoomType {
        id: row.get(id),
        name: row.get(name),
        base_price: Money {
            amount: row.get("base_price"),
            currency: row.get("base_price_currency"),
        },
        capacity: row.get("capacity"),
    }
}

/// Parses a [`Room`] out of the provided [`Row`].
fn room(row: &Row) -> Room {
    Room {
        id: row.get("id"),
        number: row.get("room_number"),
        room_type_id: row.get("room_type_id"),
        floor: row.get("floor"),
        status: row.get("status"),
    }
}

/// Parses a [`Listing`] out of the provided [`Row`].
fn listing(row: &Row) -> Listing {
    Listing {
        room: room(row),
        room_type: room_type(row, "room_type_id", "type_name"),
    }
}

impl<C> Database<Select<By<Vec<RoomType>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<RoomType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<RoomType>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, name, \
                   base_price, base_price_currency, \
                   capacity \
            FROM room_types \
            ORDER BY name COLLATE \"C\", id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| room_type(row, "id", "name"))
            .collect())
    }
}

impl<C> Database<Select<By<Option<RoomType>, room_type::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<RoomType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RoomType>, room_type::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, \
                   base_price, base_price_currency, \
                   capacity \
            FROM room_types \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| room_type(&row, "id", "name")))
    }
}

impl<'l, C> Database<Select<By<Option<RoomType>, &'l room_type::Name>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<RoomType>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<RoomType>, &'l room_type::Name>>,
    ) -> Result<Self::Ok, Self::Err> {
        let name = by.into_inner();

        const SQL: &str = "\
            SELECT id, name, \
                   base_price, base_price_currency, \
                   capacity \
            FROM room_types \
            WHERE name = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[name])
            .await
            .map_err(tracerr::wrap!())?
            .map(|row| room_type(&row, "id", "name")))
    }
}

impl<C> Database<Insert<RoomType>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(room_type): Insert<RoomType>,
    ) -> Result<Self::Ok, Self::Err> {
        let RoomType {
            id,
            name,
            base_price,
            capacity,
        } = room_type;

        const SQL: &str = "\
            INSERT INTO room_types (\
                id, name, \
                base_price, base_price_currency, \
                capacity\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, \
                $3::NUMERIC, $4::INT2, \
                $5::INT2\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET name = EXCLUDED.name, \
                base_price = EXCLUDED.base_price, \
                base_price_currency = EXCLUDED.base_price_currency, \
                capacity = EXCLUDED.capacity";
        self.exec(
            SQL,
            &[
                &id,
                &name,
                &base_price.amount,
                &base_price.currency,
                &capacity,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Listing>, room::Status>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, room::Status>>,
    ) -> Result<Self::Ok, Self::Err> {
        let status = by.into_inner();

        let sql = format!(
            "SELECT {LISTING_COLUMNS} \
             FROM rooms AS r \
             INNER JOIN room_types AS t ON t.id = r.room_type_id \
             WHERE r.status = $1::INT2 \
             ORDER BY r.room_number COLLATE \"C\"",
        );
        Ok(self
            .query(&sql, &[&status])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(listing)
            .collect())
    }
}

impl<C, IDs> Database<Select<By<HashMap<room::Id, Listing>, IDs>>>
    for Postgres<C>
where
    C: Connection,
    IDs: AsRef<[room::Id]>,
{
    type Ok = HashMap<room::Id, Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<HashMap<room::Id, Listing>, IDs>>,
    ) -> Result<Self::Ok, Self::Err> {
        let ids = by.into_inner();
        // Avoid subtle change for SQL.
        let ids: &[room::Id] = ids.as_ref();
        if ids.is_empty() {
            return Ok(HashMap::new());
        }

        let sql = format!(
            "SELECT {LISTING_COLUMNS} \
             FROM rooms AS r \
             INNER JOIN room_types AS t ON t.id = r.room_type_id \
             WHERE r.id = ANY($1::UUID[])",
        );
        Ok(self
            .query(&sql, &[&ids])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| {
                let l = listing(row);
                (l.room.id, l)
            })
            .collect())
    }
}

impl<C> Database<Select<By<Option<Listing>, room::Id>>> for Postgres<C>
where
    C: Connection,
    Self: Database<
        Select<By<HashMap<room::Id, Listing>, [room::Id; 1]>>,
        Ok = HashMap<room::Id, Listing>,
        Err = Traced<database::Error>,
    >,
{
    type Ok = Option<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Listing>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();
        Ok(self
            .execute(Select(By::new([id])))
            .await
            .map_err(tracerr::wrap!())?
            .remove(&id))
    }
}

impl<C> Database<Select<By<Option<Room>, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, room_number, room_type_id, floor, status \
            FROM rooms \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(room))
    }
}

impl<'l, C> Database<Select<By<Option<Room>, &'l room::Number>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Room>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Room>, &'l room::Number>>,
    ) -> Result<Self::Ok, Self::Err> {
        let number = by.into_inner();

        const SQL: &str = "\
            SELECT id, room_number, room_type_id, floor, status \
            FROM rooms \
            WHERE room_number = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[number])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(room))
    }
}

impl<C> Database<Insert<Room>> for Postgres<C>
where
    C: Connection,
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

impl<C> Database<Update<Room>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(room): Update<Room>,
    ) -> Result<Self::Ok, Self::Err> {
        let Room {
            id,
            number,
            room_type_id,
            floor,
            status,
        } = room;

        const SQL: &str = "\
            INSERT INTO rooms (\
                id, room_number, room_type_id, floor, status\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::UUID, $4::INT2, $5::INT2\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET room_number = EXCLUDED.room_number, \
                room_type_id = EXCLUDED.room_type_id, \
                floor = EXCLUDED.floor, \
                status = EXCLUDED.status";
        self.exec(SQL, &[&id, &number, &room_type_id, &floor, &status])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Lock<By<Room, room::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Room, room::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: room::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM rooms \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Listing>, Vacant>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Listing>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<Listing>, Vacant>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Vacant(stay) = by.into_inner();
        let (check_in, check_out) = (stay.check_in(), stay.check_out());

        let sql = format!(
            "SELECT {LISTING_COLUMNS} \
             FROM rooms AS r \
             INNER JOIN room_types AS t ON t.id = r.room_type_id \
             WHERE r.status = $1::INT2 \
               AND NOT EXISTS (\
                   SELECT 1 \
                   FROM reservation_rooms AS rr \
                   INNER JOIN reservations AS res \
                           ON res.id = rr.reservation_id \
                   WHERE rr.room_id = r.id \
                     AND res.status = $2::INT2 \
                     AND res.check_in_date < $4::DATE \
                     AND res.check_out_date > $3::DATE\
               ) \
             ORDER BY r.room_number COLLATE \"C\"",
        );
        Ok(self
            .query(
                &sql,
                &[
                    &room::Status::Available,
                    &reservation::Status::Confirmed,
                    &check_in,
                    &check_out,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(listing)
            .collect())
    }
}

impl<C> Database<Select<By<Vec<room::Id>, Occupied>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<room::Id>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Vec<room::Id>, Occupied>>,
    ) -> Result<Self::Ok, Self::Err> {
        let Occupied { stay, room_ids } = by.into_inner();
        if room_ids.is_empty() {
            return Ok(vec![]);
        }
        let (check_in, check_out) = (stay.check_in(), stay.check_out());

        const SQL: &str = "\
            SELECT DISTINCT rr.room_id \
            FROM reservation_rooms AS rr \
            INNER JOIN reservations AS res ON res.id = rr.reservation_id \
            WHERE rr.room_id = ANY($1::UUID[]) \
              AND res.status = $2::INT2 \
              AND res.check_in_date < $4::DATE \
              AND res.check_out_date > $3::DATE \
            ORDER BY rr.room_id";
        Ok(self
            .query(
                SQL,
                &[
                    &room_ids,
                    &reservation::Status::Confirmed,
                    &check_in,
                    &check_out,
                ],
            )
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| row.get("room_id"))
            .collect())
    }
}
