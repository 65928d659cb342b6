//! [`Guest`]-related [`Database`] implementations.

use common::operations::{By, Insert, Select};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{guest, Guest},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
};

/// Parses a [`Guest`] out of the provided [`Row`].
fn guest(row: &Row) -> Guest {
    Guest {
        id: row.get("id"),
        first_name: row.get("first_name"),
        last_name: row.get("last_name"),
        email: row.get("email"),
        phone: row.get("phone"),
        address: row.get("address"),
    }
}

impl<C> Database<Select<By<Vec<Guest>, ()>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Guest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Guest>, ()>>,
    ) -> Result<Self::Ok, Self::Err> {
        const SQL: &str = "\
            SELECT id, first_name, last_name, \
                   email, phone, address \
            FROM guests \
            ORDER BY last_name COLLATE \"C\", first_name COLLATE \"C\", id";
        Ok(self
            .query(SQL, &[])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(guest)
            .collect())
    }
}

impl<C> Database<Select<By<Option<Guest>, guest::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Guest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Guest>, guest::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT id, first_name, last_name, \
                   email, phone, address \
            FROM guests \
            WHERE id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(guest))
    }
}

impl<'l, C> Database<Select<By<Option<Guest>, &'l guest::Email>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Guest>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Guest>, &'l guest::Email>>,
    ) -> Result<Self::Ok, Self::Err> {
        let email = by.into_inner();

        const SQL: &str = "\
            SELECT id, first_name, last_name, \
                   email, phone, address \
            FROM guests \
            WHERE email = $1::VARCHAR";
        Ok(self
            .query_opt(SQL, &[email])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(guest))
    }
}

impl<C> Database<Insert<Guest>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(guest): Insert<Guest>,
    ) -> Result<Self::Ok, Self::Err> {
        let Guest {
            id,
            first_name,
            last_name,
            email,
            phone,
            address,
        } = guest;

        const SQL: &str = "\
            INSERT INTO guests (\
                id, first_name, last_name, \
                email, phone, address\
            ) \
            VALUES (\
                $1::UUID, $2::VARCHAR, $3::VARCHAR, \
                $4::VARCHAR, $5::VARCHAR, $6::VARCHAR\
            ) \
            ON CONFLICT (id) DO UPDATE \
            SET first_name = EXCLUDED.first_name, \
                last_name = EXCLUDED.last_name, \
                email = EXCLUDED.email, \
                phone = EXCLUDED.phone, \
                address = EXCLUDED.address";
        self.exec(
            SQL,
            &[&id, &first_name, &last_name, &email, &phone, &address],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}
