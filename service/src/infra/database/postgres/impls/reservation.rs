//! [`Reservation`]-related [`Database`] implementations.

use common::{
    operations::{By, Insert, Lock, Select, Update},
    Money,
};
use tokio_postgres::Row;
use tracerr::Traced;

use crate::{
    domain::{reservation, Reservation},
    infra::{
        database::{self, postgres::Connection, Postgres},
        Database,
    },
    read::reservation::{Active, Overview},
};

/// Parses a [`Reservation`] out of the provided [`Row`].
fn reservation(row: &Row) -> Reservation {
    Reservation {
        id: row.get("id"),
        guest_id: row.get("guest_id"),
        stay: reservation::Stay::new(
            row.get("check_in_date"),
            row.get("check_out_date"),
        )
        .expect("`reservations_stay_check` constraint holds"),
        room_ids: row.get("room_ids"),
        total: Money {
            amount: row.get("total"),
            currency: row.get("total_currency"),
        },
        status: row.get("status"),
    }
}

impl<C> Database<Select<By<Option<Reservation>, reservation::Id>>>
    for Postgres<C>
where
    C: Connection,
{
    type Ok = Option<Reservation>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<Reservation>, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        let id = by.into_inner();

        const SQL: &str = "\
            SELECT res.id, res.guest_id, \
                   res.check_in_date, res.check_out_date, \
                   res.total, res.total_currency, \
                   res.status, \
                   ARRAY(\
                       SELECT rr.room_id \
                       FROM reservation_rooms AS rr \
                       WHERE rr.reservation_id = res.id \
                       ORDER BY rr.room_id\
                   ) AS room_ids \
            FROM reservations AS res \
            WHERE res.id = $1::UUID";
        Ok(self
            .query_opt(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())?
            .as_ref()
            .map(reservation))
    }
}

impl<C> Database<Insert<Reservation>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(reservation): Insert<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        let Reservation {
            id,
            guest_id,
            stay,
            room_ids,
            total,
            status,
        } = reservation;

        // Single statement, so no `Reservation` exists without its rooms.
        const SQL: &str = "\
            WITH res AS (\
                INSERT INTO reservations (\
                    id, guest_id, \
                    check_in_date, check_out_date, \
                    total, total_currency, \
                    status\
                ) \
                VALUES (\
                    $1::UUID, $2::UUID, \
                    $3::DATE, $4::DATE, \
                    $5::NUMERIC, $6::INT2, \
                    $7::INT2\
                ) \
                RETURNING id\
            ) \
            INSERT INTO reservation_rooms (reservation_id, room_id) \
            SELECT DISTINCT res.id, room_id \
            FROM res, UNNEST($8::UUID[]) AS room_id";
        self.exec(
            SQL,
            &[
                &id,
                &guest_id,
                &stay.check_in(),
                &stay.check_out(),
                &total.amount,
                &total.currency,
                &status,
                &room_ids,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Update<Reservation>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(reservation): Update<Reservation>,
    ) -> Result<Self::Ok, Self::Err> {
        // Room links are never changed after the insertion.
        const SQL: &str = "\
            UPDATE reservations \
            SET status = $2::INT2, \
                total = $3::NUMERIC, \
                total_currency = $4::INT2 \
            WHERE id = $1::UUID";
        self.exec(
            SQL,
            &[
                &reservation.id,
                &reservation.status,
                &reservation.total.amount,
                &reservation.total.currency,
            ],
        )
        .await
        .map_err(tracerr::wrap!())
        .map(drop)
    }
}

impl<C> Database<Lock<By<Reservation, reservation::Id>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Lock(by): Lock<By<Reservation, reservation::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        // Avoid subtle change for SQL.
        let id: reservation::Id = by.into_inner();

        const SQL: &str = "\
            SELECT id \
            FROM reservations \
            WHERE id = $1::UUID \
            FOR UPDATE";
        self.query(SQL, &[&id])
            .await
            .map_err(tracerr::wrap!())
            .map(drop)
    }
}

impl<C> Database<Select<By<Vec<Overview>, Active>>> for Postgres<C>
where
    C: Connection,
{
    type Ok = Vec<Overview>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<By<Vec<Overview>, Active>>,
    ) -> Result<Self::Ok, Self::Err> {
        let statuses: &[reservation::Status] = &[
            reservation::Status::Confirmed,
            reservation::Status::Completed,
        ];

        const SQL: &str = "\
            SELECT res.id, res.guest_id, \
                   res.check_in_date, res.check_out_date, \
                   res.total, res.total_currency, \
                   res.status, \
                   g.first_name, g.last_name, g.email, \
                   COALESCE(\
                       ARRAY_AGG(rr.room_id ORDER BY rr.room_id) \
                           FILTER (WHERE rr.room_id IS NOT NULL), \
                       '{}'\
                   ) AS room_ids, \
                   COALESCE(\
                       ARRAY_AGG(r.room_number ORDER BY r.room_number COLLATE \"C\") \
                           FILTER (WHERE r.room_number IS NOT NULL), \
                       '{}'\
                   ) AS room_numbers \
            FROM reservations AS res \
            INNER JOIN guests AS g ON g.id = res.guest_id \
            LEFT JOIN reservation_rooms AS rr ON rr.reservation_id = res.id \
            LEFT JOIN rooms AS r ON r.id = rr.room_id \
            WHERE res.status = ANY($1::INT2[]) \
            GROUP BY res.id, g.id \
            ORDER BY res.check_in_date DESC, res.id";
        Ok(self
            .query(SQL, &[&statuses])
            .await
            .map_err(tracerr::wrap!())?
            .iter()
            .map(|row| Overview {
                reservation: reservation(row),
                guest_first_name: row.get("first_name"),
                guest_last_name: row.get("last_name"),
                guest_email: row.get("email"),
                room_numbers: row.get("room_numbers"),
            })
            .collect())
    }
}
