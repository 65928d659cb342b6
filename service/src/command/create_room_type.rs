//! [`Command`] for creating a new [`RoomType`].

use common::{
    operations::{By, Commit, Insert, Select, Transact, Transacted},
    Money,
};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::room_type::{Capacity, Name};
use crate::{
    domain::{room_type, RoomType},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`RoomType`].
#[derive(Clone, Debug)]
pub struct CreateRoomType {
    /// [`Name`] of a new [`RoomType`].
    pub name: room_type::Name,

    /// Nightly price of a new [`RoomType`].
    pub base_price: Money,

    /// [`Capacity`] of a new [`RoomType`].
    pub capacity: room_type::Capacity,
}

impl<Db> Command<CreateRoomType> for Service<Db>
where
    Db: for<'l> Database<
            Select<By<Option<RoomType>, &'l room_type::Name>>,
            Ok = Option<RoomType>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<RoomType>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = RoomType;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: CreateRoomType,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRoomType {
            name,
            base_price,
            capacity,
        } = cmd;

        if base_price.is_negative() {
            return Err(tracerr::new!(E::NegativePrice(base_price)));
        }
        if !RoomType::fits_price(&base_price) {
            return Err(tracerr::new!(E::PriceOutOfRange(base_price)));
        }

        let existing = self
            .database()
            .execute(Select(By::new(&name)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NameOccupied(name)));
        }

        let room_type = RoomType {
            id: room_type::Id::new(),
            name,
            base_price,
            capacity,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let inserted = tx.execute(Insert(room_type.clone())).await;
        if inserted.as_ref().is_err_and(|e| {
            e.as_ref()
                .is_unique_violation(Some(database::constraint::ROOM_TYPE_NAME))
        }) {
            return Err(tracerr::new!(E::NameOccupied(room_type.name)));
        }
        inserted
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(room_type)
    }
}

/// Error of [`CreateRoomType`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`room_type::Name`] is already occupied by another [`RoomType`].
    #[display("`{_0}` room type name is occupied")]
    NameOccupied(#[error(not(source))] room_type::Name),

    /// Nightly price is negative.
    #[display("`{_0}` nightly price is negative")]
    NegativePrice(#[error(not(source))] Money),

    /// Nightly price has too many digits to be stored exactly.
    #[display("`{_0}` nightly price doesn't fit the stored precision")]
    PriceOutOfRange(#[error(not(source))] Money),
}
