//! [`Command`] for creating a new [`Room`].

use common::operations::{By, Commit, Insert, Select, Transact, Transacted};
use derive_more::{Display, Error, From};
use tracerr::Traced;

#[cfg(doc)]
use crate::domain::room::{Floor, Number, Status};
use crate::{
    domain::{room, room_type, Room, RoomType},
    infra::{database, Database},
    Service,
};

use super::Command;

/// [`Command`] for creating a new [`Room`].
#[derive(Clone, Debug)]
pub struct CreateRoom {
    /// [`Number`] of a new [`Room`].
    pub number: room::Number,

    /// ID of the [`RoomType`] of a new [`Room`].
    pub room_type_id: room_type::Id,

    /// [`Floor`] of a new [`Room`].
    pub floor: room::Floor,

    /// Initial [`Status`] of a new [`Room`].
    pub status: room::Status,
}

impl<Db> Command<CreateRoom> for Service<Db>
where
    Db: Database<
            Select<By<Option<RoomType>, room_type::Id>>,
            Ok = Option<RoomType>,
            Err = Traced<database::Error>,
        > + for<'l> Database<
            Select<By<Option<Room>, &'l room::Number>>,
            Ok = Option<Room>,
            Err = Traced<database::Error>,
        > + Database<Transact, Err = Traced<database::Error>>,
    Transacted<Db>: Database<Insert<Room>, Err = Traced<database::Error>>
        + Database<Commit, Err = Traced<database::Error>>,
{
    type Ok = Room;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: CreateRoom) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let CreateRoom {
            number,
            room_type_id,
            floor,
            status,
        } = cmd;

        self.database()
            .execute(Select(By::<Option<RoomType>, _>::new(room_type_id)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?
            .ok_or(E::RoomTypeNotExists(room_type_id))
            .map_err(tracerr::wrap!())
            .map(drop)?;

        let existing = self
            .database()
            .execute(Select(By::<Option<Room>, _>::new(&number)))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        if existing.is_some() {
            return Err(tracerr::new!(E::NumberOccupied(number)));
        }

        let room = Room {
            id: room::Id::new(),
            number,
            room_type_id,
            floor,
            status,
        };

        let tx = self
            .database()
            .execute(Transact)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        let inserted = tx.execute(Insert(room.clone())).await;
        if inserted.as_ref().is_err_and(|e| {
            e.as_ref()
                .is_unique_violation(Some(database::constraint::ROOM_NUMBER))
        }) {
            return Err(tracerr::new!(E::NumberOccupied(room.number)));
        }
        inserted
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;
        tx.execute(Commit)
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))
            .map(drop)?;

        Ok(room)
    }
}

/// Error of [`CreateRoom`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    #[from]
    Db(database::Error),

    /// [`room::Number`] is already occupied by another [`Room`].
    #[display("`{_0}` room number is occupied")]
    NumberOccupied(#[error(not(source))] room::Number),

    /// [`RoomType`] with the provided ID does not exist.
    #[display("`RoomType(id: {_0})` does not exist")]
    RoomTypeNotExists(#[error(not(source))] room_type::Id),
}
