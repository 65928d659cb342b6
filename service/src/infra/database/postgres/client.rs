//! Postgres database client definitions.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};
use tokio_postgres::{types::ToSql, Row, ToStatement};
use tracerr::Traced;

use crate::infra::database::{
    self,
    postgres::{self, connection, Connection},
};

/// Non-transactional Postgres database client.
///
/// Every operation is performed on a [`Connection`] taken from the
/// [`connection::Pool`] for its duration only.
#[derive(Clone, Debug)]
pub struct NonTx {
    /// [`connection::Pool`] to take [`Connection`]s from.
    pub(crate) pool: connection::Pool,
}

impl NonTx {
    /// Creates a new [`NonTx`] client from the provided [`connection::Pool`].
    #[must_use]
    pub(crate) fn from_pool(pool: connection::Pool) -> Self {
        Self { pool }
    }

    /// Takes a [`Connection`] from the [`connection::Pool`].
    pub(crate) async fn connection(
        &self,
    ) -> Result<connection::NonTx, Traced<database::Error>> {
        self.pool
            .get()
            .await
            .map_err(tracerr::from_and_wrap!(=> postgres::Error))
            .map_err(tracerr::map_from)
    }
}

/// Transactional Postgres database client.
///
/// Its clones share the same transaction, which is open until the
/// [`Tx::commit()`] or the last clone being dropped (rolling it back then).
#[derive(Clone, Debug)]
pub struct Tx {
    /// Open [`connection::Tx`], if it's not committed yet.
    tx: Arc<Mutex<Option<connection::Tx>>>,
}

impl Tx {
    /// Opens a new [`Tx`] client on a [`Connection`] of the provided [`NonTx`]
    /// client.
    ///
    /// # Errors
    ///
    /// If failed to take a [`Connection`] or to open a transaction in it.
    pub async fn begin(
        client: &NonTx,
    ) -> Result<Self, Traced<database::Error>> {
        let conn = client.connection().await.map_err(tracerr::wrap!())?;
        let tx = connection::Tx::begin(conn)
            .await
            .map_err(tracerr::wrap!())?;
        Ok(Self {
            tx: Arc::new(Mutex::new(Some(tx))),
        })
    }

    /// Returns the open [`connection::Tx`] of this [`Tx`] client.
    ///
    /// # Errors
    ///
    /// With [`postgres::Error::TxFinished`] if this [`Tx`] is committed
    /// already.
    async fn connection(
        &self,
    ) -> Result<MutexGuard<'_, Option<connection::Tx>>, Traced<database::Error>>
    {
        let guard = self.tx.lock().await;
        if guard.is_none() {
            return Err(tracerr::new!(database::Error::from(
                postgres::Error::TxFinished,
            )));
        }
        Ok(guard)
    }

    /// Commits this [`Tx`] client.
    ///
    /// # Errors
    ///
    /// If this [`Tx`] is committed already, or failed to commit its
    /// transaction.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let tx = self
            .tx
            .lock()
            .await
            .take()
            .ok_or(postgres::Error::TxFinished)
            .map_err(tracerr::from_and_wrap!(=> database::Error))?;
        tx.commit().await.map_err(tracerr::wrap!())
    }
}

/// Implements [`Connection`] for a client, delegating to the [`Connection`]
/// returned by its `connection()` method.
macro_rules! delegate_connection {
    ($ty:ty, |$conn:ident| $inner:expr) => {
        impl Connection for $ty {
            async fn query<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Vec<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                let $conn =
                    self.connection().await.map_err(tracerr::wrap!())?;
                $inner
                    .query(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn query_opt<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<Option<Row>, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                let $conn =
                    self.connection().await.map_err(tracerr::wrap!())?;
                $inner
                    .query_opt(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn exec<T>(
                &self,
                stmt: &T,
                params: &[&(dyn ToSql + Sync)],
            ) -> Result<u64, Traced<database::Error>>
            where
                T: ToStatement + ?Sized,
            {
                let $conn =
                    self.connection().await.map_err(tracerr::wrap!())?;
                $inner
                    .exec(stmt, params)
                    .await
                    .map_err(tracerr::wrap!())
            }

            async fn batch_exec(
                &self,
                stmt: &str,
            ) -> Result<(), Traced<database::Error>> {
                let $conn =
                    self.connection().await.map_err(tracerr::wrap!())?;
                $inner.batch_exec(stmt).await.map_err(tracerr::wrap!())
            }
        }
    };
}

delegate_connection!(NonTx, |conn| conn);
delegate_connection!(Tx, |guard| guard
    .as_ref()
    .expect("checked by `Tx::connection()`"));
