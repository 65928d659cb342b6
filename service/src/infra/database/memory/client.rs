//! In-memory database clients definitions.

use std::sync::Arc;

use tokio::sync::{Mutex, OwnedRwLockWriteGuard, RwLock};
use tracerr::Traced;

use crate::infra::database::{
    self,
    memory::{self, State, Storage},
};

/// Non-transactional in-memory database client.
#[derive(Clone, Debug, Default)]
pub struct NonTx {
    /// Published [`State`], shared by all the clients.
    state: Arc<RwLock<State>>,
}

impl Storage for NonTx {
    async fn read<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&State) -> R,
    {
        Ok(f(&*self.state.read().await))
    }

    async fn write<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&mut State) -> Result<R, memory::Error>,
    {
        f(&mut *self.state.write().await)
            .map_err(tracerr::from_and_wrap!(=> memory::Error))
            .map_err(tracerr::map_from)
    }
}

/// Transactional in-memory database client.
///
/// Rolls back once the last of its clones is dropped without a commit.
#[derive(Clone, Debug)]
pub struct Tx {
    /// Inner representation of this client, [`None`] once committed.
    inner: Arc<Mutex<Option<Inner>>>,
}

/// Inner representation of the [`Tx`] client.
#[derive(Debug)]
struct Inner {
    /// Exclusive access to the published [`State`].
    published: OwnedRwLockWriteGuard<State>,

    /// [`State`] modified by this transaction, not visible to others yet.
    staged: State,
}

impl Tx {
    /// Starts a new [`Tx`] from the provided [`NonTx`] client.
    ///
    /// Waits for all the other transactions to finish.
    pub async fn begin(client: &NonTx) -> Self {
        let published = Arc::clone(&client.state).write_owned().await;
        let staged = State::clone(&published);
        Self {
            inner: Arc::new(Mutex::new(Some(Inner { published, staged }))),
        }
    }

    /// Commits this [`Tx`] client, publishing all of its modifications.
    ///
    /// # Errors
    ///
    /// If this [`Tx`] is committed already.
    pub async fn commit(&self) -> Result<(), Traced<database::Error>> {
        let Inner {
            mut published,
            staged,
        } = self
            .inner
            .lock()
            .await
            .take()
            .ok_or_else(|| tracerr::new!(memory::Error::TxFinished))
            .map_err(tracerr::map_from)?;
        *published = staged;
        Ok(())
    }
}

impl Storage for Tx {
    async fn read<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&State) -> R,
    {
        self.inner
            .lock()
            .await
            .as_ref()
            .map(|tx| f(&tx.staged))
            .ok_or_else(|| tracerr::new!(memory::Error::TxFinished))
            .map_err(tracerr::map_from)
    }

    async fn write<F, R>(&self, f: F) -> Result<R, Traced<database::Error>>
    where
        F: FnOnce(&mut State) -> Result<R, memory::Error>,
    {
        self.inner
            .lock()
            .await
            .as_mut()
            .ok_or(memory::Error::TxFinished)
            .and_then(|tx| f(&mut tx.staged))
            .map_err(tracerr::from_and_wrap!(=> memory::Error))
            .map_err(tracerr::map_from)
    }
}

#[cfg(test)]
mod spec {
    use crate::infra::database::{
        self,
        memory::{self, Storage as _},
    };

    use super::{NonTx, Tx};

    fn is_tx_finished(err: &database::Error) -> bool {
        matches!(err, database::Error::Memory(memory::Error::TxFinished))
    }

    #[tokio::test]
    async fn commits_only_once() {
        let client = NonTx::default();
        let tx = Tx::begin(&client).await;

        tx.commit().await.unwrap();

        let err = tx.commit().await.unwrap_err();
        assert!(is_tx_finished(err.as_ref()), "wrong error: {err}");
    }

    #[tokio::test]
    async fn rejects_access_after_commit() {
        let client = NonTx::default();
        let tx = Tx::begin(&client).await;
        tx.commit().await.unwrap();

        let err = tx.read(|s| s.rooms.len()).await.unwrap_err();
        assert!(is_tx_finished(err.as_ref()), "wrong error: {err}");

        let err = tx.write(|_| Ok(())).await.unwrap_err();
        assert!(is_tx_finished(err.as_ref()), "wrong error: {err}");
    }

    #[tokio::test]
    async fn releases_state_after_commit() {
        let client = NonTx::default();
        let tx = Tx::begin(&client).await;
        tx.commit().await.unwrap();

        // The next transaction would wait forever if the first one still
        // held the published state.
        let next = Tx::begin(&client).await;
        next.commit().await.unwrap();
        assert_eq!(client.read(|s| s.reservations.len()).await.unwrap(), 0);
    }
}
