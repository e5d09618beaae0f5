//! Single-writer actor.
//!
//! SQLite tolerates one writer at a time, so every mutation in this crate
//! goes through one background task that owns a dedicated connection and
//! processes jobs serially, each inside an immediate transaction.
//!
//! The actor serializes individual write jobs only. Reads run on the pool,
//! so a caller whose mutation depends on what it just read (the
//! consolidation flow) must hold its own lock across the whole
//! read-then-write sequence; `HoldingService` does.

use std::any::Any;

use diesel::SqliteConnection;
use tokio::sync::{mpsc, oneshot};

use super::DbPool;
use crate::errors::StorageError;
use lecapfolio_core::errors::Result;

// A write job: runs against the actor's connection, result type-erased so
// one channel can carry jobs with different return types.
type Job<T> = Box<dyn FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static>;

type ErasedJob = Job<Box<dyn Any + Send + 'static>>;
type Reply = oneshot::Sender<Result<Box<dyn Any + Send + 'static>>>;

/// Handle for submitting write jobs to the actor.
#[derive(Clone)]
pub struct WriteHandle {
    tx: mpsc::Sender<(ErasedJob, Reply)>,
}

impl WriteHandle {
    /// Runs a job on the writer's dedicated connection and awaits its
    /// result. Jobs are executed strictly in submission order.
    pub async fn exec<F, T>(&self, job: F) -> Result<T>
    where
        F: FnOnce(&mut SqliteConnection) -> Result<T> + Send + 'static,
        T: Send + 'static + Any,
    {
        let (reply_tx, reply_rx) = oneshot::channel();

        self.tx
            .send((
                Box::new(move |conn| job(conn).map(|v| Box::new(v) as Box<dyn Any + Send>)),
                reply_tx,
            ))
            .await
            .expect("writer actor channel closed; the actor has stopped");

        reply_rx
            .await
            .expect("writer actor dropped the reply sender")
            .map(|boxed: Box<dyn Any + Send + 'static>| {
                *boxed
                    .downcast::<T>()
                    .unwrap_or_else(|_| panic!("writer actor returned an unexpected type"))
            })
    }
}

/// Spawns the writer task. The returned handle is cheap to clone; dropping
/// every handle stops the actor.
pub fn spawn_writer(pool: DbPool) -> WriteHandle {
    let (tx, mut rx) = mpsc::channel::<(ErasedJob, Reply)>(1024);

    tokio::spawn(async move {
        let mut conn = pool
            .get()
            .expect("failed to reserve a connection for the writer actor");

        while let Some((job, reply_tx)) = rx.recv().await {
            let result = conn
                .immediate_transaction::<_, StorageError, _>(|c| job(c).map_err(StorageError::from))
                .map_err(|e: StorageError| e.into());

            // The requester may have gone away; that is not the actor's
            // problem.
            let _ = reply_tx.send(result);
        }
    });

    WriteHandle { tx }
}
