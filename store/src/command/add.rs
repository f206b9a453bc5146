//! [`Command`] for adding a new entity to its collection.

use common::operations::Insert;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{Record, Violation},
    infra::{database, Database},
    snapshot::Keeps,
    Snapshot, Store,
};

use super::Command;

/// [`Command`] for adding a new entity to its collection.
///
/// Re-submitting an entity whose ID is already present is not an error: the
/// write converges on a single copy of it, since client-generated IDs double
/// as idempotency keys.
#[derive(Clone, Copy, Debug, From)]
pub struct Add<T>(pub T);

impl<Db, T> Command<Add<T>> for Store<Db>
where
    T: Record + Clone,
    Snapshot: Keeps<T>,
    Db: Database<Insert<T>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = T;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: Add<T>) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Add(record) = cmd;

        record
            .validate()
            .map_err(E::Invalid)
            .map_err(tracerr::wrap!())?;
        if let Some(violation) = record.conflicts(&self.snapshot().all()) {
            return Err(tracerr::new!(E::Invalid(violation)));
        }

        self.database()
            .execute(Insert(record.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.snapshot().cell().upsert(record.clone());
        Ok(record)
    }
}

/// Error of [`Add`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Entity breaks one of its [`Record`] invariants.
    #[display("invalid entity: {_0}")]
    Invalid(Violation),
}
