//! [`Command`] for re-fetching a whole collection from the remote service.

use std::{fmt, marker::PhantomData};

use common::operations::{All, Select};
use tracerr::Traced;

use crate::{
    domain::Record,
    infra::{database, Database},
    snapshot::Keeps,
    Snapshot, Store,
};

use super::Command;

/// [`Command`] for re-fetching the whole `T` collection from the remote
/// service and republishing its snapshot.
///
/// The fetched rows replace the local ones wholesale: remote state is
/// authoritative and supersedes any locally applied patch.
pub struct Reload<T: ?Sized>(PhantomData<T>);

impl<T: ?Sized> Reload<T> {
    /// Creates a new [`Reload`] command.
    #[must_use]
    pub const fn new() -> Self {
        Self(PhantomData)
    }
}

impl<T: ?Sized> Clone for Reload<T> {
    fn clone(&self) -> Self {
        *self
    }
}
impl<T: ?Sized> Copy for Reload<T> {}

impl<T: ?Sized> Default for Reload<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: ?Sized> fmt::Debug for Reload<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Reload")
    }
}

impl<Db, T> Command<Reload<T>> for Store<Db>
where
    T: Record + Clone,
    Snapshot: Keeps<T>,
    Db: Database<Select<All<T>>, Ok = Vec<T>, Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, _: Reload<T>) -> Result<Self::Ok, Self::Err> {
        let rows = self
            .database()
            .execute(Select(All::new()))
            .await
            .map_err(tracerr::wrap!())?;
        self.snapshot().cell().publish(rows);
        Ok(())
    }
}

/// Error of [`Reload`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use serde_json::json;

    use crate::{
        domain::{Collection, Complaint},
        infra::Memory,
        Config, Store,
    };

    use super::{Command as _, Reload};

    fn store(db: &Memory) -> Store<Memory> {
        Store::new(Config::default(), db.clone()).0
    }

    fn complaint(id: &str, created_at: &str) -> Complaint {
        serde_json::from_value(json!({
            "id": id,
            "user_id": "resident_01",
            "category": "Fasum",
            "description": "Lampu jalan mati total.",
            "status": "Pending",
            "created_at": created_at,
        }))
        .unwrap()
    }

    fn ids(rows: &[Complaint]) -> Vec<String> {
        rows.iter().map(|c| c.id.to_string()).collect()
    }

    #[tokio::test]
    async fn remote_rows_replace_local_ones_wholesale() {
        let db = Memory::new();
        let store = store(&db);
        db.load([
            complaint("C-1", "2023-11-20"),
            complaint("C-2", "2023-11-22"),
        ])
        .await;

        store.execute(Reload::<Complaint>::new()).await.unwrap();
        assert_eq!(ids(&store.snapshot().all()), ["C-2", "C-1"]);

        // Newest-first order comes from the remote, not from us.
        db.load([
            complaint("C-3", "2023-11-21"),
            complaint("C-4", "2023-11-23"),
        ])
        .await;

        store.execute(Reload::<Complaint>::new()).await.unwrap();
        assert_eq!(ids(&store.snapshot().all()), ["C-4", "C-3"]);
    }

    #[tokio::test]
    async fn failed_fetch_keeps_the_previous_rows() {
        let db = Memory::new();
        let store = store(&db);
        db.load([complaint("C-1", "2023-11-20")]).await;
        store.execute(Reload::<Complaint>::new()).await.unwrap();

        db.poison(Collection::Complaints).await;
        assert!(store
            .execute(Reload::<Complaint>::new())
            .await
            .is_err());
        assert_eq!(ids(&store.snapshot().all()), ["C-1"]);
    }
}
