//! [`Command`] for removing an entity from its collection.

use common::operations::{By, Delete};
use tracerr::Traced;

use crate::{
    domain::Record,
    infra::{database, Database},
    snapshot::Keeps,
    Snapshot, Store,
};

use super::Command;

/// [`Command`] for removing an entity from its collection by its ID.
///
/// Removal is idempotent: an ID with no entity behind it is a no-op success.
#[derive(Clone, Debug)]
pub struct Remove<T: Record>(pub T::Id);

impl<Db, T> Command<Remove<T>> for Store<Db>
where
    T: Record + Clone,
    Snapshot: Keeps<T>,
    Db: Database<Delete<By<T, T::Id>>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: Remove<T>) -> Result<Self::Ok, Self::Err> {
        let Remove(id) = cmd;

        self.database()
            .execute(Delete(By::new(id.clone())))
            .await
            .map_err(tracerr::wrap!())?;

        <Snapshot as Keeps<T>>::cell(self.snapshot()).remove(&id);
        Ok(())
    }
}

/// Error of [`Remove`] [`Command`] execution.
pub type ExecutionError = database::Error;

#[cfg(test)]
mod spec {
    use common::operations::{All, Select};
    use serde_json::json;

    use crate::{command::Reload, domain::Vendor, infra::Memory, Config, Store};

    use super::{Command as _, Remove};

    fn store(db: &Memory) -> Store<Memory> {
        Store::new(Config::default(), db.clone()).0
    }

    fn vendor(id: &str) -> Vendor {
        serde_json::from_value(json!({
            "id": id,
            "name": "CV. Karya Beton",
            "service_type": "Konstruksi",
            "contact_person": "Bpk. Yudi",
            "phone": "0815-1122-3344",
            "email": "karyabeton@gmail.com",
            "status": "Inactive",
            "contract_start": "2023-01-01",
            "contract_end": "2023-12-31",
            "monthly_cost": 12_000_000,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn removes_from_the_snapshot_and_the_remote() {
        let db = Memory::new();
        let store = store(&db);
        db.load([vendor("v-1"), vendor("v-2")]).await;
        store.execute(Reload::<Vendor>::new()).await.unwrap();

        store
            .execute(Remove::<Vendor>("v-1".parse().unwrap()))
            .await
            .unwrap();

        let loaded = store.snapshot().all::<Vendor>();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].id, "v-2".parse().unwrap());

        let remote: Vec<Vendor> = db.execute(Select(All::new())).await.unwrap();
        assert_eq!(remote.len(), 1);
    }

    #[tokio::test]
    async fn tolerates_ids_with_no_entity_behind_them() {
        let db = Memory::new();
        let store = store(&db);
        db.load([vendor("v-1")]).await;
        store.execute(Reload::<Vendor>::new()).await.unwrap();

        let gone = Remove::<Vendor>("v-1".parse().unwrap());
        store.execute(gone.clone()).await.unwrap();
        store.execute(gone).await.unwrap();
        store
            .execute(Remove::<Vendor>("v-404".parse().unwrap()))
            .await
            .unwrap();

        assert!(store.snapshot().all::<Vendor>().is_empty());
    }
}
