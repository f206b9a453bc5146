//! [`Command`] for replacing an entity of a collection.

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{Collection, Record, Violation},
    infra::{database, Database},
    snapshot::Keeps,
    Snapshot, Store,
};

use super::Command;

/// [`Command`] for replacing an entity of a collection with a new version
/// carrying the same ID.
#[derive(Clone, Copy, Debug, From)]
pub struct Edit<T>(pub T);

impl<Db, T> Command<Edit<T>> for Store<Db>
where
    T: Record + Clone,
    Snapshot: Keeps<T>,
    Db: Database<Update<T>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = T;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: Edit<T>) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let Edit(record) = cmd;

        let known = self.snapshot().all::<T>();
        if !known.iter().any(|r| r.id() == record.id()) {
            return Err(tracerr::new!(E::NotFound {
                collection: T::COLLECTION,
                id: record.id().to_string(),
            }));
        }
        record
            .validate()
            .map_err(E::Invalid)
            .map_err(tracerr::wrap!())?;
        if let Some(violation) = record.conflicts(&known) {
            return Err(tracerr::new!(E::Invalid(violation)));
        }

        self.database()
            .execute(Update(record.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.snapshot().cell().upsert(record.clone());
        Ok(record)
    }
}

/// Error of [`Edit`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Entity breaks one of its [`Record`] invariants.
    #[display("invalid entity: {_0}")]
    Invalid(Violation),

    /// No entity with such ID is present in the collection.
    #[display("no entity `{id}` in `{collection}` collection")]
    #[from(ignore)]
    NotFound {
        /// Collection the entity was looked up in.
        collection: Collection,

        /// ID of the missing entity.
        id: String,
    },
}

#[cfg(test)]
mod spec {
    use std::time::Duration;

    use common::operations::{All, Select};
    use serde_json::json;

    use crate::{
        command::Reload,
        domain::{Complaint, Payment, Violation},
        infra::Memory,
        Config, Store,
    };

    use super::{Command as _, Edit, ExecutionError};

    fn store(db: &Memory) -> Store<Memory> {
        Store::new(Config::default(), db.clone()).0
    }

    fn complaint(description: &str) -> Complaint {
        serde_json::from_value(json!({
            "id": "C-1",
            "user_id": "resident_01",
            "category": "Fasum",
            "description": description,
            "status": "Pending",
            "created_at": "2023-11-21",
        }))
        .unwrap()
    }

    fn payment(status: &str) -> Payment {
        serde_json::from_value(json!({
            "id": "P-1",
            "user_id": "resident_01",
            "rekening_ipl": "123-456-7890",
            "nominal": 350_000,
            "referensi": "TRF-20231105",
            "nama": "Budi Santoso",
            "blok": "A",
            "nomor_rumah": "01",
            "status": status,
            "created_at": "2023-11-05",
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn refuses_an_id_that_is_not_loaded() {
        let db = Memory::new();
        let store = store(&db);

        let (err, _) = store
            .execute(Edit(complaint("Lampu jalan mati.")))
            .await
            .unwrap_err()
            .split();
        assert!(matches!(err, ExecutionError::NotFound { .. }));
    }

    #[tokio::test]
    async fn replaces_the_loaded_and_the_remote_row() {
        let db = Memory::new();
        let store = store(&db);
        db.load([complaint("Lampu jalan mati.")]).await;
        store.execute(Reload::<Complaint>::new()).await.unwrap();

        let edited = store
            .execute(Edit(complaint("Lampu sudah diganti.")))
            .await
            .unwrap();

        let loaded = store.snapshot().all::<Complaint>();
        assert_eq!(loaded.len(), 1);
        assert_eq!(loaded[0].description, edited.description);

        let remote: Vec<Complaint> =
            db.execute(Select(All::new())).await.unwrap();
        assert_eq!(remote[0].description, edited.description);
    }

    #[tokio::test(start_paused = true)]
    async fn last_applied_write_wins() {
        let db = Memory::new();
        let store = store(&db);
        db.load([complaint("Lampu jalan mati.")]).await;
        store.execute(Reload::<Complaint>::new()).await.unwrap();

        // The first issued write is delayed, so it lands after the second
        // one and overrides it.
        db.inject_latency([Duration::from_millis(100)]).await;
        let (slow, fast) = tokio::join!(
            store.execute(Edit(complaint("Sudah dicek."))),
            store.execute(Edit(complaint("Menunggu tukang."))),
        );
        _ = slow.unwrap();
        _ = fast.unwrap();

        let winner: Complaint = complaint("Sudah dicek.");
        let loaded = store.snapshot().all::<Complaint>();
        assert_eq!(loaded[0].description, winner.description);
        let remote: Vec<Complaint> =
            db.execute(Select(All::new())).await.unwrap();
        assert_eq!(remote[0].description, winner.description);
    }

    #[tokio::test]
    async fn refuses_revoking_a_verified_payment() {
        let db = Memory::new();
        let store = store(&db);
        db.load([payment("verified")]).await;
        store.execute(Reload::<Payment>::new()).await.unwrap();

        let (err, _) = store
            .execute(Edit(payment("pending")))
            .await
            .unwrap_err()
            .split();
        assert!(matches!(
            err,
            ExecutionError::Invalid(Violation::VerificationRevoked),
        ));

        let loaded = store.snapshot().all::<Payment>();
        assert!(matches!(
            loaded[0].status,
            crate::domain::payment::Status::Verified,
        ));
    }
}
