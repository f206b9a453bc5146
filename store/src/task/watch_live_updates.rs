//! [`WatchLiveUpdates`] [`Task`].

use std::{convert::Infallible, error::Error, time::Duration};

use common::operations::{By, Listen, Perform, Start};
use futures::StreamExt as _;
use smart_default::SmartDefault;
use tracerr::Traced;
use tracing as log;

use crate::{
    command::{Command, Reload},
    domain::{
        Cluster, Collection, Complaint, Expense, HouseType, Invoice, Lead,
        Payment, Unit, User, Vendor,
    },
    infra::{database, Change, Changes, Database},
    Store,
};

use super::Task;

/// Configuration for [`WatchLiveUpdates`] [`Task`].
#[derive(Clone, Debug, SmartDefault)]
pub struct Config {
    /// [`Collection`]s to keep in sync with remote changes.
    #[default(vec![Collection::Complaints, Collection::Invoices])]
    pub collections: Vec<Collection>,

    /// Delay before re-subscribing once the change feed dies.
    #[default(Duration::from_secs(5))]
    pub retry_interval: Duration,
}

/// [`Task`] keeping watched [`Collection`]s in sync with the remote service.
///
/// Subscribes to the remote change feed and re-fetches a watched collection
/// whenever any session (this one included) touches it. The re-fetched rows
/// are authoritative and supersede locally applied patches.
#[derive(Clone, Debug)]
pub struct WatchLiveUpdates<S> {
    /// [`Config`] of this [`Task`].
    config: Config,

    /// [`Store`] instance.
    store: S,
}

impl<Db> Task<Start<By<WatchLiveUpdates<Self>, Config>>> for Store<Db>
where
    WatchLiveUpdates<Store<Db>>:
        Task<Perform<()>, Ok = (), Err: Error> + Send + Sync + 'static,
    Self: Clone,
{
    type Ok = ();
    type Err = Infallible;

    async fn execute(
        &self,
        Start(by): Start<By<WatchLiveUpdates<Self>, Config>>,
    ) -> Result<Self::Ok, Self::Err> {
        let config = by.into_inner();
        let task = WatchLiveUpdates {
            config,
            store: self.clone(),
        };

        loop {
            match task.execute(Perform(())).await {
                Ok(()) => {
                    log::warn!("`Change`s feed ended, re-subscribing");
                }
                Err(e) => {
                    log::error!("`task::WatchLiveUpdates` failed: {e}");
                }
            }
            tokio::time::sleep(task.config.retry_interval).await;
        }
    }
}

impl<Db> Task<Perform<()>> for WatchLiveUpdates<Store<Db>>
where
    Db: Database<Listen, Ok = Changes, Err = Traced<database::Error>>,
    Store<Db>: Command<Reload<User>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<Cluster>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<Unit>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<Complaint>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<Invoice>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<Expense>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<Vendor>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<Lead>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<Payment>, Ok = (), Err = Traced<database::Error>>
        + Command<Reload<HouseType>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = ();
    type Err = ExecutionError;

    async fn execute(&self, _: Perform<()>) -> Result<Self::Ok, Self::Err> {
        let mut changes = self
            .store
            .database()
            .execute(Listen)
            .await
            .map_err(tracerr::wrap!())?;

        while let Some(Change { collection }) = changes.next().await {
            if !self.config.collections.contains(&collection) {
                continue;
            }

            // A failed re-fetch keeps the previous rows: the next
            // notification (or an explicit `Reload`) recovers.
            _ = match collection {
                Collection::Profiles => {
                    self.store.execute(Reload::<User>::new()).await
                }
                Collection::Clusters => {
                    self.store.execute(Reload::<Cluster>::new()).await
                }
                Collection::Units => {
                    self.store.execute(Reload::<Unit>::new()).await
                }
                Collection::Complaints => {
                    self.store.execute(Reload::<Complaint>::new()).await
                }
                Collection::Invoices => {
                    self.store.execute(Reload::<Invoice>::new()).await
                }
                Collection::LedgerEntries => {
                    self.store.execute(Reload::<Expense>::new()).await
                }
                Collection::Vendors => {
                    self.store.execute(Reload::<Vendor>::new()).await
                }
                Collection::Leads => {
                    self.store.execute(Reload::<Lead>::new()).await
                }
                Collection::Payments => {
                    self.store.execute(Reload::<Payment>::new()).await
                }
                Collection::HouseTypes => {
                    self.store.execute(Reload::<HouseType>::new()).await
                }
            }
            .map_err(|e| {
                log::warn!("failed to reload `{collection}` collection: {e}");
            });
        }
        Ok(())
    }
}

/// Error of [`WatchLiveUpdates`] execution.
pub type ExecutionError = Traced<database::Error>;

#[cfg(test)]
mod spec {
    use std::{future::IntoFuture as _, time::Duration};

    use serde_json::json;
    use tokio::time::timeout;

    use crate::{
        command::{Add, Command as _, Remove},
        domain::{Complaint, Vendor},
        infra::Memory,
        snapshot::Keeps,
        Config, Store,
    };

    fn complaint(id: &str) -> Complaint {
        serde_json::from_value(json!({
            "id": id,
            "user_id": "resident_01",
            "category": "Fasum",
            "description": "Lampu jalan mati total.",
            "status": "Pending",
            "created_at": "2023-11-21",
        }))
        .unwrap()
    }

    fn vendor(id: &str) -> Vendor {
        serde_json::from_value(json!({
            "id": id,
            "name": "CV. Karya Beton",
            "service_type": "Konstruksi",
            "contact_person": "Bpk. Yudi",
            "phone": "0815-1122-3344",
            "email": "karyabeton@gmail.com",
            "status": "Active",
            "contract_start": "2023-01-01",
            "contract_end": "2023-12-31",
            "monthly_cost": 12_000_000,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn mirrors_watched_collections_across_sessions() {
        let db = Memory::new();
        let (writer, _writer_live) = Store::new(Config::default(), db.clone());
        let (reader, live) = Store::new(Config::default(), db.clone());

        // The watcher subscribes once its background future is first polled.
        let mut live = live.into_future();
        assert!(futures::poll!(&mut live).is_pending());

        let mut complaints = reader.snapshot().watch::<Complaint>();
        let added = writer.execute(Add(complaint("C-1"))).await.unwrap();
        tokio::select! {
            r = &mut live => panic!("background stopped: {r:?}"),
            r = timeout(Duration::from_secs(5), async {
                loop {
                    if complaints
                        .borrow_and_update()
                        .iter()
                        .any(|c| c.id == added.id)
                    {
                        break;
                    }
                    complaints.changed().await.unwrap();
                }
            }) => r.unwrap(),
        }

        writer
            .execute(Remove::<Complaint>(added.id.clone()))
            .await
            .unwrap();
        tokio::select! {
            r = &mut live => panic!("background stopped: {r:?}"),
            r = timeout(Duration::from_secs(5), async {
                loop {
                    if complaints.borrow_and_update().is_empty() {
                        break;
                    }
                    complaints.changed().await.unwrap();
                }
            }) => r.unwrap(),
        }
        assert!(reader.snapshot().all::<Complaint>().is_empty());
    }

    #[tokio::test]
    async fn refetched_rows_supersede_local_patches() {
        let db = Memory::new();
        let (writer, _writer_live) = Store::new(Config::default(), db.clone());
        let (reader, live) = Store::new(Config::default(), db.clone());
        let mut live = live.into_future();
        assert!(futures::poll!(&mut live).is_pending());

        // A patch nothing ever wrote to the remote.
        <crate::Snapshot as Keeps<Complaint>>::cell(reader.snapshot())
            .upsert(complaint("C-ghost"));
        assert_eq!(reader.snapshot().all::<Complaint>().len(), 1);

        let mut complaints = reader.snapshot().watch::<Complaint>();
        let added = writer.execute(Add(complaint("C-1"))).await.unwrap();
        tokio::select! {
            r = &mut live => panic!("background stopped: {r:?}"),
            r = timeout(Duration::from_secs(5), async {
                loop {
                    if complaints
                        .borrow_and_update()
                        .iter()
                        .any(|c| c.id == added.id)
                    {
                        break;
                    }
                    complaints.changed().await.unwrap();
                }
            }) => r.unwrap(),
        }

        let rows = reader.snapshot().all::<Complaint>();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id, added.id);
    }

    #[tokio::test]
    async fn skips_collections_it_does_not_watch() {
        let db = Memory::new();
        let (writer, _writer_live) = Store::new(Config::default(), db.clone());
        let (reader, live) = Store::new(Config::default(), db.clone());
        let mut live = live.into_future();
        assert!(futures::poll!(&mut live).is_pending());

        let mut complaints = reader.snapshot().watch::<Complaint>();
        _ = writer.execute(Add(vendor("v-1"))).await.unwrap();
        let added = writer.execute(Add(complaint("C-1"))).await.unwrap();

        // Once the later complaint change lands, the earlier vendor change
        // has already been seen and skipped.
        tokio::select! {
            r = &mut live => panic!("background stopped: {r:?}"),
            r = timeout(Duration::from_secs(5), async {
                loop {
                    if complaints
                        .borrow_and_update()
                        .iter()
                        .any(|c| c.id == added.id)
                    {
                        break;
                    }
                    complaints.changed().await.unwrap();
                }
            }) => r.unwrap(),
        }
        assert!(reader.snapshot().all::<Vendor>().is_empty());
    }
}
