//! [`Memory`] [`Database`] implementation.

use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet, VecDeque},
    sync::Arc,
    time::Duration,
};

use common::operations::{All, By, Delete, Insert, Listen, Select, Update};
use derive_more::{Display, Error as StdError, From};
use futures::{stream, StreamExt as _};
use serde::{de::DeserializeOwned, Serialize};
use serde_json::Value;
use tokio::sync::{broadcast, Mutex, RwLock};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{user, Collection, Record, User},
    infra::database::{self, Change, Changes, Database},
    seed,
};

/// Capacity of the [`Change`]s feed.
///
/// Slow subscribers having missed more than this many announcements skip
/// the missed ones.
const FEED_CAPACITY: usize = 64;

/// In-memory [`Database`], holding wire-shaped rows.
///
/// Plays the remote service in demo mode and in tests: rows live as wire
/// JSON in per-[`Collection`] tables, and every applied write is announced
/// the way the real service's notification channel would announce it.
///
/// Cloning is shallow, so clones share the same tables and feed, like
/// sessions of one remote service do.
#[derive(Clone, Debug, Default)]
pub struct Memory(Arc<Inner>);

/// Inner state of a [`Memory`] database, shared between its clones.
#[derive(Debug)]
struct Inner {
    /// Wire rows, per [`Collection`].
    tables: RwLock<HashMap<Collection, Vec<Value>>>,

    /// Feed announcing applied writes.
    feed: broadcast::Sender<Change>,

    /// [`Collection`]s failing all their operations on purpose.
    poisoned: RwLock<HashSet<Collection>>,

    /// Delays consumed by operations, front first.
    latency: Mutex<VecDeque<Duration>>,
}

impl Default for Inner {
    fn default() -> Self {
        Self {
            tables: RwLock::default(),
            feed: broadcast::channel(FEED_CAPACITY).0,
            poisoned: RwLock::default(),
            latency: Mutex::default(),
        }
    }
}

impl Memory {
    /// Creates a new empty [`Memory`] database.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a new [`Memory`] database pre-loaded with the [`seed::demo`]
    /// dataset.
    pub async fn seeded() -> Self {
        let db = Self::new();
        let demo = seed::demo();
        db.load(demo.users).await;
        db.load(demo.clusters).await;
        db.load(demo.units).await;
        db.load(demo.invoices).await;
        db.load(demo.complaints).await;
        db.load(demo.expenses).await;
        db.load(demo.vendors).await;
        db.load(demo.leads).await;
        db.load(demo.payments).await;
        db.load(demo.house_types).await;
        db
    }

    /// Loads the provided `rows` into their [`Collection`]'s table,
    /// replacing whatever was there.
    ///
    /// Doesn't announce anything: loading models the state existing before
    /// this session, not a change happening during it.
    pub async fn load<T>(&self, rows: impl IntoIterator<Item = T>)
    where
        T: Record + Serialize,
    {
        let rows = rows
            .into_iter()
            .map(|row| {
                serde_json::to_value(&row).unwrap_or_else(|e| {
                    unreachable!("typed row serializes into JSON: {e}")
                })
            })
            .collect();
        _ = self.0.tables.write().await.insert(T::COLLECTION, rows);
    }

    /// Starts failing every operation on the provided [`Collection`].
    pub async fn poison(&self, collection: Collection) {
        _ = self.0.poisoned.write().await.insert(collection);
    }

    /// Stops failing operations on the provided [`Collection`].
    pub async fn heal(&self, collection: Collection) {
        _ = self.0.poisoned.write().await.remove(&collection);
    }

    /// Queues `delays` to be slept out by subsequent operations, one delay
    /// per operation, front first.
    pub async fn inject_latency(
        &self,
        delays: impl IntoIterator<Item = Duration>,
    ) {
        self.0.latency.lock().await.extend(delays);
    }

    /// Sleeps out the next injected delay, then refuses the operation if
    /// the `collection` is poisoned.
    async fn admit(
        &self,
        collection: Collection,
    ) -> Result<(), Traced<database::Error>> {
        let delay = self.0.latency.lock().await.pop_front();
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        if self.0.poisoned.read().await.contains(&collection) {
            return Err(tracerr::new!(Error::Unavailable(collection)))
                .map_err(tracerr::map_from);
        }
        Ok(())
    }

    /// Announces an applied write to the [`Listen`] subscribers.
    fn announce(&self, collection: Collection) {
        _ = self.0.feed.send(Change { collection });
    }
}

impl<T> Database<Insert<T>> for Memory
where
    T: Record + Serialize,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Insert(record): Insert<T>,
    ) -> Result<Self::Ok, Self::Err> {
        self.admit(T::COLLECTION).await?;

        let row = to_row(&record)?;
        let mut tables = self.0.tables.write().await;
        let table = tables.entry(T::COLLECTION).or_default();
        if let Some(stored) = table.iter_mut().find(|r| r["id"] == row["id"])
        {
            *stored = row;
        } else {
            table.push(row);
        }
        drop(tables);

        self.announce(T::COLLECTION);
        Ok(())
    }
}

impl<T> Database<Update<T>> for Memory
where
    T: Record + Serialize,
{
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Update(record): Update<T>,
    ) -> Result<Self::Ok, Self::Err> {
        self.admit(T::COLLECTION).await?;

        let row = to_row(&record)?;
        let mut tables = self.0.tables.write().await;
        let stored = tables
            .entry(T::COLLECTION)
            .or_default()
            .iter_mut()
            .find(|r| r["id"] == row["id"]);
        // Updating an unknown row is not a write, so nothing is announced.
        let Some(stored) = stored else {
            return Ok(());
        };
        *stored = row;
        drop(tables);

        self.announce(T::COLLECTION);
        Ok(())
    }
}

impl<T: Record> Database<Delete<By<T, T::Id>>> for Memory {
    type Ok = ();
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Delete(by): Delete<By<T, T::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.admit(T::COLLECTION).await?;

        // IDs serialize as their `Display` form.
        let id = by.into_inner().to_string();
        let mut tables = self.0.tables.write().await;
        let table = tables.entry(T::COLLECTION).or_default();
        let before = table.len();
        table.retain(|row| row["id"].as_str() != Some(id.as_str()));
        let removed = table.len() < before;
        drop(tables);

        if removed {
            self.announce(T::COLLECTION);
        }
        Ok(())
    }
}

impl<T> Database<Select<All<T>>> for Memory
where
    T: Record + DeserializeOwned,
{
    type Ok = Vec<T>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        _: Select<All<T>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.admit(T::COLLECTION).await?;

        let mut rows = self
            .0
            .tables
            .read()
            .await
            .get(&T::COLLECTION)
            .cloned()
            .unwrap_or_default();
        if let Some(key) = freshness_column(T::COLLECTION) {
            rows.sort_by(|a, b| newest_first(key, a, b));
        }
        rows.into_iter()
            .map(|row| {
                serde_json::from_value(row).map_err(|source| {
                    tracerr::new!(Error::Malformed {
                        collection: T::COLLECTION,
                        source,
                    })
                })
            })
            .collect::<Result<_, _>>()
            .map_err(tracerr::map_from)
    }
}

impl Database<Select<By<Option<User>, user::Id>>> for Memory {
    type Ok = Option<User>;
    type Err = Traced<database::Error>;

    async fn execute(
        &self,
        Select(by): Select<By<Option<User>, user::Id>>,
    ) -> Result<Self::Ok, Self::Err> {
        self.admit(Collection::Profiles).await?;

        let id = by.into_inner().to_string();
        self.0
            .tables
            .read()
            .await
            .get(&Collection::Profiles)
            .into_iter()
            .flatten()
            .find(|row| row["id"].as_str() == Some(id.as_str()))
            .map(|row| serde_json::from_value(row.clone()))
            .transpose()
            .map_err(|source| {
                tracerr::new!(Error::Malformed {
                    collection: Collection::Profiles,
                    source,
                })
            })
            .map_err(tracerr::map_from)
    }
}

impl Database<Listen> for Memory {
    type Ok = Changes;
    type Err = Traced<database::Error>;

    async fn execute(&self, _: Listen) -> Result<Self::Ok, Self::Err> {
        let feed = self.0.feed.subscribe();
        Ok(stream::unfold(feed, |mut feed| async move {
            loop {
                match feed.recv().await {
                    Ok(change) => return Some((change, feed)),
                    Err(broadcast::error::RecvError::Lagged(skipped)) => {
                        log::warn!(
                            "`Change`s feed lagged: \
                             {skipped} announcements skipped",
                        );
                    }
                    Err(broadcast::error::RecvError::Closed) => return None,
                }
            }
        })
        .boxed())
    }
}

/// Serializes the provided [`Record`] into its wire row.
fn to_row<T: Record + Serialize>(
    record: &T,
) -> Result<Value, Traced<database::Error>> {
    serde_json::to_value(record)
        .map_err(|source| {
            tracerr::new!(Error::Malformed {
                collection: T::COLLECTION,
                source,
            })
        })
        .map_err(tracerr::map_from)
}

/// Returns the wire column the [`Collection`] is served sorted by, newest
/// first.
fn freshness_column(collection: Collection) -> Option<&'static str> {
    match collection {
        Collection::Complaints | Collection::Leads | Collection::Payments => {
            Some("created_at")
        }
        Collection::Invoices => Some("year"),
        Collection::LedgerEntries => Some("date"),
        Collection::Profiles
        | Collection::Clusters
        | Collection::Units
        | Collection::Vendors
        | Collection::HouseTypes => None,
    }
}

/// Orders two wire rows by the provided `key`, descending.
///
/// Dates compare as their ISO 8601 strings. Rows missing the `key` compare
/// equal, keeping their insertion order.
fn newest_first(key: &str, a: &Value, b: &Value) -> Ordering {
    match (&a[key], &b[key]) {
        (Value::Number(a), Value::Number(b)) => b
            .as_i64()
            .unwrap_or(i64::MIN)
            .cmp(&a.as_i64().unwrap_or(i64::MIN)),
        (Value::String(a), Value::String(b)) => b.cmp(a),
        _ => Ordering::Equal,
    }
}

/// [`Memory`] database [`Error`].
#[derive(Debug, Display, From, StdError)]
pub enum Error {
    /// [`Collection`] is failing its operations on purpose.
    #[display("`{_0}` collection is unavailable")]
    #[from(ignore)]
    Unavailable(#[error(not(source))] Collection),

    /// Stored row doesn't match the wire shape of its [`Collection`].
    #[display("malformed `{collection}` record: {source}")]
    Malformed {
        /// [`Collection`] the row belongs to.
        collection: Collection,

        /// Cause of the mismatch.
        source: serde_json::Error,
    },
}

#[cfg(test)]
mod spec {
    use common::operations::{All, By, Delete, Insert, Select, Update};
    use serde_json::json;

    use crate::domain::{complaint, Collection, Complaint};

    use super::{Database as _, Memory};

    fn complaint(id: &str, created_at: &str) -> Complaint {
        serde_json::from_value(json!({
            "id": id,
            "user_id": "u-rb-01",
            "category": "Retensi",
            "description": "Dinding retak",
            "status": "Pending",
            "created_at": created_at,
        }))
        .unwrap()
    }

    #[tokio::test]
    async fn insert_converges_on_a_single_row_per_id() {
        let db = Memory::new();

        db.execute(Insert(complaint("C-1", "2024-03-01")))
            .await
            .unwrap();
        db.execute(Insert(complaint("C-1", "2024-03-02")))
            .await
            .unwrap();

        let all: Vec<Complaint> =
            db.execute(Select(All::new())).await.unwrap();
        assert_eq!(all.len(), 1);
        assert_eq!(
            all[0].created_at,
            complaint::CreationDate::from_ymd(2024, 3, 2).unwrap(),
        );
    }

    #[tokio::test]
    async fn selects_newest_first() {
        let db = Memory::new();
        for (id, date) in
            [("C-1", "2024-01-05"), ("C-2", "2024-03-01"), ("C-3", "2024-02-10")]
        {
            db.execute(Insert(complaint(id, date))).await.unwrap();
        }

        let all: Vec<Complaint> =
            db.execute(Select(All::new())).await.unwrap();
        let ids =
            all.iter().map(|c| c.id.to_string()).collect::<Vec<_>>();
        assert_eq!(ids, ["C-2", "C-3", "C-1"]);
    }

    #[tokio::test]
    async fn update_of_unknown_row_is_not_a_write() {
        let db = Memory::new();
        let mut feed = db.0.feed.subscribe();

        db.execute(Update(complaint("C-404", "2024-03-01")))
            .await
            .unwrap();

        let all: Vec<Complaint> =
            db.execute(Select(All::new())).await.unwrap();
        assert!(all.is_empty());
        assert!(feed.try_recv().is_err(), "nothing should be announced");
    }

    #[tokio::test]
    async fn delete_of_absent_id_announces_nothing() {
        let db = Memory::new();
        db.execute(Insert(complaint("C-1", "2024-03-01")))
            .await
            .unwrap();
        let mut feed = db.0.feed.subscribe();

        db.execute(Delete(By::<Complaint, _>::new(
            complaint::Id::new("C-404").unwrap(),
        )))
        .await
        .unwrap();
        assert!(feed.try_recv().is_err());

        db.execute(Delete(By::<Complaint, _>::new(
            complaint::Id::new("C-1").unwrap(),
        )))
        .await
        .unwrap();
        assert_eq!(
            feed.try_recv().unwrap().collection,
            Collection::Complaints,
        );
    }

    #[tokio::test]
    async fn poisoned_collection_refuses_operations_until_healed() {
        let db = Memory::new();
        db.poison(Collection::Complaints).await;

        let refused: Result<Vec<Complaint>, _> =
            db.execute(Select(All::new())).await;
        assert!(refused.is_err());

        db.heal(Collection::Complaints).await;
        let healed: Vec<Complaint> =
            db.execute(Select(All::new())).await.unwrap();
        assert!(healed.is_empty());
    }
}
