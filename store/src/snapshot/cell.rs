//! [`Cell`] definitions.

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{Placement, Record};

use super::Loaded;
#[cfg(doc)]
use super::Snapshot;

/// Single watched value of a [`Snapshot`].
///
/// Readers either [`get`](Cell::get) the current value or
/// [`watch`](Cell::watch) for replacements. Every mutation swaps the whole
/// value, so a reader never observes a half-applied change.
#[derive(Debug)]
pub struct Cell<V> {
    tx: Arc<watch::Sender<V>>,
}

// Manual impl, since `V` itself doesn't have to be `Clone`.
impl<V> Clone for Cell<V> {
    fn clone(&self) -> Self {
        Self {
            tx: Arc::clone(&self.tx),
        }
    }
}

impl<V: Default> Default for Cell<V> {
    fn default() -> Self {
        Self::new(V::default())
    }
}

impl<V> Cell<V> {
    /// Creates a new [`Cell`] holding the provided `value`.
    #[must_use]
    pub fn new(value: V) -> Self {
        Self {
            tx: Arc::new(watch::Sender::new(value)),
        }
    }

    /// Returns the current value of this [`Cell`].
    #[must_use]
    pub fn get(&self) -> V
    where
        V: Clone,
    {
        self.tx.borrow().clone()
    }

    /// Subscribes to replacements of this [`Cell`]'s value.
    ///
    /// The returned [`watch::Receiver`] immediately sees the current value.
    #[must_use]
    pub fn watch(&self) -> watch::Receiver<V> {
        self.tx.subscribe()
    }

    /// Replaces the value of this [`Cell`], notifying all watchers.
    pub(crate) fn set(&self, value: V) {
        _ = self.tx.send_replace(value);
    }
}

impl<T: Record + Clone> Cell<Loaded<T>> {
    /// Replaces the whole collection with freshly loaded `rows`.
    pub(crate) fn publish(&self, rows: Vec<T>) {
        self.set(rows.into());
    }

    /// Inserts the `row` into the collection, or replaces the row carrying
    /// the same ID, keeping its position.
    ///
    /// A new row lands at the front or at the back of the collection,
    /// according to the entity's [`Placement`].
    pub(crate) fn upsert(&self, row: T) {
        _ = self.tx.send_if_modified(|loaded| {
            let mut rows = loaded.to_vec();
            if let Some(slot) =
                rows.iter_mut().find(|r| r.id() == row.id())
            {
                *slot = row;
            } else {
                match T::PLACEMENT {
                    Placement::Front => rows.insert(0, row),
                    Placement::Back => rows.push(row),
                }
            }
            *loaded = rows.into();
            true
        });
    }

    /// Removes the row carrying the provided `id` from the collection.
    ///
    /// Watchers are only notified if the row was actually present.
    pub(crate) fn remove(&self, id: &T::Id) {
        _ = self.tx.send_if_modified(|loaded| {
            if loaded.iter().any(|r| r.id() == id) {
                *loaded = loaded
                    .iter()
                    .filter(|r| r.id() != id)
                    .cloned()
                    .collect();
                true
            } else {
                false
            }
        });
    }
}

#[cfg(test)]
mod spec {
    use crate::domain::{Collection, Placement, Record};

    use super::{Cell, Loaded};

    #[derive(Clone, Debug, Eq, PartialEq)]
    struct Row {
        id: u8,
        rev: u8,
    }

    impl Record for Row {
        const COLLECTION: Collection = Collection::Units;
        const PLACEMENT: Placement = Placement::Front;

        type Id = u8;

        fn id(&self) -> &u8 {
            &self.id
        }
    }

    fn ids(rows: &Loaded<Row>) -> Vec<u8> {
        rows.iter().map(|r| r.id).collect()
    }

    #[test]
    fn upsert_prepends_new_and_replaces_known_in_place() {
        let cell = Cell::<Loaded<Row>>::default();
        cell.publish(vec![Row { id: 1, rev: 0 }, Row { id: 2, rev: 0 }]);

        cell.upsert(Row { id: 3, rev: 0 });
        assert_eq!(ids(&cell.get()), [3, 1, 2]);

        cell.upsert(Row { id: 1, rev: 7 });
        let rows = cell.get();
        assert_eq!(ids(&rows), [3, 1, 2]);
        assert_eq!(rows[1].rev, 7);
    }

    #[test]
    fn remove_of_absent_id_keeps_watchers_asleep() {
        let cell = Cell::<Loaded<Row>>::default();
        cell.publish(vec![Row { id: 1, rev: 0 }]);

        let mut rx = cell.watch();
        rx.mark_unchanged();

        cell.remove(&2);
        assert!(!rx.has_changed().unwrap());

        cell.remove(&1);
        assert!(rx.has_changed().unwrap());
        assert!(cell.get().is_empty());
    }

    #[test]
    fn watcher_sees_whole_replacements_only() {
        let cell = Cell::<Loaded<Row>>::default();
        let mut rx = cell.watch();

        cell.publish(vec![Row { id: 1, rev: 0 }, Row { id: 2, rev: 0 }]);
        assert_eq!(ids(&rx.borrow_and_update()), [1, 2]);

        cell.upsert(Row { id: 3, rev: 0 });
        cell.remove(&1);
        assert_eq!(ids(&rx.borrow_and_update()), [3, 2]);
    }
}
