//! Session-scoped in-memory state of the remote collections.

mod cell;

use std::sync::Arc;

use tokio::sync::watch;

use crate::domain::{
    Cluster, Complaint, Expense, HouseType, Invoice, Lead, Payment, Record,
    Unit, User, Vendor,
};

pub use self::cell::Cell;

/// Immutable set of loaded rows of a single collection.
///
/// Cheap to clone and to hand out: a fresh one is published wholesale on
/// every change, so holders always read a consistent state.
pub type Loaded<T> = Arc<[T]>;

/// In-memory snapshot of every remote collection.
///
/// One [`Snapshot`] lives for one session. Cloning it is cheap and yields a
/// handle to the same shared state, so every holder observes the same rows.
///
/// A [`Snapshot`] is read-only on its own: rows only enter it through the
/// owning store's command surface, or through its initial load.
#[derive(Clone, Debug, Default)]
pub struct Snapshot {
    users: Cell<Loaded<User>>,
    clusters: Cell<Loaded<Cluster>>,
    units: Cell<Loaded<Unit>>,
    complaints: Cell<Loaded<Complaint>>,
    invoices: Cell<Loaded<Invoice>>,
    expenses: Cell<Loaded<Expense>>,
    vendors: Cell<Loaded<Vendor>>,
    leads: Cell<Loaded<Lead>>,
    payments: Cell<Loaded<Payment>>,
    house_types: Cell<Loaded<HouseType>>,
    current_user: Cell<Option<User>>,
}

impl Snapshot {
    /// Returns all the loaded rows of the `T` collection.
    #[must_use]
    pub fn all<T: Record>(&self) -> Loaded<T>
    where
        Self: Keeps<T>,
    {
        self.cell().get()
    }

    /// Subscribes to replacements of the `T` collection.
    ///
    /// The returned [`watch::Receiver`] immediately sees the current rows,
    /// and then a fresh [`Loaded`] set after every applied change.
    #[must_use]
    pub fn watch<T: Record>(&self) -> watch::Receiver<Loaded<T>>
    where
        Self: Keeps<T>,
    {
        self.cell().watch()
    }

    /// Returns the [`User`] this session is authenticated as, if any.
    #[must_use]
    pub fn current_user(&self) -> Option<User> {
        self.current_user.get()
    }

    /// Subscribes to authentication changes of this session.
    #[must_use]
    pub fn watch_current_user(&self) -> watch::Receiver<Option<User>> {
        self.current_user.watch()
    }

    pub(crate) fn set_current_user(&self, user: Option<User>) {
        self.current_user.set(user);
    }
}

/// Possession of the `T` collection by a [`Snapshot`].
pub trait Keeps<T: Record> {
    /// Returns the [`Cell`] keeping the `T` collection.
    fn cell(&self) -> &Cell<Loaded<T>>;
}

impl Keeps<User> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<User>> {
        &self.users
    }
}

impl Keeps<Cluster> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<Cluster>> {
        &self.clusters
    }
}

impl Keeps<Unit> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<Unit>> {
        &self.units
    }
}

impl Keeps<Complaint> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<Complaint>> {
        &self.complaints
    }
}

impl Keeps<Invoice> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<Invoice>> {
        &self.invoices
    }
}

impl Keeps<Expense> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<Expense>> {
        &self.expenses
    }
}

impl Keeps<Vendor> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<Vendor>> {
        &self.vendors
    }
}

impl Keeps<Lead> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<Lead>> {
        &self.leads
    }
}

impl Keeps<Payment> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<Payment>> {
        &self.payments
    }
}

impl Keeps<HouseType> for Snapshot {
    fn cell(&self) -> &Cell<Loaded<HouseType>> {
        &self.house_types
    }
}
