//! [`Command`] for loading every collection from the remote service.

use std::convert::Infallible;

use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        Cluster, Collection, Complaint, Expense, HouseType, Invoice, Lead,
        Payment, Unit, User, Vendor,
    },
    infra::database,
    Store,
};

use super::{Command, Reload};

/// [`Command`] for (re)loading every collection of the [`Snapshot`] from the
/// remote service.
///
/// Collections load concurrently and independently of each other. A failed
/// read leaves its collection as it was (initially empty), gets logged, and
/// is listed in the returned [`Report`]: a refresh never fails as a whole,
/// so a session always starts, even against a fully unreachable service.
///
/// [`Snapshot`]: crate::Snapshot
#[derive(Clone, Copy, Debug, Default)]
pub struct Refresh;

impl<Db> Command<Refresh> for Store<Db>
where
    Self: Command<Reload<User>, Ok = (), Err = Traced<database::Error>>
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
    type Ok = Report;
    type Err = Infallible;

    async fn execute(&self, _: Refresh) -> Result<Self::Ok, Self::Err> {
        let (
            users,
            clusters,
            units,
            complaints,
            invoices,
            expenses,
            vendors,
            leads,
            payments,
            house_types,
        ) = futures::join!(
            self.execute(Reload::<User>::new()),
            self.execute(Reload::<Cluster>::new()),
            self.execute(Reload::<Unit>::new()),
            self.execute(Reload::<Complaint>::new()),
            self.execute(Reload::<Invoice>::new()),
            self.execute(Reload::<Expense>::new()),
            self.execute(Reload::<Vendor>::new()),
            self.execute(Reload::<Lead>::new()),
            self.execute(Reload::<Payment>::new()),
            self.execute(Reload::<HouseType>::new()),
        );

        let failed = [
            (Collection::Profiles, users),
            (Collection::Clusters, clusters),
            (Collection::Units, units),
            (Collection::Complaints, complaints),
            (Collection::Invoices, invoices),
            (Collection::LedgerEntries, expenses),
            (Collection::Vendors, vendors),
            (Collection::Leads, leads),
            (Collection::Payments, payments),
            (Collection::HouseTypes, house_types),
        ]
        .into_iter()
        .filter_map(|(collection, result)| {
            result.err().map(|e| {
                log::warn!("failed to load `{collection}` collection: {e}");
                collection
            })
        })
        .collect();

        Ok(Report { failed })
    }
}

/// Outcome of a [`Refresh`] [`Command`] execution.
#[derive(Clone, Debug)]
pub struct Report {
    /// Collections that failed to load and kept their previous rows.
    pub failed: Vec<Collection>,
}

impl Report {
    /// Indicates whether every collection loaded successfully.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.failed.is_empty()
    }
}

#[cfg(test)]
mod spec {
    use crate::{
        domain::{Collection, Complaint, Invoice, User},
        infra::Memory,
        Config, Store,
    };

    use super::{Command as _, Refresh};

    fn store(db: &Memory) -> Store<Memory> {
        Store::new(Config::default(), db.clone()).0
    }

    #[tokio::test]
    async fn loads_every_collection() {
        let db = Memory::seeded().await;
        let store = store(&db);

        let report = store.execute(Refresh).await.unwrap();

        assert!(report.is_complete());
        let snapshot = store.snapshot();
        assert_eq!(snapshot.all::<User>().len(), 4);
        assert_eq!(snapshot.all::<Invoice>().len(), 3);
        let complaints = snapshot.all::<Complaint>();
        assert_eq!(complaints.len(), 3);
        assert_eq!(complaints[0].id, "C-003".parse().unwrap());
    }

    #[tokio::test]
    async fn failed_collection_does_not_fail_the_others() {
        let db = Memory::seeded().await;
        let store = store(&db);
        db.poison(Collection::Complaints).await;

        let report = store.execute(Refresh).await.unwrap();

        assert_eq!(report.failed, [Collection::Complaints]);
        assert!(!report.is_complete());
        assert!(store.snapshot().all::<Complaint>().is_empty());
        assert_eq!(store.snapshot().all::<Invoice>().len(), 3);

        // Once the service recovers, the next refresh picks the rows up.
        db.heal(Collection::Complaints).await;
        let report = store.execute(Refresh).await.unwrap();
        assert!(report.is_complete());
        assert_eq!(store.snapshot().all::<Complaint>().len(), 3);
    }
}
