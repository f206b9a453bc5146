//! [`PayInvoice`] [`Command`] definition.

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::invoice::{self, Invoice},
    infra::{database, Database},
    snapshot::Keeps as _,
    Store,
};

use super::Command;

/// [`Command`] for settling an [`Invoice`] directly.
///
/// Flips the [`Invoice`] to [`Paid`] whatever its outstanding state was, so
/// an `Overdue` bill settles the same way an `Unpaid` one does. Paying an
/// already [`Paid`] [`Invoice`] is a no-op success.
///
/// [`Paid`]: invoice::Status::Paid
#[derive(Clone, Debug, From)]
pub struct PayInvoice(pub invoice::Id);

impl<Db> Command<PayInvoice> for Store<Db>
where
    Db: Database<Update<Invoice>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Invoice;
    type Err = Traced<ExecutionError>;

    async fn execute(&self, cmd: PayInvoice) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let PayInvoice(id) = cmd;

        let mut invoice = self
            .snapshot()
            .all::<Invoice>()
            .iter()
            .find(|i| i.id == id)
            .cloned()
            .ok_or(E::InvoiceNotExists(id))
            .map_err(tracerr::wrap!())?;
        if invoice.status == invoice::Status::Paid {
            return Ok(invoice);
        }
        invoice.status = invoice::Status::Paid;

        self.database()
            .execute(Update(invoice.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.snapshot().cell().upsert(invoice.clone());
        Ok(invoice)
    }
}

/// Error of [`PayInvoice`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Invoice`] doesn't exist.
    #[display("`Invoice(id: {_0})` does not exist")]
    #[from(ignore)]
    InvoiceNotExists(#[error(not(source))] invoice::Id),
}

#[cfg(test)]
mod spec {
    use common::operations::{All, Listen, Select};
    use futures::{FutureExt as _, StreamExt as _};
    use serde_json::json;

    use crate::{
        command::Reload,
        domain::{invoice, Invoice},
        infra::Memory,
        Config, Store,
    };

    use super::{Command as _, ExecutionError, PayInvoice};

    fn invoice(id: &str, status: &str) -> Invoice {
        serde_json::from_value(json!({
            "id": id,
            "unit_id": "u-rb-01",
            "month": "November",
            "year": 2023,
            "amount": 350_000,
            "status": status,
            "due_date": "2023-11-10",
            "category": "IPL & Kebersihan",
        }))
        .unwrap()
    }

    async fn staged(db: &Memory, rows: Vec<Invoice>) -> Store<Memory> {
        let store = Store::new(Config::default(), db.clone()).0;
        db.load(rows).await;
        store.execute(Reload::<Invoice>::new()).await.unwrap();
        store
    }

    #[tokio::test]
    async fn settles_outstanding_invoices() {
        let db = Memory::new();
        let store = staged(
            &db,
            vec![invoice("INV-1", "Overdue"), invoice("INV-2", "Unpaid")],
        )
        .await;

        for id in ["INV-1", "INV-2"] {
            let paid = store
                .execute(PayInvoice(id.parse().unwrap()))
                .await
                .unwrap();
            assert_eq!(paid.status, invoice::Status::Paid);
        }

        let loaded = store.snapshot().all::<Invoice>();
        assert!(loaded.iter().all(|i| i.status == invoice::Status::Paid));
        let remote: Vec<Invoice> =
            db.execute(Select(All::new())).await.unwrap();
        assert!(remote.iter().all(|i| i.status == invoice::Status::Paid));
    }

    #[tokio::test]
    async fn paying_a_paid_invoice_writes_nothing() {
        let db = Memory::new();
        let store = staged(&db, vec![invoice("INV-1", "Paid")]).await;
        let mut changes = db.execute(Listen).await.unwrap();

        let kept = store
            .execute(PayInvoice("INV-1".parse().unwrap()))
            .await
            .unwrap();
        assert_eq!(kept.status, invoice::Status::Paid);
        assert!(changes.next().now_or_never().is_none());
    }

    #[tokio::test]
    async fn refuses_an_unknown_invoice() {
        let db = Memory::new();
        let store = staged(&db, vec![invoice("INV-1", "Unpaid")]).await;

        let (err, _) = store
            .execute(PayInvoice("INV-404".parse().unwrap()))
            .await
            .unwrap_err()
            .split();
        assert!(matches!(err, ExecutionError::InvoiceNotExists(_)));
    }
}
