//! [`SubmitPayment`] [`Command`] definition.

use common::{operations::Insert, Money};
use derive_more::{Display, Error, From};
use tracerr::Traced;

use crate::{
    domain::{
        payment::{self, Payment},
        unit, Record as _, Violation,
    },
    infra::{database, Database},
    snapshot::Keeps as _,
    Store,
};
#[cfg(doc)]
use crate::{domain::User, Snapshot};

use super::Command;

/// [`Command`] for recording a resident's transfer attestation.
///
/// The resident reports a bank transfer they claim to have made; nothing is
/// settled until an admin verifies it, so the stored [`Payment`] is always
/// forced to [`Pending`] no matter what the caller supplies. IDs and the
/// submission date are assigned here.
///
/// [`Pending`]: payment::Status::Pending
#[derive(Clone, Debug)]
pub struct SubmitPayment {
    /// IPL account the resident reports having transferred to.
    pub rekening_ipl: payment::AccountNumber,

    /// Transferred amount.
    pub nominal: Money,

    /// Bank transfer reference of the attestation.
    pub referensi: payment::Reference,

    /// Name of the paying resident, as written on the transfer.
    pub nama: payment::PayerName,

    /// Block code of the [`Unit`] the transfer pays for.
    ///
    /// [`Unit`]: crate::domain::Unit
    pub blok: unit::Block,

    /// House number of the [`Unit`] the transfer pays for.
    ///
    /// [`Unit`]: crate::domain::Unit
    pub nomor_rumah: unit::HouseNumber,
}

impl<Db> Command<SubmitPayment> for Store<Db>
where
    Db: Database<Insert<Payment>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Payment;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: SubmitPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let SubmitPayment {
            rekening_ipl,
            nominal,
            referensi,
            nama,
            blok,
            nomor_rumah,
        } = cmd;

        let author = self
            .snapshot()
            .current_user()
            .ok_or(E::NotSignedIn)
            .map_err(tracerr::wrap!())?;

        let payment = Payment {
            id: payment::Id::random(),
            user_id: author.id,
            rekening_ipl,
            nominal,
            referensi,
            nama,
            blok,
            nomor_rumah,
            status: payment::Status::Pending,
            created_at: payment::CreationDate::today(),
        };
        payment
            .validate()
            .map_err(E::Invalid)
            .map_err(tracerr::wrap!())?;

        self.database()
            .execute(Insert(payment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;

        self.snapshot().cell().upsert(payment.clone());
        Ok(payment)
    }
}

/// Error of [`SubmitPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// Attestation breaks a [`Payment`] invariant.
    #[display("invalid entity: {_0}")]
    Invalid(Violation),

    /// No [`User`] is published as the [`Snapshot`]'s current one.
    #[display("no signed-in `User` to submit the `Payment`")]
    NotSignedIn,
}

#[cfg(test)]
mod spec {
    use common::Money;

    use crate::{
        command::{Authenticate, Refresh},
        domain::{payment, Payment, Violation},
        infra::Memory,
        Config, Store,
    };

    use super::{Command as _, ExecutionError, SubmitPayment};

    async fn signed_in(db: &Memory) -> Store<Memory> {
        let store = Store::new(Config::default(), db.clone()).0;
        _ = store.execute(Refresh).await.unwrap();
        _ = store
            .execute(Authenticate(Some("resident_01".parse().unwrap())))
            .await
            .unwrap();
        store
    }

    fn form(nominal: i64) -> SubmitPayment {
        SubmitPayment {
            rekening_ipl: "123-456-7890".parse().unwrap(),
            nominal: Money::idr(nominal),
            referensi: "TRF-20231121-0042".parse().unwrap(),
            nama: "Budi Santoso".parse().unwrap(),
            blok: "A".parse().unwrap(),
            nomor_rumah: "01".parse().unwrap(),
        }
    }

    #[tokio::test]
    async fn records_a_pending_attestation() {
        let db = Memory::seeded().await;
        let store = signed_in(&db).await;

        let recorded = store.execute(form(350_000)).await.unwrap();

        assert_eq!(recorded.status, payment::Status::Pending);
        assert_eq!(recorded.user_id, "resident_01".parse().unwrap());
        assert_eq!(recorded.created_at, payment::CreationDate::today());

        let loaded = store.snapshot().all::<Payment>();
        assert_eq!(loaded[0].id, recorded.id);
    }

    #[tokio::test]
    async fn refuses_a_non_positive_nominal() {
        let db = Memory::seeded().await;
        let store = signed_in(&db).await;
        let before = store.snapshot().all::<Payment>().len();

        let (err, _) =
            store.execute(form(0)).await.unwrap_err().split();
        assert!(matches!(
            err,
            ExecutionError::Invalid(Violation::NonPositiveAmount),
        ));
        assert_eq!(store.snapshot().all::<Payment>().len(), before);
    }

    #[tokio::test]
    async fn refuses_unsigned_sessions() {
        let db = Memory::seeded().await;
        let store = Store::new(Config::default(), db.clone()).0;

        let (err, _) =
            store.execute(form(350_000)).await.unwrap_err().split();
        assert!(matches!(err, ExecutionError::NotSignedIn));
    }
}
