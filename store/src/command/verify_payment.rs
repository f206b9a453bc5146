//! [`VerifyPayment`] [`Command`] definition.

use common::operations::Update;
use derive_more::{Display, Error, From};
use tracerr::Traced;
use tracing as log;

use crate::{
    domain::{
        invoice::{self, Invoice},
        payment::{self, Payment},
        Unit,
    },
    infra::{database, Database},
    snapshot::Keeps as _,
    Store,
};

use super::Command;

/// [`Command`] for confirming a resident's transfer attestation.
///
/// Marks the [`Payment`] [`Verified`] and then settles the bills it pays
/// for: the [`Unit`] is resolved by the attested block and house number, and
/// every outstanding [`Invoice`] of that [`Unit`] is marked `Paid`, one
/// write at a time. An attestation whose address matches no [`Unit`]
/// verifies alone and reports an empty settlement. Verifying an already
/// [`Verified`] [`Payment`] is a no-op success.
///
/// Settlement is not transactional: if one of the [`Invoice`] writes fails,
/// the ones already applied stand, and the error reports how far the
/// settlement got.
///
/// [`Verified`]: payment::Status::Verified
#[derive(Clone, Debug, From)]
pub struct VerifyPayment(pub payment::Id);

/// Successful outcome of a [`VerifyPayment`] [`Command`] execution.
#[derive(Clone, Debug)]
pub struct Verification {
    /// [`Payment`] marked as [`Verified`].
    ///
    /// [`Verified`]: payment::Status::Verified
    pub payment: Payment,

    /// [`Invoice`]s settled along with the verification.
    pub settled: Vec<invoice::Id>,
}

impl<Db> Command<VerifyPayment> for Store<Db>
where
    Db: Database<Update<Payment>, Ok = (), Err = Traced<database::Error>>
        + Database<Update<Invoice>, Ok = (), Err = Traced<database::Error>>,
{
    type Ok = Verification;
    type Err = Traced<ExecutionError>;

    async fn execute(
        &self,
        cmd: VerifyPayment,
    ) -> Result<Self::Ok, Self::Err> {
        use ExecutionError as E;

        let VerifyPayment(id) = cmd;

        let mut payment = self
            .snapshot()
            .all::<Payment>()
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(E::PaymentNotExists(id))
            .map_err(tracerr::wrap!())?;
        if payment.status == payment::Status::Verified {
            return Ok(Verification {
                payment,
                settled: Vec::new(),
            });
        }
        payment.status = payment::Status::Verified;

        self.database()
            .execute(Update(payment.clone()))
            .await
            .map_err(tracerr::map_from_and_wrap!(=> E))?;
        self.snapshot().cell().upsert(payment.clone());

        let units = self.snapshot().all::<Unit>();
        let Some(unit) = units
            .iter()
            .find(|u| {
                u.block == payment.blok && u.number == payment.nomor_rumah
            })
        else {
            return Ok(Verification {
                payment,
                settled: Vec::new(),
            });
        };

        let outstanding = self
            .snapshot()
            .all::<Invoice>()
            .iter()
            .filter(|i| i.unit_id == unit.id && i.is_outstanding())
            .cloned()
            .collect::<Vec<_>>();

        let mut settled = Vec::with_capacity(outstanding.len());
        for mut invoice in outstanding {
            invoice.status = invoice::Status::Paid;
            if let Err(e) =
                self.database().execute(Update(invoice.clone())).await
            {
                log::warn!(
                    "failed to settle `Invoice(id: {})` of \
                     `Payment(id: {})`: {e}",
                    invoice.id,
                    payment.id,
                );
                return Err(tracerr::new!(E::Settlement { settled }));
            }
            self.snapshot().cell().upsert(invoice.clone());
            settled.push(invoice.id);
        }

        Ok(Verification { payment, settled })
    }
}

/// Error of [`VerifyPayment`] [`Command`] execution.
#[derive(Debug, Display, Error, From)]
pub enum ExecutionError {
    /// [`Database`] error of the verification itself.
    #[display("`Database` operation failed: {_0}")]
    Db(database::Error),

    /// [`Payment`] doesn't exist.
    #[display("`Payment(id: {_0})` does not exist")]
    #[from(ignore)]
    PaymentNotExists(#[error(not(source))] payment::Id),

    /// [`Payment`] was verified, but settling its [`Invoice`]s stopped
    /// partway.
    ///
    /// The settlements applied before the failing write stand.
    #[display("only {} `Invoice`(s) settled after verification", settled.len())]
    #[from(ignore)]
    Settlement {
        /// [`Invoice`]s settled before the failure.
        settled: Vec<invoice::Id>,
    },
}
