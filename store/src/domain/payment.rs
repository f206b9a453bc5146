//! [`Payment`] definitions.

use common::{define_id, define_kind, define_text, marker, DateOf, Money};
use serde::{Deserialize, Serialize};

use super::{unit, user, Collection, Placement, Record, Violation};
#[cfg(doc)]
use super::{Invoice, Unit};

/// Resident-submitted attestation of a manual IPL transfer, awaiting
/// verification by a cluster admin.
///
/// The `blok` and `nomor_rumah` pair names the [`Unit`] the transfer is for.
/// Verification resolves that pair to settle the [`Unit`]'s outstanding
/// [`Invoice`]s.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Payment {
    /// ID of this [`Payment`].
    pub id: Id,

    /// ID of the [`User`] who submitted this [`Payment`].
    ///
    /// [`User`]: super::User
    pub user_id: user::Id,

    /// Number of the IPL bank account the transfer was made to.
    pub rekening_ipl: AccountNumber,

    /// Transferred amount.
    pub nominal: Money,

    /// Bank transfer reference code.
    pub referensi: Reference,

    /// Name of the payer.
    pub nama: PayerName,

    /// [`Block`] of the [`Unit`] this transfer is for.
    ///
    /// [`Block`]: unit::Block
    pub blok: unit::Block,

    /// House number of the [`Unit`] this transfer is for.
    pub nomor_rumah: unit::HouseNumber,

    /// Verification [`Status`] of this [`Payment`].
    pub status: Status,

    /// [`Date`] this [`Payment`] was submitted.
    ///
    /// [`Date`]: common::Date
    pub created_at: CreationDate,
}

impl Record for Payment {
    const COLLECTION: Collection = Collection::Payments;
    const PLACEMENT: Placement = Placement::Front;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn validate(&self) -> Result<(), Violation> {
        self.nominal
            .is_positive()
            .then_some(())
            .ok_or(Violation::NonPositiveAmount)
    }

    fn conflicts(&self, existing: &[Self]) -> Option<Violation> {
        let current = existing.iter().find(|p| p.id == self.id)?;
        (current.status == Status::Verified && self.status == Status::Pending)
            .then_some(Violation::VerificationRevoked)
    }
}

define_id! {
    #[doc = "ID of a [`Payment`]."]
    pub struct Id;
}

define_text! {
    #[doc = "Number of an IPL bank account."]
    pub struct AccountNumber(max = 32);
}

define_text! {
    #[doc = "Bank transfer reference code."]
    pub struct Reference(max = 64);
}

define_text! {
    #[doc = "Name of a payer."]
    pub struct PayerName(max = 128);
}

define_kind! {
    #[doc = "Verification status of a [`Payment`]."]
    #[rename = "lowercase"]
    enum Status {
        #[doc = "Submitted, awaiting admin verification."]
        Pending,

        #[doc = "Confirmed by an admin."]
        Verified,
    }
}

/// [`Date`] a [`Payment`] was submitted.
///
/// [`Date`]: common::Date
pub type CreationDate = DateOf<(Payment, marker::Creation)>;

#[cfg(test)]
mod spec {
    use common::Money;
    use serde_json::json;

    use crate::domain::{Record as _, Violation};

    use super::{Payment, Status};

    fn payment(status: Status) -> Payment {
        serde_json::from_value(json!({
            "id": "P-0001",
            "user_id": "u1",
            "rekening_ipl": "1234567890",
            "nominal": 500_000.0,
            "referensi": "TF123",
            "nama": "Ahmad",
            "blok": "A",
            "nomor_rumah": "1",
            "status": status.to_string(),
            "created_at": "2023-10-01",
        }))
        .unwrap()
    }

    #[test]
    fn verification_cannot_be_revoked() {
        let verified = payment(Status::Verified);
        let pending = payment(Status::Pending);

        assert_eq!(
            pending.conflicts(&[verified.clone()]),
            Some(Violation::VerificationRevoked),
        );
        assert_eq!(verified.conflicts(&[verified.clone()]), None);
        assert_eq!(verified.conflicts(&[pending.clone()]), None);
        assert_eq!(pending.conflicts(&[]), None);
    }

    #[test]
    fn rejects_non_positive_nominal() {
        let mut p = payment(Status::Pending);
        assert_eq!(p.validate(), Ok(()));

        p.nominal = Money::idr(0);
        assert_eq!(p.validate(), Err(Violation::NonPositiveAmount));
    }

    #[test]
    fn status_is_lowercase_on_the_wire() {
        assert_eq!(serde_json::to_value(Status::Pending).unwrap(), "pending");
        assert_eq!(
            serde_json::to_value(Status::Verified).unwrap(),
            "verified",
        );
        assert_eq!("verified".parse::<Status>().unwrap(), Status::Verified);
    }
}
