//! [`Invoice`] definitions.

use common::{define_id, define_kind, define_text, marker, DateOf, Money};
use serde::{Deserialize, Serialize};

use super::{unit, Collection, Placement, Record, Violation};
#[cfg(doc)]
use super::Unit;

/// IPL due billed to a [`Unit`] for one month.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Invoice {
    /// ID of this [`Invoice`].
    pub id: Id,

    /// ID of the [`Unit`] this [`Invoice`] is billed to.
    pub unit_id: unit::Id,

    /// [`Month`] this [`Invoice`] covers.
    pub month: Month,

    /// Year this [`Invoice`] covers.
    pub year: Year,

    /// Billed amount.
    ///
    /// Always positive.
    pub amount: Money,

    /// Payment [`Status`] of this [`Invoice`].
    ///
    /// Set by the billing flows, never derived from [`Invoice::due_date`]:
    /// nothing transitions an overdue unpaid invoice to [`Status::Overdue`]
    /// in the background.
    pub status: Status,

    /// [`Date`] this [`Invoice`] is due by.
    ///
    /// [`Date`]: common::Date
    pub due_date: DueDate,

    /// Billing category of this [`Invoice`], e.g. `IPL & Kebersihan`.
    pub category: Category,
}

impl Invoice {
    /// Indicates whether this [`Invoice`] still awaits payment.
    #[must_use]
    pub fn is_outstanding(&self) -> bool {
        matches!(self.status, Status::Unpaid | Status::Overdue)
    }
}

impl Record for Invoice {
    const COLLECTION: Collection = Collection::Invoices;
    const PLACEMENT: Placement = Placement::Front;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn validate(&self) -> Result<(), Violation> {
        if !self.amount.is_positive() {
            return Err(Violation::NonPositiveAmount);
        }
        Ok(())
    }
}

define_id! {
    #[doc = "ID of an [`Invoice`]."]
    pub struct Id;
}

define_kind! {
    #[doc = "Month an [`Invoice`] covers."]
    #[rename = "PascalCase"]
    enum Month {
        #[doc = "January."]
        Januari,

        #[doc = "February."]
        Februari,

        #[doc = "March."]
        Maret,

        #[doc = "April."]
        April,

        #[doc = "May."]
        Mei,

        #[doc = "June."]
        Juni,

        #[doc = "July."]
        Juli,

        #[doc = "August."]
        Agustus,

        #[doc = "September."]
        September,

        #[doc = "October."]
        Oktober,

        #[doc = "November."]
        November,

        #[doc = "December."]
        Desember,
    }
}

/// Year an [`Invoice`] covers.
pub type Year = u16;

define_kind! {
    #[doc = "Payment status of an [`Invoice`]."]
    #[rename = "PascalCase"]
    enum Status {
        #[doc = "Paid in full."]
        Paid,

        #[doc = "Not paid yet."]
        Unpaid,

        #[doc = "Not paid and past its due date."]
        Overdue,
    }
}

/// [`Date`] an [`Invoice`] is due by.
///
/// [`Date`]: common::Date
pub type DueDate = DateOf<(Invoice, marker::Due)>;

define_text! {
    #[doc = "Billing category of an [`Invoice`]."]
    pub struct Category(max = 64);
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{Invoice, Record as _, Status, Violation};

    fn invoice(amount: i64, status: &str) -> Invoice {
        serde_json::from_value(json!({
            "id": "INV-2023-11",
            "unit_id": "u-rb-01",
            "month": "November",
            "year": 2023,
            "amount": amount,
            "status": status,
            "due_date": "2023-11-10",
            "category": "IPL & Kebersihan",
        }))
        .unwrap()
    }

    #[test]
    fn rejects_non_positive_amount() {
        assert_eq!(
            invoice(0, "Unpaid").validate(),
            Err(Violation::NonPositiveAmount),
        );
        assert_eq!(
            invoice(-150_000, "Unpaid").validate(),
            Err(Violation::NonPositiveAmount),
        );
        assert_eq!(invoice(150_000, "Unpaid").validate(), Ok(()));
    }

    #[test]
    fn unpaid_and_overdue_are_outstanding() {
        assert!(invoice(150_000, "Unpaid").is_outstanding());
        assert!(invoice(150_000, "Overdue").is_outstanding());
        assert!(!invoice(150_000, "Paid").is_outstanding());
    }

    #[test]
    fn wire_round_trip_keeps_all_fields() {
        let inv = invoice(150_000, "Overdue");

        let wire = serde_json::to_value(&inv).unwrap();
        assert_eq!(wire["month"], "November");
        assert_eq!(wire["amount"], 150_000.0);
        assert_eq!(wire["due_date"], "2023-11-10");

        let back = serde_json::from_value::<Invoice>(wire).unwrap();
        assert_eq!(back.id, inv.id);
        assert_eq!(back.status, Status::Overdue);
    }
}
