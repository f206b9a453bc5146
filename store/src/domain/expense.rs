//! [`Expense`] definitions.

use common::{define_id, define_kind, define_text, marker, DateOf, Money};
use serde::{Deserialize, Serialize};

use super::{cluster, Collection, Placement, Record, Violation};
#[cfg(doc)]
use super::Cluster;

/// Ledger entry of an operational expense paid out of a [`Cluster`]'s cash.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Expense {
    /// ID of this [`Expense`].
    pub id: Id,

    /// ID of the [`Cluster`] this [`Expense`] was booked against.
    pub cluster_id: cluster::Id,

    /// [`Date`] this [`Expense`] was booked.
    ///
    /// [`Date`]: common::Date
    pub date: EntryDate,

    /// [`Category`] of this [`Expense`].
    pub category: Category,

    /// Description of what the money was spent on.
    pub description: Description,

    /// Spent amount.
    pub amount: Money,

    /// URL of a receipt or other proof document, if any.
    #[serde(default)]
    pub proof_url: Option<ProofUrl>,
}

impl Record for Expense {
    const COLLECTION: Collection = Collection::LedgerEntries;
    const PLACEMENT: Placement = Placement::Front;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn validate(&self) -> Result<(), Violation> {
        self.amount
            .is_positive()
            .then_some(())
            .ok_or(Violation::NonPositiveAmount)
    }
}

define_id! {
    #[doc = "ID of an [`Expense`]."]
    pub struct Id;
}

define_kind! {
    #[doc = "Category of an [`Expense`]."]
    #[rename = "PascalCase"]
    enum Category {
        #[doc = "Guard salaries and security equipment."]
        Security,

        #[doc = "Cleaning and waste collection."]
        Kebersihan,

        #[doc = "Electricity of shared facilities."]
        Listrik,

        #[doc = "Repairs of shared facilities."]
        Perbaikan,

        #[doc = "Anything else."]
        Lainnya,
    }
}

define_text! {
    #[doc = "Description of an [`Expense`]."]
    pub struct Description(max = 1024);
}

define_text! {
    #[doc = "URL of a receipt or other proof document."]
    pub struct ProofUrl(max = 2048);
}

/// [`Date`] an [`Expense`] was booked.
///
/// [`Date`]: common::Date
pub type EntryDate = DateOf<(Expense, marker::Entry)>;

#[cfg(test)]
mod spec {
    use common::Money;
    use serde_json::json;

    use crate::domain::{Record as _, Violation};

    use super::{Category, Expense};

    #[test]
    fn rejects_non_positive_amount() {
        let mut expense = serde_json::from_value::<Expense>(json!({
            "id": "e1",
            "cluster_id": "c1",
            "date": "2023-11-01",
            "category": "Security",
            "description": "Gaji 4 personel security",
            "amount": 8_000_000.0,
        }))
        .unwrap();
        assert_eq!(expense.validate(), Ok(()));
        assert_eq!(expense.category, Category::Security);
        assert_eq!(expense.proof_url, None);

        expense.amount = Money::idr(0);
        assert_eq!(expense.validate(), Err(Violation::NonPositiveAmount));
    }
}
