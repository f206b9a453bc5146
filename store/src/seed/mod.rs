//! Demo dataset of a small SIPEMA estate.

use serde::Deserialize;

use crate::domain::{
    Cluster, Complaint, Expense, HouseType, Invoice, Lead, Payment, Unit,
    User, Vendor,
};

/// Demo dataset, one [`Vec`] per collection.
#[derive(Clone, Debug, Deserialize)]
pub struct Demo {
    /// Portal [`User`] profiles, one per role.
    pub users: Vec<User>,

    /// [`Cluster`]s of the estate.
    pub clusters: Vec<Cluster>,

    /// Housing [`Unit`]s, including one still under warranty and one not
    /// handed over.
    pub units: Vec<Unit>,

    /// IPL [`Invoice`]s of the `u-rb-01` [`Unit`], one per status.
    pub invoices: Vec<Invoice>,

    /// [`Complaint`]s across categories and statuses.
    pub complaints: Vec<Complaint>,

    /// Ledger [`Expense`]s of the Ruby [`Cluster`].
    pub expenses: Vec<Expense>,

    /// Estate [`Vendor`]s, one of them with a dormant contract.
    pub vendors: Vec<Vendor>,

    /// CRM [`Lead`]s across the sales pipeline.
    pub leads: Vec<Lead>,

    /// Pending [`Payment`] attestation.
    pub payments: Vec<Payment>,

    /// [`HouseType`] catalog.
    pub house_types: Vec<HouseType>,
}

/// Returns the demo dataset.
///
/// The rows exercise every status and edge the domain knows of: a unit
/// inside its warranty window, an overdue invoice, a dormant vendor
/// contract and so on.
#[must_use]
pub fn demo() -> Demo {
    serde_json::from_str(include_str!("demo.json"))
        .unwrap_or_else(|e| unreachable!("demo dataset is well-formed: {e}"))
}

#[cfg(test)]
mod spec {
    use crate::domain::{complaint, invoice, payment, unit};

    #[test]
    fn demo_dataset_parses() {
        let demo = super::demo();

        assert_eq!(demo.users.len(), 4);
        assert_eq!(demo.clusters.len(), 4);
        assert_eq!(demo.units.len(), 5);
        assert_eq!(demo.invoices.len(), 3);
        assert_eq!(demo.complaints.len(), 3);
        assert_eq!(demo.expenses.len(), 5);
        assert_eq!(demo.vendors.len(), 4);
        assert_eq!(demo.leads.len(), 4);
        assert_eq!(demo.payments.len(), 1);
        assert_eq!(demo.house_types.len(), 3);
    }

    #[test]
    fn demo_dataset_spans_the_interesting_edges() {
        let demo = super::demo();

        assert!(
            demo.units.iter().any(|u| u.bast_date.is_none()),
            "a unit not handed over yet",
        );
        assert!(
            demo.units.iter().any(|u| u.phone_number.is_none()),
            "a unit without a reachable resident",
        );
        assert!(
            demo.invoices
                .iter()
                .any(|i| i.status == invoice::Status::Overdue),
            "an overdue invoice",
        );
        assert!(
            demo.complaints
                .iter()
                .any(|c| c.status == complaint::Status::Pending
                    && c.category == complaint::Category::Retensi),
            "a pending warranty complaint",
        );
        assert!(
            demo.payments
                .iter()
                .all(|p| p.status == payment::Status::Pending),
            "payments await verification",
        );
        assert!(
            demo.vendors.iter().any(|v| !v.monthly_cost.is_positive()),
            "a dormant vendor contract",
        );
        assert!(
            demo.units
                .iter()
                .any(|u| u.resident_status == unit::Residency::Kosong),
            "a vacant unit",
        );
    }
}
