//! Domain definitions.

pub mod cluster;
pub mod complaint;
pub mod contact;
pub mod expense;
pub mod house_type;
pub mod invoice;
pub mod lead;
pub mod payment;
pub mod unit;
pub mod user;
pub mod vendor;

use std::fmt;

use derive_more::{Display, Error};
use serde::{Deserialize, Serialize};

pub use self::{
    cluster::Cluster, complaint::Complaint, contact::Phone, expense::Expense,
    house_type::HouseType, invoice::Invoice, lead::Lead, payment::Payment,
    unit::Unit, user::User, vendor::Vendor,
};

/// Entity stored in one of the remote [`Collection`]s.
pub trait Record {
    /// [`Collection`] this entity is stored in.
    const COLLECTION: Collection;

    /// Position a freshly added entity takes inside its collection snapshot.
    const PLACEMENT: Placement = Placement::Back;

    /// Type of this entity's identifier.
    type Id: Clone + Eq + fmt::Display + fmt::Debug;

    /// Returns the identifier of this entity.
    fn id(&self) -> &Self::Id;

    /// Validates this entity before it's sent to the remote service.
    ///
    /// # Errors
    ///
    /// If this entity is malformed.
    fn validate(&self) -> Result<(), Violation> {
        Ok(())
    }

    /// Checks this entity against the already known ones of its collection.
    ///
    /// Entities with the same identifier are not conflicts: re-submitting an
    /// entity converges on a single copy.
    fn conflicts(&self, existing: &[Self]) -> Option<Violation>
    where
        Self: Sized,
    {
        _ = existing;
        None
    }
}

/// Remote collection (table) of the persistence service.
#[derive(
    Clone,
    Copy,
    Debug,
    Deserialize,
    strum::Display,
    strum::EnumString,
    Eq,
    Hash,
    PartialEq,
    Serialize,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Collection {
    /// [`User`] profiles.
    Profiles,

    /// [`Cluster`]s of the estate.
    Clusters,

    /// Housing [`Unit`]s.
    Units,

    /// Resident [`Complaint`]s.
    Complaints,

    /// IPL [`Invoice`]s.
    Invoices,

    /// [`Expense`] ledger.
    LedgerEntries,

    /// Contracted [`Vendor`]s.
    Vendors,

    /// Sales [`Lead`]s.
    Leads,

    /// Resident [`Payment`] attestations.
    Payments,

    /// [`HouseType`] catalogue.
    HouseTypes,
}

impl Collection {
    /// Name of the remote table backing this [`Collection`].
    #[must_use]
    pub fn table(&self) -> &'static str {
        match self {
            Self::Profiles => "profiles",
            Self::Clusters => "clusters",
            Self::Units => "units",
            Self::Complaints => "complaints",
            Self::Invoices => "invoices",
            Self::LedgerEntries => "ledger_entries",
            Self::Vendors => "vendors",
            Self::Leads => "leads",
            Self::Payments => "payments",
            Self::HouseTypes => "house_types",
        }
    }
}

/// Position a freshly added entity takes inside its collection snapshot.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Placement {
    /// Entity is prepended, so shows up first in the snapshot.
    Front,

    /// Entity is appended to the end of the snapshot.
    Back,
}

/// Violation of a [`Record`]'s invariants, detected before any remote call.
#[derive(Clone, Debug, Display, Eq, Error, PartialEq)]
pub enum Violation {
    /// Monetary amount expected to be positive is zero or negative.
    #[display("monetary amount must be positive")]
    NonPositiveAmount,

    /// Occupied units of a [`Cluster`] exceed its total units.
    #[display("{occupied} occupied units exceed {total} total units")]
    OccupancyOverflow {
        /// Declared number of occupied units.
        occupied: u32,

        /// Declared total number of units.
        total: u32,
    },

    /// Contract period of a [`Vendor`] ends before it starts.
    #[display("contract ends before it starts")]
    ContractEndsBeforeStart,

    /// Another [`Unit`] already occupies the same address.
    #[display("unit at block `{block}` number `{number}` already exists")]
    DuplicateAddress {
        /// Block of the duplicated address.
        block: unit::Block,

        /// House number of the duplicated address.
        number: unit::HouseNumber,
    },

    /// [`Complaint`] status moved against its flow.
    #[display("complaint cannot move from `{from}` to `{to}`")]
    IllegalTransition {
        /// Status the [`Complaint`] is known to be in.
        from: complaint::Status,

        /// Status it was attempted to move into.
        to: complaint::Status,
    },

    /// Verified [`Payment`] attempted to return to pending.
    #[display("verified payment cannot return to pending")]
    VerificationRevoked,
}

#[cfg(test)]
mod spec {
    use std::str::FromStr as _;

    use super::Collection;

    #[test]
    fn collection_parses_from_table_name() {
        for collection in [
            Collection::Profiles,
            Collection::Clusters,
            Collection::Units,
            Collection::Complaints,
            Collection::Invoices,
            Collection::LedgerEntries,
            Collection::Vendors,
            Collection::Leads,
            Collection::Payments,
            Collection::HouseTypes,
        ] {
            assert_eq!(
                Collection::from_str(collection.table()).unwrap(),
                collection,
            );
            assert_eq!(collection.to_string(), collection.table());
            assert_eq!(
                serde_json::to_value(collection).unwrap(),
                collection.table(),
            );
        }
    }
}
