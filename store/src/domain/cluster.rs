//! [`Cluster`] definitions.

use common::{
    define_id, define_kind, define_text, marker, DateOf, Money, Percent,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{Collection, Record, Violation};

/// Housing sub-development with its own manager, occupancy and cash ledger.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Cluster {
    /// ID of this [`Cluster`].
    pub id: Id,

    /// [`Name`] of this [`Cluster`].
    pub name: Name,

    /// Name of this [`Cluster`]'s manager.
    pub manager_name: ManagerName,

    /// Total number of units in this [`Cluster`].
    pub total_units: UnitCount,

    /// Number of occupied units in this [`Cluster`].
    ///
    /// Never exceeds [`Cluster::total_units`].
    pub occupied_units: UnitCount,

    /// Cash balance of this [`Cluster`]'s ledger.
    pub cash_balance: Money,

    /// [`SecurityStatus`] of this [`Cluster`].
    pub security_status: SecurityStatus,

    /// [`Date`] of this [`Cluster`]'s last audit.
    ///
    /// [`Date`]: common::Date
    pub last_audit_date: AuditDate,
}

impl Cluster {
    /// Returns the share of occupied units as a [`Percent`].
    ///
    /// A [`Cluster`] with no units at all is 0% occupied.
    #[must_use]
    pub fn occupancy_rate(&self) -> Percent {
        Percent::ratio(
            Decimal::from(self.occupied_units),
            Decimal::from(self.total_units),
        )
    }
}

impl Record for Cluster {
    const COLLECTION: Collection = Collection::Clusters;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn validate(&self) -> Result<(), Violation> {
        if self.occupied_units > self.total_units {
            return Err(Violation::OccupancyOverflow {
                occupied: self.occupied_units,
                total: self.total_units,
            });
        }
        Ok(())
    }
}

define_id! {
    #[doc = "ID of a [`Cluster`]."]
    pub struct Id;
}

define_text! {
    #[doc = "Name of a [`Cluster`]."]
    pub struct Name(max = 128);
}

define_text! {
    #[doc = "Name of a [`Cluster`]'s manager."]
    pub struct ManagerName(max = 128);
}

/// Number of units in a [`Cluster`].
pub type UnitCount = u32;

define_kind! {
    #[doc = "Security posture of a [`Cluster`]."]
    #[rename = "PascalCase"]
    enum SecurityStatus {
        #[doc = "No incidents reported."]
        Aman,

        #[doc = "Heightened alert."]
        Siaga,

        #[doc = "Active danger reported."]
        Bahaya,
    }
}

/// [`Date`] of a [`Cluster`]'s last audit.
///
/// [`Date`]: common::Date
pub type AuditDate = DateOf<(Cluster, marker::Audit)>;

#[cfg(test)]
mod spec {
    use common::Percent;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::{Cluster, Record as _, Violation};

    fn cluster(occupied: u32, total: u32) -> Cluster {
        serde_json::from_value(json!({
            "id": "cl-ruby",
            "name": "Cluster Ruby",
            "manager_name": "Bpk. Hartono",
            "total_units": total,
            "occupied_units": occupied,
            "cash_balance": 45_000_000,
            "security_status": "Aman",
            "last_audit_date": "2023-11-01",
        }))
        .unwrap()
    }

    #[test]
    fn occupancy_rate_is_share_of_total() {
        assert_eq!(
            cluster(45, 150).occupancy_rate(),
            Percent::new(Decimal::from(30)).unwrap(),
        );
        assert_eq!(cluster(0, 0).occupancy_rate(), Percent::ZERO);
    }

    #[test]
    fn rejects_occupancy_overflow() {
        assert_eq!(
            cluster(121, 120).validate(),
            Err(Violation::OccupancyOverflow {
                occupied: 121,
                total: 120,
            }),
        );
        assert_eq!(cluster(120, 120).validate(), Ok(()));
    }
}
