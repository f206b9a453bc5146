//! [`Unit`] definitions.

use common::{define_id, define_kind, define_text, marker, Date, DateOf};
use serde::{Deserialize, Deserializer, Serialize};

#[cfg(doc)]
use super::{Cluster, HouseType};
use super::{cluster, contact::Phone, Collection, Placement, Record, Violation};

/// Housing unit of the estate.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Unit {
    /// ID of this [`Unit`].
    pub id: Id,

    /// Name of the [`Cluster`] this [`Unit`] belongs to.
    ///
    /// Matches [`Cluster`]s by name only: nothing is enforced.
    pub cluster: cluster::Name,

    /// [`Block`] code of this [`Unit`].
    pub block: Block,

    /// [`HouseNumber`] of this [`Unit`] inside its block.
    pub number: HouseNumber,

    /// House type label of this [`Unit`].
    ///
    /// Matches [`HouseType`]s by name only: nothing is enforced.
    #[serde(rename = "type")]
    pub kind: Kind,

    /// Land area of this [`Unit`], in square meters.
    #[serde(default)]
    pub land_area: LandArea,

    /// Name of this [`Unit`]'s owner.
    #[serde(default = "unknown_owner")]
    pub owner_name: OwnerName,

    /// Occupancy of this [`Unit`].
    #[serde(default = "vacant")]
    pub resident_status: Residency,

    /// Contact [`Phone`] of this [`Unit`]'s resident.
    #[serde(default, deserialize_with = "lenient_phone")]
    pub phone_number: Option<Phone>,

    /// Number of family members living in this [`Unit`].
    #[serde(default)]
    pub family_members: FamilyMembers,

    /// Date this [`Unit`] was handed over to its owner (BAST).
    ///
    /// Absent until the handover happens. A present date opens the fixed
    /// [`Unit::WARRANTY_DAYS`] warranty window.
    #[serde(default)]
    pub bast_date: Option<HandoverDate>,
}

impl Unit {
    /// Length of the warranty window opened by a handover, in days.
    pub const WARRANTY_DAYS: i64 = 90;

    /// Returns the [`Warranty`] state of this [`Unit`] as of `today`.
    #[must_use]
    pub fn warranty(&self, today: Date) -> Warranty {
        let Some(bast) = self.bast_date else {
            return Warranty::NotHandedOver;
        };

        let days = today.days_since(bast);
        if days <= Self::WARRANTY_DAYS {
            Warranty::Active {
                days_left: Self::WARRANTY_DAYS - days,
            }
        } else {
            Warranty::Expired
        }
    }
}

impl Record for Unit {
    const COLLECTION: Collection = Collection::Units;
    const PLACEMENT: Placement = Placement::Front;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn conflicts(&self, existing: &[Self]) -> Option<Violation> {
        existing
            .iter()
            .filter(|u| u.id != self.id)
            .any(|u| {
                u.cluster == self.cluster
                    && u.block == self.block
                    && u.number == self.number
            })
            .then(|| Violation::DuplicateAddress {
                block: self.block.clone(),
                number: self.number.clone(),
            })
    }
}

define_id! {
    #[doc = "ID of a [`Unit`]."]
    pub struct Id;
}

define_text! {
    #[doc = "Block code of a [`Unit`] inside its cluster."]
    pub struct Block(max = 16);
}

define_text! {
    #[doc = "House number of a [`Unit`] inside its block."]
    pub struct HouseNumber(max = 16);
}

define_text! {
    #[doc = "House type label of a [`Unit`], matching a [`HouseType`] name."]
    pub struct Kind(max = 64);
}

define_text! {
    #[doc = "Name of a [`Unit`]'s owner."]
    pub struct OwnerName(max = 128);
}

/// Land area of a [`Unit`], in square meters.
pub type LandArea = u32;

/// Number of family members living in a [`Unit`].
pub type FamilyMembers = u32;

define_kind! {
    #[doc = "Occupancy of a [`Unit`]."]
    #[rename = "PascalCase"]
    enum Residency {
        #[doc = "Occupied by its owner."]
        Pemilik,

        #[doc = "Occupied by a tenant."]
        Penyewa,

        #[doc = "Vacant."]
        Kosong,
    }
}

/// [`Date`] a [`Unit`] was handed over to its owner.
pub type HandoverDate = DateOf<(Unit, marker::Handover)>;

/// Warranty state of a [`Unit`], derived from its handover date.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Warranty {
    /// The [`Unit`] hasn't been handed over, so no warranty window exists.
    NotHandedOver,

    /// The warranty window is open.
    Active {
        /// Days of warranty remaining.
        days_left: i64,
    },

    /// The warranty window has closed.
    Expired,
}

/// Fallback [`OwnerName`] for units without a registered owner.
fn unknown_owner() -> OwnerName {
    OwnerName::new("-")
        .unwrap_or_else(|| unreachable!("`-` is a valid `OwnerName`"))
}

/// Fallback [`Residency`] for units without a registered one.
fn vacant() -> Residency {
    Residency::Kosong
}

/// Deserializes a [`Phone`], treating malformed values as absent.
///
/// Remote rows historically carry `-` placeholders instead of `NULL`s.
fn lenient_phone<'de, D>(deserializer: D) -> Result<Option<Phone>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.and_then(Phone::new))
}
