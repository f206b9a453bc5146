//! [`User`] definitions.

use common::{define_id, define_kind, define_text, marker, DateOf};
use serde::{Deserialize, Serialize};

use super::{cluster, Collection, Record};
#[cfg(doc)]
use super::{Cluster, Unit};

/// Portal user, backed by the remote `profiles` table.
///
/// The identifier comes from the authentication service: the profile row
/// shares its id with the auth account it describes.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct User {
    /// ID of this [`User`].
    pub id: Id,

    /// [`Name`] of this [`User`].
    pub name: Name,

    /// [`Role`] of this [`User`].
    ///
    /// Changed only by an explicit admin edit, never as a side effect.
    #[serde(default = "resident")]
    pub role: Role,

    /// Name of the [`Cluster`] this [`User`] lives in or manages.
    #[serde(default = "unassigned_cluster")]
    pub cluster: cluster::Name,

    /// Label of the [`Unit`] this [`User`] occupies.
    #[serde(default = "unassigned_unit")]
    pub unit: UnitLabel,

    /// Date this [`User`]'s unit was handed over (BAST).
    #[serde(default = "HandoverDate::today")]
    pub bast_date: HandoverDate,
}

impl Record for User {
    const COLLECTION: Collection = Collection::Profiles;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

define_id! {
    #[doc = "ID of a [`User`], shared with its auth account."]
    pub struct Id;
}

define_text! {
    #[doc = "Name of a [`User`]."]
    pub struct Name(max = 128);
}

define_kind! {
    #[doc = "Role of a [`User`] within the portal."]
    #[rename = "SCREAMING_SNAKE_CASE"]
    enum Role {
        #[doc = "Estate-wide administrator."]
        SuperAdmin,

        #[doc = "Administrator of a single cluster."]
        AdminCluster,

        #[doc = "Maintenance technician."]
        Technician,

        #[doc = "Regular resident."]
        Resident,
    }
}

define_text! {
    #[doc = "Label of the [`Unit`] a [`User`] occupies."]
    pub struct UnitLabel(max = 64);
}

/// [`Date`] a [`User`]'s unit was handed over.
///
/// [`Date`]: common::Date
pub type HandoverDate = DateOf<(User, marker::Handover)>;

/// Fallback [`Role`] for profiles without one.
fn resident() -> Role {
    Role::Resident
}

/// Fallback cluster name for unassigned profiles.
fn unassigned_cluster() -> cluster::Name {
    cluster::Name::new("-")
        .unwrap_or_else(|| unreachable!("`-` is a valid cluster name"))
}

/// Fallback unit label for unassigned profiles.
fn unassigned_unit() -> UnitLabel {
    UnitLabel::new("-")
        .unwrap_or_else(|| unreachable!("`-` is a valid `UnitLabel`"))
}

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{Role, User};

    #[test]
    fn normalizes_missing_wire_fields() {
        let user = serde_json::from_value::<User>(json!({
            "id": "resident_01",
            "name": "Budi Santoso",
        }))
        .unwrap();

        assert_eq!(user.role, Role::Resident);
        assert_eq!(user.cluster, "-".parse().unwrap());
        assert_eq!(user.unit, "-".parse().unwrap());
    }

    #[test]
    fn roles_use_screaming_snake_case_on_the_wire() {
        let user = serde_json::from_value::<User>(json!({
            "id": "admin_ruby",
            "name": "Pak Hartono",
            "role": "ADMIN_CLUSTER",
            "cluster": "Cluster Ruby",
            "unit": "Kantor Pengelola",
            "bast_date": "2020-01-01",
        }))
        .unwrap();
        assert_eq!(user.role, Role::AdminCluster);

        let wire = serde_json::to_value(&user).unwrap();
        assert_eq!(wire["role"], "ADMIN_CLUSTER");
        assert_eq!(wire["bast_date"], "2020-01-01");
    }
}
