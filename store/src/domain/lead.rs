//! [`Lead`] definitions.

use common::{define_id, define_kind, define_text, marker, DateOf};
use serde::{Deserialize, Serialize};

use super::{contact::Phone, Collection, Placement, Record};
#[cfg(doc)]
use super::HouseType;

/// Prospective buyer tracked through the sales pipeline.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Lead {
    /// ID of this [`Lead`].
    pub id: Id,

    /// Name of the prospective buyer.
    pub name: Name,

    /// [`Phone`] number of the prospective buyer.
    pub phone: Phone,

    /// [`HouseType`] (or free-form unit description) the buyer is
    /// interested in.
    pub interest: Interest,

    /// Financing plan, e.g. `Cash Bertahap` or `KPR Bank BTN`.
    pub budget: Budget,

    /// Marketing channel this [`Lead`] came from.
    pub source: Source,

    /// Pipeline [`Status`] of this [`Lead`].
    ///
    /// A plain Kanban column moved by the sales team at will, with no
    /// enforced transition order.
    pub status: Status,

    /// Free-form notes left by the sales team.
    pub notes: Notes,

    /// Name of the sales agent this [`Lead`] is assigned to.
    pub assigned_agent: AgentName,

    /// [`Date`] this [`Lead`] was captured.
    ///
    /// [`Date`]: common::Date
    pub created_at: CreationDate,
}

impl Record for Lead {
    const COLLECTION: Collection = Collection::Leads;
    const PLACEMENT: Placement = Placement::Front;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

define_id! {
    #[doc = "ID of a [`Lead`]."]
    pub struct Id;
}

define_text! {
    #[doc = "Name of a prospective buyer."]
    pub struct Name(max = 128);
}

define_text! {
    #[doc = "Unit description a [`Lead`] is interested in."]
    pub struct Interest(max = 128);
}

define_text! {
    #[doc = "Financing plan of a [`Lead`]."]
    pub struct Budget(max = 64);
}

define_text! {
    #[doc = "Marketing channel a [`Lead`] came from."]
    pub struct Source(max = 64);
}

define_text! {
    #[doc = "Free-form notes on a [`Lead`]."]
    pub struct Notes(max = 1024);
}

define_text! {
    #[doc = "Name of a sales agent."]
    pub struct AgentName(max = 128);
}

define_kind! {
    #[doc = "Pipeline status of a [`Lead`]."]
    #[rename = "PascalCase"]
    enum Status {
        #[doc = "Fresh, not contacted yet."]
        Baru,

        #[doc = "Contacted and interested."]
        Prospek,

        #[doc = "Scheduled or completed a site visit."]
        #[rename = "Survey Lokasi"]
        SurveyLokasi,

        #[doc = "Paid the booking fee."]
        #[rename = "Booking Fee"]
        BookingFee,

        #[doc = "Deal closed and signed."]
        #[rename = "Terjual/Akad"]
        TerjualAkad,

        #[doc = "Lost."]
        Batal,
    }
}

/// [`Date`] a [`Lead`] was captured.
///
/// [`Date`]: common::Date
pub type CreationDate = DateOf<(Lead, marker::Creation)>;

#[cfg(test)]
mod spec {
    use serde_json::json;

    use super::{Lead, Status};

    #[test]
    fn irregular_status_labels_survive_round_trip() {
        for (status, label) in [
            (Status::Baru, "Baru"),
            (Status::SurveyLokasi, "Survey Lokasi"),
            (Status::BookingFee, "Booking Fee"),
            (Status::TerjualAkad, "Terjual/Akad"),
        ] {
            assert_eq!(status.to_string(), label);
            assert_eq!(label.parse::<Status>().unwrap(), status);
            assert_eq!(serde_json::to_value(status).unwrap(), label);
        }
    }

    #[test]
    fn wire_round_trip_keeps_all_fields() {
        let lead = serde_json::from_value::<Lead>(json!({
            "id": "l2",
            "name": "Ibu Angelina",
            "phone": "0813-5555-1234",
            "interest": "Cluster Sapphire - Hook",
            "budget": "KPR Bank BTN",
            "source": "Walk-in",
            "status": "Survey Lokasi",
            "notes": "Sudah lihat lokasi, minta hitungan simulasi KPR",
            "assigned_agent": "Sales Budi",
            "created_at": "2023-11-28",
        }))
        .unwrap();

        assert_eq!(lead.status, Status::SurveyLokasi);

        let wire = serde_json::to_value(&lead).unwrap();
        assert_eq!(wire["status"], "Survey Lokasi");
        assert_eq!(wire["assigned_agent"], "Sales Budi");
        assert_eq!(wire["phone"], "0813-5555-1234");
    }
}
