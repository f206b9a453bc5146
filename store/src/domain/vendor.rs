//! [`Vendor`] definitions.

use common::{define_id, define_kind, define_text, marker, DateOf, Money};
use serde::{Deserialize, Serialize};

use super::{
    contact::{Email, Phone},
    Collection, Record, Violation,
};

/// Contracted service provider of the estate.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Vendor {
    /// ID of this [`Vendor`].
    pub id: Id,

    /// Legal name of this [`Vendor`].
    pub name: Name,

    /// Kind of [`Service`] this [`Vendor`] provides.
    pub service_type: Service,

    /// Name of the contact person at this [`Vendor`].
    pub contact_person: ContactPerson,

    /// [`Phone`] number of the contact person.
    pub phone: Phone,

    /// [`Email`] address of this [`Vendor`].
    pub email: Email,

    /// Contract [`Status`] of this [`Vendor`].
    pub status: Status,

    /// [`Date`] the current contract starts on.
    ///
    /// [`Date`]: common::Date
    pub contract_start: StartDate,

    /// [`Date`] the current contract ends on.
    ///
    /// [`Date`]: common::Date
    pub contract_end: EndDate,

    /// Monthly cost of the contract.
    ///
    /// Zero for dormant contracts billed per work order.
    pub monthly_cost: Money,
}

impl Record for Vendor {
    const COLLECTION: Collection = Collection::Vendors;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn validate(&self) -> Result<(), Violation> {
        (self.contract_end.days_since(self.contract_start) >= 0)
            .then_some(())
            .ok_or(Violation::ContractEndsBeforeStart)
    }
}

define_id! {
    #[doc = "ID of a [`Vendor`]."]
    pub struct Id;
}

define_text! {
    #[doc = "Legal name of a [`Vendor`]."]
    pub struct Name(max = 128);
}

define_text! {
    #[doc = "Name of a contact person at a [`Vendor`]."]
    pub struct ContactPerson(max = 128);
}

define_kind! {
    #[doc = "Kind of service a [`Vendor`] provides."]
    #[rename = "PascalCase"]
    enum Service {
        #[doc = "Guarding and patrols."]
        Security,

        #[doc = "Cleaning and waste collection."]
        Kebersihan,

        #[doc = "Civil works."]
        Konstruksi,

        #[doc = "Internet connectivity."]
        Internet,

        #[doc = "Anything else."]
        Lainnya,
    }
}

define_kind! {
    #[doc = "Contract status of a [`Vendor`]."]
    #[rename = "PascalCase"]
    enum Status {
        #[doc = "Contract is running."]
        Active,

        #[doc = "Contract is suspended or has expired."]
        Inactive,
    }
}

/// [`Date`] a [`Vendor`]'s contract starts on.
///
/// [`Date`]: common::Date
pub type StartDate = DateOf<(Vendor, marker::Start)>;

/// [`Date`] a [`Vendor`]'s contract ends on.
///
/// [`Date`]: common::Date
pub type EndDate = DateOf<(Vendor, marker::End)>;
