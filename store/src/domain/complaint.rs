//! [`Complaint`] definitions.

use common::{define_id, define_kind, define_text, marker, DateOf};
use serde::{Deserialize, Serialize};

use super::{user, Collection, Placement, Record, Violation};
#[cfg(doc)]
use super::{Unit, User};

/// Resident complaint ticket.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct Complaint {
    /// ID of this [`Complaint`].
    pub id: Id,

    /// ID of the [`User`] who filed this [`Complaint`].
    pub user_id: user::Id,

    /// [`Category`] of this [`Complaint`].
    pub category: Category,

    /// Free-form sub-category, e.g. `Atap Bocor`.
    #[serde(default)]
    pub sub_category: Option<SubCategory>,

    /// Description of the reported problem.
    pub description: Description,

    /// URL of an attached photo, if any.
    #[serde(default)]
    pub photo_url: Option<PhotoUrl>,

    /// Progress [`Status`] of this [`Complaint`].
    pub status: Status,

    /// Whether this [`Complaint`] falls under the [`Unit`]'s warranty.
    #[serde(default)]
    pub is_warranty: bool,

    /// [`Date`] this [`Complaint`] was filed.
    ///
    /// [`Date`]: common::Date
    pub created_at: CreationDate,

    /// Number of residents who upvoted this [`Complaint`].
    #[serde(default)]
    pub upvotes: Upvotes,
}

impl Record for Complaint {
    const COLLECTION: Collection = Collection::Complaints;
    const PLACEMENT: Placement = Placement::Front;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }

    fn conflicts(&self, existing: &[Self]) -> Option<Violation> {
        let current = existing.iter().find(|c| c.id == self.id)?;
        (current.status != self.status
            && !current.status.allows(self.status))
        .then_some(Violation::IllegalTransition {
            from: current.status,
            to: self.status,
        })
    }
}

define_id! {
    #[doc = "ID of a [`Complaint`]."]
    pub struct Id;
}

define_kind! {
    #[doc = "Category of a [`Complaint`]."]
    #[rename = "PascalCase"]
    enum Category {
        #[doc = "Warranty-period defect of the resident's own unit."]
        Retensi,

        #[doc = "Shared public facility problem."]
        Fasum,
    }
}

define_text! {
    #[doc = "Free-form sub-category of a [`Complaint`]."]
    pub struct SubCategory(max = 64);
}

define_text! {
    #[doc = "Description of a [`Complaint`]."]
    pub struct Description(max = 2048);
}

define_text! {
    #[doc = "URL of a photo attached to a [`Complaint`]."]
    pub struct PhotoUrl(max = 2048);
}

define_kind! {
    #[doc = "Progress status of a [`Complaint`]."]
    #[rename = "PascalCase"]
    enum Status {
        #[doc = "Filed, not picked up yet."]
        Pending,

        #[doc = "Being worked on."]
        Proses,

        #[doc = "Resolved."]
        Selesai,

        #[doc = "Rejected."]
        Ditolak,
    }
}

impl Status {
    /// Indicates whether a [`Complaint`] may move from this [`Status`] into
    /// the `next` one.
    ///
    /// The flow only moves forward, with rejection possible while pending:
    ///
    /// ```text
    /// Pending -> Proses -> Selesai
    /// Pending -> Ditolak
    /// ```
    #[must_use]
    pub fn allows(self, next: Self) -> bool {
        matches!(
            (self, next),
            (Self::Pending, Self::Proses | Self::Ditolak)
                | (Self::Proses, Self::Selesai)
        )
    }

    /// Indicates whether this [`Status`] admits no further transitions.
    #[must_use]
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Selesai | Self::Ditolak)
    }
}

/// [`Date`] a [`Complaint`] was filed.
///
/// [`Date`]: common::Date
pub type CreationDate = DateOf<(Complaint, marker::Creation)>;

/// Number of residents who upvoted a [`Complaint`].
pub type Upvotes = u32;
