//! [`HouseType`] definitions.

use common::{define_id, define_text};
use serde::{Deserialize, Serialize};

use super::{Collection, Placement, Record};

/// Catalogue entry of a house layout sold in the estate, e.g. `36/60`.
#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct HouseType {
    /// ID of this [`HouseType`].
    pub id: Id,

    /// Name of this [`HouseType`], conventionally
    /// `building area/land area`.
    pub name: Name,

    /// Free-form description, if any.
    #[serde(default)]
    pub description: Option<Description>,
}

impl Record for HouseType {
    const COLLECTION: Collection = Collection::HouseTypes;
    const PLACEMENT: Placement = Placement::Front;

    type Id = Id;

    fn id(&self) -> &Self::Id {
        &self.id
    }
}

define_id! {
    #[doc = "ID of a [`HouseType`]."]
    pub struct Id;
}

define_text! {
    #[doc = "Name of a [`HouseType`]."]
    pub struct Name(max = 64);
}

define_text! {
    #[doc = "Description of a [`HouseType`]."]
    pub struct Description(max = 1024);
}
