use serde::{Deserialize, Serialize};

use crate::types::{Building, BuildingId};

pub type OrganizationId = i32;

/// An organization as returned by list queries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Organization {
    pub id: OrganizationId,
    pub name: String,
    pub building_id: BuildingId,
}

/// An organization annotated with the building it references.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrganizationWithBuilding {
    pub id: OrganizationId,
    pub name: String,
    pub building_id: BuildingId,
    pub building: Building,
}

impl From<OrganizationWithBuilding> for Organization {
    fn from(value: OrganizationWithBuilding) -> Self {
        Self {
            id: value.id,
            name: value.name,
            building_id: value.building_id,
        }
    }
}
