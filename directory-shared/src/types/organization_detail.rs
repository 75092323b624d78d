use serde::{Deserialize, Serialize};

use crate::types::{Activity, Building, OrganizationId};

/// The denormalized view of a single organization.
///
/// `activities` holds only the activities linked directly to the organization; it is
/// never expanded to ancestors or descendants. `phones` keeps duplicate entries.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrganizationDetail {
    pub id: OrganizationId,
    pub name: String,
    pub phones: Vec<String>,
    pub building: Building,
    pub activities: Vec<Activity>,
}
