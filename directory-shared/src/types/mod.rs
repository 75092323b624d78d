mod activity;
mod building;
mod geo;
mod organization;
mod organization_detail;

pub use activity::{Activity, ActivityId, MAX_ACTIVITY_LEVEL};
pub use building::{Building, BuildingId};
pub use geo::{BoundingBox, GeoPoint};
pub use organization::{Organization, OrganizationId, OrganizationWithBuilding};
pub use organization_detail::OrganizationDetail;
