//! Row shapes returned by the directory queries and their conversions into shared types.
use directory_shared::types::{Activity, Building, Organization, OrganizationWithBuilding};

#[derive(sqlx::FromRow)]
pub(crate) struct ActivityRow {
    id: i32,
    name: String,
    parent_id: Option<i32>,
    level: i32,
}

impl From<ActivityRow> for Activity {
    fn from(row: ActivityRow) -> Self {
        Activity {
            id: row.id,
            name: row.name,
            parent_id: row.parent_id,
            level: row.level,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct BuildingRow {
    id: i32,
    address: String,
    latitude: f64,
    longitude: f64,
}

impl From<BuildingRow> for Building {
    fn from(row: BuildingRow) -> Self {
        Building {
            id: row.id,
            address: row.address,
            latitude: row.latitude,
            longitude: row.longitude,
        }
    }
}

#[derive(sqlx::FromRow)]
pub(crate) struct OrganizationRow {
    id: i32,
    name: String,
    building_id: i32,
}

impl From<OrganizationRow> for Organization {
    fn from(row: OrganizationRow) -> Self {
        Organization {
            id: row.id,
            name: row.name,
            building_id: row.building_id,
        }
    }
}

/// An activity link left-joined with the activity it names; the activity columns are
/// null when the link dangles.
#[derive(sqlx::FromRow)]
pub(crate) struct LinkedActivityRow {
    pub(crate) link_activity_id: i32,
    id: Option<i32>,
    name: Option<String>,
    parent_id: Option<i32>,
    level: Option<i32>,
}

impl LinkedActivityRow {
    /// The linked activity, or `None` if the link points at no activity row.
    pub(crate) fn into_activity(self) -> Option<Activity> {
        Some(Activity {
            id: self.id?,
            name: self.name?,
            parent_id: self.parent_id,
            level: self.level?,
        })
    }
}

/// An organization joined with its building, building columns prefixed with `building_`.
#[derive(sqlx::FromRow)]
pub(crate) struct OrganizationWithBuildingRow {
    id: i32,
    name: String,
    building_id: i32,
    building_address: String,
    building_latitude: f64,
    building_longitude: f64,
}

impl From<OrganizationWithBuildingRow> for OrganizationWithBuilding {
    fn from(row: OrganizationWithBuildingRow) -> Self {
        OrganizationWithBuilding {
            id: row.id,
            name: row.name,
            building_id: row.building_id,
            building: Building {
                id: row.building_id,
                address: row.building_address,
                latitude: row.building_latitude,
                longitude: row.building_longitude,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_linked_activity_row_with_activity() {
        let row = LinkedActivityRow {
            link_activity_id: 2,
            id: Some(2),
            name: Some("Мясная продукция".to_string()),
            parent_id: Some(1),
            level: Some(2),
        };

        let activity = row.into_activity().unwrap();

        assert_eq!(activity.id, 2);
        assert_eq!(activity.parent_id, Some(1));
    }

    #[test]
    fn test_dangling_link_row_has_no_activity() {
        let row = LinkedActivityRow {
            link_activity_id: 77,
            id: None,
            name: None,
            parent_id: None,
            level: None,
        };

        assert!(row.into_activity().is_none());
    }
}
