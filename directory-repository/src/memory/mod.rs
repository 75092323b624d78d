//! In-memory implementation of the directory repository.
//!
//! Records are kept in insertion order and are not validated on insert, so a store can
//! hold dangling building references or cyclic activity chains. The joined finders
//! report a dangling building as `DirectoryRepositoryError::DanglingReference`.
use async_trait::async_trait;
use directory_shared::types::{
    Activity, ActivityId, BoundingBox, Building, BuildingId, Organization, OrganizationId,
    OrganizationWithBuilding,
};

use crate::{DirectoryRepository, DirectoryRepositoryError};

#[derive(Debug, Default, Clone)]
pub struct InMemoryDirectoryRepository {
    activities: Vec<Activity>,
    buildings: Vec<Building>,
    organizations: Vec<Organization>,
    phones: Vec<(OrganizationId, String)>,
    activity_links: Vec<(OrganizationId, ActivityId)>,
}

impl InMemoryDirectoryRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_activity(&mut self, activity: Activity) -> &mut Self {
        self.activities.push(activity);
        self
    }

    pub fn insert_building(&mut self, building: Building) -> &mut Self {
        self.buildings.push(building);
        self
    }

    pub fn insert_organization(&mut self, organization: Organization) -> &mut Self {
        self.organizations.push(organization);
        self
    }

    pub fn insert_phone(
        &mut self,
        organization_id: OrganizationId,
        phone: impl Into<String>,
    ) -> &mut Self {
        self.phones.push((organization_id, phone.into()));
        self
    }

    pub fn link_activity(
        &mut self,
        organization_id: OrganizationId,
        activity_id: ActivityId,
    ) -> &mut Self {
        self.activity_links.push((organization_id, activity_id));
        self
    }

    fn building(&self, id: BuildingId) -> Option<&Building> {
        self.buildings.iter().find(|b| b.id == id)
    }

    fn with_building(
        &self,
        organization: &Organization,
    ) -> Result<OrganizationWithBuilding, DirectoryRepositoryError> {
        let building = self.building(organization.building_id).ok_or_else(|| {
            DirectoryRepositoryError::dangling(
                "organization",
                organization.id,
                "building",
                organization.building_id,
            )
        })?;

        Ok(OrganizationWithBuilding {
            id: organization.id,
            name: organization.name.clone(),
            building_id: organization.building_id,
            building: building.clone(),
        })
    }
}

#[async_trait]
impl DirectoryRepository for InMemoryDirectoryRepository {
    async fn find_activity_children(
        &self,
        parent_id: ActivityId,
    ) -> Result<Vec<Activity>, DirectoryRepositoryError> {
        Ok(self
            .activities
            .iter()
            .filter(|a| a.parent_id == Some(parent_id))
            .cloned()
            .collect())
    }

    async fn find_all_activities(&self) -> Result<Vec<Activity>, DirectoryRepositoryError> {
        Ok(self.activities.clone())
    }

    async fn find_organizations_by_building(
        &self,
        building_id: BuildingId,
    ) -> Result<Vec<OrganizationWithBuilding>, DirectoryRepositoryError> {
        self.organizations
            .iter()
            .filter(|o| o.building_id == building_id)
            .map(|o| self.with_building(o))
            .collect()
    }

    async fn find_organizations_by_activity_ids(
        &self,
        activity_ids: &[ActivityId],
    ) -> Result<Vec<Organization>, DirectoryRepositoryError> {
        Ok(self
            .organizations
            .iter()
            .filter(|o| {
                self.activity_links
                    .iter()
                    .any(|(org_id, activity_id)| *org_id == o.id && activity_ids.contains(activity_id))
            })
            .cloned()
            .collect())
    }

    async fn find_organizations_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<OrganizationWithBuilding>, DirectoryRepositoryError> {
        let mut found = Vec::new();
        for organization in &self.organizations {
            let annotated = self.with_building(organization)?;
            let building = &annotated.building;
            if building.latitude >= bounds.lat_min
                && building.latitude <= bounds.lat_max
                && building.longitude >= bounds.lon_min
                && building.longitude <= bounds.lon_max
            {
                found.push(annotated);
            }
        }
        Ok(found)
    }

    async fn find_organizations_by_name_substring(
        &self,
        fragment: &str,
    ) -> Result<Vec<Organization>, DirectoryRepositoryError> {
        let needle = fragment.to_lowercase();
        Ok(self
            .organizations
            .iter()
            .filter(|o| o.name.to_lowercase().contains(&needle))
            .cloned()
            .collect())
    }

    async fn find_organization_by_id(
        &self,
        id: OrganizationId,
    ) -> Result<Option<Organization>, DirectoryRepositoryError> {
        Ok(self.organizations.iter().find(|o| o.id == id).cloned())
    }

    async fn find_phones_by_organization(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<String>, DirectoryRepositoryError> {
        Ok(self
            .phones
            .iter()
            .filter(|(org_id, _)| *org_id == id)
            .map(|(_, phone)| phone.clone())
            .collect())
    }

    async fn find_activities_by_organization(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<Activity>, DirectoryRepositoryError> {
        self.activity_links
            .iter()
            .filter(|(org_id, _)| *org_id == id)
            .map(|(_, activity_id)| {
                self.activities
                    .iter()
                    .find(|a| a.id == *activity_id)
                    .cloned()
                    .ok_or_else(|| {
                        DirectoryRepositoryError::dangling("organization", id, "activity", *activity_id)
                    })
            })
            .collect()
    }

    async fn find_building_by_id(
        &self,
        id: BuildingId,
    ) -> Result<Option<Building>, DirectoryRepositoryError> {
        Ok(self.building(id).cloned())
    }

    async fn find_all_buildings(&self) -> Result<Vec<Building>, DirectoryRepositoryError> {
        Ok(self.buildings.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn activity(id: ActivityId, parent_id: Option<ActivityId>, level: i32) -> Activity {
        Activity {
            id,
            name: format!("activity-{id}"),
            parent_id,
            level,
        }
    }

    fn building(id: BuildingId, latitude: f64, longitude: f64) -> Building {
        Building {
            id,
            address: format!("building-{id}"),
            latitude,
            longitude,
        }
    }

    fn organization(id: OrganizationId, name: &str, building_id: BuildingId) -> Organization {
        Organization {
            id,
            name: name.to_string(),
            building_id,
        }
    }

    fn sample_store() -> InMemoryDirectoryRepository {
        let mut store = InMemoryDirectoryRepository::new();
        store
            .insert_activity(activity(1, None, 1))
            .insert_activity(activity(2, Some(1), 2))
            .insert_activity(activity(3, Some(1), 2))
            .insert_building(building(1, 55.0, 37.0))
            .insert_building(building(2, 55.0, 82.0))
            .insert_organization(organization(1, "ООО \"Рога и Копыта\"", 2))
            .insert_organization(organization(2, "ООО \"Молочный завод\"", 1))
            .insert_phone(1, "79932992939")
            .insert_phone(1, "79991234567")
            .insert_phone(1, "79991234567")
            .link_activity(1, 2)
            .link_activity(1, 3)
            .link_activity(2, 3);
        store
    }

    #[tokio::test]
    async fn test_find_activity_children() {
        let store = sample_store();

        let children = store.find_activity_children(1).await.unwrap();
        let ids: Vec<_> = children.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);

        assert!(store.find_activity_children(2).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_find_organizations_by_activity_ids_is_deduplicated() {
        let store = sample_store();

        let organizations = store
            .find_organizations_by_activity_ids(&[2, 3])
            .await
            .unwrap();

        let ids: Vec<_> = organizations.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[tokio::test]
    async fn test_find_organizations_by_building_annotates_building() {
        let store = sample_store();

        let organizations = store.find_organizations_by_building(2).await.unwrap();

        assert_eq!(organizations.len(), 1);
        assert_eq!(organizations[0].id, 1);
        assert_eq!(organizations[0].building.longitude, 82.0);
    }

    #[tokio::test]
    async fn test_dangling_building_is_reported() {
        let mut store = sample_store();
        store.insert_organization(organization(9, "Orphan", 42));

        let err = store.find_organizations_by_building(42).await.unwrap_err();

        assert!(err.is_integrity_violation());
        assert!(matches!(
            err,
            DirectoryRepositoryError::DanglingReference {
                id: 9,
                target_id: 42,
                ..
            }
        ));
    }

    #[tokio::test]
    async fn test_dangling_activity_link_is_reported() {
        let mut store = sample_store();
        store.link_activity(2, 77);

        let err = store.find_activities_by_organization(2).await.unwrap_err();

        assert!(err.is_integrity_violation());
        assert!(matches!(
            err,
            DirectoryRepositoryError::DanglingReference {
                target: "activity",
                id: 2,
                target_id: 77,
                ..
            }
        ));

        let linked = store.find_activities_by_organization(1).await.unwrap();
        let ids: Vec<_> = linked.iter().map(|a| a.id).collect();
        assert_eq!(ids, vec![2, 3]);
    }

    #[tokio::test]
    async fn test_find_organizations_in_bounds_is_inclusive() {
        let store = sample_store();
        let bounds = BoundingBox::new(55.0, 55.0, 37.0, 37.0);

        let organizations = store.find_organizations_in_bounds(&bounds).await.unwrap();

        let ids: Vec<_> = organizations.iter().map(|o| o.id).collect();
        assert_eq!(ids, vec![2]);
    }

    #[tokio::test]
    async fn test_name_search_ignores_case() {
        let store = sample_store();

        let found = store
            .find_organizations_by_name_substring("РОГА")
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, 1);

        let all = store.find_organizations_by_name_substring("").await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_phones_keep_duplicates() {
        let store = sample_store();

        let phones = store.find_phones_by_organization(1).await.unwrap();

        assert_eq!(phones, vec!["79932992939", "79991234567", "79991234567"]);
    }

    #[tokio::test]
    async fn test_activities_by_organization_are_direct_links() {
        let store = sample_store();

        let activities = store.find_activities_by_organization(2).await.unwrap();

        assert_eq!(activities.len(), 1);
        assert_eq!(activities[0].id, 3);
    }
}
