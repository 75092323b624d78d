//! Directory query service implementation.
//!
//! This module provides the façade application code uses to query the directory. It
//! combines the activity tree resolver, the geo predicates and the organization
//! aggregator over a single `DirectoryRepository`.

use std::sync::Arc;

use directory_repository::DirectoryRepository;
use directory_shared::types::{
    ActivityId, Building, BuildingId, Organization, OrganizationDetail, OrganizationId,
    OrganizationWithBuilding,
};
use tracing::debug;

use crate::activity_tree::ActivityTreeResolver;
use crate::aggregator::OrganizationAggregator;
use crate::config::DirectoryServiceConfig;
use crate::errors::DirectoryError;
use crate::geo::GeoPredicate;

/// The main service for querying the directory.
///
/// Every list operation returns an empty vector when nothing matches. `get_detail` is
/// the only operation with an explicit not-found outcome (`Ok(None)`).
///
/// The service holds no mutable state, so one instance can serve any number of
/// concurrent queries.
///
/// # Example
///
/// ```no_run
/// use std::sync::Arc;
/// use directory_query::DirectoryQueryService;
/// use directory_repository::PostgresDirectoryRepository;
///
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let pool = sqlx::PgPool::connect("postgres://localhost/directory").await?;
/// let repository = PostgresDirectoryRepository::new(pool).await?;
/// let service = DirectoryQueryService::new(Arc::new(repository));
///
/// let food_sellers = service.list_by_activity(1).await?;
/// let nearby = service.list_by_radius(55.75, 37.61, 1000.0).await?;
/// # Ok(())
/// # }
/// ```
pub struct DirectoryQueryService {
    repository: Arc<dyn DirectoryRepository>,
    resolver: ActivityTreeResolver,
    aggregator: OrganizationAggregator,
    config: DirectoryServiceConfig,
}

impl DirectoryQueryService {
    /// Create a new DirectoryQueryService with default configuration.
    pub fn new(repository: Arc<dyn DirectoryRepository>) -> Self {
        Self::with_config(repository, DirectoryServiceConfig::default())
    }

    /// Create a new DirectoryQueryService with custom configuration.
    ///
    /// # Arguments
    ///
    /// * `repository` - The data store to read from (e.g., `PostgresDirectoryRepository`)
    /// * `config` - Configuration for the service
    pub fn with_config(
        repository: Arc<dyn DirectoryRepository>,
        config: DirectoryServiceConfig,
    ) -> Self {
        Self {
            resolver: ActivityTreeResolver::new(repository.clone(), config.subtree_strategy),
            aggregator: OrganizationAggregator::new(repository.clone()),
            repository,
            config,
        }
    }

    pub fn config(&self) -> &DirectoryServiceConfig {
        &self.config
    }

    /// List the organizations housed in a building, each annotated with the building.
    pub async fn list_by_building(
        &self,
        building_id: BuildingId,
    ) -> Result<Vec<OrganizationWithBuilding>, DirectoryError> {
        let organizations = self
            .repository
            .find_organizations_by_building(building_id)
            .await?;

        debug!(building_id, count = organizations.len(), "Listed organizations by building");
        Ok(organizations)
    }

    /// List the organizations linked to an activity or to any of its descendants.
    ///
    /// Each organization appears once, however many activities of the subtree it is
    /// linked to.
    pub async fn list_by_activity(
        &self,
        activity_id: ActivityId,
    ) -> Result<Vec<Organization>, DirectoryError> {
        let subtree: Vec<ActivityId> = self
            .resolver
            .resolve_subtree(activity_id)
            .await?
            .into_iter()
            .collect();

        let organizations = self
            .repository
            .find_organizations_by_activity_ids(&subtree)
            .await?;

        debug!(
            activity_id,
            subtree_size = subtree.len(),
            count = organizations.len(),
            "Listed organizations by activity"
        );
        Ok(organizations)
    }

    /// List the organizations whose building lies within `radius_meters` of a point.
    ///
    /// Distance is the planar approximation described in [`crate::geo`].
    pub async fn list_by_radius(
        &self,
        latitude: f64,
        longitude: f64,
        radius_meters: f64,
    ) -> Result<Vec<Organization>, DirectoryError> {
        self.list_by_predicate(GeoPredicate::radius(latitude, longitude, radius_meters))
            .await
    }

    /// List the organizations whose building lies inside a latitude/longitude box,
    /// inclusive on every edge.
    pub async fn list_by_rectangle(
        &self,
        lat_min: f64,
        lat_max: f64,
        lon_min: f64,
        lon_max: f64,
    ) -> Result<Vec<Organization>, DirectoryError> {
        self.list_by_predicate(GeoPredicate::rectangle(lat_min, lat_max, lon_min, lon_max))
            .await
    }

    /// List the organizations whose building satisfies `predicate`.
    ///
    /// The store narrows candidates with the predicate's bounding box; the exact check
    /// is made here.
    pub async fn list_by_predicate(
        &self,
        predicate: GeoPredicate,
    ) -> Result<Vec<Organization>, DirectoryError> {
        let candidates = self
            .repository
            .find_organizations_in_bounds(&predicate.prefilter_bounds())
            .await?;
        let candidate_count = candidates.len();

        let organizations: Vec<Organization> = candidates
            .into_iter()
            .filter(|o| predicate.matches(&o.building))
            .map(Organization::from)
            .collect();

        debug!(
            predicate = ?predicate,
            candidates = candidate_count,
            count = organizations.len(),
            "Listed organizations by location"
        );
        Ok(organizations)
    }

    /// Search organizations by name, ignoring case. An empty name matches everything.
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<Organization>, DirectoryError> {
        let organizations = self
            .repository
            .find_organizations_by_name_substring(name)
            .await?;

        debug!(name, count = organizations.len(), "Searched organizations by name");
        Ok(organizations)
    }

    /// Fetch the detail record of one organization; `Ok(None)` if it does not exist.
    pub async fn get_detail(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<OrganizationDetail>, DirectoryError> {
        self.aggregator.get_detail(organization_id).await
    }

    /// List every building.
    pub async fn list_buildings(&self) -> Result<Vec<Building>, DirectoryError> {
        Ok(self.repository.find_all_buildings().await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::SubtreeStrategy;
    use directory_repository::InMemoryDirectoryRepository;
    use directory_shared::types::Activity;

    fn organization(id: OrganizationId, name: &str, building_id: BuildingId) -> Organization {
        Organization {
            id,
            name: name.to_string(),
            building_id,
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

    fn store() -> InMemoryDirectoryRepository {
        let mut store = InMemoryDirectoryRepository::new();
        store
            .insert_activity(Activity {
                id: 1,
                name: "Автомобили".to_string(),
                parent_id: None,
                level: 1,
            })
            .insert_activity(Activity {
                id: 2,
                name: "Легковые".to_string(),
                parent_id: Some(1),
                level: 2,
            })
            .insert_activity(Activity {
                id: 3,
                name: "Запчасти".to_string(),
                parent_id: Some(2),
                level: 3,
            })
            .insert_activity(Activity {
                id: 4,
                name: "Аксессуары".to_string(),
                parent_id: Some(2),
                level: 3,
            })
            .insert_building(building(1, 0.0, 0.0))
            .insert_building(building(2, 0.0, 0.01))
            .insert_organization(organization(1, "АвтоТрейд", 1))
            .insert_organization(organization(2, "Parts & Co", 2))
            .link_activity(1, 3)
            .link_activity(1, 4)
            .link_activity(2, 4);
        store
    }

    fn service(strategy: SubtreeStrategy) -> DirectoryQueryService {
        DirectoryQueryService::with_config(
            Arc::new(store()),
            DirectoryServiceConfig::with_subtree_strategy(strategy),
        )
    }

    fn ids(organizations: &[Organization]) -> Vec<OrganizationId> {
        organizations.iter().map(|o| o.id).collect()
    }

    #[tokio::test]
    async fn test_list_by_activity_expands_descendants() {
        for strategy in [SubtreeStrategy::PerLevel, SubtreeStrategy::Indexed] {
            let service = service(strategy);

            let from_root = service.list_by_activity(1).await.unwrap();
            assert_eq!(ids(&from_root), vec![1, 2]);

            let from_leaf = service.list_by_activity(3).await.unwrap();
            assert_eq!(ids(&from_leaf), vec![1]);
        }
    }

    #[tokio::test]
    async fn test_list_by_activity_unknown_id_is_empty() {
        let service = service(SubtreeStrategy::PerLevel);

        assert!(service.list_by_activity(999).await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_radius_applies_exact_distance() {
        let service = service(SubtreeStrategy::PerLevel);

        // Building 2 is 0.01° east, i.e. 1110 m away.
        let near = service.list_by_radius(0.0, 0.0, 1000.0).await.unwrap();
        assert_eq!(ids(&near), vec![1]);

        let wider = service.list_by_radius(0.0, 0.0, 1200.0).await.unwrap();
        assert_eq!(ids(&wider), vec![1, 2]);

        let diagonal = service.list_by_radius(0.01, 0.01, 1111.0).await.unwrap();
        assert_eq!(ids(&diagonal), vec![2]);
    }

    #[tokio::test]
    async fn test_list_by_rectangle_is_inclusive() {
        let service = service(SubtreeStrategy::PerLevel);

        let exact = service.list_by_rectangle(0.0, 0.0, 0.01, 0.01).await.unwrap();
        assert_eq!(ids(&exact), vec![2]);

        let inverted = service.list_by_rectangle(1.0, -1.0, -1.0, 1.0).await.unwrap();
        assert!(inverted.is_empty());
    }

    #[tokio::test]
    async fn test_search_by_name() {
        let service = service(SubtreeStrategy::PerLevel);

        assert_eq!(ids(&service.search_by_name("").await.unwrap()), vec![1, 2]);
        assert_eq!(ids(&service.search_by_name("автотрейд").await.unwrap()), vec![1]);
        assert!(service.search_by_name("missing").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_list_by_building_and_buildings() {
        let service = service(SubtreeStrategy::PerLevel);

        let in_building = service.list_by_building(2).await.unwrap();
        assert_eq!(in_building.len(), 1);
        assert_eq!(in_building[0].building.id, 2);

        assert!(service.list_by_building(404).await.unwrap().is_empty());
        assert_eq!(service.list_buildings().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_dangling_building_surfaces_as_integrity_violation() {
        let mut store = store();
        store.insert_organization(organization(3, "Без адреса", 99));
        let service = DirectoryQueryService::new(Arc::new(store));

        let by_radius = service.list_by_radius(0.0, 0.0, 1000.0).await.unwrap_err();
        assert!(by_radius.is_integrity_violation());
        assert!(matches!(by_radius, DirectoryError::Repository(_)));

        let by_rectangle = service
            .list_by_rectangle(-1.0, 1.0, -1.0, 1.0)
            .await
            .unwrap_err();
        assert!(by_rectangle.is_integrity_violation());

        let by_building = service.list_by_building(99).await.unwrap_err();
        assert!(by_building.is_integrity_violation());

        // Queries that never join the building are unaffected.
        assert_eq!(ids(&service.search_by_name("").await.unwrap()), vec![1, 2, 3]);
    }

    #[tokio::test]
    async fn test_get_detail_delegates_to_aggregator() {
        let service = service(SubtreeStrategy::PerLevel);

        let detail = service.get_detail(2).await.unwrap().unwrap();
        assert_eq!(detail.building.id, 2);
        assert_eq!(detail.activities.len(), 1);
        assert_eq!(detail.activities[0].id, 4);

        assert!(service.get_detail(404).await.unwrap().is_none());
    }
}
