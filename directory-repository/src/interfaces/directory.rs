//! This module defines the `DirectoryRepository` trait, the read-only boundary between
//! the directory query core and whatever store holds activities, buildings and
//! organizations.
use directory_shared::types::{
    Activity, ActivityId, BoundingBox, Building, BuildingId, Organization, OrganizationId,
    OrganizationWithBuilding,
};

use crate::errors::DirectoryRepositoryError;

/// A trait that defines the read interface of the directory data store.
///
/// Implementors never mutate the store. Every list method returns an empty vector
/// when nothing matches; only the `Option` returning lookups express absence.
#[async_trait::async_trait]
pub trait DirectoryRepository: Send + Sync {
    /// Returns the activities whose parent is `parent_id`.
    async fn find_activity_children(
        &self,
        parent_id: ActivityId,
    ) -> Result<Vec<Activity>, DirectoryRepositoryError>;

    /// Returns every activity in the store.
    async fn find_all_activities(&self) -> Result<Vec<Activity>, DirectoryRepositoryError>;

    /// Returns the organizations housed in `building_id`, each with its building.
    async fn find_organizations_by_building(
        &self,
        building_id: BuildingId,
    ) -> Result<Vec<OrganizationWithBuilding>, DirectoryRepositoryError>;

    /// Returns the organizations linked to any of `activity_ids`.
    ///
    /// Each organization appears once even when it is linked to several of the ids.
    async fn find_organizations_by_activity_ids(
        &self,
        activity_ids: &[ActivityId],
    ) -> Result<Vec<Organization>, DirectoryRepositoryError>;

    /// Returns the organizations whose building lies inside `bounds`, inclusive on
    /// every edge, each with its building.
    async fn find_organizations_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<OrganizationWithBuilding>, DirectoryRepositoryError>;

    /// Returns the organizations whose name contains `fragment`, ignoring case.
    ///
    /// `fragment` is matched literally; an empty fragment matches every organization.
    async fn find_organizations_by_name_substring(
        &self,
        fragment: &str,
    ) -> Result<Vec<Organization>, DirectoryRepositoryError>;

    async fn find_organization_by_id(
        &self,
        id: OrganizationId,
    ) -> Result<Option<Organization>, DirectoryRepositoryError>;

    /// Returns every phone entry of the organization, duplicates included.
    async fn find_phones_by_organization(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<String>, DirectoryRepositoryError>;

    /// Returns the activities linked directly to the organization, in link order.
    ///
    /// # Errors
    ///
    /// `DanglingReference` if a link names an activity that does not exist.
    async fn find_activities_by_organization(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<Activity>, DirectoryRepositoryError>;

    async fn find_building_by_id(
        &self,
        id: BuildingId,
    ) -> Result<Option<Building>, DirectoryRepositoryError>;

    async fn find_all_buildings(&self) -> Result<Vec<Building>, DirectoryRepositoryError>;
}
