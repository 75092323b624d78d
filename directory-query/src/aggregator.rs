//! Organization detail assembly.

use std::sync::Arc;

use directory_repository::DirectoryRepository;
use directory_shared::types::{OrganizationDetail, OrganizationId};
use tracing::{debug, error};

use crate::errors::DirectoryError;

/// Composes an organization's phones, direct activities and building into one record.
pub struct OrganizationAggregator {
    repository: Arc<dyn DirectoryRepository>,
}

impl OrganizationAggregator {
    pub fn new(repository: Arc<dyn DirectoryRepository>) -> Self {
        Self { repository }
    }

    /// Assemble the detail record of an organization.
    ///
    /// Phones, activities and the building are read concurrently once the organization is
    /// known. Activities are the directly linked ones only; phones keep duplicates.
    ///
    /// # Returns
    ///
    /// * `Ok(Some(OrganizationDetail))` - The assembled record
    /// * `Ok(None)` - If no organization has this id
    /// * `Err(DirectoryError::MissingBuilding)` - If the referenced building does not exist
    /// * `Err(DirectoryError::Repository)` - If a store read fails
    pub async fn get_detail(
        &self,
        organization_id: OrganizationId,
    ) -> Result<Option<OrganizationDetail>, DirectoryError> {
        let Some(organization) = self
            .repository
            .find_organization_by_id(organization_id)
            .await?
        else {
            debug!(organization_id, "Organization not found");
            return Ok(None);
        };

        let (phones, activities, building) = tokio::try_join!(
            self.repository.find_phones_by_organization(organization.id),
            self.repository.find_activities_by_organization(organization.id),
            self.repository.find_building_by_id(organization.building_id),
        )?;

        let Some(building) = building else {
            error!(
                organization_id = organization.id,
                building_id = organization.building_id,
                "Organization references a missing building"
            );
            return Err(DirectoryError::missing_building(
                organization.id,
                organization.building_id,
            ));
        };

        Ok(Some(OrganizationDetail {
            id: organization.id,
            name: organization.name,
            phones,
            building,
            activities,
        }))
    }
}
