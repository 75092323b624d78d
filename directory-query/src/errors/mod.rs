//! Error types for the directory query engine.

use directory_repository::DirectoryRepositoryError;
use directory_shared::types::{BuildingId, OrganizationId};
use thiserror::Error;

/// Errors surfaced by the directory query engine.
///
/// An unknown organization is not an error: `get_detail` returns `Ok(None)` for it.
#[derive(Error, Debug)]
pub enum DirectoryError {
    /// Error from the underlying data store.
    #[error("Repository error: {0}")]
    Repository(#[from] DirectoryRepositoryError),

    /// An organization references a building that does not exist.
    #[error("Data integrity error: organization {organization_id} references missing building {building_id}")]
    MissingBuilding {
        organization_id: OrganizationId,
        building_id: BuildingId,
    },
}

impl DirectoryError {
    /// Create a missing building error.
    pub fn missing_building(organization_id: OrganizationId, building_id: BuildingId) -> Self {
        Self::MissingBuilding {
            organization_id,
            building_id,
        }
    }

    /// Returns true if the error reports stored data that violates its own invariants,
    /// as opposed to a store failure.
    pub fn is_integrity_violation(&self) -> bool {
        match self {
            Self::MissingBuilding { .. } => true,
            Self::Repository(err) => err.is_integrity_violation(),
        }
    }
}
