//! PostgreSQL implementation of the directory repository.
//!
//! Reads the directory from five tables created outside this crate:
//!
//! - `activities`: the activity taxonomy (`id`, `name`, `parent_id`, `level`)
//! - `buildings`: addresses with `latitude` / `longitude` in degrees
//! - `organizations`: organizations with their `building_id`
//! - `organization_phones`: phone entries, duplicates allowed
//! - `organization_activities`: organization to activity links
//!
//! All statements are read-only and checked at runtime, so building this crate does not
//! need a live database.
use async_trait::async_trait;
use directory_shared::types::{
    Activity, ActivityId, BoundingBox, Building, BuildingId, Organization, OrganizationId,
    OrganizationWithBuilding,
};
use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use tracing::debug;

use super::rows::{
    ActivityRow, BuildingRow, LinkedActivityRow, OrganizationRow, OrganizationWithBuildingRow,
};
use crate::{DirectoryRepository, DirectoryRepositoryError};

const ORGANIZATION_WITH_BUILDING_COLUMNS: &str = "o.id, o.name, o.building_id, \
     b.address AS building_address, b.latitude AS building_latitude, b.longitude AS building_longitude";

/// PostgreSQL implementation of the directory repository.
///
/// Wraps a `sqlx::PgPool`; the pool is shared by every query and may be cloned
/// cheaply by callers that need it elsewhere.
pub struct PostgresDirectoryRepository {
    pool: sqlx::PgPool,
}

impl PostgresDirectoryRepository {
    /// Creates a new PostgreSQL repository instance.
    ///
    /// # Arguments
    ///
    /// * `pool` - Configured PostgreSQL connection pool with the directory schema
    ///
    /// # Returns
    ///
    /// * `Ok(PostgresDirectoryRepository)` - Ready-to-use repository instance
    /// * `Err(DirectoryRepositoryError)` - Future validation errors (currently always succeeds)
    pub async fn new(pool: sqlx::PgPool) -> Result<Self, DirectoryRepositoryError> {
        Ok(Self { pool })
    }

    /// Opens a connection pool with `options` and wraps it in a repository.
    pub async fn connect(
        options: PgConnectOptions,
        max_connections: u32,
    ) -> Result<Self, DirectoryRepositoryError> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect_with(options)
            .await?;

        Self::new(pool).await
    }

    pub fn pool(&self) -> &sqlx::PgPool {
        &self.pool
    }
}

/// Builds an `ILIKE` pattern matching `fragment` anywhere, with `%`, `_` and `\`
/// taken literally.
pub(crate) fn contains_pattern(fragment: &str) -> String {
    let mut pattern = String::with_capacity(fragment.len() + 2);
    pattern.push('%');
    for c in fragment.chars() {
        if matches!(c, '%' | '_' | '\\') {
            pattern.push('\\');
        }
        pattern.push(c);
    }
    pattern.push('%');
    pattern
}

#[async_trait]
impl DirectoryRepository for PostgresDirectoryRepository {
    async fn find_activity_children(
        &self,
        parent_id: ActivityId,
    ) -> Result<Vec<Activity>, DirectoryRepositoryError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            "SELECT id, name, parent_id, level FROM activities WHERE parent_id = $1 ORDER BY id",
        )
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Activity::from).collect())
    }

    async fn find_all_activities(&self) -> Result<Vec<Activity>, DirectoryRepositoryError> {
        let rows = sqlx::query_as::<_, ActivityRow>(
            "SELECT id, name, parent_id, level FROM activities ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Activity::from).collect())
    }

    async fn find_organizations_by_building(
        &self,
        building_id: BuildingId,
    ) -> Result<Vec<OrganizationWithBuilding>, DirectoryRepositoryError> {
        let sql = format!(
            "SELECT {ORGANIZATION_WITH_BUILDING_COLUMNS} \
             FROM organizations o JOIN buildings b ON b.id = o.building_id \
             WHERE o.building_id = $1 ORDER BY o.id"
        );
        let rows = sqlx::query_as::<_, OrganizationWithBuildingRow>(&sql)
            .bind(building_id)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(OrganizationWithBuilding::from).collect())
    }

    async fn find_organizations_by_activity_ids(
        &self,
        activity_ids: &[ActivityId],
    ) -> Result<Vec<Organization>, DirectoryRepositoryError> {
        if activity_ids.is_empty() {
            return Ok(Vec::new());
        }

        let rows = sqlx::query_as::<_, OrganizationRow>(
            r#"
            SELECT DISTINCT o.id, o.name, o.building_id
            FROM organizations o
            JOIN organization_activities oa ON oa.organization_id = o.id
            WHERE oa.activity_id = ANY($1)
            ORDER BY o.id
            "#,
        )
        .bind(activity_ids)
        .fetch_all(&self.pool)
        .await?;

        debug!(
            activity_count = activity_ids.len(),
            organization_count = rows.len(),
            "Fetched organizations by activity ids"
        );

        Ok(rows.into_iter().map(Organization::from).collect())
    }

    async fn find_organizations_in_bounds(
        &self,
        bounds: &BoundingBox,
    ) -> Result<Vec<OrganizationWithBuilding>, DirectoryRepositoryError> {
        let sql = format!(
            "SELECT {ORGANIZATION_WITH_BUILDING_COLUMNS} \
             FROM organizations o JOIN buildings b ON b.id = o.building_id \
             WHERE b.latitude >= $1 AND b.latitude <= $2 \
             AND b.longitude >= $3 AND b.longitude <= $4 \
             ORDER BY o.id"
        );
        let rows = sqlx::query_as::<_, OrganizationWithBuildingRow>(&sql)
            .bind(bounds.lat_min)
            .bind(bounds.lat_max)
            .bind(bounds.lon_min)
            .bind(bounds.lon_max)
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.into_iter().map(OrganizationWithBuilding::from).collect())
    }

    async fn find_organizations_by_name_substring(
        &self,
        fragment: &str,
    ) -> Result<Vec<Organization>, DirectoryRepositoryError> {
        let rows = sqlx::query_as::<_, OrganizationRow>(
            "SELECT id, name, building_id FROM organizations WHERE name ILIKE $1 ORDER BY id",
        )
        .bind(contains_pattern(fragment))
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Organization::from).collect())
    }

    async fn find_organization_by_id(
        &self,
        id: OrganizationId,
    ) -> Result<Option<Organization>, DirectoryRepositoryError> {
        let row = sqlx::query_as::<_, OrganizationRow>(
            "SELECT id, name, building_id FROM organizations WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Organization::from))
    }

    async fn find_phones_by_organization(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<String>, DirectoryRepositoryError> {
        let phones = sqlx::query_scalar::<_, String>(
            "SELECT phone FROM organization_phones WHERE organization_id = $1 ORDER BY id",
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        Ok(phones)
    }

    async fn find_activities_by_organization(
        &self,
        id: OrganizationId,
    ) -> Result<Vec<Activity>, DirectoryRepositoryError> {
        let rows = sqlx::query_as::<_, LinkedActivityRow>(
            r#"
            SELECT oa.activity_id AS link_activity_id, a.id, a.name, a.parent_id, a.level
            FROM organization_activities oa
            LEFT JOIN activities a ON a.id = oa.activity_id
            WHERE oa.organization_id = $1
            ORDER BY oa.id
            "#,
        )
        .bind(id)
        .fetch_all(&self.pool)
        .await?;

        rows.into_iter()
            .map(|row| {
                let activity_id = row.link_activity_id;
                row.into_activity().ok_or_else(|| {
                    DirectoryRepositoryError::dangling("organization", id, "activity", activity_id)
                })
            })
            .collect()
    }

    async fn find_building_by_id(
        &self,
        id: BuildingId,
    ) -> Result<Option<Building>, DirectoryRepositoryError> {
        let row = sqlx::query_as::<_, BuildingRow>(
            "SELECT id, address, latitude, longitude FROM buildings WHERE id = $1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(Building::from))
    }

    async fn find_all_buildings(&self) -> Result<Vec<Building>, DirectoryRepositoryError> {
        let rows = sqlx::query_as::<_, BuildingRow>(
            "SELECT id, address, latitude, longitude FROM buildings ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await?;

        Ok(rows.into_iter().map(Building::from).collect())
    }
}
