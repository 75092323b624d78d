//! Integration tests for the PostgreSQL directory repository.
//!
//! These tests require a real PostgreSQL database reachable through `DATABASE_URL`
//! and are ignored by default. Each test gets a fresh database with the fixtures applied.
//!
//! Run with: `cargo test --test postgres_integration -- --ignored`

use directory_repository::{DirectoryRepository, PostgresDirectoryRepository};
use directory_shared::types::BoundingBox;

async fn repository(pool: sqlx::PgPool) -> PostgresDirectoryRepository {
    PostgresDirectoryRepository::new(pool).await.unwrap()
}

// ============================================================================
// Activity Tests
// ============================================================================

#[sqlx::test(migrations = false, fixtures("schema", "directory"))]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
async fn test_find_activity_children(pool: sqlx::PgPool) {
    let repository = repository(pool).await;

    let children = repository.find_activity_children(6).await.unwrap();
    let ids: Vec<_> = children.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![7, 8]);
    assert!(children.iter().all(|a| a.level == 3));

    assert!(repository.find_activity_children(7).await.unwrap().is_empty());
    assert!(repository.find_activity_children(999).await.unwrap().is_empty());
}

#[sqlx::test(migrations = false, fixtures("schema", "directory"))]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
async fn test_find_all_activities(pool: sqlx::PgPool) {
    let repository = repository(pool).await;

    let activities = repository.find_all_activities().await.unwrap();

    assert_eq!(activities.len(), 8);
    assert!(activities[0].is_root());
}

// ============================================================================
// Organization Tests
// ============================================================================

#[sqlx::test(migrations = false, fixtures("schema", "directory"))]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
async fn test_find_organizations_by_building(pool: sqlx::PgPool) {
    let repository = repository(pool).await;

    let organizations = repository.find_organizations_by_building(1).await.unwrap();

    let ids: Vec<_> = organizations.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![2, 4]);
    assert!(organizations.iter().all(|o| o.building.id == 1));
    assert_eq!(organizations[0].building.address, "г. Москва, ул. Ленина 1, офис 3");
}

#[sqlx::test(migrations = false, fixtures("schema", "directory"))]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
async fn test_find_organizations_by_activity_ids(pool: sqlx::PgPool) {
    let repository = repository(pool).await;

    let organizations = repository
        .find_organizations_by_activity_ids(&[1, 2, 3])
        .await
        .unwrap();

    let ids: Vec<_> = organizations.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 2, 4]);

    let none = repository.find_organizations_by_activity_ids(&[]).await.unwrap();
    assert!(none.is_empty());
}

#[sqlx::test(migrations = false, fixtures("schema", "directory"))]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
async fn test_find_organizations_in_bounds(pool: sqlx::PgPool) {
    let repository = repository(pool).await;

    let inside = repository
        .find_organizations_in_bounds(&BoundingBox::new(54.0, 56.0, 36.0, 38.0))
        .await
        .unwrap();
    let ids: Vec<_> = inside.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![2, 3, 4]);

    let edge = repository
        .find_organizations_in_bounds(&BoundingBox::new(55.0, 55.0, 82.0, 82.0))
        .await
        .unwrap();
    let ids: Vec<_> = edge.iter().map(|o| o.id).collect();
    assert_eq!(ids, vec![1, 5]);
}

#[sqlx::test(migrations = false, fixtures("schema", "directory"))]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
async fn test_find_organizations_by_name_substring(pool: sqlx::PgPool) {
    let repository = repository(pool).await;

    let all = repository.find_organizations_by_name_substring("").await.unwrap();
    assert_eq!(all.len(), 5);

    let percent = repository
        .find_organizations_by_name_substring("100%")
        .await
        .unwrap();
    assert_eq!(percent.len(), 1);
    assert_eq!(percent[0].id, 5);

    let wildcard = repository.find_organizations_by_name_substring("_").await.unwrap();
    assert!(wildcard.is_empty());
}

// ============================================================================
// Detail Lookup Tests
// ============================================================================

#[sqlx::test(migrations = false, fixtures("schema", "directory"))]
#[ignore = "requires a PostgreSQL database in DATABASE_URL"]
async fn test_detail_lookups(pool: sqlx::PgPool) {
    let repository = repository(pool).await;

    let organization = repository.find_organization_by_id(1).await.unwrap().unwrap();
    assert_eq!(organization.building_id, 2);
    assert!(repository.find_organization_by_id(999).await.unwrap().is_none());

    let phones = repository.find_phones_by_organization(1).await.unwrap();
    assert_eq!(phones, vec!["79932992939", "79991234567", "79991234567"]);

    let activities = repository.find_activities_by_organization(3).await.unwrap();
    let ids: Vec<_> = activities.iter().map(|a| a.id).collect();
    assert_eq!(ids, vec![7, 8]);

    let building = repository.find_building_by_id(2).await.unwrap().unwrap();
    assert_eq!(building.longitude, 82.0);
    assert!(repository.find_building_by_id(999).await.unwrap().is_none());

    assert_eq!(repository.find_all_buildings().await.unwrap().len(), 3);
}
