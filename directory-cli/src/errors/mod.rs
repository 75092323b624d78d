//! Error types for the directory CLI.
//! Consolidates errors from configuration, the data store and the query engine.
use directory_query::DirectoryError;
use directory_repository::DirectoryRepositoryError;
use directory_shared::types::OrganizationId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Repository error: {0}")]
    Repository(#[from] DirectoryRepositoryError),

    #[error("Query error: {0}")]
    Query(#[from] DirectoryError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Organization not found: {organization_id}")]
    NotFound { organization_id: OrganizationId },
}

impl CliError {
    /// Create a configuration error.
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }
}
