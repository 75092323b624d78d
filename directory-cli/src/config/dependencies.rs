use std::sync::Arc;

use directory_query::{DirectoryQueryService, DirectoryServiceConfig};
use directory_repository::PostgresDirectoryRepository;
use tracing::info;

use crate::config::Settings;
use crate::errors::CliError;

/// `Dependencies` holds the components a CLI run needs.
pub struct Dependencies {
    pub service: DirectoryQueryService,
}

impl Dependencies {
    /// Creates a new `Dependencies` instance.
    ///
    /// Opens the PostgreSQL pool described by `settings` and wraps it in a
    /// `DirectoryQueryService`.
    ///
    /// # Returns
    ///
    /// A `Result` which is `Ok(Self)` on successful initialization or a
    /// `CliError` if the database cannot be reached.
    pub async fn new(settings: &Settings) -> Result<Self, CliError> {
        info!(
            database = ?settings.database,
            max_connections = settings.max_connections,
            subtree_strategy = ?settings.subtree_strategy,
            "Initializing dependencies"
        );

        let options = settings.database.connect_options()?;
        let repository =
            PostgresDirectoryRepository::connect(options, settings.max_connections).await?;

        let service = DirectoryQueryService::with_config(
            Arc::new(repository),
            DirectoryServiceConfig::with_subtree_strategy(settings.subtree_strategy),
        );

        Ok(Dependencies { service })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{DatabaseConfig, DEFAULT_MAX_CONNECTIONS};
    use directory_query::SubtreeStrategy;

    #[tokio::test]
    async fn test_dependencies_new_invalid_database_url() {
        let settings = Settings {
            database: DatabaseConfig::Url("invalid-database-url".to_string()),
            max_connections: DEFAULT_MAX_CONNECTIONS,
            subtree_strategy: SubtreeStrategy::PerLevel,
        };

        let result = Dependencies::new(&settings).await;

        assert!(matches!(result, Err(CliError::Database(_))));
    }
}
