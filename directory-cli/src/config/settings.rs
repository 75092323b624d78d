//! Process-wide settings read once from the environment.

use std::env;
use std::fmt;
use std::str::FromStr;

use directory_query::SubtreeStrategy;
use sqlx::postgres::PgConnectOptions;
use tracing::warn;

use crate::errors::CliError;

/// Default size of the PostgreSQL connection pool.
pub const DEFAULT_MAX_CONNECTIONS: u32 = 20;

/// How the database connection is described.
#[derive(Clone, PartialEq, Eq)]
pub enum DatabaseConfig {
    /// A full `postgres://` URL.
    Url(String),
    /// Individual connection parameters.
    Parts {
        user: String,
        password: String,
        database: String,
        host: String,
        port: u16,
    },
}

impl DatabaseConfig {
    /// Build sqlx connect options from this configuration.
    pub fn connect_options(&self) -> Result<PgConnectOptions, CliError> {
        match self {
            Self::Url(url) => Ok(PgConnectOptions::from_str(url)?),
            Self::Parts {
                user,
                password,
                database,
                host,
                port,
            } => Ok(PgConnectOptions::new()
                .host(host)
                .port(*port)
                .username(user)
                .password(password)
                .database(database)),
        }
    }
}

// Credentials never reach the logs.
impl fmt::Debug for DatabaseConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Url(_) => f.debug_tuple("Url").field(&"<redacted>").finish(),
            Self::Parts {
                user,
                database,
                host,
                port,
                ..
            } => f
                .debug_struct("Parts")
                .field("user", user)
                .field("password", &"<redacted>")
                .field("database", database)
                .field("host", host)
                .field("port", port)
                .finish(),
        }
    }
}

/// Output format of the log subscriber.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Human-readable console output.
    #[default]
    Pretty,
    /// One JSON object per event.
    Json,
}

impl LogFormat {
    /// Parse the log format from the `LOG_FORMAT` environment variable.
    ///
    /// Read on its own, ahead of [`Settings`], so the subscriber exists before settings
    /// parsing logs anything. "json" (case-insensitive) selects JSON; anything else,
    /// including an unset or blank variable, selects console output.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Parse the log format through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        match lookup("LOG_FORMAT") {
            Some(value) if value.trim().eq_ignore_ascii_case("json") => Self::Json,
            _ => Self::Pretty,
        }
    }
}

/// Immutable settings for one run of the CLI.
#[derive(Debug, Clone, PartialEq)]
pub struct Settings {
    pub database: DatabaseConfig,
    pub max_connections: u32,
    pub subtree_strategy: SubtreeStrategy,
}

impl Settings {
    /// Read settings from the process environment.
    ///
    /// # Environment Variables
    ///
    /// - `DATABASE_URL`: full PostgreSQL URL; takes precedence when set
    /// - `POSTGRES_USER`, `POSTGRES_PASSWORD`, `POSTGRES_DB`, `DB_HOST`, `DB_PORT`:
    ///   required when `DATABASE_URL` is not set
    /// - `DB_MAX_CONNECTIONS`: pool size (default: 20)
    /// - `ACTIVITY_SUBTREE_STRATEGY`: "per-level" or "indexed" (default: per-level)
    ///
    /// # Returns
    ///
    /// * `Ok(Settings)` - Parsed settings
    /// * `Err(CliError::Config)` - If a required variable is missing or malformed
    pub fn from_env() -> Result<Self, CliError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Read settings through `lookup`, which maps a variable name to its value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, CliError> {
        let lookup = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());
        let required = |key: &str| {
            lookup(key).ok_or_else(|| CliError::config(format!("{key} must be set")))
        };

        let database = match lookup("DATABASE_URL") {
            Some(url) => DatabaseConfig::Url(url),
            None => {
                let port = required("DB_PORT")?;
                DatabaseConfig::Parts {
                    user: required("POSTGRES_USER")?,
                    password: required("POSTGRES_PASSWORD")?,
                    database: required("POSTGRES_DB")?,
                    host: required("DB_HOST")?,
                    port: port.trim().parse::<u16>().map_err(|e| {
                        CliError::config(format!("DB_PORT must be a port number: {e}"))
                    })?,
                }
            }
        };

        let max_connections = match lookup("DB_MAX_CONNECTIONS") {
            None => DEFAULT_MAX_CONNECTIONS,
            Some(value) => match value.trim().parse::<u32>() {
                Ok(n) if n > 0 => n,
                _ => {
                    warn!(value = %value, "Invalid DB_MAX_CONNECTIONS, defaulting to {DEFAULT_MAX_CONNECTIONS}");
                    DEFAULT_MAX_CONNECTIONS
                }
            },
        };

        let subtree_strategy = match lookup("ACTIVITY_SUBTREE_STRATEGY") {
            None => SubtreeStrategy::default(),
            Some(value) => SubtreeStrategy::parse(&value).unwrap_or_else(|| {
                warn!(value = %value, "Invalid ACTIVITY_SUBTREE_STRATEGY, defaulting to 'per-level'");
                SubtreeStrategy::default()
            }),
        };

        Ok(Self {
            database,
            max_connections,
            subtree_strategy,
        })
    }
}
